//! Implementations of the deployment and task commands

use std::path::Path;

use tracing::info;

use crate::{
    cli::{CreateListingArgs, DeployArgs, MintArgs},
    contracts::{ArtifactDeployer, ChainClient, RpcClient},
    deployments::AddressResolver,
    errors::ScriptError,
    plan::{DeploymentParameters, DeploymentPlan},
    tasks::{self, ListingInvocation, MintInvocation, MintTaskKind},
    utils::{parse_address, parse_token_id},
};

/// Deploy the selected plan and write the deployment record for the connected chain
pub async fn deploy(
    args: DeployArgs,
    client: &RpcClient,
    deployments_dir: &Path,
) -> Result<(), ScriptError> {
    let plan = DeploymentPlan::new(args.plan);
    info!(
        "Deploying {} ({}) with signer: {:#x}",
        plan.module_name(),
        plan.kind(),
        client.signer_address()
    );

    let chain_id = client.chain_id().await?;
    let params = DeploymentParameters::from_file(&args.parameters, plan.module_name())?;

    let deployer = ArtifactDeployer::new(client, args.artifacts_dir);
    let record = plan.execute(&params, &deployer).await?;

    let path = record.write(deployments_dir, chain_id)?;
    info!("Deployment record written to {}", path.display());

    Ok(())
}

/// Run the mint task on the connected chain
pub async fn mint(
    args: MintArgs,
    client: &RpcClient,
    deployments_dir: &Path,
) -> Result<(), ScriptError> {
    let invocation = MintInvocation {
        to: parse_address(&args.to)?,
        kind: MintTaskKind::from_level(args.lvl),
    };

    let chain_id = client.chain_id().await?;
    let resolver = AddressResolver::new(deployments_dir);
    tasks::mint(client, &resolver, chain_id, invocation).await?;

    Ok(())
}

/// Run the create-listing task on the connected chain
pub async fn create_listing(
    args: CreateListingArgs,
    client: &RpcClient,
    deployments_dir: &Path,
) -> Result<(), ScriptError> {
    let invocation = ListingInvocation {
        token_id: parse_token_id(&args.tokenid)?,
        price: args.price,
    };

    let chain_id = client.chain_id().await?;
    let resolver = AddressResolver::new(deployments_dir);
    tasks::create_listing(client, &resolver, chain_id, invocation).await?;

    Ok(())
}
