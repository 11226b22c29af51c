//! Definitions of CLI arguments and commands for the deployment and task scripts

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::{
    commands::{create_listing, deploy, mint},
    constants::{DEFAULT_ARTIFACTS_DIR, DEFAULT_DEPLOYMENTS_DIR},
    contracts::RpcClient,
    errors::ScriptError,
    types::{Network, PlanKind},
};

/// Deploy the token and marketplace contracts, and run operator tasks against them
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Private key of the signer
    #[arg(long = "pkey", env = "PKEY")]
    pub priv_key: String,

    /// Network RPC URL, takes precedence over `--network`
    #[arg(short, long, env = "RPC_URL")]
    pub rpc_url: Option<String>,

    /// Known network to connect to through Alchemy
    #[arg(short, long)]
    pub network: Option<Network>,

    /// Alchemy API key, required with `--network`
    #[arg(long, env = "ALCHEMY_API_KEY")]
    pub alchemy_api_key: Option<String>,

    /// Root directory of the per-chain deployment records
    #[arg(long, default_value = DEFAULT_DEPLOYMENTS_DIR)]
    pub deployments_dir: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The available commands
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the contracts and record their addresses for the connected chain
    Deploy(DeployArgs),
    /// Mint a new token
    Mint(MintArgs),
    /// Approve the marketplace for a token and list it for sale
    CreateListing(CreateListingArgs),
}

impl Command {
    /// Run the command against the connected chain
    pub async fn run(self, client: &RpcClient, deployments_dir: &Path) -> Result<(), ScriptError> {
        match self {
            Command::Deploy(args) => deploy(args, client, deployments_dir).await,
            Command::Mint(args) => mint(args, client, deployments_dir).await,
            Command::CreateListing(args) => create_listing(args, client, deployments_dir).await,
        }
    }
}

/// Deploy the contracts of a deployment plan
#[derive(Args)]
pub struct DeployArgs {
    /// The plan variant to deploy
    #[arg(long, default_value_t = PlanKind::TokenAndMarketplace)]
    pub plan: PlanKind,

    /// Path to the JSON file holding the deployment parameters
    #[arg(long)]
    pub parameters: PathBuf,

    /// Directory containing the compiled contract artifacts
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,
}

/// Mint a token
#[derive(Args)]
pub struct MintArgs {
    /// The address to mint to
    #[arg(long)]
    pub to: String,

    /// The level of the token (1 or 2), omitted for contracts without levels
    #[arg(long)]
    pub lvl: Option<u64>,
}

/// List a token for sale
#[derive(Args)]
pub struct CreateListingArgs {
    /// The id of the token to list, in decimal or `0x`-prefixed hex
    #[arg(long)]
    pub tokenid: String,

    /// The price, as a decimal in the chain's native unit
    #[arg(long)]
    pub price: String,
}
