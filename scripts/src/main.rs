use clap::Parser;
use octo_scripts::{cli::Cli, config::resolve_rpc_url, errors::ScriptError, utils::setup_client};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ScriptError> {
    let Cli {
        priv_key,
        rpc_url,
        network,
        alchemy_api_key,
        deployments_dir,
        command,
    } = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let rpc_url = resolve_rpc_url(rpc_url.as_deref(), network, alchemy_api_key.as_deref())?;
    let client = setup_client(&priv_key, &rpc_url)?;

    command.run(&client, &deployments_dir).await
}
