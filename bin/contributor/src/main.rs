//! contributor is a CLI tool that deploys the ICCO contributor stack to a
//! target network and records the results in the shared JSON artifacts.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Command};
use contributor_deploy::{ArtifactPaths, DeploymentConfigFile, ForgeDeployer, Orchestrator};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the logger.
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity)
        .init();

    let configs = DeploymentConfigFile::load_from_file(&cli.config)
        .context("Failed to load deployment configuration")?;
    let paths = ArtifactPaths::under(&cli.artifacts);

    let mut deployer = ForgeDeployer::new(cli.rpc_url, cli.private_key, cli.contracts_dir);

    match cli.command {
        Command::Deploy { network } => {
            tracing::info!(network = %network, "Starting contributor deployment...");

            let orchestrator = Orchestrator::new(network, configs, paths);
            let deployment = orchestrator.deploy_contributor(&mut deployer).await?;

            tracing::info!(
                library = %deployment.library,
                implementation = %deployment.implementation,
                setup = ?deployment.setup,
                proxy = ?deployment.proxy,
                "Deployment complete"
            );
        }
        Command::Vesting { network } => {
            tracing::info!(network = %network, "Starting vesting deployment...");

            let orchestrator = Orchestrator::new(network, configs, paths);
            let record = orchestrator.deploy_vesting(&mut deployer).await?;

            tracing::info!(
                vesting = %record.contract_address,
                network = %record.network,
                "Vesting deployment complete"
            );
        }
    }

    Ok(())
}
