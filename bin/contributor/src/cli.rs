use std::path::PathBuf;

use clap::{Parser, Subcommand};
use contributor_deploy::{CONFIG_FILENAME, Network};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "contributor")]
#[command(
    author,
    version,
    about = "Deploy the ICCO contributor stack and record the results"
)]
pub struct Cli {
    /// The verbosity level.
    #[arg(short, long, env = "CONTRIBUTOR_VERBOSITY", default_value_t = LevelFilter::INFO)]
    pub verbosity: LevelFilter,

    /// Path to the per-network deployment configuration file.
    #[arg(short, long, env = "CONTRIBUTOR_CONFIG", default_value = CONFIG_FILENAME)]
    pub config: PathBuf,

    /// Directory holding the registry and bootstrap artifact files
    /// (deployedAddresses.json, vestingAddresses.json, tilt.json,
    /// testnet.json).
    #[arg(long, env = "CONTRIBUTOR_ARTIFACTS", default_value = ".")]
    pub artifacts: PathBuf,

    /// Root of the foundry project with the contract sources.
    #[arg(long, env = "CONTRIBUTOR_CONTRACTS_DIR", default_value = "ethereum")]
    pub contracts_dir: PathBuf,

    /// The RPC endpoint of the target network.
    #[arg(long, alias = "rpc", env = "ETH_RPC_URL")]
    pub rpc_url: String,

    /// The deployer's private key.
    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Deploy the contributor stack to a network.
    Deploy {
        /// The target network.
        #[arg(short, long, env = "CONTRIBUTOR_NETWORK")]
        network: Network,
    },
    /// Deploy a vesting wallet bound to an already-deployed contributor.
    Vesting {
        /// The target network.
        #[arg(short, long, env = "CONTRIBUTOR_NETWORK")]
        network: Network,
    },
}
