//! contributor-deploy - Deployment orchestration for the ICCO Contributor.
//!
//! This crate sequences the contributor stack deployment across networks
//! (structs library, linked implementation, setup, proxy), resolves the
//! cross-chain conductor peer address per network class, and records every
//! run in append-only JSON registries shared with external tooling.

mod error;
pub use error::DeployError;

mod network;
pub use network::{Network, NetworkClass};

mod config;
pub use config::{CONFIG_FILENAME, DeploymentConfig, DeploymentConfigFile};

mod peer;
pub use peer::{PeerAddress, PeerSources};

mod deployer;
pub use deployer::{ContractDeployer, ContractKind};

pub mod encode;

mod registry;
pub use registry::{
    ContributorDeploymentRecord, DeploymentRegistry, REGISTRY_FILENAME, RegistryFile,
};

mod cache;
pub use cache::{CacheEntry, CacheFile, SideCache, cache_entry};

mod vesting;
pub use vesting::{
    VESTING_REGISTRY_FILENAME, VestingDeploymentRecord, VestingRegistry, VestingRegistryFile,
    VestingSchedule,
};

mod orchestrator;
pub use orchestrator::{
    ArtifactPaths, ContributorDeployment, Orchestrator, TESTNET_FILENAME, TILT_FILENAME,
};

mod forge;
pub use forge::ForgeDeployer;

mod fs;
