//! Deployment sequencing for the contributor stack and the vesting stage.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use alloy_core::primitives::{Address, Bytes};

use crate::{
    cache::{self, CacheFile, SideCache},
    config::{DeploymentConfig, DeploymentConfigFile},
    deployer::{ContractDeployer, ContractKind},
    encode,
    error::DeployError,
    network::Network,
    peer::PeerSources,
    registry::{ContributorDeploymentRecord, DeploymentRegistry, REGISTRY_FILENAME},
    vesting::{VESTING_REGISTRY_FILENAME, VestingDeploymentRecord, VestingRegistry},
};

/// The file name of the shared devnet bootstrap file.
pub const TILT_FILENAME: &str = "tilt.json";
/// The file name of the public testnet bootstrap file.
pub const TESTNET_FILENAME: &str = "testnet.json";

/// Locations of every artifact file the orchestrator reads or writes.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    /// Contributor deployment registry.
    pub registry: PathBuf,
    /// Vesting deployment registry.
    pub vesting_registry: PathBuf,
    /// Devnet bootstrap file, read for the conductor address and written
    /// with contributor addresses.
    pub tilt: PathBuf,
    /// Testnet bootstrap file, same double duty as tilt.
    pub testnet: PathBuf,
}

impl ArtifactPaths {
    /// Place every artifact file under one directory, using the standard
    /// file names.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            registry: root.join(REGISTRY_FILENAME),
            vesting_registry: root.join(VESTING_REGISTRY_FILENAME),
            tilt: root.join(TILT_FILENAME),
            testnet: root.join(TESTNET_FILENAME),
        }
    }
}

/// Addresses produced by one contributor deployment run.
///
/// `setup` and `proxy` are absent for implementation-only runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorDeployment {
    pub library: Address,
    pub implementation: Address,
    pub setup: Option<Address>,
    pub proxy: Option<Address>,
}

/// Orchestrates contributor and vesting deployments for one network.
///
/// One invocation targets one network and runs strictly sequentially:
/// each deployment step blocks until the collaborator deployer confirms,
/// and any failure aborts the run with already-deployed contracts left
/// as-is.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    pub network: Network,
    pub configs: DeploymentConfigFile,
    pub paths: ArtifactPaths,
}

impl Orchestrator {
    pub fn new(network: Network, configs: DeploymentConfigFile, paths: ArtifactPaths) -> Self {
        Self {
            network,
            configs,
            paths,
        }
    }

    fn peer_sources(&self) -> PeerSources {
        PeerSources {
            tilt_path: self.paths.tilt.clone(),
            testnet_path: self.paths.testnet.clone(),
        }
    }

    /// Deploy the contributor stack to the target network.
    ///
    /// Order is fixed: library, link, implementation, then for full
    /// deployments setup, proxy (with the encoded initialization payload),
    /// registry append, and finally the side cache update.
    pub async fn deploy_contributor<D: ContractDeployer>(
        &self,
        deployer: &mut D,
    ) -> Result<ContributorDeployment, DeployError> {
        let config = self.configs.resolve(&self.network)?;

        // Resolve the conductor before any on-chain action so an
        // unresolvable peer aborts the run with nothing deployed.
        let conductor = if config.deploy_implementation_only {
            None
        } else {
            Some(self.peer_sources().resolve(&self.network, deployer).await?)
        };

        tracing::info!(network = %self.network, "Deploying ICCOStructs library...");
        let library = deployer.deploy_library().await?;
        deployer
            .link_library(library, ContractKind::Implementation)
            .await?;

        tracing::info!("Deploying contributor implementation...");
        let implementation = deployer
            .deploy_contract(ContractKind::Implementation, Bytes::new())
            .await?;

        let mut deployment = ContributorDeployment {
            library,
            implementation,
            setup: None,
            proxy: None,
        };

        if let Some(conductor) = conductor {
            tracing::info!("Deploying contributor setup...");
            let setup = deployer
                .deploy_contract(ContractKind::Setup, Bytes::new())
                .await?;

            let init_data = encode::contributor_init_data(implementation, config, &conductor);

            tracing::info!("Deploying contributor proxy...");
            let proxy = deployer
                .deploy_contract(
                    ContractKind::Proxy,
                    encode::proxy_constructor_args(setup, &init_data),
                )
                .await?;

            deployment.setup = Some(setup);
            deployment.proxy = Some(proxy);

            let record =
                build_record(&self.network, config, library, implementation, setup, proxy);
            DeploymentRegistry::new(&self.paths.registry).append(record)?;
        }

        self.update_side_cache(config, &deployment)?;

        tracing::info!(
            network = %self.network,
            implementation = %deployment.implementation,
            proxy = ?deployment.proxy,
            "Contributor deployment complete"
        );

        Ok(deployment)
    }

    /// Write the deployed address into the bootstrap cache used by
    /// external tooling. Networks without a cache slot are skipped.
    fn update_side_cache(
        &self,
        config: &DeploymentConfig,
        deployment: &ContributorDeployment,
    ) -> Result<(), DeployError> {
        let Some(entry) = cache::cache_entry(
            &self.network,
            config.deploy_implementation_only,
            deployment.implementation,
            deployment.proxy,
        ) else {
            return Ok(());
        };

        let cache = match entry.file {
            CacheFile::Tilt => SideCache::new(&self.paths.tilt),
            CacheFile::Testnet => SideCache::new(&self.paths.testnet),
        };
        cache.set(&entry.key, entry.address.to_string())
    }

    /// Deploy a vesting wallet bound to the contributor previously
    /// recorded for the target network.
    pub async fn deploy_vesting<D: ContractDeployer>(
        &self,
        deployer: &mut D,
    ) -> Result<VestingDeploymentRecord, DeployError> {
        let config = self.configs.resolve(&self.network)?;

        let contributor =
            DeploymentRegistry::new(&self.paths.registry).lookup_one(&self.network)?;
        let schedule = config.vesting.unwrap_or_default();

        tracing::info!(
            network = %self.network,
            contributor = %contributor.address,
            "Deploying vesting wallet..."
        );

        let vesting = deployer
            .deploy_contract(
                ContractKind::Vesting,
                encode::vesting_constructor_args(&schedule, contributor.address),
            )
            .await?;

        let record = VestingDeploymentRecord {
            network: self.network.to_string(),
            chain: config.contributor_chain_id,
            contract_address: vesting,
            parameters: schedule,
            creation_epoch: chrono::Utc::now().timestamp_millis() as f64 / 1000.0,
        };

        VestingRegistry::new(&self.paths.vesting_registry).append(record.clone())?;

        Ok(record)
    }
}

/// Build the registry record for a full deployment.
fn build_record(
    network: &Network,
    config: &DeploymentConfig,
    library: Address,
    implementation: Address,
    setup: Address,
    proxy: Address,
) -> ContributorDeploymentRecord {
    let roles = [
        (ContractKind::Structs, library),
        (ContractKind::Implementation, implementation),
        (ContractKind::Setup, setup),
        (ContractKind::Proxy, proxy),
    ];

    let mut contracts = BTreeMap::new();
    let mut verification = BTreeMap::new();
    for (kind, address) in roles {
        contracts.insert(kind.to_string(), address);
        verification.insert(
            kind.to_string(),
            format!("truffle run verify {kind}@{address} --network={network}"),
        );
    }

    ContributorDeploymentRecord {
        network: network.to_string(),
        chain: config.contributor_chain_id,
        address: proxy,
        contracts,
        verification,
    }
}
