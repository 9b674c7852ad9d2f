//! End-to-end tests for contributor-deploy.
//!
//! These drive the orchestrator through its public API with an in-test
//! deployer, simulating the real usage pattern: one process invocation per
//! network, all sharing the same artifact directory.
//! Run with: cargo test --test integration_test

use std::collections::HashMap;
use std::path::Path;

use alloy_core::primitives::{Address, Bytes};
use contributor_deploy::{
    ArtifactPaths, ContractDeployer, ContractKind, DeployError, DeploymentConfig,
    DeploymentConfigFile, DeploymentRegistry, Network, Orchestrator, VestingRegistry,
};
use tempdir::TempDir;

/// Deployer that derives addresses from a per-network seed byte.
struct StaticDeployer {
    seed: u8,
    deployed: u8,
    existing: HashMap<ContractKind, Address>,
}

impl StaticDeployer {
    fn new(seed: u8) -> Self {
        Self {
            seed,
            deployed: 0,
            existing: HashMap::new(),
        }
    }

    fn next_address(&mut self) -> Address {
        self.deployed += 1;
        let mut bytes = [0u8; 20];
        bytes[0] = self.seed;
        bytes[19] = self.deployed;
        Address::from(bytes)
    }
}

impl ContractDeployer for StaticDeployer {
    async fn deploy_library(&mut self) -> Result<Address, DeployError> {
        Ok(self.next_address())
    }

    async fn link_library(
        &mut self,
        _library: Address,
        _target: ContractKind,
    ) -> Result<(), DeployError> {
        Ok(())
    }

    async fn deploy_contract(
        &mut self,
        contract: ContractKind,
        _constructor_args: Bytes,
    ) -> Result<Address, DeployError> {
        let address = self.next_address();
        self.existing.insert(contract, address);
        Ok(address)
    }

    async fn deployed_address(
        &self,
        contract: ContractKind,
    ) -> Result<Option<Address>, DeployError> {
        Ok(self.existing.get(&contract).copied())
    }
}

fn config_for(chain: u16, implementation_only: bool) -> DeploymentConfig {
    DeploymentConfig {
        contributor_chain_id: chain,
        conductor_chain_id: 2,
        wormhole: Address::repeat_byte(0xa0),
        token_bridge: Address::repeat_byte(0xb0),
        consistency_level: 15,
        deploy_implementation_only: implementation_only,
        vesting: None,
    }
}

fn config_file() -> DeploymentConfigFile {
    let mut configs = DeploymentConfigFile::default();
    configs
        .networks
        .insert("goerli".to_string(), config_for(2, false));
    configs
        .networks
        .insert("mumbai".to_string(), config_for(5, false));
    configs
        .networks
        .insert("fuji".to_string(), config_for(6, true));
    configs
}

fn seed_testnet_conductor(artifacts: &Path) {
    std::fs::write(
        artifacts.join("testnet.json"),
        r#"{"conductorAddress": "0x5f8e26facc23fa4cbd87b8d9dbbd33d5047abde1"}"#,
    )
    .unwrap();
}

/// One full run per network against a shared artifact directory, followed
/// by a vesting run consuming the registry: the shape of a real rollout.
#[tokio::test]
async fn test_multi_network_rollout_and_vesting() {
    let dir = TempDir::new("rollout").unwrap();
    seed_testnet_conductor(dir.path());

    for (seed, network) in [(0x10, Network::Goerli), (0x20, Network::Mumbai)] {
        let orchestrator = Orchestrator::new(
            network,
            config_file(),
            ArtifactPaths::under(dir.path()),
        );
        orchestrator
            .deploy_contributor(&mut StaticDeployer::new(seed))
            .await
            .unwrap();
    }

    // An implementation-only run for fuji must not touch the registry.
    let orchestrator = Orchestrator::new(
        Network::Fuji,
        config_file(),
        ArtifactPaths::under(dir.path()),
    );
    orchestrator
        .deploy_contributor(&mut StaticDeployer::new(0x30))
        .await
        .unwrap();

    let registry = DeploymentRegistry::new(dir.path().join("deployedAddresses.json"));
    let contents = registry.load().unwrap();
    assert_eq!(contents.contributor.len(), 2);
    assert_eq!(contents.contributor[0].network, "goerli");
    assert_eq!(contents.contributor[1].network, "mumbai");
    assert_eq!(contents.contributor[1].chain, 5);

    // All three runs left their addresses in the testnet cache.
    let cache: HashMap<String, String> =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("testnet.json")).unwrap())
            .unwrap();
    assert!(cache.contains_key("goerli"));
    assert!(cache.contains_key("mumbai"));
    assert!(cache.contains_key("fujiContributorImplementation"));
    assert!(cache.contains_key("conductorAddress"));

    // The vesting stage picks up the recorded mumbai contributor.
    let orchestrator = Orchestrator::new(
        Network::Mumbai,
        config_file(),
        ArtifactPaths::under(dir.path()),
    );
    let record = orchestrator
        .deploy_vesting(&mut StaticDeployer::new(0x40))
        .await
        .unwrap();
    assert_eq!(record.network, "mumbai");
    assert_eq!(record.chain, 5);

    let vesting = VestingRegistry::new(dir.path().join("vestingAddresses.json"));
    assert_eq!(vesting.load().unwrap().vesting.len(), 1);
}

/// Re-deploying the same network leaves the earlier record in place and
/// makes subsequent vesting lookups ambiguous.
#[tokio::test]
async fn test_repeated_runs_append_and_break_vesting_lookup() {
    let dir = TempDir::new("rollout").unwrap();
    seed_testnet_conductor(dir.path());

    for seed in [0x10, 0x20] {
        let orchestrator = Orchestrator::new(
            Network::Goerli,
            config_file(),
            ArtifactPaths::under(dir.path()),
        );
        orchestrator
            .deploy_contributor(&mut StaticDeployer::new(seed))
            .await
            .unwrap();
    }

    let registry = DeploymentRegistry::new(dir.path().join("deployedAddresses.json"));
    let contents = registry.load().unwrap();
    assert_eq!(contents.contributor.len(), 2);
    assert_ne!(
        contents.contributor[0].address,
        contents.contributor[1].address
    );

    // The cache is last-write-wins: only the second proxy address remains.
    let cache: HashMap<String, String> =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("testnet.json")).unwrap())
            .unwrap();
    assert_eq!(
        cache["goerli"],
        contents.contributor[1].address.to_string()
    );

    let orchestrator = Orchestrator::new(
        Network::Goerli,
        config_file(),
        ArtifactPaths::under(dir.path()),
    );
    let err = orchestrator
        .deploy_vesting(&mut StaticDeployer::new(0x30))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DeployError::RegistryLookupAmbiguous { matches: 2, .. }
    ));
}
