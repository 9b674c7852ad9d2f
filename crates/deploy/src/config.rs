//! Per-network deployment configuration.

use std::{collections::HashMap, path::Path};

use alloy_core::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{error::DeployError, network::Network, vesting::VestingSchedule};

/// The default name for the deployment configuration file.
pub const CONFIG_FILENAME: &str = "Contributor.toml";

/// Deployment parameters for a single network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// Wormhole chain id of the network being deployed to.
    pub contributor_chain_id: u16,
    /// Wormhole chain id of the network hosting the conductor.
    pub conductor_chain_id: u16,
    /// Address of the wormhole core bridge on this network.
    pub wormhole: Address,
    /// Address of the wormhole token bridge on this network.
    pub token_bridge: Address,
    /// Finality level the contributor requires for cross-chain messages.
    pub consistency_level: u8,
    /// Deploy only the logic contract behind an existing proxy, skipping
    /// setup, proxy, and registry append.
    #[serde(default)]
    pub deploy_implementation_only: bool,
    /// Vesting schedule for the vesting stage. Falls back to
    /// [`VestingSchedule::default`] when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vesting: Option<VestingSchedule>,
}

/// The full configuration file: one [`DeploymentConfig`] per network.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeploymentConfigFile {
    #[serde(default)]
    pub networks: HashMap<String, DeploymentConfig>,
}

impl DeploymentConfigFile {
    /// Load the configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, DeployError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| DeployError::file_io(path, e))?;
        let config: Self =
            toml::from_str(&contents).map_err(|e| DeployError::file_io(path, e))?;
        tracing::info!(path = %path.display(), networks = config.networks.len(), "Configuration loaded");
        Ok(config)
    }

    /// Resolve the config for a network, failing when none exists.
    ///
    /// Must be called before any address resolution or deployment step;
    /// a missing config aborts the run before any on-chain action or
    /// file write happens.
    pub fn resolve(&self, network: &Network) -> Result<&DeploymentConfig, DeployError> {
        self.networks
            .get(&network.to_string())
            .ok_or_else(|| DeployError::ConfigurationMissing {
                network: network.to_string(),
            })
    }
}
