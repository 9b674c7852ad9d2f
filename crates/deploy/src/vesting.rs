//! Vesting deployment records and their registry.

use std::path::{Path, PathBuf};

use alloy_core::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::error::DeployError;

/// The file name of the vesting deployment registry.
pub const VESTING_REGISTRY_FILENAME: &str = "vestingAddresses.json";

/// Vesting schedule parameters, in seconds and whole percent.
///
/// Serialized field names match the VestingWallet constructor arguments as
/// recorded in the registry artifact; the snake_case aliases are accepted
/// in the TOML deployment config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingSchedule {
    #[serde(rename = "_cliffStartTimeInSeconds", alias = "cliff_start")]
    pub cliff_start: u64,
    #[serde(rename = "_cliffPercentage", alias = "cliff_percentage")]
    pub cliff_percentage: u64,
    #[serde(rename = "_linearStartTimeInSeconds", alias = "linear_start")]
    pub linear_start: u64,
    #[serde(rename = "_linearEndTimeInSeconds", alias = "linear_end")]
    pub linear_end: u64,
    #[serde(rename = "_linearReleasePeriodInSeconds", alias = "linear_period")]
    pub linear_period: u64,
}

impl Default for VestingSchedule {
    /// The schedule used by the original deployment runs: a 50% cliff one
    /// day before a ten-day linear release with daily periods.
    fn default() -> Self {
        Self {
            cliff_start: 1674218241,
            cliff_percentage: 50,
            linear_start: 1674304641,
            linear_end: 1675168641,
            linear_period: 86400,
        }
    }
}

/// One vesting deployment, as recorded in the vesting registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VestingDeploymentRecord {
    /// The network the vesting wallet was deployed to.
    pub network: String,
    /// Wormhole chain id of that network.
    pub chain: u16,
    /// Address of the deployed vesting wallet.
    #[serde(rename = "contractAddress")]
    pub contract_address: Address,
    /// The schedule the wallet was constructed with.
    #[serde(rename = "vestingParameters")]
    pub parameters: VestingSchedule,
    /// Creation time, seconds since epoch.
    #[serde(rename = "creationEPOCH")]
    pub creation_epoch: f64,
}

/// On-disk shape of the vesting registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VestingRegistryFile {
    #[serde(rename = "Vesting", default)]
    pub vesting: Vec<VestingDeploymentRecord>,
}

/// Append-only registry of vesting deployments.
///
/// Same discipline as the contributor registry: full read-modify-write,
/// callers must serialize access per file.
#[derive(Debug, Clone)]
pub struct VestingRegistry {
    path: PathBuf,
}

impl VestingRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the registry, starting from an empty sequence when the file
    /// does not exist yet.
    pub fn load(&self) -> Result<VestingRegistryFile, DeployError> {
        Ok(crate::fs::read_json(&self.path)?.unwrap_or_default())
    }

    /// Append a record to the vesting sequence.
    pub fn append(&self, record: VestingDeploymentRecord) -> Result<(), DeployError> {
        let mut registry = self.load()?;

        tracing::info!(
            network = %record.network,
            vesting = %record.contract_address,
            "Recording vesting deployment"
        );

        registry.vesting.push(record);
        crate::fs::write_json(&self.path, &registry)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
