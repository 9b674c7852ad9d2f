//! The append-only contributor deployment registry.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use alloy_core::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{error::DeployError, network::Network};

/// The file name of the contributor deployment registry.
pub const REGISTRY_FILENAME: &str = "deployedAddresses.json";

/// One contributor deployment, as recorded in the registry.
///
/// Field names match the artifact format consumed by downstream tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorDeploymentRecord {
    /// The network this contributor was deployed to.
    #[serde(rename = "contributorNetwork")]
    pub network: String,
    /// Wormhole chain id of that network.
    #[serde(rename = "contributorChain")]
    pub chain: u16,
    /// Address of the deployed proxy.
    #[serde(rename = "contributorAddress")]
    pub address: Address,
    /// Every deployed contract by role name.
    #[serde(rename = "contributorContracts")]
    pub contracts: BTreeMap<String, Address>,
    /// Per-role source verification instructions.
    #[serde(rename = "verificationString")]
    pub verification: BTreeMap<String, String>,
}

/// On-disk shape of the registry: a reserved conductor bucket and the
/// append-only contributor sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryFile {
    /// Conductor-side records, written by the conductor deployment tooling.
    #[serde(default)]
    pub conductor: serde_json::Map<String, serde_json::Value>,
    /// Contributor-side records, one per full deployment run.
    #[serde(default)]
    pub contributor: Vec<ContributorDeploymentRecord>,
}

/// Append-only registry of contributor deployments, backed by a JSON file.
///
/// Every operation is a full read-modify-write of the backing file, with no
/// locking. Callers must serialize access per file: the registry is safe for
/// repeated sequential runs, but concurrent writers against the same file
/// would race and lose updates.
#[derive(Debug, Clone)]
pub struct DeploymentRegistry {
    path: PathBuf,
}

impl DeploymentRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the registry, starting from an empty structure when the file
    /// does not exist yet.
    pub fn load(&self) -> Result<RegistryFile, DeployError> {
        Ok(crate::fs::read_json(&self.path)?.unwrap_or_default())
    }

    /// Append a record to the contributor sequence.
    ///
    /// Records are never mutated or removed once appended; prior entries
    /// from other networks and runs are preserved as-is.
    pub fn append(&self, record: ContributorDeploymentRecord) -> Result<(), DeployError> {
        let mut registry = self.load()?;

        tracing::info!(
            network = %record.network,
            contributor = %record.address,
            entries = registry.contributor.len() + 1,
            "Recording contributor deployment"
        );

        registry.contributor.push(record);
        crate::fs::write_json(&self.path, &registry)
    }

    /// Find the single contributor record for a network.
    ///
    /// Zero or multiple matches fail with
    /// [`DeployError::RegistryLookupAmbiguous`]; the vesting stage has no
    /// way to pick between repeated deployments of the same network.
    pub fn lookup_one(
        &self,
        network: &Network,
    ) -> Result<ContributorDeploymentRecord, DeployError> {
        let name = network.to_string();
        let mut matches: Vec<_> = self
            .load()?
            .contributor
            .into_iter()
            .filter(|record| record.network == name)
            .collect();

        if matches.len() != 1 {
            return Err(DeployError::RegistryLookupAmbiguous {
                network: name,
                matches: matches.len(),
            });
        }

        Ok(matches.remove(0))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
