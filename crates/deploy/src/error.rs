//! Error kinds for the deployment orchestrator.

use std::path::PathBuf;

use thiserror::Error;

use crate::deployer::ContractKind;

/// Errors that can occur while orchestrating a deployment.
///
/// Every variant is fatal: the run aborts immediately, with no retry and no
/// rollback of contracts that were already deployed.
#[derive(Debug, Error)]
pub enum DeployError {
    /// No deployment config exists for the target network.
    #[error("no deployment config for network `{network}`")]
    ConfigurationMissing { network: String },

    /// No conductor peer address could be resolved for the target network.
    #[error("no conductor address could be resolved for network `{network}`")]
    PeerAddressUnresolved { network: String },

    /// The collaborator deployer reported a failed deployment or linkage.
    #[error("deploying `{contract}` failed: {reason}")]
    DeploymentTransactionFailed {
        contract: ContractKind,
        reason: String,
    },

    /// A registry lookup expected exactly one record for a network.
    #[error(
        "expected exactly one contributor record for network `{network}`, found {matches}"
    )]
    RegistryLookupAmbiguous { network: String, matches: usize },

    /// A bootstrap, registry, or cache file could not be read or written.
    #[error("file operation failed on `{path}`: {reason}")]
    FileIo { path: PathBuf, reason: String },
}

impl DeployError {
    /// Build a `FileIo` error for the given path.
    pub fn file_io(path: impl Into<PathBuf>, err: impl ToString) -> Self {
        Self::FileIo {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}
