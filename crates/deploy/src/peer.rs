//! Conductor peer address resolution.

use std::path::{Path, PathBuf};

use alloy_core::primitives::{Address, B256};
use serde::Deserialize;

use crate::{
    deployer::{ContractDeployer, ContractKind},
    error::DeployError,
    network::{Network, NetworkClass},
};

/// A 20-byte address widened to the 32-byte form cross-chain messages use:
/// 12 zero bytes followed by the raw address bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeerAddress(B256);

impl PeerAddress {
    /// Left-pad an address to 32 bytes.
    pub fn from_address(address: Address) -> Self {
        Self(address.into_word())
    }

    /// The padded 32-byte form.
    pub fn as_word(&self) -> B256 {
        self.0
    }
}

impl std::fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The conductor address field shared by both bootstrap files.
#[derive(Debug, Deserialize)]
struct BootstrapFields {
    #[serde(rename = "conductorAddress")]
    conductor_address: Option<Address>,
}

/// Bootstrap file locations used to resolve the conductor peer address.
#[derive(Debug, Clone)]
pub struct PeerSources {
    /// Shared devnet bootstrap file (tilt.json).
    pub tilt_path: PathBuf,
    /// Public testnet bootstrap file (testnet.json).
    pub testnet_path: PathBuf,
}

impl PeerSources {
    /// Resolve the conductor peer address for a network.
    ///
    /// One source per network class, first match wins:
    /// local networks ask the deployer for the conductor deployed on the
    /// same chain, devnets read tilt.json, testnets read testnet.json.
    /// Networks outside those classes have no source and fail with
    /// [`DeployError::PeerAddressUnresolved`].
    pub async fn resolve<D: ContractDeployer>(
        &self,
        network: &Network,
        deployer: &D,
    ) -> Result<PeerAddress, DeployError> {
        let unresolved = || DeployError::PeerAddressUnresolved {
            network: network.to_string(),
        };

        let address = match network.class() {
            NetworkClass::Local => deployer
                .deployed_address(ContractKind::Conductor)
                .await?
                .ok_or_else(unresolved)?,
            NetworkClass::Devnet => {
                Self::read_bootstrap(&self.tilt_path)?.ok_or_else(unresolved)?
            }
            NetworkClass::Testnet => {
                Self::read_bootstrap(&self.testnet_path)?.ok_or_else(unresolved)?
            }
            NetworkClass::Other => return Err(unresolved()),
        };

        tracing::debug!(network = %network, conductor = %address, "Resolved conductor peer address");

        Ok(PeerAddress::from_address(address))
    }

    /// Extract the conductor address from a bootstrap file, if present.
    fn read_bootstrap(path: &Path) -> Result<Option<Address>, DeployError> {
        let fields: Option<BootstrapFields> = crate::fs::read_json(path)?;
        Ok(fields.and_then(|f| f.conductor_address))
    }
}
