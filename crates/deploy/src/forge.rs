//! Foundry-backed implementation of the deployer collaborator.
//!
//! Deploys by shelling out: `forge inspect` produces the (library-linked)
//! creation code, `cast send --create` submits it with the ABI-encoded
//! constructor arguments appended. Transaction mechanics stay entirely on
//! the foundry side.

use std::{collections::HashMap, path::PathBuf, process::Stdio};

use alloy_core::primitives::{Address, Bytes};
use serde::Deserialize;
use tokio::process::Command;

use crate::{
    deployer::{ContractDeployer, ContractKind},
    error::DeployError,
};

/// Deploys contracts through the local `forge` and `cast` binaries.
///
/// Addresses deployed in this session are remembered, so same-chain
/// lookups (the local development conductor case) resolve against this
/// session's deployments. It does not query chain state: a conductor
/// deployed by a separate process is invisible here, and local
/// development runs that need one must deploy it through this same
/// deployer first.
#[derive(Debug)]
pub struct ForgeDeployer {
    rpc_url: String,
    private_key: String,
    /// Root of the foundry project holding the contract sources.
    contracts_dir: PathBuf,
    /// `--libraries` specs accumulated through [`ContractDeployer::link_library`].
    libraries: Vec<String>,
    deployed: HashMap<ContractKind, Address>,
}

/// The fields of a `cast send --json` receipt we care about.
#[derive(Debug, Deserialize)]
struct CastReceipt {
    #[serde(rename = "contractAddress")]
    contract_address: Option<Address>,
}

impl ForgeDeployer {
    pub fn new(
        rpc_url: impl Into<String>,
        private_key: impl Into<String>,
        contracts_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            private_key: private_key.into(),
            contracts_dir: contracts_dir.into(),
            libraries: Vec::new(),
            deployed: HashMap::new(),
        }
    }

    /// The `path:Name` artifact identifier forge uses for a contract role.
    fn artifact(contract: ContractKind) -> &'static str {
        match contract {
            ContractKind::Structs => "contracts/icco/shared/ICCOStructs.sol:ICCOStructs",
            ContractKind::Implementation => {
                "contracts/icco/contributor/ContributorImplementation.sol:ContributorImplementation"
            }
            ContractKind::Setup => {
                "contracts/icco/contributor/ContributorSetup.sol:ContributorSetup"
            }
            ContractKind::Proxy => {
                "contracts/icco/contributor/TokenSaleContributor.sol:TokenSaleContributor"
            }
            ContractKind::Conductor => {
                "contracts/icco/conductor/TokenSaleConductor.sol:TokenSaleConductor"
            }
            ContractKind::Vesting => "contracts/vesting/VestingWallet.sol:VestingWallet",
        }
    }

    /// Run a foundry command, failing the deployment on a non-zero exit.
    async fn run(&self, contract: ContractKind, cmd: &mut Command) -> Result<String, DeployError> {
        let output = cmd
            .current_dir(&self.contracts_dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| DeployError::DeploymentTransactionFailed {
                contract,
                reason: format!("failed to spawn foundry command: {e}"),
            })?;

        if !output.status.success() {
            return Err(DeployError::DeploymentTransactionFailed {
                contract,
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Produce the creation code for a contract, with any linked libraries
    /// resolved.
    async fn creation_code(&self, contract: ContractKind) -> Result<Vec<u8>, DeployError> {
        let mut cmd = Command::new("forge");
        cmd.arg("inspect").arg(Self::artifact(contract)).arg("bytecode");
        for library in &self.libraries {
            cmd.arg("--libraries").arg(library);
        }

        let stdout = self.run(contract, &mut cmd).await?;
        let raw = stdout.trim().trim_matches('"').trim_start_matches("0x");

        hex::decode(raw).map_err(|e| DeployError::DeploymentTransactionFailed {
            contract,
            reason: format!("forge produced unparseable bytecode: {e}"),
        })
    }

    /// Submit a creation transaction and return the deployed address.
    async fn send_create(
        &self,
        contract: ContractKind,
        creation_tx: Vec<u8>,
    ) -> Result<Address, DeployError> {
        let mut cmd = Command::new("cast");
        cmd.arg("send")
            .arg("--rpc-url")
            .arg(&self.rpc_url)
            .arg("--private-key")
            .arg(&self.private_key)
            .arg("--json")
            .arg("--create")
            .arg(format!("0x{}", hex::encode(creation_tx)));

        let stdout = self.run(contract, &mut cmd).await?;
        parse_created_address(&stdout).map_err(|reason| {
            DeployError::DeploymentTransactionFailed { contract, reason }
        })
    }

    async fn deploy(
        &mut self,
        contract: ContractKind,
        constructor_args: &Bytes,
    ) -> Result<Address, DeployError> {
        tracing::info!(contract = %contract, "Submitting creation transaction...");

        let mut creation_tx = self.creation_code(contract).await?;
        creation_tx.extend_from_slice(constructor_args);

        let address = self.send_create(contract, creation_tx).await?;
        self.deployed.insert(contract, address);

        tracing::info!(contract = %contract, address = %address, "Deployed");

        Ok(address)
    }
}

/// Extract the created contract address from a `cast send --json` receipt.
fn parse_created_address(receipt_json: &str) -> Result<Address, String> {
    let receipt: CastReceipt = serde_json::from_str(receipt_json.trim())
        .map_err(|e| format!("unparseable transaction receipt: {e}"))?;

    receipt
        .contract_address
        .ok_or_else(|| "transaction receipt carries no contract address".to_string())
}

impl ContractDeployer for ForgeDeployer {
    async fn deploy_library(&mut self) -> Result<Address, DeployError> {
        self.deploy(ContractKind::Structs, &Bytes::new()).await
    }

    async fn link_library(
        &mut self,
        library: Address,
        target: ContractKind,
    ) -> Result<(), DeployError> {
        let spec = format!("{}:{library}", Self::artifact(ContractKind::Structs));
        tracing::debug!(target = %target, spec, "Linking library");
        self.libraries.push(spec);
        Ok(())
    }

    async fn deploy_contract(
        &mut self,
        contract: ContractKind,
        constructor_args: Bytes,
    ) -> Result<Address, DeployError> {
        self.deploy(contract, &constructor_args).await
    }

    async fn deployed_address(
        &self,
        contract: ContractKind,
    ) -> Result<Option<Address>, DeployError> {
        Ok(self.deployed.get(&contract).copied())
    }
}
