//! The collaborator boundary for on-chain contract deployment.

use alloy_core::primitives::{Address, Bytes};

use crate::error::DeployError;

/// Logical contract roles the orchestrator deploys or looks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ContractKind {
    /// Shared structs library, linked into the implementation.
    #[strum(serialize = "ICCOStructs")]
    Structs,
    /// Contributor logic contract behind the proxy.
    #[strum(serialize = "ContributorImplementation")]
    Implementation,
    /// One-time-use contract that encodes the proxy's initialization call.
    #[strum(serialize = "ContributorSetup")]
    Setup,
    /// The contributor proxy itself.
    #[strum(serialize = "TokenSaleContributor")]
    Proxy,
    /// Cross-chain coordinating contract, deployed elsewhere.
    #[strum(serialize = "TokenSaleConductor")]
    Conductor,
    /// Vesting wallet parameterized by a deployed contributor.
    #[strum(serialize = "VestingWallet")]
    Vesting,
}

/// On-chain deployment collaborator.
///
/// The orchestrator owns sequencing and arguments; implementors own
/// transaction submission. Each call blocks until the chain confirms,
/// and any failure is fatal to the run.
#[allow(async_fn_in_trait)]
pub trait ContractDeployer {
    /// Deploy the shared structs library and return its address.
    async fn deploy_library(&mut self) -> Result<Address, DeployError>;

    /// Link an already-deployed library into a target contract's bytecode.
    ///
    /// Must be called before the target is deployed.
    async fn link_library(
        &mut self,
        library: Address,
        target: ContractKind,
    ) -> Result<(), DeployError>;

    /// Deploy a contract with ABI-encoded constructor arguments.
    async fn deploy_contract(
        &mut self,
        contract: ContractKind,
        constructor_args: Bytes,
    ) -> Result<Address, DeployError>;

    /// Look up a contract already deployed on the same chain, if any.
    async fn deployed_address(
        &self,
        contract: ContractKind,
    ) -> Result<Option<Address>, DeployError>;
}

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::HashMap;

    use super::*;

    /// A recorded call against the mock deployer.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        DeployLibrary,
        Link {
            library: Address,
            target: ContractKind,
        },
        Deploy {
            contract: ContractKind,
            constructor_args: Bytes,
        },
    }

    /// Deployer that records calls and hands out deterministic addresses.
    #[derive(Debug, Default)]
    pub(crate) struct MockDeployer {
        pub calls: Vec<Call>,
        pub existing: HashMap<ContractKind, Address>,
        pub fail_on: Option<ContractKind>,
        next: u8,
    }

    impl MockDeployer {
        pub fn with_existing(contract: ContractKind, address: Address) -> Self {
            Self {
                existing: HashMap::from([(contract, address)]),
                ..Default::default()
            }
        }

        fn next_address(&mut self) -> Address {
            self.next += 1;
            Address::repeat_byte(self.next)
        }

        /// The address returned for the nth deployment (1-based).
        pub fn nth_address(n: u8) -> Address {
            Address::repeat_byte(n)
        }
    }

    impl ContractDeployer for MockDeployer {
        async fn deploy_library(&mut self) -> Result<Address, DeployError> {
            self.calls.push(Call::DeployLibrary);
            Ok(self.next_address())
        }

        async fn link_library(
            &mut self,
            library: Address,
            target: ContractKind,
        ) -> Result<(), DeployError> {
            self.calls.push(Call::Link { library, target });
            Ok(())
        }

        async fn deploy_contract(
            &mut self,
            contract: ContractKind,
            constructor_args: Bytes,
        ) -> Result<Address, DeployError> {
            if self.fail_on == Some(contract) {
                return Err(DeployError::DeploymentTransactionFailed {
                    contract,
                    reason: "injected failure".to_string(),
                });
            }
            self.calls.push(Call::Deploy {
                contract,
                constructor_args,
            });
            Ok(self.next_address())
        }

        async fn deployed_address(
            &self,
            contract: ContractKind,
        ) -> Result<Option<Address>, DeployError> {
            Ok(self.existing.get(&contract).copied())
        }
    }
}
