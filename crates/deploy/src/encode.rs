//! ABI encoding for the proxy initialization payload and constructor args.
//!
//! This module owns the shape and ordering of arguments; the byte mechanics
//! are alloy's. The `setup` signature is a frozen interface: any change to
//! argument order or count breaks on-chain compatibility with already
//! deployed setup contracts.

use alloy_core::{
    primitives::{Address, Bytes, U256},
    sol,
    sol_types::{SolCall, SolValue},
};

use crate::{config::DeploymentConfig, peer::PeerAddress, vesting::VestingSchedule};

sol! {
    /// Initialization entrypoint of the ContributorSetup contract, executed
    /// by the proxy during construction.
    function setup(
        address implementation,
        uint16 chainId,
        uint16 conductorChainId,
        bytes32 conductorContract,
        address wormhole,
        address tokenBridge,
        uint8 consistencyLevel
    );

    /// Vesting schedule as the VestingWallet constructor expects it.
    struct VestingParams {
        uint256 cliffStartTimeInSeconds;
        uint256 cliffPercentage;
        uint256 linearStartTimeInSeconds;
        uint256 linearEndTimeInSeconds;
        uint256 linearReleasePeriodInSeconds;
    }
}

/// Encode the contributor proxy's initialization call data.
pub fn contributor_init_data(
    implementation: Address,
    config: &DeploymentConfig,
    conductor: &PeerAddress,
) -> Bytes {
    setupCall {
        implementation,
        chainId: config.contributor_chain_id,
        conductorChainId: config.conductor_chain_id,
        conductorContract: conductor.as_word(),
        wormhole: config.wormhole,
        tokenBridge: config.token_bridge,
        consistencyLevel: config.consistency_level,
    }
    .abi_encode()
    .into()
}

/// Encode the proxy's constructor arguments: the setup contract address and
/// the initialization call data it will delegatecall.
pub fn proxy_constructor_args(setup: Address, init_data: &Bytes) -> Bytes {
    (setup, init_data.clone()).abi_encode_params().into()
}

/// Encode the vesting wallet's constructor arguments: the schedule struct
/// and the contributor the wallet is bound to.
pub fn vesting_constructor_args(schedule: &VestingSchedule, contributor: Address) -> Bytes {
    let params = VestingParams {
        cliffStartTimeInSeconds: U256::from(schedule.cliff_start),
        cliffPercentage: U256::from(schedule.cliff_percentage),
        linearStartTimeInSeconds: U256::from(schedule.linear_start),
        linearEndTimeInSeconds: U256::from(schedule.linear_end),
        linearReleasePeriodInSeconds: U256::from(schedule.linear_period),
    };

    (params, contributor).abi_encode_params().into()
}
