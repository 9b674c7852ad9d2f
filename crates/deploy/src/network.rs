//! Target network identifiers and their resolution classes.

/// A target network for a contributor deployment.
///
/// The variants form a closed set: every network the orchestrator has a
/// resolution strategy for is named here, and anything else parses into
/// [`Network::Other`] rather than silently matching a branch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
pub enum Network {
    /// Local development chain, with the conductor deployed in-process.
    #[strum(serialize = "development")]
    Development,
    /// First shared devnet (ethereum side of the tilt environment).
    #[strum(serialize = "eth_devnet")]
    EthDevnet,
    /// Second shared devnet (bsc side of the tilt environment).
    #[strum(serialize = "eth_devnet2")]
    EthDevnet2,
    #[strum(serialize = "goerli")]
    Goerli,
    #[strum(serialize = "fuji")]
    Fuji,
    #[strum(serialize = "binance_testnet")]
    BinanceTestnet,
    #[strum(serialize = "mumbai")]
    Mumbai,
    #[strum(serialize = "fantom_testnet")]
    FantomTestnet,
    #[strum(serialize = "arbitrum_testnet")]
    ArbitrumTestnet,
    #[strum(serialize = "optimism_testnet")]
    OptimismTestnet,
    /// Any network outside the enumerated set.
    #[strum(default)]
    Other(String),
}

/// The resolution class a network belongs to.
///
/// Drives peer address resolution and side cache placement. The `Other`
/// class is an explicit variant so that unmatched networks are a handled
/// case, not a fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkClass {
    /// Local development: the conductor lives on the same chain.
    Local,
    /// Shared devnet environments bootstrapped from tilt.json.
    Devnet,
    /// Public testnets bootstrapped from testnet.json.
    Testnet,
    /// No known resolution source.
    Other,
}

impl Network {
    /// The resolution class of this network.
    pub fn class(&self) -> NetworkClass {
        match self {
            Network::Development => NetworkClass::Local,
            Network::EthDevnet | Network::EthDevnet2 => NetworkClass::Devnet,
            Network::Goerli
            | Network::Fuji
            | Network::BinanceTestnet
            | Network::Mumbai
            | Network::FantomTestnet
            | Network::ArbitrumTestnet
            | Network::OptimismTestnet => NetworkClass::Testnet,
            Network::Other(_) => NetworkClass::Other,
        }
    }

    /// The fixed side cache key for devnet networks.
    ///
    /// Devnet contributor addresses are cached under logical names rather
    /// than network names, matching what the bootstrap tooling expects.
    pub fn devnet_cache_key(&self) -> Option<&'static str> {
        match self {
            Network::EthDevnet => Some("ethContributorAddress"),
            Network::EthDevnet2 => Some("bscContributorAddress"),
            _ => None,
        }
    }

    /// Whether this testnet's contributor address is recorded in the
    /// testnet side cache.
    ///
    /// A narrower set than the full testnet class: arbitrum and optimism
    /// testnets are deployed to but not cached.
    pub fn cached_testnet(&self) -> bool {
        matches!(
            self,
            Network::Goerli
                | Network::Fuji
                | Network::BinanceTestnet
                | Network::Mumbai
                | Network::FantomTestnet
        )
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_network_round_trip() {
        for name in [
            "development",
            "eth_devnet",
            "eth_devnet2",
            "goerli",
            "fuji",
            "binance_testnet",
            "mumbai",
            "fantom_testnet",
            "arbitrum_testnet",
            "optimism_testnet",
        ] {
            let network = Network::from_str(name).unwrap();
            assert_eq!(network.to_string(), name);
            assert!(!matches!(network, Network::Other(_)));
        }
    }

    #[test]
    fn test_unknown_network_is_other() {
        let network = Network::from_str("avalanche_mainnet").unwrap();
        assert_eq!(network, Network::Other("avalanche_mainnet".to_string()));
        assert_eq!(network.class(), NetworkClass::Other);
    }

    #[test]
    fn test_classes() {
        assert_eq!(Network::Development.class(), NetworkClass::Local);
        assert_eq!(Network::EthDevnet.class(), NetworkClass::Devnet);
        assert_eq!(Network::EthDevnet2.class(), NetworkClass::Devnet);
        assert_eq!(Network::ArbitrumTestnet.class(), NetworkClass::Testnet);
    }

    #[test]
    fn test_devnet_cache_keys() {
        assert_eq!(
            Network::EthDevnet.devnet_cache_key(),
            Some("ethContributorAddress")
        );
        assert_eq!(
            Network::EthDevnet2.devnet_cache_key(),
            Some("bscContributorAddress")
        );
        assert_eq!(Network::Goerli.devnet_cache_key(), None);
    }

    #[test]
    fn test_cached_testnets_exclude_rollup_testnets() {
        assert!(Network::Goerli.cached_testnet());
        assert!(Network::FantomTestnet.cached_testnet());
        assert!(!Network::ArbitrumTestnet.cached_testnet());
        assert!(!Network::OptimismTestnet.cached_testnet());
        assert!(!Network::Development.cached_testnet());
    }
}
