//! Side cache of contributor addresses for external bootstrap tooling.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use alloy_core::primitives::Address;

use crate::{error::DeployError, network::Network};

/// Which bootstrap file a cache entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheFile {
    /// The shared devnet bootstrap file (tilt.json).
    Tilt,
    /// The public testnet bootstrap file (testnet.json).
    Testnet,
}

/// A resolved cache write: target file, key, and the address to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub file: CacheFile,
    pub key: String,
    pub address: Address,
}

/// Decide the cache entry for a finished deployment, if any.
///
/// Three naming schemes: devnets use a fixed logical key, cached testnets
/// use the bare network name for full deployments, or the network name
/// suffixed with `ContributorImplementation` for implementation-only runs.
/// Networks outside both sets are skipped silently.
pub fn cache_entry(
    network: &Network,
    implementation_only: bool,
    implementation: Address,
    proxy: Option<Address>,
) -> Option<CacheEntry> {
    if let Some(key) = network.devnet_cache_key() {
        return Some(CacheEntry {
            file: CacheFile::Tilt,
            key: key.to_string(),
            // Devnet runs are always full deployments.
            address: proxy?,
        });
    }

    if network.cached_testnet() {
        let entry = if implementation_only {
            CacheEntry {
                file: CacheFile::Testnet,
                key: format!("{network}ContributorImplementation"),
                address: implementation,
            }
        } else {
            CacheEntry {
                file: CacheFile::Testnet,
                key: network.to_string(),
                address: proxy?,
            }
        };
        return Some(entry);
    }

    None
}

/// A flat string-to-string JSON cache file.
///
/// Unlike the registries this is last-write-wins per key: each run
/// overwrites its own entry and leaves the rest of the map untouched.
#[derive(Debug, Clone)]
pub struct SideCache {
    path: PathBuf,
}

impl SideCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Set one key, preserving all other entries (read-modify-write).
    pub fn set(&self, key: &str, value: String) -> Result<(), DeployError> {
        let mut entries: BTreeMap<String, String> =
            crate::fs::read_json(&self.path)?.unwrap_or_default();

        tracing::info!(path = %self.path.display(), key, value, "Updating side cache");

        entries.insert(key.to_string(), value);
        crate::fs::write_json(&self.path, &entries)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
