//! Vault addressing and the replicated value type

use crate::common::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// The replicated value. Vaults and clients only ever exchange non-negative integers.
pub type StoredValue = u64;

/// A vault endpoint (`host:port`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VaultAddress(String);

impl VaultAddress {
    pub fn new(addr: impl Into<String>) -> Result<Self> {
        let addr = addr.into();
        if addr.is_empty() {
            return Err(Error::InvalidConfig("empty vault address".to_string()));
        }
        if addr.contains('/') || addr.chars().any(char::is_whitespace) {
            return Err(Error::InvalidConfig(format!(
                "vault address must be host:port, got {:?}",
                addr
            )));
        }
        Ok(Self(addr))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Root URL of the vault's value endpoint
    pub fn url(&self) -> String {
        format!("http://{}/", self.0)
    }
}

impl fmt::Display for VaultAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed set of vaults a coordinator talks to.
///
/// Built once at startup and shared read-only by every request; cloning only
/// bumps a reference count.
#[derive(Debug, Clone, Default)]
pub struct VaultSet {
    vaults: Arc<[VaultAddress]>,
}

impl VaultSet {
    pub fn new(vaults: Vec<VaultAddress>) -> Self {
        Self {
            vaults: vaults.into(),
        }
    }

    /// Parse a comma-separated `host:port` list. Blank entries are skipped.
    pub fn parse(list: &str) -> Result<Self> {
        let vaults = list
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(VaultAddress::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(vaults))
    }

    pub fn len(&self) -> usize {
        self.vaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vaults.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VaultAddress> {
        self.vaults.iter()
    }

    /// Number of vaults that make a strict majority: `floor(N/2) + 1`
    pub fn majority(&self) -> usize {
        self.vaults.len() / 2 + 1
    }

    pub fn has_majority(&self, count: usize) -> bool {
        count >= self.majority()
    }
}
