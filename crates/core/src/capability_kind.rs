//! Capability kinds understood by the ledger.

use serde::{Deserialize, Serialize};

/// The three permission kinds a capability can carry.
///
/// For a given asset, at most one capability of each kind exists in the whole
/// system; the registry enforces this at issuance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityKind {
    /// Create new units of the asset.
    Mint,
    /// Destroy units from the holder's own balance.
    Burn,
    /// Toggle the per-account freeze flag.
    Freeze,
}

impl CapabilityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapabilityKind::Mint => "mint",
            CapabilityKind::Burn => "burn",
            CapabilityKind::Freeze => "freeze",
        }
    }
}

impl core::fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
