use serde::{Deserialize, Serialize};

use capledger_core::{AccountAddress, AssetCode, CapabilityKind};

/// Proof of authorization for one (asset, kind) pair.
///
/// A `Capability` can only be produced by [`CapabilityRegistry::issue`] or
/// handed back by a successful [`CapabilityRegistry::require`] check; holding
/// one is sufficient proof that `holder` is the unique authorized principal.
///
/// [`CapabilityRegistry::issue`]: crate::registry::CapabilityRegistry::issue
/// [`CapabilityRegistry::require`]: crate::registry::CapabilityRegistry::require
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    kind: CapabilityKind,
    asset: AssetCode,
    holder: AccountAddress,
}

impl Capability {
    /// Crate-private: only the registry mints capability values.
    pub(crate) fn new(kind: CapabilityKind, asset: AssetCode, holder: AccountAddress) -> Self {
        Self {
            kind,
            asset,
            holder,
        }
    }

    pub fn kind(&self) -> CapabilityKind {
        self.kind
    }

    pub fn asset(&self) -> &AssetCode {
        &self.asset
    }

    pub fn holder(&self) -> AccountAddress {
        self.holder
    }
}

/// The full capability set created by a successful `issue`.
///
/// All three capabilities are bound to the same owning account; this struct
/// exists so issuance is all-or-nothing at the type level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedCapabilities {
    pub mint: Capability,
    pub burn: Capability,
    pub freeze: Capability,
}
