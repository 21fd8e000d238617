use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use capledger_core::{AccountAddress, AssetCode, CapabilityKind, LedgerError, LedgerResult};

use crate::capability::{Capability, IssuedCapabilities};

/// Issues and validates capabilities.
///
/// Invariants implementations must uphold:
/// - issuance is insert-if-absent, never overwrite: for a given asset, the
///   Mint/Burn/Freeze triple is created at most once, atomically
/// - capabilities are never transferred or destroyed (extension point, not
///   implemented here)
pub trait CapabilityRegistry: Send + Sync {
    /// Create the Mint/Burn/Freeze capability triple for `asset`, bound to
    /// `owner`. Fails with `AlreadyInitialized` if any capability for the
    /// asset already exists anywhere in the system.
    fn issue(&self, asset: AssetCode, owner: AccountAddress) -> LedgerResult<IssuedCapabilities>;

    /// Prove that `account` holds the `kind` capability for `asset`.
    ///
    /// Fails with `NoCapability` if the account is not the current holder
    /// (including the case where the asset was never initialized).
    fn require(
        &self,
        account: AccountAddress,
        asset: &AssetCode,
        kind: CapabilityKind,
    ) -> LedgerResult<Capability>;

    /// Current holder of a capability, if issued.
    fn holder_of(&self, asset: &AssetCode, kind: CapabilityKind)
    -> LedgerResult<Option<AccountAddress>>;
}

impl<R> CapabilityRegistry for Arc<R>
where
    R: CapabilityRegistry + ?Sized,
{
    fn issue(&self, asset: AssetCode, owner: AccountAddress) -> LedgerResult<IssuedCapabilities> {
        (**self).issue(asset, owner)
    }

    fn require(
        &self,
        account: AccountAddress,
        asset: &AssetCode,
        kind: CapabilityKind,
    ) -> LedgerResult<Capability> {
        (**self).require(account, asset, kind)
    }

    fn holder_of(
        &self,
        asset: &AssetCode,
        kind: CapabilityKind,
    ) -> LedgerResult<Option<AccountAddress>> {
        (**self).holder_of(asset, kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CapKey {
    asset: AssetCode,
    kind: CapabilityKind,
}

/// In-memory capability registry.
///
/// Intended for tests/dev and single-process hosts. The host provides
/// serialization across operations; the lock here only keeps the map safe
/// under a multi-threaded test harness.
#[derive(Debug, Default)]
pub struct InMemoryCapabilityRegistry {
    holders: RwLock<HashMap<CapKey, AccountAddress>>,
}

impl InMemoryCapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CapabilityRegistry for InMemoryCapabilityRegistry {
    fn issue(&self, asset: AssetCode, owner: AccountAddress) -> LedgerResult<IssuedCapabilities> {
        let mut holders = self
            .holders
            .write()
            .map_err(|_| LedgerError::store("capability registry lock poisoned"))?;

        let kinds = [
            CapabilityKind::Mint,
            CapabilityKind::Burn,
            CapabilityKind::Freeze,
        ];

        // All-or-nothing: if any kind exists the whole issuance is rejected.
        if kinds.iter().any(|kind| {
            holders.contains_key(&CapKey {
                asset: asset.clone(),
                kind: *kind,
            })
        }) {
            return Err(LedgerError::AlreadyInitialized { asset });
        }

        for kind in kinds {
            holders.insert(
                CapKey {
                    asset: asset.clone(),
                    kind,
                },
                owner,
            );
        }

        Ok(IssuedCapabilities {
            mint: Capability::new(CapabilityKind::Mint, asset.clone(), owner),
            burn: Capability::new(CapabilityKind::Burn, asset.clone(), owner),
            freeze: Capability::new(CapabilityKind::Freeze, asset, owner),
        })
    }

    fn require(
        &self,
        account: AccountAddress,
        asset: &AssetCode,
        kind: CapabilityKind,
    ) -> LedgerResult<Capability> {
        let holders = self
            .holders
            .read()
            .map_err(|_| LedgerError::store("capability registry lock poisoned"))?;

        let key = CapKey {
            asset: asset.clone(),
            kind,
        };

        match holders.get(&key) {
            Some(holder) if *holder == account => {
                Ok(Capability::new(kind, asset.clone(), account))
            }
            _ => Err(LedgerError::NoCapability {
                account,
                asset: asset.clone(),
                kind,
            }),
        }
    }

    fn holder_of(
        &self,
        asset: &AssetCode,
        kind: CapabilityKind,
    ) -> LedgerResult<Option<AccountAddress>> {
        let holders = self
            .holders
            .read()
            .map_err(|_| LedgerError::store("capability registry lock poisoned"))?;

        Ok(holders
            .get(&CapKey {
                asset: asset.clone(),
                kind,
            })
            .copied())
    }
}
