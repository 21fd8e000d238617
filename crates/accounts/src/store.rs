use std::sync::Arc;

use serde::{Deserialize, Serialize};

use capledger_core::{AccountAddress, AssetCode, LedgerResult};

/// One (account, asset) record.
///
/// An absent record reads as `balance == 0`, not frozen. Records are created
/// by registration or implicitly on first credit/freeze and are never
/// destroyed; a balance may decay to zero but the holding persists.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub balance: u64,
    pub frozen: bool,
}

/// Durable mapping from (account, asset) to balance and freeze flag.
///
/// Implementations must keep every operation atomic with respect to the
/// holding it touches; the host provides serialization across operations
/// (per-transaction execution), so no operation blocks, suspends, or
/// performs IO.
///
/// Error semantics (all deterministic, none retried internally):
/// - `credit` fails with `FrozenAccount` on a frozen holding and
///   `BalanceOverflow` past `u64::MAX`; it auto-registers absent holdings
///   (single get-or-create path).
/// - `debit` fails with `NotRegistered` when no holding exists,
///   `FrozenAccount` when frozen, `InsufficientBalance` when
///   `amount > balance`. Balances are never clamped.
/// - `register` and `set_frozen` are idempotent.
pub trait AccountStore: Send + Sync {
    /// Create a zero holding if absent. Idempotent.
    fn register(&self, account: AccountAddress, asset: &AssetCode) -> LedgerResult<()>;

    /// Balance of the holding; 0 if unregistered (by policy, not an error).
    fn balance_of(&self, account: AccountAddress, asset: &AssetCode) -> LedgerResult<u64>;

    /// Freeze flag of the holding; false if unregistered.
    fn is_frozen(&self, account: AccountAddress, asset: &AssetCode) -> LedgerResult<bool>;

    /// Increase the balance by `amount`, creating the holding if absent.
    fn credit(&self, account: AccountAddress, asset: &AssetCode, amount: u64) -> LedgerResult<()>;

    /// Decrease the balance by `amount`. The holding must exist, be unfrozen,
    /// and cover the amount.
    fn debit(&self, account: AccountAddress, asset: &AssetCode, amount: u64) -> LedgerResult<()>;

    /// Set the freeze flag, creating the holding if absent. Balance untouched.
    fn set_frozen(
        &self,
        account: AccountAddress,
        asset: &AssetCode,
        frozen: bool,
    ) -> LedgerResult<()>;
}

impl<S> AccountStore for Arc<S>
where
    S: AccountStore + ?Sized,
{
    fn register(&self, account: AccountAddress, asset: &AssetCode) -> LedgerResult<()> {
        (**self).register(account, asset)
    }

    fn balance_of(&self, account: AccountAddress, asset: &AssetCode) -> LedgerResult<u64> {
        (**self).balance_of(account, asset)
    }

    fn is_frozen(&self, account: AccountAddress, asset: &AssetCode) -> LedgerResult<bool> {
        (**self).is_frozen(account, asset)
    }

    fn credit(&self, account: AccountAddress, asset: &AssetCode, amount: u64) -> LedgerResult<()> {
        (**self).credit(account, asset, amount)
    }

    fn debit(&self, account: AccountAddress, asset: &AssetCode, amount: u64) -> LedgerResult<()> {
        (**self).debit(account, asset, amount)
    }

    fn set_frozen(
        &self,
        account: AccountAddress,
        asset: &AssetCode,
        frozen: bool,
    ) -> LedgerResult<()> {
        (**self).set_frozen(account, asset, frozen)
    }
}
