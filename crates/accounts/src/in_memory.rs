use std::collections::HashMap;
use std::sync::RwLock;

use capledger_core::{AccountAddress, AssetCode, LedgerError, LedgerResult};

use crate::store::{AccountStore, Holding};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct HoldingKey {
    account: AccountAddress,
    asset: AssetCode,
}

impl HoldingKey {
    fn new(account: AccountAddress, asset: &AssetCode) -> Self {
        Self {
            account,
            asset: asset.clone(),
        }
    }
}

/// In-memory account store.
///
/// Intended for tests/dev and single-process hosts. Not optimized for
/// performance.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    holdings: RwLock<HashMap<HoldingKey, Holding>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(
        &self,
    ) -> LedgerResult<std::sync::RwLockReadGuard<'_, HashMap<HoldingKey, Holding>>> {
        self.holdings
            .read()
            .map_err(|_| LedgerError::store("account store lock poisoned"))
    }

    fn write(
        &self,
    ) -> LedgerResult<std::sync::RwLockWriteGuard<'_, HashMap<HoldingKey, Holding>>> {
        self.holdings
            .write()
            .map_err(|_| LedgerError::store("account store lock poisoned"))
    }
}

impl AccountStore for InMemoryAccountStore {
    fn register(&self, account: AccountAddress, asset: &AssetCode) -> LedgerResult<()> {
        let mut holdings = self.write()?;
        holdings
            .entry(HoldingKey::new(account, asset))
            .or_default();
        Ok(())
    }

    fn balance_of(&self, account: AccountAddress, asset: &AssetCode) -> LedgerResult<u64> {
        let holdings = self.read()?;
        Ok(holdings
            .get(&HoldingKey::new(account, asset))
            .map(|h| h.balance)
            .unwrap_or(0))
    }

    fn is_frozen(&self, account: AccountAddress, asset: &AssetCode) -> LedgerResult<bool> {
        let holdings = self.read()?;
        Ok(holdings
            .get(&HoldingKey::new(account, asset))
            .map(|h| h.frozen)
            .unwrap_or(false))
    }

    fn credit(&self, account: AccountAddress, asset: &AssetCode, amount: u64) -> LedgerResult<()> {
        let mut holdings = self.write()?;

        // Single get-or-create path: a never-registered destination behaves
        // exactly like a freshly registered one.
        let holding = holdings
            .entry(HoldingKey::new(account, asset))
            .or_default();

        if holding.frozen {
            return Err(LedgerError::FrozenAccount {
                account,
                asset: asset.clone(),
            });
        }

        holding.balance =
            holding
                .balance
                .checked_add(amount)
                .ok_or(LedgerError::BalanceOverflow {
                    account,
                    asset: asset.clone(),
                })?;

        Ok(())
    }

    fn debit(&self, account: AccountAddress, asset: &AssetCode, amount: u64) -> LedgerResult<()> {
        let mut holdings = self.write()?;

        let holding = holdings
            .get_mut(&HoldingKey::new(account, asset))
            .ok_or_else(|| LedgerError::NotRegistered {
                account,
                asset: asset.clone(),
            })?;

        if holding.frozen {
            return Err(LedgerError::FrozenAccount {
                account,
                asset: asset.clone(),
            });
        }

        if amount > holding.balance {
            return Err(LedgerError::InsufficientBalance {
                account,
                asset: asset.clone(),
                requested: amount,
                available: holding.balance,
            });
        }

        holding.balance -= amount;
        Ok(())
    }

    fn set_frozen(
        &self,
        account: AccountAddress,
        asset: &AssetCode,
        frozen: bool,
    ) -> LedgerResult<()> {
        let mut holdings = self.write()?;
        holdings
            .entry(HoldingKey::new(account, asset))
            .or_default()
            .frozen = frozen;
        Ok(())
    }
}
