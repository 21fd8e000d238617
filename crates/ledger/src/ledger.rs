use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use capledger_accounts::AccountStore;
use capledger_capability::CapabilityRegistry;
use capledger_core::{AccountAddress, AssetCode, CapabilityKind, LedgerError, LedgerResult};

use crate::asset::{AssetConfig, AssetRecord};
use crate::events::{
    AccountRegistered, AssetInitialized, Burned, FreezeToggled, Minted, TokenEvent,
};

/// Orchestrates the public ledger operations.
///
/// The `Ledger` is the only component external callers invoke. Every
/// operation is fail-fast: capability and amount checks run before any
/// mutation, so an error leaves no partial effect. Successful operations
/// return the committed [`TokenEvent`] for host-side emission.
///
/// ## Generic parameters
///
/// - `S`: account store backend (in-memory for tests/dev, durable later)
/// - `C`: capability registry backend
///
/// The host serializes operations (one transaction at a time); the ledger
/// itself performs no IO and never blocks.
#[derive(Debug)]
pub struct Ledger<S, C> {
    accounts: S,
    capabilities: C,
    assets: RwLock<HashMap<AssetCode, AssetRecord>>,
}

impl<S, C> Ledger<S, C> {
    pub fn new(accounts: S, capabilities: C) -> Self {
        Self {
            accounts,
            capabilities,
            assets: RwLock::new(HashMap::new()),
        }
    }

    pub fn into_parts(self) -> (S, C) {
        (self.accounts, self.capabilities)
    }

    fn assets_read(
        &self,
    ) -> LedgerResult<std::sync::RwLockReadGuard<'_, HashMap<AssetCode, AssetRecord>>> {
        self.assets
            .read()
            .map_err(|_| LedgerError::store("asset table lock poisoned"))
    }

    fn assets_write(
        &self,
    ) -> LedgerResult<std::sync::RwLockWriteGuard<'_, HashMap<AssetCode, AssetRecord>>> {
        self.assets
            .write()
            .map_err(|_| LedgerError::store("asset table lock poisoned"))
    }
}

impl<S, C> Ledger<S, C>
where
    S: AccountStore,
    C: CapabilityRegistry,
{
    /// One-time asset creation.
    ///
    /// Issues the Mint/Burn/Freeze capability triple to `caller` and stores
    /// the immutable config. Fails with `AlreadyInitialized` on reissue.
    /// Registers no balance: the transition `Uninitialized -> Initialized`
    /// is one-way and terminal.
    pub fn initialize(
        &self,
        caller: AccountAddress,
        asset: AssetCode,
        config: AssetConfig,
    ) -> LedgerResult<TokenEvent> {
        // The registry is the uniqueness authority; the asset table follows it.
        self.capabilities.issue(asset.clone(), caller)?;

        let mut assets = self.assets_write()?;
        assets.insert(asset.clone(), AssetRecord::new(config.clone()));

        tracing::info!(%asset, owner = %caller, "asset initialized");

        Ok(TokenEvent::AssetInitialized(AssetInitialized {
            asset,
            owner: caller,
            config,
            occurred_at: Utc::now(),
        }))
    }

    /// Opt in to holding `asset`. No capability required; idempotent.
    pub fn register(&self, caller: AccountAddress, asset: AssetCode) -> LedgerResult<TokenEvent> {
        self.ensure_initialized(&asset)?;
        self.accounts.register(caller, &asset)?;

        Ok(TokenEvent::AccountRegistered(AccountRegistered {
            asset,
            account: caller,
            occurred_at: Utc::now(),
        }))
    }

    /// Create `amount` new units in `dst`'s holding.
    ///
    /// Requires the Mint capability. The destination is auto-registered on
    /// first deposit; a frozen destination rejects the mint.
    pub fn mint(
        &self,
        caller: AccountAddress,
        dst: AccountAddress,
        asset: AssetCode,
        amount: u64,
    ) -> LedgerResult<TokenEvent> {
        self.capabilities
            .require(caller, &asset, CapabilityKind::Mint)?;
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let mut assets = self.assets_write()?;
        let record = assets
            .get_mut(&asset)
            .ok_or_else(|| LedgerError::UnknownAsset {
                asset: asset.clone(),
            })?;

        // Pre-compute the supply so a supply overflow fails before the credit
        // lands (no partial effects).
        let new_supply = if record.config.monitor_supply {
            Some(record.supply.checked_add(u128::from(amount)).ok_or(
                LedgerError::BalanceOverflow {
                    account: dst,
                    asset: asset.clone(),
                },
            )?)
        } else {
            None
        };

        self.accounts.credit(dst, &asset, amount)?;
        if let Some(supply) = new_supply {
            record.supply = supply;
        }

        tracing::debug!(%asset, dst = %dst, amount, "minted");

        Ok(TokenEvent::Minted(Minted {
            asset,
            dst,
            amount,
            occurred_at: Utc::now(),
        }))
    }

    /// Destroy `amount` units from the **caller's own** holding.
    ///
    /// Requires the Burn capability; the holder burns their own funds.
    pub fn burn(
        &self,
        caller: AccountAddress,
        asset: AssetCode,
        amount: u64,
    ) -> LedgerResult<TokenEvent> {
        self.capabilities
            .require(caller, &asset, CapabilityKind::Burn)?;
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let mut assets = self.assets_write()?;
        let record = assets
            .get_mut(&asset)
            .ok_or_else(|| LedgerError::UnknownAsset {
                asset: asset.clone(),
            })?;

        let new_supply = if record.config.monitor_supply {
            // Underflow here would mean the conservation invariant is already
            // broken; surface it as a store fault rather than clamping.
            Some(
                record
                    .supply
                    .checked_sub(u128::from(amount))
                    .ok_or_else(|| LedgerError::store("supply underflow"))?,
            )
        } else {
            None
        };

        self.accounts.debit(caller, &asset, amount)?;
        if let Some(supply) = new_supply {
            record.supply = supply;
        }

        tracing::debug!(%asset, account = %caller, amount, "burned");

        Ok(TokenEvent::Burned(Burned {
            asset,
            account: caller,
            amount,
            occurred_at: Utc::now(),
        }))
    }

    /// Block balance mutation for `target`'s holding of `asset`.
    ///
    /// Requires the Freeze capability. Idempotent; the balance is untouched.
    pub fn freeze(
        &self,
        caller: AccountAddress,
        target: AccountAddress,
        asset: AssetCode,
    ) -> LedgerResult<TokenEvent> {
        self.capabilities
            .require(caller, &asset, CapabilityKind::Freeze)?;
        self.accounts.set_frozen(target, &asset, true)?;

        tracing::info!(%asset, account = %target, "account frozen");

        Ok(TokenEvent::Frozen(FreezeToggled {
            asset,
            account: target,
            occurred_at: Utc::now(),
        }))
    }

    /// Symmetric to [`freeze`](Self::freeze): restore normal operation.
    pub fn unfreeze(
        &self,
        caller: AccountAddress,
        target: AccountAddress,
        asset: AssetCode,
    ) -> LedgerResult<TokenEvent> {
        self.capabilities
            .require(caller, &asset, CapabilityKind::Freeze)?;
        self.accounts.set_frozen(target, &asset, false)?;

        tracing::info!(%asset, account = %target, "account unfrozen");

        Ok(TokenEvent::Unfrozen(FreezeToggled {
            asset,
            account: target,
            occurred_at: Utc::now(),
        }))
    }

    /// Balance of `account`; 0 if unregistered.
    pub fn balance_of(&self, account: AccountAddress, asset: &AssetCode) -> LedgerResult<u64> {
        self.accounts.balance_of(account, asset)
    }

    /// Freeze flag of `account`; false if unregistered.
    pub fn is_frozen(&self, account: AccountAddress, asset: &AssetCode) -> LedgerResult<bool> {
        self.accounts.is_frozen(account, asset)
    }

    /// Monitored total supply; `None` when the asset does not monitor supply.
    pub fn supply_of(&self, asset: &AssetCode) -> LedgerResult<Option<u128>> {
        let assets = self.assets_read()?;
        let record = assets.get(asset).ok_or_else(|| LedgerError::UnknownAsset {
            asset: asset.clone(),
        })?;
        Ok(record.config.monitor_supply.then_some(record.supply))
    }

    /// Immutable config stored at initialization.
    pub fn metadata_of(&self, asset: &AssetCode) -> LedgerResult<AssetConfig> {
        let assets = self.assets_read()?;
        let record = assets.get(asset).ok_or_else(|| LedgerError::UnknownAsset {
            asset: asset.clone(),
        })?;
        Ok(record.config.clone())
    }

    /// An asset must exist before anyone can opt in to holding it. Minting
    /// into an unregistered destination is the only implicit-creation path.
    fn ensure_initialized(&self, asset: &AssetCode) -> LedgerResult<()> {
        let assets = self.assets_read()?;
        if assets.contains_key(asset) {
            Ok(())
        } else {
            Err(LedgerError::UnknownAsset {
                asset: asset.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use capledger_accounts::InMemoryAccountStore;
    use capledger_capability::InMemoryCapabilityRegistry;
    use proptest::prelude::*;

    fn test_ledger() -> Ledger<InMemoryAccountStore, InMemoryCapabilityRegistry> {
        Ledger::new(InMemoryAccountStore::new(), InMemoryCapabilityRegistry::new())
    }

    fn usdy() -> AssetCode {
        AssetCode::new("USDY")
    }

    fn usdy_config() -> AssetConfig {
        AssetConfig {
            name: "US Dollar Yield".to_string(),
            symbol: "USDY".to_string(),
            decimals: 6,
            monitor_supply: true,
        }
    }

    #[test]
    fn initialize_succeeds_at_most_once() {
        let ledger = test_ledger();
        let owner = AccountAddress::new();

        let event = ledger.initialize(owner, usdy(), usdy_config()).unwrap();
        match event {
            TokenEvent::AssetInitialized(e) => {
                assert_eq!(e.owner, owner);
                assert_eq!(e.config, usdy_config());
            }
            other => panic!("expected AssetInitialized, got {other:?}"),
        }

        let err = ledger
            .initialize(AccountAddress::new(), usdy(), usdy_config())
            .unwrap_err();
        assert_eq!(err, LedgerError::AlreadyInitialized { asset: usdy() });
    }

    #[test]
    fn initialize_registers_no_balance() {
        let ledger = test_ledger();
        let owner = AccountAddress::new();
        ledger.initialize(owner, usdy(), usdy_config()).unwrap();

        assert_eq!(ledger.balance_of(owner, &usdy()).unwrap(), 0);
        assert_eq!(ledger.supply_of(&usdy()).unwrap(), Some(0));
    }

    #[test]
    fn mint_without_capability_fails_and_leaves_balance_unchanged() {
        let ledger = test_ledger();
        let owner = AccountAddress::new();
        let stranger = AccountAddress::new();
        let user = AccountAddress::new();
        ledger.initialize(owner, usdy(), usdy_config()).unwrap();

        let err = ledger.mint(stranger, user, usdy(), 100).unwrap_err();
        assert_eq!(
            err,
            LedgerError::NoCapability {
                account: stranger,
                asset: usdy(),
                kind: CapabilityKind::Mint,
            }
        );
        assert_eq!(ledger.balance_of(user, &usdy()).unwrap(), 0);
        assert_eq!(ledger.supply_of(&usdy()).unwrap(), Some(0));
    }

    #[test]
    fn mint_auto_registers_the_destination() {
        let ledger = test_ledger();
        let owner = AccountAddress::new();
        let user = AccountAddress::new();
        ledger.initialize(owner, usdy(), usdy_config()).unwrap();

        // `user` never called register.
        ledger.mint(owner, user, usdy(), 1_000).unwrap();

        assert_eq!(ledger.balance_of(user, &usdy()).unwrap(), 1_000);
    }

    #[test]
    fn zero_amount_mint_and_burn_are_rejected() {
        let ledger = test_ledger();
        let owner = AccountAddress::new();
        ledger.initialize(owner, usdy(), usdy_config()).unwrap();

        assert_eq!(
            ledger.mint(owner, owner, usdy(), 0).unwrap_err(),
            LedgerError::InvalidAmount
        );
        assert_eq!(
            ledger.burn(owner, usdy(), 0).unwrap_err(),
            LedgerError::InvalidAmount
        );
    }

    #[test]
    fn burn_debits_the_callers_own_balance() {
        let ledger = test_ledger();
        let owner = AccountAddress::new();
        let user = AccountAddress::new();
        ledger.initialize(owner, usdy(), usdy_config()).unwrap();

        ledger.mint(owner, owner, usdy(), 500).unwrap();
        ledger.mint(owner, user, usdy(), 300).unwrap();

        ledger.burn(owner, usdy(), 200).unwrap();

        assert_eq!(ledger.balance_of(owner, &usdy()).unwrap(), 300);
        assert_eq!(ledger.balance_of(user, &usdy()).unwrap(), 300);
        assert_eq!(ledger.supply_of(&usdy()).unwrap(), Some(600));
    }

    #[test]
    fn register_is_idempotent_through_the_ledger() {
        let ledger = test_ledger();
        let owner = AccountAddress::new();
        let user = AccountAddress::new();
        ledger.initialize(owner, usdy(), usdy_config()).unwrap();

        ledger.register(user, usdy()).unwrap();
        ledger.register(user, usdy()).unwrap();

        assert_eq!(ledger.balance_of(user, &usdy()).unwrap(), 0);
    }

    #[test]
    fn register_requires_an_initialized_asset() {
        let ledger = test_ledger();
        let user = AccountAddress::new();

        let err = ledger.register(user, usdy()).unwrap_err();
        assert_eq!(err, LedgerError::UnknownAsset { asset: usdy() });
    }

    #[test]
    fn supply_is_not_tracked_when_monitoring_is_disabled() {
        let ledger = test_ledger();
        let owner = AccountAddress::new();
        let config = AssetConfig {
            monitor_supply: false,
            ..usdy_config()
        };
        ledger.initialize(owner, usdy(), config).unwrap();

        ledger.mint(owner, owner, usdy(), 1_000).unwrap();
        ledger.burn(owner, usdy(), 400).unwrap();

        assert_eq!(ledger.supply_of(&usdy()).unwrap(), None);
        assert_eq!(ledger.balance_of(owner, &usdy()).unwrap(), 600);
    }

    #[test]
    fn metadata_is_immutable_and_queryable() {
        let ledger = test_ledger();
        let owner = AccountAddress::new();
        ledger.initialize(owner, usdy(), usdy_config()).unwrap();

        let config = ledger.metadata_of(&usdy()).unwrap();
        assert_eq!(config.symbol, "USDY");
        assert_eq!(config.decimals, 6);

        let err = ledger.metadata_of(&AssetCode::new("EURY")).unwrap_err();
        assert!(matches!(err, LedgerError::UnknownAsset { .. }));
    }

    /// The end-to-end walkthrough: initialize, mint to a user, show the user
    /// cannot burn, gate minting behind freeze/unfreeze.
    #[test]
    fn usdy_lifecycle_scenario() {
        let ledger = test_ledger();
        let owner = AccountAddress::new();
        let user = AccountAddress::new();

        ledger.initialize(owner, usdy(), usdy_config()).unwrap();

        ledger.mint(owner, user, usdy(), 1_000_000).unwrap();
        assert_eq!(ledger.balance_of(user, &usdy()).unwrap(), 1_000_000);
        assert_eq!(ledger.supply_of(&usdy()).unwrap(), Some(1_000_000));

        // The user never received the Burn capability.
        let err = ledger.burn(user, usdy(), 1).unwrap_err();
        assert_eq!(
            err,
            LedgerError::NoCapability {
                account: user,
                asset: usdy(),
                kind: CapabilityKind::Burn,
            }
        );

        ledger.freeze(owner, user, usdy()).unwrap();
        assert!(ledger.is_frozen(user, &usdy()).unwrap());
        let err = ledger.mint(owner, user, usdy(), 500).unwrap_err();
        assert!(matches!(err, LedgerError::FrozenAccount { .. }));
        // Failed mint must not move the supply.
        assert_eq!(ledger.supply_of(&usdy()).unwrap(), Some(1_000_000));

        ledger.unfreeze(owner, user, usdy()).unwrap();
        ledger.mint(owner, user, usdy(), 500).unwrap();
        assert_eq!(ledger.balance_of(user, &usdy()).unwrap(), 1_000_500);
        assert_eq!(ledger.supply_of(&usdy()).unwrap(), Some(1_000_500));
    }

    #[test]
    fn freeze_requires_the_freeze_capability() {
        let ledger = test_ledger();
        let owner = AccountAddress::new();
        let user = AccountAddress::new();
        ledger.initialize(owner, usdy(), usdy_config()).unwrap();

        let err = ledger.freeze(user, owner, usdy()).unwrap_err();
        assert_eq!(
            err,
            LedgerError::NoCapability {
                account: user,
                asset: usdy(),
                kind: CapabilityKind::Freeze,
            }
        );
    }

    #[test]
    fn frozen_holder_cannot_burn() {
        let ledger = test_ledger();
        let owner = AccountAddress::new();
        ledger.initialize(owner, usdy(), usdy_config()).unwrap();
        ledger.mint(owner, owner, usdy(), 100).unwrap();

        ledger.freeze(owner, owner, usdy()).unwrap();
        let err = ledger.burn(owner, usdy(), 10).unwrap_err();
        assert!(matches!(err, LedgerError::FrozenAccount { .. }));
        assert_eq!(ledger.supply_of(&usdy()).unwrap(), Some(100));

        ledger.unfreeze(owner, owner, usdy()).unwrap();
        ledger.burn(owner, usdy(), 10).unwrap();
        assert_eq!(ledger.supply_of(&usdy()).unwrap(), Some(90));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: with supply monitoring enabled, after any sequence of
        /// mint/burn operations the monitored supply equals the sum of all
        /// account balances (conservation).
        #[test]
        fn supply_equals_sum_of_balances(
            ops in prop::collection::vec((0usize..4, any::<bool>(), 1u64..100_000), 1..60)
        ) {
            let ledger = test_ledger();
            let owner = AccountAddress::new();
            let accounts = [owner, AccountAddress::new(), AccountAddress::new(), AccountAddress::new()];
            ledger.initialize(owner, usdy(), usdy_config()).unwrap();

            for (idx, is_mint, amount) in ops {
                if is_mint {
                    ledger.mint(owner, accounts[idx], usdy(), amount).unwrap();
                } else {
                    // Burns come out of the owner's holding; over-burns fail
                    // without moving supply or balances.
                    let _ = ledger.burn(owner, usdy(), amount);
                }

                let sum: u128 = accounts
                    .iter()
                    .map(|a| u128::from(ledger.balance_of(*a, &usdy()).unwrap()))
                    .sum();
                prop_assert_eq!(ledger.supply_of(&usdy()).unwrap(), Some(sum));
            }
        }
    }
}
