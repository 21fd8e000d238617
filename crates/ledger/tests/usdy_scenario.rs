//! End-to-end walkthrough of the USDY lifecycle through the service layer,
//! with a subscriber observing the committed effect stream.

use std::sync::Arc;

use anyhow::Result;

use capledger_accounts::InMemoryAccountStore;
use capledger_capability::InMemoryCapabilityRegistry;
use capledger_core::{AccountAddress, AssetCode, CapabilityKind, LedgerError};
use capledger_events::{Event as _, EventBus, EventEnvelope, InMemoryEventBus};
use capledger_ledger::{AssetConfig, Ledger, LedgerService, TokenEvent};

type Bus = Arc<InMemoryEventBus<EventEnvelope<TokenEvent>>>;

fn service() -> (LedgerService<InMemoryAccountStore, InMemoryCapabilityRegistry, Bus>, Bus) {
    let bus: Bus = Arc::new(InMemoryEventBus::new());
    let ledger = Ledger::new(InMemoryAccountStore::new(), InMemoryCapabilityRegistry::new());
    (LedgerService::new(ledger, Arc::clone(&bus)), bus)
}

fn usdy() -> AssetCode {
    AssetCode::new("USDY")
}

#[test]
fn usdy_full_lifecycle_with_effect_stream() -> Result<()> {
    let (service, bus) = service();
    let subscription = bus.subscribe();

    let owner = AccountAddress::new();
    let user = AccountAddress::new();

    // Initialize: owner receives all three capabilities, supply monitored.
    service.initialize(
        owner,
        usdy(),
        AssetConfig {
            name: "US Dollar Yield".to_string(),
            symbol: "USDY".to_string(),
            decimals: 6,
            monitor_supply: true,
        },
    )?;

    // Second initialization is rejected, even from the owner.
    let err = service
        .initialize(
            owner,
            usdy(),
            AssetConfig {
                name: "US Dollar Yield".to_string(),
                symbol: "USDY".to_string(),
                decimals: 6,
                monitor_supply: true,
            },
        )
        .unwrap_err();
    assert_eq!(
        err,
        capledger_ledger::ServiceError::Ledger(LedgerError::AlreadyInitialized { asset: usdy() })
    );

    // Owner mints 1_000_000 to the user (auto-registered on first deposit).
    service.mint(owner, user, usdy(), 1_000_000)?;
    assert_eq!(service.ledger().balance_of(user, &usdy())?, 1_000_000);
    assert_eq!(service.ledger().supply_of(&usdy())?, Some(1_000_000));

    // The user holds no Burn capability.
    match service.burn(user, usdy(), 1) {
        Err(capledger_ledger::ServiceError::Ledger(LedgerError::NoCapability {
            account,
            kind,
            ..
        })) => {
            assert_eq!(account, user);
            assert_eq!(kind, CapabilityKind::Burn);
        }
        other => panic!("expected NoCapability, got {other:?}"),
    }

    // Freeze the user; minting toward them now fails.
    service.freeze(owner, user, usdy())?;
    assert!(service.mint(owner, user, usdy(), 500).is_err());
    assert_eq!(service.ledger().balance_of(user, &usdy())?, 1_000_000);

    // Unfreeze restores normal operation.
    service.unfreeze(owner, user, usdy())?;
    service.mint(owner, user, usdy(), 500)?;
    assert_eq!(service.ledger().balance_of(user, &usdy())?, 1_000_500);
    assert_eq!(service.ledger().supply_of(&usdy())?, Some(1_000_500));

    // The subscriber saw exactly the committed effects, in order, with
    // gap-free sequence numbers.
    let mut sequence = 0;
    let mut kinds = Vec::new();
    while let Ok(envelope) = subscription.try_recv() {
        sequence += 1;
        assert_eq!(envelope.sequence_number(), sequence);
        assert_eq!(envelope.asset(), &usdy());
        kinds.push(envelope.payload().event_type());
    }
    assert_eq!(
        kinds,
        vec![
            "token.asset.initialized",
            "token.minted",
            "token.account.frozen",
            "token.account.unfrozen",
            "token.minted",
        ]
    );

    Ok(())
}

#[test]
fn two_assets_keep_independent_owners_supplies_and_streams() -> Result<()> {
    let (service, _bus) = service();

    let owner_usd = AccountAddress::new();
    let owner_eur = AccountAddress::new();
    let holder = AccountAddress::new();

    let config = |symbol: &str| AssetConfig {
        name: symbol.to_string(),
        symbol: symbol.to_string(),
        decimals: 6,
        monitor_supply: true,
    };

    service.initialize(owner_usd, AssetCode::new("USDY"), config("USDY"))?;
    service.initialize(owner_eur, AssetCode::new("EURY"), config("EURY"))?;

    service.mint(owner_usd, holder, AssetCode::new("USDY"), 100)?;
    service.mint(owner_eur, holder, AssetCode::new("EURY"), 250)?;

    // Cross-asset minting is unauthorized.
    assert!(service.mint(owner_usd, holder, AssetCode::new("EURY"), 1).is_err());

    // Freezing one asset leaves the other holding untouched.
    service.freeze(owner_usd, holder, AssetCode::new("USDY"))?;
    assert!(service.mint(owner_usd, holder, AssetCode::new("USDY"), 1).is_err());
    service.mint(owner_eur, holder, AssetCode::new("EURY"), 1)?;

    assert_eq!(service.ledger().supply_of(&AssetCode::new("USDY"))?, Some(100));
    assert_eq!(service.ledger().supply_of(&AssetCode::new("EURY"))?, Some(251));

    Ok(())
}
