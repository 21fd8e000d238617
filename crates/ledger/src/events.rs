use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use capledger_core::{AccountAddress, AssetCode};
use capledger_events::Event;

use crate::asset::AssetConfig;

/// Event: AssetInitialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInitialized {
    pub asset: AssetCode,
    pub owner: AccountAddress,
    pub config: AssetConfig,
    pub occurred_at: DateTime<Utc>,
}

/// Event: AccountRegistered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRegistered {
    pub asset: AssetCode,
    pub account: AccountAddress,
    pub occurred_at: DateTime<Utc>,
}

/// Event: Minted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minted {
    pub asset: AssetCode,
    pub dst: AccountAddress,
    pub amount: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: Burned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Burned {
    pub asset: AssetCode,
    pub account: AccountAddress,
    pub amount: u64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: Frozen / Unfrozen (same shape, opposite direction).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeToggled {
    pub asset: AssetCode,
    pub account: AccountAddress,
    pub occurred_at: DateTime<Utc>,
}

/// Committed ledger effect, returned by every successful operation.
///
/// The ledger mutates state and hands the effect back to the caller; emission
/// (indexing, audit trails, downstream projections) is the host's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenEvent {
    AssetInitialized(AssetInitialized),
    AccountRegistered(AccountRegistered),
    Minted(Minted),
    Burned(Burned),
    Frozen(FreezeToggled),
    Unfrozen(FreezeToggled),
}

impl TokenEvent {
    /// Asset this effect belongs to (stream key for envelopes).
    pub fn asset(&self) -> &AssetCode {
        match self {
            TokenEvent::AssetInitialized(e) => &e.asset,
            TokenEvent::AccountRegistered(e) => &e.asset,
            TokenEvent::Minted(e) => &e.asset,
            TokenEvent::Burned(e) => &e.asset,
            TokenEvent::Frozen(e) => &e.asset,
            TokenEvent::Unfrozen(e) => &e.asset,
        }
    }
}

impl Event for TokenEvent {
    fn event_type(&self) -> &'static str {
        match self {
            TokenEvent::AssetInitialized(_) => "token.asset.initialized",
            TokenEvent::AccountRegistered(_) => "token.account.registered",
            TokenEvent::Minted(_) => "token.minted",
            TokenEvent::Burned(_) => "token.burned",
            TokenEvent::Frozen(_) => "token.account.frozen",
            TokenEvent::Unfrozen(_) => "token.account.unfrozen",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            TokenEvent::AssetInitialized(e) => e.occurred_at,
            TokenEvent::AccountRegistered(e) => e.occurred_at,
            TokenEvent::Minted(e) => e.occurred_at,
            TokenEvent::Burned(e) => e.occurred_at,
            TokenEvent::Frozen(e) => e.occurred_at,
            TokenEvent::Unfrozen(e) => e.occurred_at,
        }
    }
}
