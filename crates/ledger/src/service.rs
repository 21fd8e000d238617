//! Operation execution pipeline (application-level orchestration).
//!
//! `LedgerService` composes a [`Ledger`] with an [`EventBus`]: it executes an
//! operation, wraps the committed effect in an asset-scoped
//! [`EventEnvelope`] with a monotonically increasing sequence number, and
//! publishes it for downstream consumers (indexers, audit trails).
//!
//! The mutation is committed **before** publication. If publication fails the
//! state change stands and the error is surfaced as [`ServiceError::Publish`];
//! the host may republish (at-least-once, consumers must be idempotent).

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;
use uuid::Uuid;

use capledger_accounts::AccountStore;
use capledger_capability::CapabilityRegistry;
use capledger_core::{AccountAddress, AssetCode, LedgerError};
use capledger_events::{EventBus, EventEnvelope};

use crate::asset::AssetConfig;
use crate::events::TokenEvent;
use crate::ledger::Ledger;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The operation itself failed; nothing was mutated or published.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Publication failed after a committed mutation. The built envelope is
    /// carried along so the host can republish it (at-least-once;
    /// consumers must be idempotent).
    #[error("event publication failed: {reason}")]
    Publish {
        reason: String,
        envelope: EventEnvelope<TokenEvent>,
    },
}

/// Host-facing execution engine: operate, envelope, publish.
///
/// ## Generic parameters
///
/// - `S`: account store implementation
/// - `C`: capability registry implementation
/// - `B`: event bus carrying `EventEnvelope<TokenEvent>` messages
#[derive(Debug)]
pub struct LedgerService<S, C, B> {
    ledger: Ledger<S, C>,
    bus: B,
    /// Next sequence number per asset stream (first envelope gets 1).
    sequences: RwLock<HashMap<AssetCode, u64>>,
}

impl<S, C, B> LedgerService<S, C, B> {
    pub fn new(ledger: Ledger<S, C>, bus: B) -> Self {
        Self {
            ledger,
            bus,
            sequences: RwLock::new(HashMap::new()),
        }
    }

    /// Read-side access to the underlying ledger.
    pub fn ledger(&self) -> &Ledger<S, C> {
        &self.ledger
    }

    pub fn into_parts(self) -> (Ledger<S, C>, B) {
        (self.ledger, self.bus)
    }
}

impl<S, C, B> LedgerService<S, C, B>
where
    S: AccountStore,
    C: CapabilityRegistry,
    B: EventBus<EventEnvelope<TokenEvent>>,
{
    pub fn initialize(
        &self,
        caller: AccountAddress,
        asset: AssetCode,
        config: AssetConfig,
    ) -> Result<EventEnvelope<TokenEvent>, ServiceError> {
        let event = self.ledger.initialize(caller, asset, config)?;
        self.commit(event)
    }

    pub fn register(
        &self,
        caller: AccountAddress,
        asset: AssetCode,
    ) -> Result<EventEnvelope<TokenEvent>, ServiceError> {
        let event = self.ledger.register(caller, asset)?;
        self.commit(event)
    }

    pub fn mint(
        &self,
        caller: AccountAddress,
        dst: AccountAddress,
        asset: AssetCode,
        amount: u64,
    ) -> Result<EventEnvelope<TokenEvent>, ServiceError> {
        let event = self.ledger.mint(caller, dst, asset, amount)?;
        self.commit(event)
    }

    pub fn burn(
        &self,
        caller: AccountAddress,
        asset: AssetCode,
        amount: u64,
    ) -> Result<EventEnvelope<TokenEvent>, ServiceError> {
        let event = self.ledger.burn(caller, asset, amount)?;
        self.commit(event)
    }

    pub fn freeze(
        &self,
        caller: AccountAddress,
        target: AccountAddress,
        asset: AssetCode,
    ) -> Result<EventEnvelope<TokenEvent>, ServiceError> {
        let event = self.ledger.freeze(caller, target, asset)?;
        self.commit(event)
    }

    pub fn unfreeze(
        &self,
        caller: AccountAddress,
        target: AccountAddress,
        asset: AssetCode,
    ) -> Result<EventEnvelope<TokenEvent>, ServiceError> {
        let event = self.ledger.unfreeze(caller, target, asset)?;
        self.commit(event)
    }

    /// Envelope the committed event and publish it.
    fn commit(&self, event: TokenEvent) -> Result<EventEnvelope<TokenEvent>, ServiceError> {
        let sequence_number = self.next_sequence(event.asset())?;
        let envelope = EventEnvelope::new(
            Uuid::now_v7(),
            event.asset().clone(),
            sequence_number,
            event,
        );

        match self.bus.publish(envelope.clone()) {
            Ok(()) => Ok(envelope),
            Err(e) => Err(ServiceError::Publish {
                reason: format!("{e:?}"),
                envelope,
            }),
        }
    }

    fn next_sequence(&self, asset: &AssetCode) -> Result<u64, ServiceError> {
        let mut sequences = self
            .sequences
            .write()
            .map_err(|_| ServiceError::Ledger(LedgerError::store("sequence table lock poisoned")))?;
        let next = sequences.entry(asset.clone()).or_insert(0);
        *next += 1;
        Ok(*next)
    }
}
