//! `capledger-ledger` — the public face of the capability-gated ledger core.
//!
//! This crate orchestrates the two leaf components: every public operation
//! asks the [`CapabilityRegistry`] whether the caller holds the required
//! capability before touching the [`AccountStore`], then returns the
//! committed effect as a typed [`TokenEvent`] for host-side emission.
//!
//! [`CapabilityRegistry`]: capledger_capability::CapabilityRegistry
//! [`AccountStore`]: capledger_accounts::AccountStore
//! [`TokenEvent`]: crate::events::TokenEvent

pub mod asset;
pub mod events;
pub mod ledger;
pub mod service;

pub use asset::AssetConfig;
pub use events::TokenEvent;
pub use ledger::Ledger;
pub use service::{LedgerService, ServiceError};
