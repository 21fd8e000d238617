//! `capledger-events` — event mechanics (trait, envelope, pub/sub).
//!
//! The ledger core returns a typed effect record for every committed
//! operation; this crate provides the machinery hosts use to distribute
//! those records to downstream consumers (indexers, projections, auditors).

pub mod bus;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
