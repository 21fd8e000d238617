//! `capledger-accounts` — per-account balance and freeze-state storage.
//!
//! Leaf component: no capability checks, no orchestration. The store only
//! guarantees local invariants (balances never go negative, frozen holdings
//! reject mutation); *who* may mutate is decided a layer up.

pub mod in_memory;
pub mod store;

pub use in_memory::InMemoryAccountStore;
pub use store::{AccountStore, Holding};
