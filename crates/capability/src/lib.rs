//! `capledger-capability` — capability issuance and validation (zero-trust).
//!
//! Authorization is modeled as **possession of an unforgeable handle** rather
//! than an ambient allow-list: the registry stores the sole authorized holder
//! per (asset, kind) and `require` is a single O(1) lookup-and-compare. This
//! crate is intentionally decoupled from balances and orchestration.

pub mod capability;
pub mod registry;

pub use capability::{Capability, IssuedCapabilities};
pub use capledger_core::CapabilityKind;
pub use registry::{CapabilityRegistry, InMemoryCapabilityRegistry};
