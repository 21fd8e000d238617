//! `capledger-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers, the asset code value type, and the ledger
//! error model shared by every other crate in the workspace.

pub mod asset;
pub mod capability_kind;
pub mod error;
pub mod id;

pub use asset::AssetCode;
pub use capability_kind::CapabilityKind;
pub use error::{LedgerError, LedgerResult};
pub use id::AccountAddress;
