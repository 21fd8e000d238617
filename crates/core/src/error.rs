//! Domain error model.

use thiserror::Error;

use crate::asset::AssetCode;
use crate::capability_kind::CapabilityKind;
use crate::id::AccountAddress;

/// Result type used across the ledger core.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-level error.
///
/// Every variant is terminal for the triggering operation: these are
/// authorization/invariant violations, not transient faults, so callers must
/// not retry without changing state first. Each variant carries the offending
/// account/asset so the host can translate it into a user-visible abort.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Capabilities for the asset were already issued.
    #[error("asset '{asset}' is already initialized")]
    AlreadyInitialized { asset: AssetCode },

    /// The caller does not hold the required capability.
    #[error("account {account} holds no {kind} capability for asset '{asset}'")]
    NoCapability {
        account: AccountAddress,
        asset: AssetCode,
        kind: CapabilityKind,
    },

    /// The account has no holding for the asset.
    #[error("account {account} is not registered for asset '{asset}'")]
    NotRegistered {
        account: AccountAddress,
        asset: AssetCode,
    },

    /// A debit would drive the balance negative.
    #[error(
        "insufficient balance for account {account} on asset '{asset}': requested {requested}, available {available}"
    )]
    InsufficientBalance {
        account: AccountAddress,
        asset: AssetCode,
        requested: u64,
        available: u64,
    },

    /// The holding is frozen; balance-mutating operations are blocked.
    #[error("account {account} is frozen for asset '{asset}'")]
    FrozenAccount {
        account: AccountAddress,
        asset: AssetCode,
    },

    /// Zero-effect amounts are rejected rather than silently accepted.
    #[error("amount must be non-zero")]
    InvalidAmount,

    /// The asset was never initialized.
    #[error("unknown asset '{asset}'")]
    UnknownAsset { asset: AssetCode },

    /// A credit would overflow the holding's balance.
    #[error("balance overflow for account {account} on asset '{asset}'")]
    BalanceOverflow {
        account: AccountAddress,
        asset: AssetCode,
    },

    /// An identifier failed to parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Backing store failure (e.g. poisoned lock). Infrastructure, not domain.
    #[error("store failure: {0}")]
    Store(String),
}

impl LedgerError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}
