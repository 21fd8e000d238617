//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LedgerError;

/// Address of an account (principal identity).
///
/// The host environment authenticates the caller before invoking the core;
/// an `AccountAddress` therefore stands for an already-verified principal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountAddress(Uuid);

impl AccountAddress {
    /// Create a new address.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing addresses explicitly in
    /// tests for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountAddress {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for AccountAddress {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<AccountAddress> for Uuid {
    fn from(value: AccountAddress) -> Self {
        value.0
    }
}

impl FromStr for AccountAddress {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s)
            .map_err(|e| LedgerError::invalid_id(format!("AccountAddress: {e}")))?;
        Ok(Self(uuid))
    }
}
