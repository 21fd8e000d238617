//! Asset code value type.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Identifier of a fungible asset.
///
/// Asset codes are modeled as opaque strings (e.g. "USDY"). The code is fixed
/// when the asset is initialized and never changes afterwards; everything the
/// ledger stores is keyed by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetCode(Cow<'static, str>);

impl AssetCode {
    pub fn new(code: impl Into<Cow<'static, str>>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for AssetCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for AssetCode {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AssetCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
