use serde::{Deserialize, Serialize};

/// Display metadata and supply policy for one asset.
///
/// Fixed at `initialize` time; the ledger never mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Human-readable name (e.g. "Ondo US Dollar Yield").
    pub name: String,
    /// Short symbol (e.g. "USDY").
    pub symbol: String,
    /// Number of decimal places the smallest unit represents.
    pub decimals: u8,
    /// Track the total outstanding supply for this asset.
    pub monitor_supply: bool,
}

/// Per-asset ledger state: immutable config plus the monitored supply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AssetRecord {
    pub config: AssetConfig,
    /// Total outstanding balance. Only maintained when
    /// `config.monitor_supply` is set; stays 0 otherwise.
    pub supply: u128,
}

impl AssetRecord {
    pub fn new(config: AssetConfig) -> Self {
        Self { config, supply: 0 }
    }
}
