use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use capledger_core::AssetCode;

/// Envelope for a committed ledger effect, with stream metadata.
///
/// Events are organized into one stream per asset. The `sequence_number` is
/// monotonically increasing within that stream (starting at 1), which lets
/// consumers detect gaps and order effects deterministically even when the
/// transport reorders messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,
    asset: AssetCode,

    /// Monotonically increasing position in the asset's effect stream.
    sequence_number: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(event_id: Uuid, asset: AssetCode, sequence_number: u64, payload: E) -> Self {
        Self {
            event_id,
            asset,
            sequence_number,
            payload,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn asset(&self) -> &AssetCode {
        &self.asset
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}

impl<E> EventEnvelope<E>
where
    E: Serialize,
{
    /// Erase the payload into JSON for hosts that index or persist effects
    /// without knowing the concrete event type.
    ///
    /// Stream metadata (event id, asset, sequence number) is preserved, so a
    /// consumer can still order and de-duplicate erased envelopes.
    pub fn to_erased(&self) -> Result<EventEnvelope<JsonValue>, serde_json::Error> {
        Ok(EventEnvelope {
            event_id: self.event_id,
            asset: self.asset.clone(),
            sequence_number: self.sequence_number,
            payload: serde_json::to_value(&self.payload)?,
        })
    }
}
