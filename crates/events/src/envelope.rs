use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Event;

/// Envelope for an event, containing stream metadata.
///
/// This is the unit handed to whoever records approval history. Everything
/// but the event id and stream position is read from the event itself.
///
/// - **Append-only**: `sequence_number` is monotonically increasing per aggregate.
/// - `payload` is the domain event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope<E> {
    event_id: Uuid,

    aggregate_id: String,
    aggregate_type: String,

    /// Monotonically increasing position in the aggregate stream.
    sequence_number: u64,

    event_type: String,
    schema_version: u32,
    occurred_at: DateTime<Utc>,

    payload: E,
}

impl<E: Event> EventEnvelope<E> {
    pub fn new(
        event_id: Uuid,
        aggregate_type: impl Into<String>,
        sequence_number: u64,
        payload: E,
    ) -> Self {
        Self {
            event_id,
            aggregate_id: payload.aggregate_id().to_string(),
            aggregate_type: aggregate_type.into(),
            sequence_number,
            event_type: payload.event_type().to_string(),
            schema_version: payload.version(),
            occurred_at: payload.occurred_at(),
            payload,
        }
    }

    /// Envelope for `event` at `sequence_number` of its own aggregate stream,
    /// under a fresh time-ordered (UUIDv7) event id.
    pub fn record(aggregate_type: impl Into<String>, sequence_number: u64, event: E) -> Self {
        Self::new(Uuid::now_v7(), aggregate_type, sequence_number, event)
    }
}

impl<E> EventEnvelope<E> {
    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn aggregate_id(&self) -> &str {
        &self.aggregate_id
    }

    pub fn aggregate_type(&self) -> &str {
        &self.aggregate_type
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}
