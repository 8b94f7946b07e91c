//! Envelope snapshot
//!
//! The snapshot is the external form of an envelope, consumed by transport
//! layers. Field presence is part of the contract:
//!
//! - `status` and `timestamp` are always present
//! - `data` is omitted when no data was pushed; an empty list or map is kept
//! - `trace` is omitted when no code carries trace detail

use chrono::{DateTime, SecondsFormat, Utc};
use envelope_core::{Family, Payload};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Point-in-time view of an envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Codes in insertion order
    pub status: Vec<u16>,
    /// Merged payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Payload>,
    /// Trace detail by code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<BTreeMap<u16, Value>>,
    /// RFC 3339 UTC, millisecond precision
    pub timestamp: String,
}

impl Snapshot {
    /// Derive a snapshot from envelope state
    pub fn at(
        codes: &[u16],
        data: Option<&Payload>,
        trace: &BTreeMap<u16, Value>,
        now: DateTime<Utc>,
    ) -> Self {
        Snapshot {
            status: codes.to_vec(),
            data: data.cloned(),
            trace: if trace.is_empty() {
                None
            } else {
                Some(trace.clone())
            },
            timestamp: format_timestamp(now),
        }
    }

    /// Check if the snapshot carries the error marker
    pub fn has_error(&self) -> bool {
        self.status.contains(&Family::Error.marker())
    }

    /// Render as a JSON value
    pub fn to_json(&self) -> Value {
        // Snapshot fields are all JSON-native
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
