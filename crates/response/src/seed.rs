//! Input for constructing and mixing envelopes
//!
//! A [`Seed`] is the `{status?, data?, trace?}` shape: codes may be numeric
//! or symbolic, so a seed can come from hand-written JSON as well as from
//! another envelope's snapshot.

use crate::envelope::ResponseEnvelope;
use crate::snapshot::Snapshot;
use envelope_core::{Code, Payload};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Codes, data and trace to apply to an envelope
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Seed {
    /// Codes to push, in order
    #[serde(default)]
    pub status: Vec<Code>,
    /// Payload to merge
    #[serde(default)]
    pub data: Option<Payload>,
    /// Trace detail to attach
    #[serde(default)]
    pub trace: BTreeMap<Code, Value>,
}

impl Seed {
    /// Empty seed
    pub fn new() -> Self {
        Self::default()
    }

    /// Add codes
    pub fn status<I, C>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Code>,
    {
        self.status.extend(codes.into_iter().map(Into::into));
        self
    }

    /// Set the payload
    pub fn data(mut self, data: Payload) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach trace detail to a code
    pub fn trace(mut self, code: impl Into<Code>, trace: Value) -> Self {
        self.trace.insert(code.into(), trace);
        self
    }

    /// Check if applying this seed would change nothing but the timestamp
    pub fn is_empty(&self) -> bool {
        self.status.is_empty() && self.data.is_none() && self.trace.is_empty()
    }
}

impl From<Snapshot> for Seed {
    fn from(snapshot: Snapshot) -> Self {
        Seed {
            status: snapshot.status.into_iter().map(Code::Numeric).collect(),
            data: snapshot.data,
            trace: snapshot
                .trace
                .unwrap_or_default()
                .into_iter()
                .map(|(code, trace)| (Code::Numeric(code), trace))
                .collect(),
        }
    }
}

impl From<&Snapshot> for Seed {
    fn from(snapshot: &Snapshot) -> Self {
        Seed::from(snapshot.clone())
    }
}

impl From<&ResponseEnvelope> for Seed {
    fn from(envelope: &ResponseEnvelope) -> Self {
        Seed {
            status: envelope.codes().iter().copied().map(Code::Numeric).collect(),
            data: envelope.data().cloned(),
            trace: envelope
                .trace()
                .iter()
                .map(|(code, trace)| (Code::Numeric(*code), trace.clone()))
                .collect(),
        }
    }
}
