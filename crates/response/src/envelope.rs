//! The response envelope
//!
//! ## Family exclusion
//!
//! An envelope never holds a success (`2xxx`) and an error (`4xxx`) code at
//! the same time. Pushing a code switches the envelope to that code's family:
//! the family marker (`2000`/`4000`) is inserted and every code and trace
//! entry of the other family is evicted. Codes are processed in call order,
//! so within one call the last family wins.
//!
//! ## Atomicity
//!
//! Every mutator translates all of its codes (and checks its payload) before
//! touching state. A call that fails leaves the envelope exactly as it was.
//!
//! ## Snapshot
//!
//! [`ResponseEnvelope::result`] is refreshed after every mutation and always
//! carries the time of the refresh.

use crate::seed::Seed;
use crate::snapshot::Snapshot;
use chrono::{DateTime, Utc};
use envelope_core::{Code, Family, Payload, Result};
use envelope_dictionary::{registry, CodeDictionary};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::trace;

/// Mutable response builder for one API call
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    dictionary: Arc<CodeDictionary>,
    codes: Vec<u16>,
    data: Option<Payload>,
    trace: BTreeMap<u16, Value>,
    timestamp: Option<DateTime<Utc>>,
    snapshot: Snapshot,
}

impl Default for ResponseEnvelope {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseEnvelope {
    /// Empty envelope using the process-wide dictionary
    pub fn new() -> Self {
        Self::with_dictionary(registry::global())
    }

    /// Empty envelope translating codes through `dictionary`
    pub fn with_dictionary(dictionary: Arc<CodeDictionary>) -> Self {
        let now = Utc::now();
        let trace = BTreeMap::new();
        ResponseEnvelope {
            dictionary,
            codes: Vec::new(),
            data: None,
            snapshot: Snapshot::at(&[], None, &trace, now),
            trace,
            timestamp: Some(now),
        }
    }

    /// Envelope seeded with codes, data and trace
    ///
    /// The seed goes through the same rules as [`mix`](Self::mix).
    pub fn from_seed(seed: impl Into<Seed>) -> Result<Self> {
        let mut envelope = Self::new();
        envelope.mix(seed)?;
        Ok(envelope)
    }

    /// Seeded envelope translating codes through `dictionary`
    pub fn from_seed_with_dictionary(
        seed: impl Into<Seed>,
        dictionary: Arc<CodeDictionary>,
    ) -> Result<Self> {
        let mut envelope = Self::with_dictionary(dictionary);
        envelope.mix(seed)?;
        Ok(envelope)
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Push one or more codes
    ///
    /// # Errors
    ///
    /// Returns `UnknownCode` if a symbolic code is not registered or a numeric
    /// code is not well formed. Nothing is pushed in that case.
    pub fn push_code<I, C>(&mut self, codes: I) -> Result<()>
    where
        I: IntoIterator<Item = C>,
        C: Into<Code>,
    {
        let codes = self.resolve_all(codes)?;
        self.insert_codes(&codes);
        self.touch();
        Ok(())
    }

    /// Merge a JSON array or object into the payload
    ///
    /// # Errors
    ///
    /// Returns `InvalidMerge` if `value` is not an array or object, or does
    /// not match the shape of the data already held.
    pub fn push_data(&mut self, value: Value) -> Result<()> {
        self.push_payload(Payload::try_from(value)?)
    }

    /// Merge a payload into the data already held
    ///
    /// # Errors
    ///
    /// Returns `InvalidMerge` on a shape mismatch; the held data is unchanged.
    pub fn push_payload(&mut self, payload: Payload) -> Result<()> {
        match &mut self.data {
            Some(held) => held.merge(payload)?,
            None => self.data = Some(payload),
        }
        self.touch();
        Ok(())
    }

    /// Attach trace detail to a code, replacing any previous detail
    ///
    /// # Errors
    ///
    /// Returns `UnknownCode` if the code cannot be translated.
    pub fn push_trace(&mut self, code: impl Into<Code>, detail: Value) -> Result<()> {
        let code = self.dictionary.resolve(&code.into())?;
        self.trace.insert(code, detail);
        self.touch();
        Ok(())
    }

    /// Remove codes and their trace detail
    ///
    /// Codes that are not present are ignored.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCode` if a code cannot be translated.
    pub fn delete_code<I, C>(&mut self, codes: I) -> Result<()>
    where
        I: IntoIterator<Item = C>,
        C: Into<Code>,
    {
        let codes = self.resolve_all(codes)?;
        self.codes.retain(|held| !codes.contains(held));
        for code in &codes {
            self.trace.remove(code);
        }
        self.touch();
        Ok(())
    }

    /// Drop the payload
    pub fn delete_data(&mut self) {
        self.data = None;
        self.touch();
    }

    /// Clear codes, data, trace and timestamp
    pub fn reset(&mut self) {
        self.codes.clear();
        self.data = None;
        self.trace.clear();
        self.timestamp = None;
        self.refresh();
    }

    /// Apply another envelope's state on top of this one
    ///
    /// Codes are pushed, data merged and trace detail attached, in that
    /// order, without resetting first.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCode` or `InvalidMerge`; nothing is applied then.
    pub fn mix(&mut self, source: impl Into<Seed>) -> Result<()> {
        let seed = source.into();
        let codes = self.resolve_all(seed.status)?;
        let trace = seed
            .trace
            .into_iter()
            .map(|(code, detail)| self.dictionary.resolve(&code).map(|num| (num, detail)))
            .collect::<Result<Vec<_>>>()?;
        let data = match (self.data.clone(), seed.data) {
            (Some(mut held), Some(incoming)) => {
                held.merge(incoming)?;
                Some(held)
            }
            (held, incoming) => incoming.or(held),
        };

        self.insert_codes(&codes);
        self.data = data;
        self.trace.extend(trace);
        self.touch();
        Ok(())
    }

    /// Replace this envelope's state with another's
    ///
    /// Equivalent to [`reset`](Self::reset) followed by [`mix`](Self::mix),
    /// except that a failing `mix` leaves the envelope untouched.
    pub fn replace_with(&mut self, source: impl Into<Seed>) -> Result<()> {
        let mut fresh = Self::with_dictionary(Arc::clone(&self.dictionary));
        fresh.mix(source)?;
        *self = fresh;
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Check for the error marker `4000`
    pub fn has_error(&self) -> bool {
        self.codes.contains(&Family::Error.marker())
    }

    /// Check if any of `codes` is present
    ///
    /// # Errors
    ///
    /// Returns `UnknownCode` if a code cannot be translated.
    pub fn has_code<I, C>(&self, codes: I) -> Result<bool>
    where
        I: IntoIterator<Item = C>,
        C: Into<Code>,
    {
        let codes = self.resolve_all(codes)?;
        Ok(codes.iter().any(|code| self.codes.contains(code)))
    }

    /// Current snapshot
    pub fn result(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Codes in insertion order
    pub fn codes(&self) -> &[u16] {
        &self.codes
    }

    /// Payload, if any was pushed
    pub fn data(&self) -> Option<&Payload> {
        self.data.as_ref()
    }

    /// Trace detail by code
    pub fn trace(&self) -> &BTreeMap<u16, Value> {
        &self.trace
    }

    /// Time of the last mutation, `None` right after a reset
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Dictionary used to translate symbolic codes
    pub fn dictionary(&self) -> &Arc<CodeDictionary> {
        &self.dictionary
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn resolve_all<I, C>(&self, codes: I) -> Result<Vec<u16>>
    where
        I: IntoIterator<Item = C>,
        C: Into<Code>,
    {
        codes
            .into_iter()
            .map(|code| self.dictionary.resolve(&code.into()))
            .collect()
    }

    fn insert_codes(&mut self, codes: &[u16]) {
        for &code in codes {
            if let Some(family) = Family::of(code) {
                self.switch_family(family);
            }
            self.insert(code);
        }
    }

    fn switch_family(&mut self, family: Family) {
        let evict = family.opposite();
        let before = self.codes.len();
        self.codes.retain(|code| !evict.contains(*code));
        self.trace.retain(|code, _| !evict.contains(*code));
        if self.codes.len() != before {
            trace!(
                target: "envelope::response",
                family = ?family,
                evicted = before - self.codes.len(),
                "Switched status family"
            );
        }
        self.insert(family.marker());
    }

    fn insert(&mut self, code: u16) {
        if !self.codes.contains(&code) {
            self.codes.push(code);
        }
    }

    fn touch(&mut self) {
        self.timestamp = Some(Utc::now());
        self.refresh();
    }

    fn refresh(&mut self) {
        self.snapshot = Snapshot::at(&self.codes, self.data.as_ref(), &self.trace, Utc::now());
    }
}

impl Serialize for ResponseEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.snapshot.serialize(serializer)
    }
}
