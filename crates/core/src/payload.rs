//! Response payload and its merge rules
//!
//! Response data is always a JSON array or a JSON object. Merging a new
//! fragment into existing data depends on what is already held:
//!
//! | Held | Incoming | Result |
//! |------|----------|--------|
//! | list | list | concatenation |
//! | non-empty map | map | shallow merge, incoming keys win |
//! | empty map | anything | replaced by incoming |
//! | list | map | `InvalidMerge` |
//! | non-empty map | list | `InvalidMerge` |
//!
//! The "nothing held yet" case lives with the owner of the `Option<Payload>`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// List-or-map response data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    /// JSON array
    List(Vec<Value>),
    /// JSON object
    Map(Map<String, Value>),
}

impl Payload {
    /// Empty map payload
    pub fn empty_map() -> Self {
        Payload::Map(Map::new())
    }

    /// Shape name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::List(_) => "list",
            Payload::Map(_) => "map",
        }
    }

    /// Check if the payload holds no elements or keys
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::List(items) => items.is_empty(),
            Payload::Map(map) => map.is_empty(),
        }
    }

    /// Merge `incoming` into this payload
    ///
    /// On error `self` is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMerge` if the shapes are incompatible.
    pub fn merge(&mut self, incoming: Payload) -> Result<()> {
        if matches!(self, Payload::Map(held) if held.is_empty()) {
            *self = incoming;
            return Ok(());
        }
        match (self, incoming) {
            (Payload::List(held), Payload::List(items)) => {
                held.extend(items);
                Ok(())
            }
            (Payload::Map(held), Payload::Map(map)) => {
                held.extend(map);
                Ok(())
            }
            (held, incoming) => Err(Error::invalid_merge(held.kind(), incoming.kind())),
        }
    }

    /// Convert into a plain JSON value
    pub fn into_value(self) -> Value {
        match self {
            Payload::List(items) => Value::Array(items),
            Payload::Map(map) => Value::Object(map),
        }
    }
}

impl TryFrom<Value> for Payload {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => Ok(Payload::List(items)),
            Value::Object(map) => Ok(Payload::Map(map)),
            other => Err(Error::invalid_merge("list or map", json_kind(&other))),
        }
    }
}

impl From<Vec<Value>> for Payload {
    fn from(items: Vec<Value>) -> Self {
        Payload::List(items)
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Payload::Map(map)
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        payload.into_value()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}
