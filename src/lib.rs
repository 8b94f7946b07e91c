//! Envelope - response envelopes and status code dictionaries for API boundaries
//!
//! Two pieces, usable independently:
//!
//! - [`ResponseEnvelope`] collects status codes, payload fragments and
//!   per-code trace detail for one API call and keeps a [`Snapshot`] of them
//!   ready to be serialized as a response body.
//! - [`CodeDictionary`] maps four-digit codes to `{enum, title, description}`
//!   and back. Envelopes use it to accept enum names in place of numbers.
//!
//! # Quick Start
//!
//! ```
//! use envelope::{ResponseEnvelope, global};
//! use serde_json::json;
//!
//! let mut response = ResponseEnvelope::new();
//! response.push_code(["NOT_FOUND"])?;
//! response.push_trace(4040, json!({"user": 17}))?;
//!
//! assert!(response.has_error());
//! assert_eq!(global().title_of("NOT_FOUND")?, "Not found");
//!
//! let body = response.result().to_json();
//! assert_eq!(body["status"], json!([4000, 4040]));
//! # Ok::<(), envelope::Error>(())
//! ```
//!
//! # Configuration
//!
//! The process-wide dictionary starts from the embedded table. Point it at a
//! JSON code table with an `envelope.toml` and [`configure_global`], or build
//! a [`CodeDictionary`] yourself and pass it to
//! [`ResponseEnvelope::with_dictionary`].

pub use envelope_core::{is_well_formed, Code, Error, Family, Payload, Result};
pub use envelope_dictionary::{
    configure_global, global, CodeDictionary, CodeEntry, CodeTable, DictionaryConfig,
    DictionarySource, ReverseEntry, CONFIG_FILE_NAME,
};
pub use envelope_response::{ResponseEnvelope, Seed, Snapshot};
