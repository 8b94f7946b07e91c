//! Status code dictionary
//!
//! Maps four-digit status codes to `{enum, title, description}` and back.
//! One [`CodeDictionary`] is normally shared by every envelope in the
//! process (see [`registry::global`]); it can also be built explicitly and
//! handed to envelopes as a service.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dictionary;
pub mod document;
pub mod registry;

pub use config::{DictionaryConfig, CONFIG_FILE_NAME};
pub use dictionary::{CodeDictionary, DictionarySource};
pub use document::{CodeEntry, CodeTable, ReverseEntry};
pub use registry::{configure_global, global};
