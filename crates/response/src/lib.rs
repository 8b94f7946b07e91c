//! Response envelope
//!
//! [`ResponseEnvelope`] accumulates the status codes, payload fragments and
//! per-code trace detail of one API call and keeps an up-to-date
//! [`Snapshot`] of them, ready to be serialized as a response body.
//!
//! ```
//! use envelope_response::ResponseEnvelope;
//! use serde_json::json;
//!
//! let mut response = ResponseEnvelope::new();
//! response.push_code(["CREATED"]).unwrap();
//! response.push_data(json!({"id": 7})).unwrap();
//!
//! assert_eq!(response.result().status, vec![2000, 2001]);
//! assert!(!response.has_error());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod envelope;
pub mod seed;
pub mod snapshot;

pub use envelope::ResponseEnvelope;
pub use seed::Seed;
pub use snapshot::Snapshot;
