//! Core types shared by the response envelope crates
//!
//! This crate defines the foundational types used throughout the system:
//! - Code: numeric or symbolic status code, as callers hand it in
//! - Family: success (2xxx) / error (4xxx) grouping and its category marker
//! - Payload: list-or-map response data and its merge rules
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod code;
pub mod error;
pub mod payload;

pub use code::{is_well_formed, Code, Family};
pub use error::{Error, Result};
pub use payload::Payload;
