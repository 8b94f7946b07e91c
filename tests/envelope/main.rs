//! End-to-end tests for envelopes and dictionaries.

#[path = "../common/mod.rs"]
mod common;

mod config;
mod scenarios;
