//! Shared test utilities for the integration suites.
//!
//! Import via `mod common;` from any test's main.rs.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Once};

pub use envelope::{CodeDictionary, DictionarySource, ResponseEnvelope};
use tempfile::TempDir;

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route library logs through the test writer so `--nocapture` shows them.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}

/// Code table used by the file-based tests.
pub const SHOP_CODES: &str = r#"{
    "2000": { "enum": "SUCCESS", "title": "Success", "description": "Request completed." },
    "2001": { "enum": "ORDER_PLACED", "title": "Order placed", "description": "The order was accepted." },
    "2002": { "enum": "ORDER_UPDATED", "title": "Order updated", "description": "The order was changed." },
    "4000": { "enum": "ERROR", "title": "Error", "description": "Request failed." },
    "4010": { "enum": "UNAUTHORIZED", "title": "Unauthorized", "description": "Sign in first." },
    "4041": { "enum": "ORDER_NOT_FOUND", "title": "Order not found", "description": "No such order." }
}"#;

// ============================================================================
// TestDictionary - dictionary backed by files in a temp dir
// ============================================================================

/// Temp directory plus a dictionary loaded from it.
pub struct TestDictionary {
    pub dir: TempDir,
    pub dictionary: Arc<CodeDictionary>,
}

impl TestDictionary {
    /// Dictionary loaded from `SHOP_CODES` on disk.
    pub fn shop() -> Self {
        init_tracing();
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("codes.json");
        std::fs::write(&path, SHOP_CODES).expect("Failed to write code table");
        let dictionary = CodeDictionary::load(&DictionarySource::File(path))
            .expect("Failed to load code table");
        TestDictionary {
            dir,
            dictionary: Arc::new(dictionary),
        }
    }

    /// Write a file into the temp dir and return its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Fresh envelope over this dictionary.
    pub fn envelope(&self) -> ResponseEnvelope {
        ResponseEnvelope::with_dictionary(Arc::clone(&self.dictionary))
    }
}

/// Fresh envelope over its own embedded dictionary.
pub fn embedded_envelope() -> ResponseEnvelope {
    init_tracing();
    ResponseEnvelope::with_dictionary(Arc::new(CodeDictionary::embedded()))
}
