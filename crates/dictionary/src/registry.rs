//! Process-wide dictionary instance
//!
//! Every envelope built without an explicit dictionary reads this one. It is
//! created lazily from the embedded table on first use; call
//! [`configure_global`] once at startup to load a configured table instead.

use crate::config::DictionaryConfig;
use crate::dictionary::CodeDictionary;
use envelope_core::Result;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::warn;

/// Global dictionary shared by all envelopes in the process
static GLOBAL_DICTIONARY: Lazy<Arc<CodeDictionary>> =
    Lazy::new(|| Arc::new(CodeDictionary::embedded()));

/// Shared handle to the process-wide dictionary
pub fn global() -> Arc<CodeDictionary> {
    Arc::clone(&GLOBAL_DICTIONARY)
}

/// Reload the process-wide dictionary from a configuration
///
/// With `fallback_to_embedded` set, a load failure is logged and the global
/// table is reset to the embedded one.
///
/// # Errors
///
/// Returns `InvalidDictionary` when loading fails and fallback is off; the
/// previous table stays in place.
pub fn configure_global(config: &DictionaryConfig) -> Result<()> {
    let dictionary = global();
    match dictionary.initialize_from(&config.source()) {
        Ok(()) => Ok(()),
        Err(e) if config.fallback_to_embedded => {
            warn!(
                target: "envelope::dictionary",
                error = %e,
                "Failed to configure global dictionary, using embedded table"
            );
            dictionary.initialize_from(&crate::DictionarySource::Embedded)
        }
        Err(e) => Err(e),
    }
}
