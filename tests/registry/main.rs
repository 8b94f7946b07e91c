//! Startup configuration of the process-wide dictionary.
//!
//! Kept in its own binary: these tests swap the global table that every
//! `ResponseEnvelope::new()` reads.

#[path = "../common/mod.rs"]
mod common;

use common::*;
use envelope::{configure_global, global, DictionaryConfig, CONFIG_FILE_NAME};
use std::sync::{Mutex, MutexGuard};

static GLOBAL_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests that reconfigure the global dictionary.
fn lock_global() -> MutexGuard<'static, ()> {
    GLOBAL_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Point the global dictionary at the shop table via `envelope.toml`.
fn configure_shop(shop: &TestDictionary) {
    let config_path = shop.write(CONFIG_FILE_NAME, "dictionary = \"codes.json\"\n");
    shop.write("codes.json", SHOP_CODES);
    let config = DictionaryConfig::from_file(&config_path).unwrap();
    configure_global(&config).unwrap();
    assert_eq!(global().code_of("ORDER_NOT_FOUND").unwrap(), 4041);
}

#[test]
fn configured_table_reaches_new_envelopes() {
    let _guard = lock_global();
    let shop = TestDictionary::shop();
    configure_shop(&shop);

    let mut envelope = ResponseEnvelope::new();
    envelope.push_code(["ORDER_PLACED"]).unwrap();
    assert_eq!(envelope.codes(), &[2000, 2001]);

    configure_global(&DictionaryConfig::default()).unwrap();
    assert_eq!(global().source(), DictionarySource::Embedded);
}

#[test]
fn missing_file_falls_back_to_embedded() {
    let _guard = lock_global();
    let shop = TestDictionary::shop();
    configure_shop(&shop);

    let config = DictionaryConfig::with_dictionary(shop.dir.path().join("absent.json"));
    assert!(config.fallback_to_embedded);
    configure_global(&config).unwrap();

    let dictionary = global();
    assert_eq!(dictionary.source(), DictionarySource::Embedded);
    assert_eq!(dictionary.code_of("SUCCESS").unwrap(), 2000);
    assert!(dictionary.code_of("ORDER_NOT_FOUND").is_err());
}

#[test]
fn missing_file_without_fallback_keeps_previous_table() {
    let _guard = lock_global();
    let shop = TestDictionary::shop();
    configure_shop(&shop);
    let previous = global().source();

    let config_path = shop.write(
        CONFIG_FILE_NAME,
        "dictionary = \"absent.json\"\nfallback_to_embedded = false\n",
    );
    let config = DictionaryConfig::from_file(&config_path).unwrap();
    let err = configure_global(&config).unwrap_err();
    assert!(err.is_invalid_dictionary());
    assert!(err.to_string().contains("absent.json"));

    let dictionary = global();
    assert_eq!(dictionary.source(), previous);
    assert_eq!(dictionary.code_of("ORDER_NOT_FOUND").unwrap(), 4041);

    configure_global(&DictionaryConfig::default()).unwrap();
    assert_eq!(global().source(), DictionarySource::Embedded);
}
