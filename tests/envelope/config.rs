//! `envelope.toml` driven startup.

use crate::common::*;
use envelope::{DictionaryConfig, CONFIG_FILE_NAME};

#[test]
fn config_points_at_dictionary_file() {
    let shop = TestDictionary::shop();
    let config_path = shop.write(CONFIG_FILE_NAME, "dictionary = \"codes.json\"\n");

    let config = DictionaryConfig::from_file(&config_path).unwrap();
    let dict = CodeDictionary::from_config(&config).unwrap();
    assert_eq!(dict.code_of("ORDER_NOT_FOUND").unwrap(), 4041);
}

#[test]
fn broken_dictionary_falls_back_when_allowed() {
    let shop = TestDictionary::shop();
    shop.write("broken.json", "{ not json");
    let config_path = shop.write(CONFIG_FILE_NAME, "dictionary = \"broken.json\"\n");

    let config = DictionaryConfig::from_file(&config_path).unwrap();
    let dict = CodeDictionary::from_config(&config).unwrap();
    assert_eq!(dict.source(), DictionarySource::Embedded);
    assert_eq!(dict.code_of("SUCCESS").unwrap(), 2000);
}

#[test]
fn broken_dictionary_fails_when_fallback_disabled() {
    let shop = TestDictionary::shop();
    shop.write("broken.json", "{ not json");
    let config_path = shop.write(
        CONFIG_FILE_NAME,
        "dictionary = \"broken.json\"\nfallback_to_embedded = false\n",
    );

    let config = DictionaryConfig::from_file(&config_path).unwrap();
    let err = CodeDictionary::from_config(&config).unwrap_err();
    assert!(err.is_invalid_dictionary());
}

#[test]
fn default_config_written_once() {
    let shop = TestDictionary::shop();
    let path = shop.dir.path().join(CONFIG_FILE_NAME);

    DictionaryConfig::write_default_if_missing(&path).unwrap();
    let config = DictionaryConfig::from_file(&path).unwrap();
    assert_eq!(config, DictionaryConfig::default());

    let dict = CodeDictionary::from_config(&config).unwrap();
    assert_eq!(dict.source(), DictionarySource::Embedded);
}
