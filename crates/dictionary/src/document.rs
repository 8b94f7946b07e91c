//! Dictionary documents: parsing, validation and the in-memory tables
//!
//! Two JSON shapes are accepted.
//!
//! Flat table:
//!
//! ```json
//! { "2000": { "enum": "SUCCESS", "title": "Success", "description": "..." } }
//! ```
//!
//! Sectioned document, carrying an optional issue date:
//!
//! ```json
//! {
//!   "issue": "2024-03-01T00:00:00Z",
//!   "success": { "2000": { "enum": "SUCCESS", "title": "...", "description": "..." } },
//!   "error":   { "4000": { "enum": "ERROR",   "title": "...", "description": "..." } }
//! }
//! ```
//!
//! ## Validation
//!
//! - every code key matches `^[24]\d{3}$`
//! - every entry has exactly `enum`, `title` and `description`, all strings
//! - enum names are non-empty, not all digits, and unique across the table
//! - in a sectioned document, `success` holds 2xxx codes and `error` 4xxx

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use envelope_core::{Code, Error, Family, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

const ISSUE_KEY: &str = "issue";
const SUCCESS_KEY: &str = "success";
const ERROR_KEY: &str = "error";

/// Forward-table entry for one numeric code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodeEntry {
    /// Symbolic name, e.g. `"NOT_FOUND"`
    #[serde(rename = "enum")]
    pub name: String,
    /// Short human-readable text
    pub title: String,
    /// Long human-readable text
    pub description: String,
}

/// Reverse-table entry for one enum name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReverseEntry {
    /// Numeric code
    pub num: u16,
    /// Short human-readable text
    pub title: String,
    /// Long human-readable text
    pub description: String,
}

/// Validated forward and reverse tables
///
/// The reverse table is always derived from the forward table; the two are
/// never built or replaced separately.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeTable {
    forward: BTreeMap<u16, CodeEntry>,
    reverse: HashMap<String, ReverseEntry>,
    issue: Option<DateTime<Utc>>,
}

impl CodeTable {
    /// Build tables from already-parsed entries
    ///
    /// # Errors
    ///
    /// Returns `InvalidDictionary` if a code is malformed or an enum name is
    /// empty, numeric, or used twice.
    pub fn from_entries(
        forward: BTreeMap<u16, CodeEntry>,
        issue: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        let mut reverse = HashMap::with_capacity(forward.len());

        for (&num, entry) in &forward {
            if !envelope_core::is_well_formed(num) {
                return Err(Error::invalid_dictionary(format!(
                    "code {} does not match ^[24]\\d{{3}}$",
                    num
                )));
            }
            if entry.name.is_empty() {
                return Err(Error::invalid_dictionary(format!(
                    "code {} has an empty enum name",
                    num
                )));
            }
            if Code::parse(&entry.name).is_numeric() {
                return Err(Error::invalid_dictionary(format!(
                    "code {} has a numeric enum name '{}'",
                    num, entry.name
                )));
            }

            let reverse_entry = ReverseEntry {
                num,
                title: entry.title.clone(),
                description: entry.description.clone(),
            };
            if let Some(previous) = reverse.insert(entry.name.clone(), reverse_entry) {
                return Err(Error::invalid_dictionary(format!(
                    "enum '{}' is used by both {} and {}",
                    entry.name, previous.num, num
                )));
            }
        }

        Ok(CodeTable {
            forward,
            reverse,
            issue,
        })
    }

    /// Parse and validate a JSON document
    ///
    /// # Errors
    ///
    /// Returns `InvalidDictionary` on malformed JSON or any validation failure.
    pub fn parse(json: &str) -> Result<Self> {
        let root = parse_root(json)?;
        if is_sectioned(&root) {
            parse_sectioned(root)
        } else {
            let mut forward = BTreeMap::new();
            collect_entries(root, None, &mut forward)?;
            Self::from_entries(forward, None)
        }
    }

    /// Parse a dated sectioned document
    ///
    /// Unlike [`parse`](Self::parse), the `issue`, `success` and `error` keys
    /// must all be present.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDictionary` if a key is missing or the document does
    /// not validate.
    pub fn parse_dated(json: &str) -> Result<Self> {
        let root = parse_root(json)?;
        if let Some(missing) = [ISSUE_KEY, SUCCESS_KEY, ERROR_KEY]
            .into_iter()
            .find(|key| !root.contains_key(*key))
        {
            return Err(Error::invalid_dictionary(format!(
                "dated document is missing '{}'",
                missing
            )));
        }
        parse_sectioned(root)
    }

    /// Two-entry table used when nothing else can be loaded
    pub fn builtin() -> Self {
        let mut forward = BTreeMap::new();
        forward.insert(
            2000,
            CodeEntry {
                name: "SUCCESS".to_string(),
                title: "Success".to_string(),
                description: "The request completed successfully.".to_string(),
            },
        );
        forward.insert(
            4000,
            CodeEntry {
                name: "ERROR".to_string(),
                title: "Error".to_string(),
                description: "The request could not be completed.".to_string(),
            },
        );
        let reverse = forward
            .iter()
            .map(|(&num, entry)| {
                (
                    entry.name.clone(),
                    ReverseEntry {
                        num,
                        title: entry.title.clone(),
                        description: entry.description.clone(),
                    },
                )
            })
            .collect();
        CodeTable {
            forward,
            reverse,
            issue: None,
        }
    }

    /// Forward lookup
    pub fn get(&self, code: u16) -> Option<&CodeEntry> {
        self.forward.get(&code)
    }

    /// Reverse lookup
    pub fn get_by_name(&self, name: &str) -> Option<&ReverseEntry> {
        self.reverse.get(name)
    }

    /// Issue date of the source document, if it declared one
    pub fn issue(&self) -> Option<DateTime<Utc>> {
        self.issue
    }

    /// All registered codes in ascending order
    pub fn codes(&self) -> impl Iterator<Item = u16> + '_ {
        self.forward.keys().copied()
    }

    /// Number of registered codes
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Check if no codes are registered
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Render as a sectioned document
    pub fn to_document(&self) -> Value {
        let mut success = Map::new();
        let mut error = Map::new();
        for (num, entry) in &self.forward {
            let section = match Family::of(*num) {
                Some(Family::Success) => &mut success,
                _ => &mut error,
            };
            // CodeEntry only holds strings
            let value = serde_json::to_value(entry).unwrap_or(Value::Null);
            section.insert(num.to_string(), value);
        }

        let mut root = Map::new();
        if let Some(issue) = self.issue {
            root.insert(
                ISSUE_KEY.to_string(),
                Value::String(issue.to_rfc3339_opts(SecondsFormat::Millis, true)),
            );
        }
        root.insert(SUCCESS_KEY.to_string(), Value::Object(success));
        root.insert(ERROR_KEY.to_string(), Value::Object(error));
        Value::Object(root)
    }
}

fn parse_root(json: &str) -> Result<Map<String, Value>> {
    let root: Value = serde_json::from_str(json)
        .map_err(|e| Error::invalid_dictionary(format!("malformed JSON: {}", e)))?;
    match root {
        Value::Object(root) => Ok(root),
        _ => Err(Error::invalid_dictionary("document must be a JSON object")),
    }
}

fn is_sectioned(root: &Map<String, Value>) -> bool {
    [ISSUE_KEY, SUCCESS_KEY, ERROR_KEY]
        .iter()
        .any(|key| root.contains_key(*key))
}

fn parse_sectioned(root: Map<String, Value>) -> Result<CodeTable> {
    let mut issue = None;
    let mut forward = BTreeMap::new();

    for (key, value) in root {
        match key.as_str() {
            ISSUE_KEY => {
                let Value::String(raw) = value else {
                    return Err(Error::invalid_dictionary("issue must be a string"));
                };
                issue = Some(parse_issue(&raw)?);
            }
            SUCCESS_KEY | ERROR_KEY => {
                let family = if key == SUCCESS_KEY {
                    Family::Success
                } else {
                    Family::Error
                };
                let Value::Object(section) = value else {
                    return Err(Error::invalid_dictionary(format!(
                        "section '{}' must be a JSON object",
                        key
                    )));
                };
                collect_entries(section, Some(family), &mut forward)?;
            }
            other => {
                return Err(Error::invalid_dictionary(format!(
                    "unexpected top-level key '{}'",
                    other
                )));
            }
        }
    }

    CodeTable::from_entries(forward, issue)
}

fn collect_entries(
    section: Map<String, Value>,
    family: Option<Family>,
    forward: &mut BTreeMap<u16, CodeEntry>,
) -> Result<()> {
    for (key, value) in section {
        let num = parse_code_key(&key)?;
        if let Some(family) = family {
            if !family.contains(num) {
                return Err(Error::invalid_dictionary(format!(
                    "code {} is in the wrong section",
                    num
                )));
            }
        }
        let entry: CodeEntry = serde_json::from_value(value)
            .map_err(|e| Error::invalid_dictionary(format!("code {}: {}", key, e)))?;
        forward.insert(num, entry);
    }
    Ok(())
}

/// Parse a table key, which must be exactly four digits led by 2 or 4
fn parse_code_key(key: &str) -> Result<u16> {
    let bytes = key.as_bytes();
    let valid = bytes.len() == 4
        && matches!(bytes[0], b'2' | b'4')
        && bytes.iter().all(|b| b.is_ascii_digit());
    if !valid {
        return Err(Error::invalid_dictionary(format!(
            "code '{}' does not match ^[24]\\d{{3}}$",
            key
        )));
    }
    key.parse::<u16>()
        .map_err(|e| Error::invalid_dictionary(format!("code '{}': {}", key, e)))
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC)
pub(crate) fn parse_issue(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| Error::invalid_dictionary(format!("issue '{}' is not a valid date", raw)))
}
