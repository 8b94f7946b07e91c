//! The code dictionary service
//!
//! A [`CodeDictionary`] owns one validated [`CodeTable`] and answers
//! code/enum/title/description lookups against it. The table can be replaced
//! wholesale at runtime (`reconfigure`, `initialize_from`, `inject`) through a
//! shared reference; readers never observe a partially built table.
//!
//! Replacement is single-writer: callers must not race two `reconfigure`
//! calls against each other. Concurrent lookups are fine.

use crate::config::DictionaryConfig;
use crate::document::{CodeEntry, CodeTable};
use chrono::{DateTime, Utc};
use envelope_core::{Code, Error, Result};
use parking_lot::RwLock;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Table compiled into the binary
const EMBEDDED_DICTIONARY: &str = include_str!("default_dictionary.json");

/// Where the current table came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    /// The table compiled into the binary
    Embedded,
    /// A JSON file on disk
    File(PathBuf),
    /// A document handed to [`CodeDictionary::inject`]
    Injected,
}

impl fmt::Display for DictionarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionarySource::Embedded => write!(f, "embedded"),
            DictionarySource::File(path) => write!(f, "{}", path.display()),
            DictionarySource::Injected => write!(f, "injected"),
        }
    }
}

struct State {
    table: CodeTable,
    source: DictionarySource,
}

/// Status code dictionary
pub struct CodeDictionary {
    state: RwLock<State>,
}

impl fmt::Debug for CodeDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("CodeDictionary")
            .field("source", &state.source)
            .field("codes", &state.table.len())
            .finish()
    }
}

impl Default for CodeDictionary {
    fn default() -> Self {
        Self::embedded()
    }
}

impl CodeDictionary {
    fn from_table(table: CodeTable, source: DictionarySource) -> Self {
        CodeDictionary {
            state: RwLock::new(State { table, source }),
        }
    }

    /// Dictionary over the embedded table
    ///
    /// Never fails: if the embedded table does not validate, a builtin table
    /// holding only `2000 SUCCESS` and `4000 ERROR` is used instead.
    pub fn embedded() -> Self {
        Self::from_table(embedded_table(), DictionarySource::Embedded)
    }

    /// Load a dictionary, failing on any error
    ///
    /// # Errors
    ///
    /// Returns `InvalidDictionary` if a file cannot be read or does not
    /// validate. `Injected` is not a loadable source.
    pub fn load(source: &DictionarySource) -> Result<Self> {
        let table = read_source(source)?;
        Ok(Self::from_table(table, source.clone()))
    }

    /// Startup initialization
    ///
    /// Loads `source`; on failure logs a warning and falls back to the
    /// embedded table instead of returning an error.
    pub fn initialize(source: &DictionarySource) -> Self {
        match Self::load(source) {
            Ok(dictionary) => dictionary,
            Err(e) => {
                warn!(
                    target: "envelope::dictionary",
                    source = %source,
                    error = %e,
                    "Failed to load dictionary, using embedded table"
                );
                Self::embedded()
            }
        }
    }

    /// Build from an `envelope.toml` configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidDictionary` only when the configured file fails to
    /// load and `fallback_to_embedded` is off.
    pub fn from_config(config: &DictionaryConfig) -> Result<Self> {
        let source = config.source();
        if config.fallback_to_embedded {
            Ok(Self::initialize(&source))
        } else {
            Self::load(&source)
        }
    }

    /// Replace the table from `source`, discarding the current one
    ///
    /// On error the current table is left untouched.
    pub fn initialize_from(&self, source: &DictionarySource) -> Result<()> {
        let table = read_source(source)?;
        let count = table.len();
        *self.state.write() = State {
            table,
            source: source.clone(),
        };
        info!(
            target: "envelope::dictionary",
            source = %source,
            codes = count,
            "Dictionary loaded"
        );
        Ok(())
    }

    /// Point the dictionary at a new file and reload it
    ///
    /// # Errors
    ///
    /// Returns `InvalidDictionary` if the file cannot be read or does not
    /// validate; the previous table stays in place.
    pub fn reconfigure(&self, path: impl AsRef<Path>) -> Result<()> {
        self.initialize_from(&DictionarySource::File(path.as_ref().to_path_buf()))
    }

    /// Ingest a sectioned document if its issue date is newer
    ///
    /// Returns `true` if the document replaced the current table. A table
    /// without an issue date is older than any dated document.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDictionary` if the document does not validate or lacks
    /// any of `issue`, `success` and `error`.
    pub fn inject(&self, json: &str) -> Result<bool> {
        let incoming = CodeTable::parse_dated(json)?;
        let Some(incoming_issue) = incoming.issue() else {
            return Err(Error::invalid_dictionary(
                "injected document must carry an issue date",
            ));
        };

        let mut state = self.state.write();
        let newer = state
            .table
            .issue()
            .map_or(true, |current| incoming_issue > current);
        if !newer {
            debug!(
                target: "envelope::dictionary",
                issue = %incoming_issue,
                "Ignoring injected dictionary, current table is not older"
            );
            return Ok(false);
        }

        let count = incoming.len();
        *state = State {
            table: incoming,
            source: DictionarySource::Injected,
        };
        info!(
            target: "envelope::dictionary",
            issue = %incoming_issue,
            codes = count,
            "Injected dictionary replaced current table"
        );
        Ok(true)
    }

    /// Write the current table to `path` as a sectioned document
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let document = self.state.read().table.to_document();
        let content = serde_json::to_string_pretty(&document)
            .map_err(|e| Error::invalid_dictionary(format!("failed to serialize: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::invalid_dictionary(format!("failed to write '{}': {}", path.display(), e))
        })
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Numeric code for an enum name
    pub fn code_of(&self, name: &str) -> Result<u16> {
        self.state
            .read()
            .table
            .get_by_name(name)
            .map(|entry| entry.num)
            .ok_or_else(|| Error::unknown_code(name))
    }

    /// Enum name for a numeric code
    pub fn enum_of(&self, code: u16) -> Result<String> {
        self.state
            .read()
            .table
            .get(code)
            .map(|entry| entry.name.clone())
            .ok_or_else(|| Error::unknown_code(code))
    }

    /// Title for a numeric or symbolic code
    pub fn title_of(&self, code: impl Into<Code>) -> Result<String> {
        self.entry(code).map(|entry| entry.title)
    }

    /// Description for a numeric or symbolic code
    pub fn description_of(&self, code: impl Into<Code>) -> Result<String> {
        self.entry(code).map(|entry| entry.description)
    }

    /// Full entry for a numeric or symbolic code
    pub fn entry(&self, code: impl Into<Code>) -> Result<CodeEntry> {
        let code = code.into();
        let state = self.state.read();
        let num = match &code {
            Code::Numeric(num) => *num,
            Code::Symbolic(name) => state
                .table
                .get_by_name(name)
                .map(|entry| entry.num)
                .ok_or_else(|| Error::unknown_code(&code))?,
        };
        state
            .table
            .get(num)
            .cloned()
            .ok_or_else(|| Error::unknown_code(&code))
    }

    /// Translate a code to its numeric form
    ///
    /// Symbolic codes must be registered. Numeric codes pass through if they
    /// are well formed, whether or not they are registered.
    pub fn resolve(&self, code: &Code) -> Result<u16> {
        match code {
            Code::Numeric(num) if envelope_core::is_well_formed(*num) => Ok(*num),
            Code::Numeric(_) => Err(Error::unknown_code(code)),
            Code::Symbolic(name) => self.code_of(name),
        }
    }

    /// Check if a numeric or symbolic code is registered
    pub fn contains(&self, code: impl Into<Code>) -> bool {
        self.entry(code).is_ok()
    }

    /// All registered codes in ascending order
    pub fn codes(&self) -> Vec<u16> {
        self.state.read().table.codes().collect()
    }

    /// Number of registered codes
    pub fn len(&self) -> usize {
        self.state.read().table.len()
    }

    /// Check if no codes are registered
    pub fn is_empty(&self) -> bool {
        self.state.read().table.is_empty()
    }

    /// Issue date of the current table, if known
    pub fn issue(&self) -> Option<DateTime<Utc>> {
        self.state.read().table.issue()
    }

    /// Where the current table came from
    pub fn source(&self) -> DictionarySource {
        self.state.read().source.clone()
    }
}

fn embedded_table() -> CodeTable {
    CodeTable::parse(EMBEDDED_DICTIONARY).unwrap_or_else(|e| {
        warn!(
            target: "envelope::dictionary",
            error = %e,
            "Embedded dictionary is invalid, using builtin table"
        );
        CodeTable::builtin()
    })
}

fn read_source(source: &DictionarySource) -> Result<CodeTable> {
    match source {
        DictionarySource::Embedded => Ok(embedded_table()),
        DictionarySource::File(path) => {
            let content = std::fs::read_to_string(path).map_err(|e| {
                Error::invalid_dictionary(format!("failed to read '{}': {}", path.display(), e))
            })?;
            CodeTable::parse(&content)
        }
        DictionarySource::Injected => Err(Error::invalid_dictionary(
            "an injected dictionary cannot be reloaded",
        )),
    }
}
