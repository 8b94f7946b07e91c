//! Status code types
//!
//! Callers identify a status either by its numeric value (`4010`) or by the
//! symbolic enum name registered in the code dictionary (`"UNAUTHORIZED"`).
//! [`Code`] carries that choice explicitly; translation to the numeric form
//! happens in the dictionary.
//!
//! ## Detection rule
//!
//! A string is numeric iff it is non-empty, made only of ASCII digits, and
//! fits in a `u16`. Anything else is symbolic. There is no other coercion:
//! `""` and `"0x10"` are symbolic names (and will fail lookup).
//!
//! ## Families
//!
//! The leading digit of a well-formed code is its family:
//! - `2xxx` success, category marker `2000`
//! - `4xxx` error, category marker `4000`

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A status code as supplied by a caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Code {
    /// Four-digit numeric code, e.g. `2000`
    Numeric(u16),
    /// Enum name registered in the dictionary, e.g. `"SUCCESS"`
    Symbolic(String),
}

impl Code {
    /// Classify a string using the detection rule
    pub fn parse(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(num) = raw.parse::<u16>() {
                return Code::Numeric(num);
            }
        }
        Code::Symbolic(raw.to_string())
    }

    /// Numeric value, if this is a numeric code
    pub fn as_numeric(&self) -> Option<u16> {
        match self {
            Code::Numeric(num) => Some(*num),
            Code::Symbolic(_) => None,
        }
    }

    /// Enum name, if this is a symbolic code
    pub fn as_symbolic(&self) -> Option<&str> {
        match self {
            Code::Numeric(_) => None,
            Code::Symbolic(name) => Some(name),
        }
    }

    /// Check if this is a numeric code
    pub fn is_numeric(&self) -> bool {
        matches!(self, Code::Numeric(_))
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::Numeric(num) => write!(f, "{}", num),
            Code::Symbolic(name) => write!(f, "{}", name),
        }
    }
}

impl From<u16> for Code {
    fn from(num: u16) -> Self {
        Code::Numeric(num)
    }
}

/// Integers follow the detection rule applied to their decimal form, so a
/// value outside `u16` becomes a symbolic code that no dictionary holds.
impl From<i32> for Code {
    fn from(num: i32) -> Self {
        u16::try_from(num)
            .map(Code::Numeric)
            .unwrap_or_else(|_| Code::Symbolic(num.to_string()))
    }
}

impl From<&str> for Code {
    fn from(raw: &str) -> Self {
        Code::parse(raw)
    }
}

impl From<String> for Code {
    fn from(raw: String) -> Self {
        Code::parse(&raw)
    }
}

impl From<&Code> for Code {
    fn from(code: &Code) -> Self {
        code.clone()
    }
}

impl Serialize for Code {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Code::Numeric(num) => serializer.serialize_u16(*num),
            Code::Symbolic(name) => serializer.serialize_str(name),
        }
    }
}

struct CodeVisitor;

impl<'de> Visitor<'de> for CodeVisitor {
    type Value = Code;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a numeric status code or an enum name")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Code, E> {
        u16::try_from(v)
            .map(Code::Numeric)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Code, E> {
        u16::try_from(v)
            .map(Code::Numeric)
            .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Code, E> {
        Ok(Code::parse(v))
    }
}

impl<'de> Deserialize<'de> for Code {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(CodeVisitor)
    }
}

/// Check a numeric code against `^[24]\d{3}$`
pub fn is_well_formed(code: u16) -> bool {
    (2000..3000).contains(&code) || (4000..5000).contains(&code)
}

/// Status code family, decided by the leading digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// `2xxx`
    Success,
    /// `4xxx`
    Error,
}

impl Family {
    /// Family of a well-formed code, `None` otherwise
    pub fn of(code: u16) -> Option<Family> {
        match code {
            2000..=2999 => Some(Family::Success),
            4000..=4999 => Some(Family::Error),
            _ => None,
        }
    }

    /// Category marker inserted alongside every code of this family
    pub const fn marker(self) -> u16 {
        match self {
            Family::Success => 2000,
            Family::Error => 4000,
        }
    }

    /// The family a push of this family evicts
    pub const fn opposite(self) -> Family {
        match self {
            Family::Success => Family::Error,
            Family::Error => Family::Success,
        }
    }

    /// Check if `code` belongs to this family
    pub fn contains(self, code: u16) -> bool {
        Family::of(code) == Some(self)
    }
}
