//! Cell values
//!
//! A value is one of a closed set of variants. Values reloaded from a
//! checkpoint are always `Text`; numeric semantics are recovered at
//! comparison time via [`Value::as_number`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell value in a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Absent value. Never satisfies a comparison except explicit NULL
    /// equality in filter clauses.
    Null,
    Integer(i64),
    Decimal(f64),
    Text(String),
    Bool(bool),
}

impl Value {
    /// Returns true for `Value::Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Canonical text rendering. Null renders as the empty string.
    ///
    /// This is the single rendering used for checkpoints, parameter
    /// substitution, and text comparisons.
    pub fn render(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Integer(i) => i.to_string(),
            Value::Decimal(d) => d.to_string(),
            Value::Text(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
        }
    }

    /// Attempts to interpret the value as a number.
    ///
    /// Text values are parsed; booleans and nulls are never numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Decimal(d) => Some(*d),
            Value::Text(s) => parse_number(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Decimal(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Attempts to parse a decimal number out of raw text.
///
/// Infinite and NaN spellings are rejected; they are not valid cell
/// numbers.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}
