//! Typed values and the rules that turn raw tokens into them.
//!
//! Two coercion modes exist. [`coerce`] is strict and driven by a column's
//! declared [`DataType`]; it is used for inserted values. [`infer`] guesses
//! a type from the token's shape and is used for filter and assignment
//! literals, whose type is declared nowhere.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column types a table may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// 64-bit signed integer, written `int`
    #[serde(rename = "int")]
    Integer,
    /// UTF-8 text, written `str`
    #[serde(rename = "str")]
    Text,
    /// Boolean, written `bool`
    #[serde(rename = "bool")]
    Boolean,
}

impl DataType {
    /// The type name as it appears in column specs and the schema document.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Integer => "int",
            DataType::Text => "str",
            DataType::Boolean => "bool",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "int" => Ok(DataType::Integer),
            "str" => Ok(DataType::Text),
            "bool" => Ok(DataType::Boolean),
            other => Err(Error::UnsupportedType(other.to_string())),
        }
    }
}

/// A single stored or literal value.
///
/// Serialized untagged so rows map onto plain JSON scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer value
    Integer(i64),
    /// Only produced by inference; no column declares it.
    Float(f64),
    /// Boolean value
    Boolean(bool),
    /// Text value
    Text(String),
}

impl Value {
    /// Returns the integer payload, if any.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Textual equality, the comparison used by every filter.
    ///
    /// `Integer(30)` and `Text("30")` are equal under this relation.
    pub fn text_eq(&self, other: &Value) -> bool {
        self.to_string() == other.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) if fl.is_finite() && fl.fract() == 0.0 => write!(f, "{:.1}", fl),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
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

/// Removes one layer of matching `"` or `'` quotes, if present.
pub fn strip_quotes(token: &str) -> &str {
    unquote(token).unwrap_or(token)
}

fn unquote(token: &str) -> Option<&str> {
    let first = token.chars().next()?;
    if (first == '"' || first == '\'') && token.len() >= 2 && token.ends_with(first) {
        Some(&token[1..token.len() - 1])
    } else {
        None
    }
}

/// Strict coercion of a raw token against a declared column type.
///
/// Booleans never fail: anything outside `true`, `1`, `yes` is `false`.
pub fn coerce(raw: &str, data_type: DataType) -> Result<Value> {
    let cleaned = strip_quotes(raw.trim());
    match data_type {
        DataType::Integer => cleaned
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| Error::TypeMismatch {
                value: raw.to_string(),
                column: None,
                expected: data_type,
            }),
        DataType::Boolean => {
            let lowered = cleaned.to_lowercase();
            Ok(Value::Boolean(matches!(lowered.as_str(), "true" | "1" | "yes")))
        }
        DataType::Text => Ok(Value::Text(cleaned.to_string())),
    }
}

/// Infers a value from the shape of a literal token.
pub fn infer(token: &str) -> Value {
    if let Some(inner) = unquote(token) {
        return Value::Text(inner.to_string());
    }

    if token.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if token.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }

    if is_integer_literal(token) {
        if let Ok(i) = token.parse::<i64>() {
            return Value::Integer(i);
        }
    }

    // Infinities have no JSON form, so out-of-range decimals stay text
    if token.contains('.') {
        if let Ok(f) = token.parse::<f64>() {
            if f.is_finite() {
                return Value::Float(f);
            }
        }
    }

    Value::Text(token.to_string())
}

fn is_integer_literal(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
