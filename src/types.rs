use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// Values that can be bound to a statement or read back from a row.
///
/// ```rust
/// use oracle_adapter::prelude::*;
///
/// let bindings = vec![
///     RowValues::Int(1),
///     RowValues::Text("alice".into()),
///     RowValues::Null,
/// ];
/// # let _ = bindings;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value; Oracle has no SQL boolean, so drivers usually bind it as 1/0
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// JSON value
    JSON(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
}

impl RowValues {
    /// Generated ids come back from NUMBER out-binds; integral floats are accepted too.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_id(&self) -> Option<i64> {
        match self {
            RowValues::Int(value) => Some(*value),
            RowValues::Float(value) if value.fract() == 0.0 => Some(*value as i64),
            RowValues::Text(value) => value.trim().parse().ok(),
            _ => None,
        }
    }
}

impl From<i64> for RowValues {
    fn from(value: i64) -> Self {
        RowValues::Int(value)
    }
}

impl From<f64> for RowValues {
    fn from(value: f64) -> Self {
        RowValues::Float(value)
    }
}

impl From<bool> for RowValues {
    fn from(value: bool) -> Self {
        RowValues::Bool(value)
    }
}

impl From<&str> for RowValues {
    fn from(value: &str) -> Self {
        RowValues::Text(value.to_string())
    }
}

impl From<String> for RowValues {
    fn from(value: String) -> Self {
        RowValues::Text(value)
    }
}

/// Kind of statement the ORM is issuing through a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Command {
    #[default]
    Select,
    Insert,
    Update,
    Delete,
    /// DDL and anything else the ORM sends verbatim.
    Other,
}

impl Command {
    #[must_use]
    pub fn is_insert(self) -> bool {
        matches!(self, Command::Insert)
    }

    #[must_use]
    pub fn is_select(self) -> bool {
        matches!(self, Command::Select)
    }
}
