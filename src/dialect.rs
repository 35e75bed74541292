//! Oracle quoting rules and dialect constants.

use crate::types::RowValues;

/// Identifier quote character.
pub const BACKQUOTE: char = '"';

/// Order-by expression producing a random row order.
pub const RANDOM_ORDER: &str = "dbms_random.value()";

/// Column types accepted as-is for auto-increment primary keys.
pub const NUMERIC_TYPES: [&str; 3] = ["int", "integer", "number"];

/// Type substituted for auto-increment primary keys declared with any other type.
pub const DEFAULT_INTEGER_TYPE: &str = "int";

/// ORA-00942: table or view does not exist.
pub const ORA_TABLE_NOT_EXISTS: i32 = 942;

/// ORA-02289: sequence does not exist.
pub const ORA_SEQUENCE_NOT_EXISTS: i32 = 2289;

/// Quote an identifier: `users` becomes `"users"`, `u.name` becomes `"u"."name"`.
/// Parts that are `*` or already quoted are kept.
#[must_use]
pub fn backquote(identifier: &str) -> String {
    identifier
        .split('.')
        .map(|part| {
            let part = part.trim();
            if part == "*" || (part.starts_with(BACKQUOTE) && part.ends_with(BACKQUOTE)) {
                part.to_string()
            } else {
                format!("{BACKQUOTE}{part}{BACKQUOTE}")
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Render a value as an inline SQL literal.
#[must_use]
pub fn quote(value: &RowValues) -> String {
    match value {
        RowValues::Int(i) => i.to_string(),
        RowValues::Float(f) => f.to_string(),
        RowValues::Bool(b) => String::from(if *b { "1" } else { "0" }),
        RowValues::Null => "null".to_string(),
        RowValues::Text(s) => quote_text(s),
        RowValues::Timestamp(ts) => quote_text(&ts.format("%Y-%m-%d %H:%M:%S").to_string()),
        RowValues::JSON(json) => quote_text(&json.to_string()),
        RowValues::Blob(bytes) => {
            let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
            format!("hextoraw('{hex}')")
        }
    }
}

/// Single-quote `text`, doubling embedded quotes.
#[must_use]
pub fn quote_text(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
