use std::sync::LazyLock;

use regex::Regex;

static RETURNING_INTO_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\sreturning\s(.+?)\sinto\s:id\b").expect("valid returning-clause regex")
});

/// Column named by an existing `returning <column> into :id` clause, quotes trimmed.
///
/// The ORM's insert builder emits exactly this shape when it wants the generated key, so
/// the adapter only needs to add the out-bind instead of appending its own clause.
#[must_use]
pub fn returning_column(sql: &str) -> Option<String> {
    RETURNING_INTO_ID
        .captures(sql)
        .and_then(|caps| caps.get(1))
        .map(|column| column.as_str().trim().trim_matches('"').to_string())
}

/// ` returning "<column>" into :id`
#[must_use]
pub fn returning_clause(column: &str) -> String {
    format!(" returning \"{column}\" into :id")
}
