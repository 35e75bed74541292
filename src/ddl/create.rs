use super::{ColumnLength, FieldDescriptor, TableDescriptor};
use crate::dialect::{DEFAULT_INTEGER_TYPE, NUMERIC_TYPES, backquote, quote, quote_text};

/// Sequence-backed auto-increment discovered while generating DDL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoIncrementPlan {
    pub table: String,
    pub primary: String,
    pub start: u64,
    pub step: u64,
}

/// Output of [`generate_create_statement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStatement {
    pub sql: String,
    /// Set when a primary key is auto-increment; `create` turns it into a sequence and trigger.
    pub auto_increment: Option<AutoIncrementPlan>,
}

/// Build `create table` DDL for `table`.
#[must_use]
pub fn generate_create_statement(table: &TableDescriptor) -> CreateStatement {
    let mut columns = Vec::with_capacity(table.fields.len());
    let mut foreigns = Vec::new();
    let mut primary: Option<&str> = None;
    let mut auto_increment = None;

    for field in &table.fields {
        let mut field_type = field.field_type.clone();

        if field.primary {
            if let Some(increment) = field.auto_increment {
                if !NUMERIC_TYPES.contains(&field_type.to_lowercase().as_str()) {
                    field_type = DEFAULT_INTEGER_TYPE.to_string();
                }
                auto_increment = Some(AutoIncrementPlan {
                    table: table.name.clone(),
                    primary: field.name.clone(),
                    start: increment.start,
                    step: increment.step,
                });
            }
            primary = Some(&field.name);
        }

        columns.push(column_clause(field, &field_type));

        if let Some(foreign) = &field.foreign_key {
            if !foreign.table.is_empty() {
                foreigns.push(format!(
                    "constraint {} foreign key ({}) references {} ({}) on delete {}",
                    backquote(&format!("{}_frk", field.name)),
                    backquote(&field.name),
                    backquote(&foreign.table),
                    backquote(&foreign.field),
                    foreign.on_delete
                ));
            }
        }
    }

    let mut sql = format!(
        "create table {} (\n  {}",
        backquote(&table.name),
        columns.join(",\n  ")
    );
    if let Some(primary) = primary {
        sql.push_str(&format!(",\n  primary key ({})", backquote(primary)));
    }
    if !foreigns.is_empty() {
        sql.push_str(",\n  ");
        sql.push_str(&foreigns.join(",\n  "));
    }
    sql.push_str("\n)");

    CreateStatement {
        sql,
        auto_increment,
    }
}

fn column_clause(field: &FieldDescriptor, field_type: &str) -> String {
    let mut column = format!("{} {field_type}", backquote(&field.name));

    match &field.length {
        ColumnLength::None => {}
        ColumnLength::Single(length) => column.push_str(&format!("({length})")),
        ColumnLength::Multi(lengths) => {
            let joined: Vec<String> = lengths.iter().map(u32::to_string).collect();
            column.push_str(&format!("({})", joined.join(",")));
        }
    }

    if field.unique {
        column.push_str(" unique");
    }
    if field.unsigned {
        column.push_str(" unsigned");
    }
    if field.not_null {
        column.push_str(" not null");
    }
    if let Some(default) = &field.default {
        column.push_str(" default ");
        column.push_str(&quote(default));
    }
    if let Some(comment) = field.comment.as_deref().filter(|c| !c.is_empty()) {
        column.push_str(" comment ");
        column.push_str(&quote_text(comment));
    }

    column
}
