//! Table descriptors and Oracle DDL synthesis.

mod create;
mod sequence;

pub use create::{AutoIncrementPlan, CreateStatement, generate_create_statement};
pub use sequence::{
    create_sequence_statement, create_trigger_statement, drop_sequence_statement,
    sequence_name,
};

use crate::types::RowValues;

/// Declared length of a column type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColumnLength {
    #[default]
    None,
    /// `varchar(255)`
    Single(u32),
    /// `number(10,2)`
    Multi(Vec<u32>),
}

/// Seed and step for a synthesized sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoIncrement {
    pub start: u64,
    pub step: u64,
}

impl Default for AutoIncrement {
    fn default() -> Self {
        Self { start: 1, step: 1 }
    }
}

/// Foreign-key reference declared on a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub table: String,
    pub field: String,
    /// Referential action, e.g. `set null`, `cascade`, `no action`.
    pub on_delete: String,
}

impl ForeignKey {
    pub fn new(table: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            field: field.into(),
            on_delete: "set null".to_string(),
        }
    }

    #[must_use]
    pub fn on_delete(mut self, action: impl Into<String>) -> Self {
        self.on_delete = action.into();
        self
    }
}

/// One column of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: String,
    pub length: ColumnLength,
    pub primary: bool,
    pub auto_increment: Option<AutoIncrement>,
    pub unique: bool,
    pub unsigned: bool,
    pub not_null: bool,
    /// `None` means no default clause; `Some(RowValues::Null)` renders `default null`.
    pub default: Option<RowValues>,
    pub comment: Option<String>,
    pub foreign_key: Option<ForeignKey>,
}

impl FieldDescriptor {
    /// Create a nullable, non-key column.
    ///
    /// # Arguments
    ///
    /// * `name` - Column name, quoted when rendered
    /// * `field_type` - Declared SQL type, e.g. `varchar2` or `number`
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            length: ColumnLength::None,
            primary: false,
            auto_increment: None,
            unique: false,
            unsigned: false,
            not_null: false,
            default: None,
            comment: None,
            foreign_key: None,
        }
    }

    /// Single type length, rendered as `type(length)`.
    pub fn length(&mut self, length: u32) -> &mut Self {
        self.length = ColumnLength::Single(length);
        self
    }

    /// Precision/scale style lengths, rendered as `type(a,b)`.
    pub fn lengths(&mut self, lengths: &[u32]) -> &mut Self {
        self.length = ColumnLength::Multi(lengths.to_vec());
        self
    }

    pub fn primary(&mut self) -> &mut Self {
        self.primary = true;
        self
    }

    /// Fill this column from a sequence on insert.
    ///
    /// Only honored on the primary key. A non-numeric declared type is replaced by `int`.
    ///
    /// # Arguments
    ///
    /// * `start` - First value handed out by the sequence
    /// * `step` - Increment between values
    pub fn auto_increment(&mut self, start: u64, step: u64) -> &mut Self {
        self.auto_increment = Some(AutoIncrement { start, step });
        self
    }

    pub fn unique(&mut self) -> &mut Self {
        self.unique = true;
        self
    }

    pub fn unsigned(&mut self) -> &mut Self {
        self.unsigned = true;
        self
    }

    pub fn not_null(&mut self) -> &mut Self {
        self.not_null = true;
        self
    }

    /// Inline default, quoted as a literal.
    pub fn default_value(&mut self, value: RowValues) -> &mut Self {
        self.default = Some(value);
        self
    }

    pub fn comment(&mut self, comment: impl Into<String>) -> &mut Self {
        self.comment = Some(comment.into());
        self
    }

    /// Reference another table; rendered as a named `<column>_frk` constraint.
    pub fn foreign_key(&mut self, foreign_key: ForeignKey) -> &mut Self {
        self.foreign_key = Some(foreign_key);
        self
    }
}

/// A table definition, fields in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableDescriptor {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
    /// SQL recorded by the last `create`.
    pub sql: String,
}

impl TableDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            sql: String::new(),
        }
    }

    /// Append a column and return it for further configuration.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        field_type: impl Into<String>,
    ) -> &mut FieldDescriptor {
        self.fields.push(FieldDescriptor::new(name, field_type));
        let last = self.fields.len() - 1;
        &mut self.fields[last]
    }
}
