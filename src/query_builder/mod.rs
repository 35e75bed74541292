mod select;

pub use select::build_select_statement;

use crate::dialect::RANDOM_ORDER;

/// Row limit stored on a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// First `n` rows.
    Rows(u64),
    /// `length` rows after skipping `offset`.
    Page { offset: u64, length: u64 },
}

/// Clause fragments accumulated by the ORM's query builder.
///
/// Fragments are already rendered SQL text (identifiers quoted, placeholders in place);
/// the adapter only stitches them together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    pub table: String,
    pub selects: String,
    pub distinct: bool,
    /// Full `from` target when joins are used; replaces the quoted table name.
    pub join: String,
    pub where_clause: String,
    pub order_by: String,
    pub group_by: String,
    pub having: String,
    pub union: String,
    pub limit: Option<Limit>,
}

impl Default for QueryDescriptor {
    fn default() -> Self {
        Self {
            table: String::new(),
            selects: "*".to_string(),
            distinct: false,
            join: String::new(),
            where_clause: String::new(),
            order_by: String::new(),
            group_by: String::new(),
            having: String::new(),
            union: String::new(),
            limit: None,
        }
    }
}

impl QueryDescriptor {
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Replace the select list (`*` by default).
    #[must_use]
    pub fn select(mut self, selects: impl Into<String>) -> Self {
        self.selects = selects.into();
        self
    }

    /// Ask for `select distinct`. Ignored when the select list is a `count(distinct ...)`.
    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Set the full `from` target.
    ///
    /// # Arguments
    ///
    /// * `join` - Rendered join text including the base table, e.g.
    ///   `"users" left join "posts" on ...`
    ///
    /// # Returns
    ///
    /// * `Self` - The descriptor, with the quoted table name no longer used
    #[must_use]
    pub fn join(mut self, join: impl Into<String>) -> Self {
        self.join = join.into();
        self
    }

    #[must_use]
    pub fn where_clause(mut self, clause: impl Into<String>) -> Self {
        self.where_clause = clause.into();
        self
    }

    #[must_use]
    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = order_by.into();
        self
    }

    #[must_use]
    pub fn group_by(mut self, group_by: impl Into<String>) -> Self {
        self.group_by = group_by.into();
        self
    }

    #[must_use]
    pub fn having(mut self, having: impl Into<String>) -> Self {
        self.having = having.into();
        self
    }

    /// Appended after pagination, so a limit applies to the first query only.
    #[must_use]
    pub fn union(mut self, union: impl Into<String>) -> Self {
        self.union = union.into();
        self
    }
}

/// Order rows randomly.
pub fn randomize(query: &mut QueryDescriptor) -> &mut QueryDescriptor {
    query.order_by = RANDOM_ORDER.to_string();
    query
}

/// Store a row limit; a missing or zero offset keeps the bare length.
pub fn limit(query: &mut QueryDescriptor, length: u64, offset: Option<u64>) -> &mut QueryDescriptor {
    query.limit = Some(match offset {
        Some(offset) if offset > 0 => Limit::Page { offset, length },
        _ => Limit::Rows(length),
    });
    query
}
