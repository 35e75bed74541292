//! Contract consumed from the native Oracle driver.
//!
//! The adapter never talks to the network itself. A driver crate (or a test double)
//! implements [`Driver`], [`DriverPool`], and [`DriverConnection`]; the adapter only
//! rewrites SQL, shapes bind parameters, and normalizes what `execute` hands back.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;

use crate::config::PoolAttributes;
use crate::types::RowValues;

/// Error reported by the native driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverError {
    /// Numeric part of the `ORA-nnnnn` code, when the server produced one.
    pub code: Option<i32>,
    pub message: String,
}

impl DriverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: i32, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "ORA-{code:05}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for DriverError {}

/// Out-bind value types the adapter requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutBindType {
    Number,
}

/// A single named bind: either an input value or an output slot filled by the server.
#[derive(Debug, Clone, PartialEq)]
pub enum BindParam {
    In(RowValues),
    Out(OutBindType),
}

impl BindParam {
    #[must_use]
    pub fn is_out(&self) -> bool {
        matches!(self, BindParam::Out(_))
    }
}

/// Named bind parameters in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamedParams {
    entries: Vec<(String, BindParam)>,
}

impl NamedParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert or replace the parameter called `name`.
    pub fn insert(&mut self, name: impl Into<String>, param: BindParam) {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = param;
        } else {
            self.entries.push((name, param));
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<BindParam> {
        let idx = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(idx).1)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BindParam> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, param)| param)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BindParam)> {
        self.entries.iter().map(|(key, param)| (key.as_str(), param))
    }
}

/// Per-statement execution options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecuteOptions {
    pub auto_commit: bool,
}

/// Column description returned alongside row data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMetadata {
    pub name: String,
}

impl ColumnMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Everything `execute` can report back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecuteResult {
    pub rows_affected: Option<u64>,
    /// Out-bind values keyed by parameter name; DML returning clauses yield one value per row.
    pub out_binds: HashMap<String, Vec<RowValues>>,
    /// Positional rows, present for queries.
    pub rows: Option<Vec<Vec<RowValues>>>,
    pub meta_data: Vec<ColumnMetadata>,
}

/// Pool factory.
#[async_trait]
pub trait Driver: Send + Sync + 'static {
    type Pool: DriverPool;

    /// Create a connection pool.
    ///
    /// # Errors
    ///
    /// Returns the driver's error when the pool cannot be created.
    async fn create_pool(&self, attributes: &PoolAttributes) -> Result<Self::Pool, DriverError>;
}

/// A pool handle shared by every adapter using the same data source.
#[async_trait]
pub trait DriverPool: Send + Sync + 'static {
    type Connection: DriverConnection;

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns the driver's error when no connection can be acquired.
    async fn get_connection(&self) -> Result<Self::Connection, DriverError>;

    /// Close the pool.
    ///
    /// # Errors
    ///
    /// Returns the driver's error when the pool refuses to close.
    async fn close(&self) -> Result<(), DriverError>;
}

/// A checked-out connection.
#[async_trait]
pub trait DriverConnection: Send + 'static {
    /// Execute one statement with named binds.
    ///
    /// # Errors
    ///
    /// Returns the driver's error when the statement fails.
    async fn execute(
        &mut self,
        sql: &str,
        params: &NamedParams,
        options: ExecuteOptions,
    ) -> Result<ExecuteResult, DriverError>;

    /// # Errors
    ///
    /// Returns the driver's error when the commit fails.
    async fn commit(&mut self) -> Result<(), DriverError>;

    /// # Errors
    ///
    /// Returns the driver's error when the rollback fails.
    async fn rollback(&mut self) -> Result<(), DriverError>;

    /// Hand the connection back to its pool.
    ///
    /// # Errors
    ///
    /// Returns the driver's error when the pool rejects the connection.
    async fn release(self) -> Result<(), DriverError>;

    /// Close the underlying session instead of returning it to the pool.
    ///
    /// # Errors
    ///
    /// Returns the driver's error when closing fails.
    async fn close(self) -> Result<(), DriverError>;
}

/// Connection type handed out by a driver's pools.
pub type ConnectionOf<D> = <<D as Driver>::Pool as DriverPool>::Connection;
