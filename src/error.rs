use thiserror::Error;

use crate::driver::DriverError;

#[derive(Debug, Error)]
pub enum OracleAdapterError {
    #[error("Connection error: {0}")]
    ConnectionError(#[source] DriverError),

    #[error("Query error: {0}")]
    QueryError(#[source] DriverError),

    /// The transaction body (or its commit) failed. `source` is the original failure;
    /// `rollback` is set when the follow-up rollback failed as well.
    #[error("Transaction error: {source}")]
    TransactionError {
        #[source]
        source: Box<OracleAdapterError>,
        rollback: Option<Box<OracleAdapterError>>,
    },

    #[error("Not connected: {0}")]
    NotConnected(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl OracleAdapterError {
    /// Driver error behind a connection or query failure, if any.
    #[must_use]
    pub fn driver_error(&self) -> Option<&DriverError> {
        match self {
            Self::ConnectionError(err) | Self::QueryError(err) => Some(err),
            Self::TransactionError { source, .. } => source.driver_error(),
            _ => None,
        }
    }

    /// Native error code (the numeric part of `ORA-nnnnn`), if the driver reported one.
    #[must_use]
    pub fn code(&self) -> Option<i32> {
        self.driver_error().and_then(|err| err.code)
    }
}
