use async_trait::async_trait;
use futures_util::future::BoxFuture;
use tracing::warn;

use crate::ddl::{CreateStatement, TableDescriptor};
use crate::error::OracleAdapterError;
use crate::query_builder::QueryDescriptor;
use crate::session::Session;
use crate::types::RowValues;

/// Dialect adapter contract expected by the ORM.
///
/// Each adapter value owns at most one checked-out connection. Calls on one adapter are
/// expected to be sequential; the `&mut self` receivers make that explicit.
#[async_trait]
pub trait Adapter: Send {
    /// Acquire (or create) the pool for the session's data source and check out a connection.
    ///
    /// # Errors
    ///
    /// Returns `OracleAdapterError::ConnectionError` if the pool cannot be created or no
    /// connection can be checked out.
    async fn connect(&mut self, session: &mut Session) -> Result<(), OracleAdapterError>;

    /// Execute `sql` with `?` placeholders bound positionally from `bindings`, writing
    /// `insert_id`, `affected_rows`, and `data` back into `session`.
    ///
    /// # Errors
    ///
    /// Returns `OracleAdapterError::QueryError` when the statement (and any retry) fails,
    /// or `OracleAdapterError::NotConnected` if no connection is held.
    async fn query(
        &mut self,
        session: &mut Session,
        sql: &str,
        bindings: &[RowValues],
    ) -> Result<(), OracleAdapterError>;

    /// Open a transaction: following statements run without auto-commit until
    /// [`commit`](Adapter::commit) or [`rollback`](Adapter::rollback).
    ///
    /// # Errors
    ///
    /// Implementations may refuse to open a transaction.
    async fn transaction(&mut self, session: &mut Session) -> Result<(), OracleAdapterError>;

    /// # Errors
    ///
    /// Returns `OracleAdapterError::QueryError` if the commit fails.
    async fn commit(&mut self, session: &mut Session) -> Result<(), OracleAdapterError>;

    /// # Errors
    ///
    /// Returns `OracleAdapterError::QueryError` if the rollback fails.
    async fn rollback(&mut self, session: &mut Session) -> Result<(), OracleAdapterError>;

    /// Return the held connection to its pool. No-op when nothing is held.
    async fn release(&mut self);

    /// Close the held connection instead of returning it to the pool.
    async fn close(&mut self);

    fn get_ddl(&self, table: &TableDescriptor) -> CreateStatement;

    /// Create `table` and, for auto-increment keys, its sequence and trigger. The executed
    /// SQL is recorded in `table.sql`.
    ///
    /// # Errors
    ///
    /// Returns `OracleAdapterError::QueryError` on the first failing statement; objects
    /// created before it are left in place.
    async fn create(&mut self, table: &mut TableDescriptor) -> Result<(), OracleAdapterError>;

    fn random<'q>(&self, query: &'q mut QueryDescriptor) -> &'q mut QueryDescriptor;

    fn limit<'q>(
        &self,
        query: &'q mut QueryDescriptor,
        length: u64,
        offset: Option<u64>,
    ) -> &'q mut QueryDescriptor;

    fn get_select_sql(&self, query: &QueryDescriptor) -> String;

    /// Run `body` inside a transaction.
    ///
    /// Commits when the body succeeds. If the body or the commit fails, a rollback is
    /// issued before the failure is returned as `TransactionError`; a failing rollback is
    /// attached to that error rather than replacing it.
    ///
    /// ```rust,no_run
    /// # use oracle_adapter::prelude::*;
    /// # async fn demo<A: Adapter>(adapter: &mut A, session: &mut Session) -> Result<(), OracleAdapterError> {
    /// adapter
    ///     .transaction_with(session, |adapter, session| {
    ///         Box::pin(async move {
    ///             session.set_command(Command::Update);
    ///             adapter
    ///                 .query(session, "update \"users\" set \"age\" = ? where \"id\" = ?", &[
    ///                     RowValues::Int(30),
    ///                     RowValues::Int(1),
    ///                 ])
    ///                 .await
    ///         })
    ///     })
    ///     .await
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `OracleAdapterError::TransactionError` wrapping the original failure.
    async fn transaction_with<F, T>(
        &mut self,
        session: &mut Session,
        body: F,
    ) -> Result<T, OracleAdapterError>
    where
        Self: Sized,
        F: for<'a> FnOnce(&'a mut Self, &'a mut Session) -> BoxFuture<'a, Result<T, OracleAdapterError>>
            + Send,
        T: Send,
    {
        self.transaction(session).await?;

        let outcome = match body(self, session).await {
            Ok(value) => self.commit(session).await.map(|()| value),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(value) => Ok(value),
            Err(err) => {
                let rollback = match self.rollback(session).await {
                    Ok(()) => None,
                    Err(rollback_err) => {
                        warn!(
                            error = %err,
                            rollback_error = %rollback_err,
                            "rollback failed after transaction error"
                        );
                        Some(Box::new(rollback_err))
                    }
                };
                Err(OracleAdapterError::TransactionError {
                    source: Box::new(err),
                    rollback,
                })
            }
        }
    }
}
