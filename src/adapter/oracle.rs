use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::contract::Adapter;
use crate::ddl::{
    CreateStatement, TableDescriptor, create_sequence_statement, create_trigger_statement,
    drop_sequence_statement, generate_create_statement,
};
use crate::dialect::{ORA_SEQUENCE_NOT_EXISTS, ORA_TABLE_NOT_EXISTS};
use crate::driver::{
    BindParam, ConnectionOf, Driver, DriverConnection, DriverPool, ExecuteOptions, NamedParams,
    OutBindType,
};
use crate::error::OracleAdapterError;
use crate::pool::PoolRegistry;
use crate::query_builder::{self, QueryDescriptor, build_select_statement};
use crate::results::build_result_set;
use crate::session::Session;
use crate::translation::{NamedStatement, returning_clause, returning_column, rewrite_placeholders};
use crate::types::RowValues;

/// Out-bind parameter receiving the generated key.
const ID_PARAM: &str = "id";

/// Column guessed when an insert's primary key is unknown.
const GUESSED_PRIMARY_KEY: &str = "id";

/// Oracle implementation of [`Adapter`] over a native driver `D`.
pub struct OracleAdapter<D: Driver> {
    registry: Arc<PoolRegistry<D>>,
    connection: Option<ConnectionOf<D>>,
    in_transaction: bool,
}

impl<D: Driver> std::fmt::Debug for OracleAdapter<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleAdapter")
            .field("connected", &self.connection.is_some())
            .field("in_transaction", &self.in_transaction)
            .finish()
    }
}

/// How an insert asks for its generated key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReturnId {
    None,
    /// The caller's SQL or the known primary key supplies the column.
    Known,
    /// Guessed `"id"`; retried without the clause if the statement fails.
    Guessed,
}

impl<D: Driver> OracleAdapter<D> {
    #[must_use]
    pub fn new(registry: Arc<PoolRegistry<D>>) -> Self {
        Self {
            registry,
            connection: None,
            in_transaction: false,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<PoolRegistry<D>> {
        &self.registry
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.in_transaction
    }

    /// Close every pool in `registry`. Only safe once no adapter holds a connection.
    ///
    /// # Errors
    ///
    /// Returns `OracleAdapterError::ConnectionError` if a pool fails to close.
    pub async fn close_all(registry: &PoolRegistry<D>) -> Result<(), OracleAdapterError> {
        registry.close_all().await
    }

    fn options(&self) -> ExecuteOptions {
        ExecuteOptions {
            auto_commit: !self.in_transaction,
        }
    }

    fn connection_mut(&mut self) -> Result<&mut ConnectionOf<D>, OracleAdapterError> {
        self.connection.as_mut().ok_or_else(|| {
            OracleAdapterError::NotConnected("call connect before issuing statements".to_string())
        })
    }

    async fn execute_ddl(&mut self, sql: &str) -> Result<(), OracleAdapterError> {
        let options = self.options();
        debug!(sql, "executing DDL");
        self.connection_mut()?
            .execute(sql, &NamedParams::new(), options)
            .await
            .map(|_| ())
            .map_err(OracleAdapterError::QueryError)
    }
}

#[async_trait]
impl<D: Driver> Adapter for OracleAdapter<D> {
    async fn connect(&mut self, session: &mut Session) -> Result<(), OracleAdapterError> {
        let pool = self
            .registry
            .acquire(session.dsn(), session.config())
            .await?;
        let connection = pool
            .get_connection()
            .await
            .map_err(OracleAdapterError::ConnectionError)?;

        if let Some(previous) = self.connection.replace(connection) {
            if let Err(err) = previous.release().await {
                warn!(error = %err, "failed to release previously held connection");
            }
        }
        Ok(())
    }

    async fn query(
        &mut self,
        session: &mut Session,
        sql: &str,
        bindings: &[RowValues],
    ) -> Result<(), OracleAdapterError> {
        let NamedStatement {
            sql: named_sql,
            mut params,
        } = rewrite_placeholders(sql, bindings);
        let mut statement = named_sql.clone();
        let mut return_id = ReturnId::None;

        if session.command.is_insert() {
            session.insert_id = None;
            if let Some(column) = returning_column(&named_sql) {
                debug!(column = %column, "insert already returns its key");
                return_id = ReturnId::Known;
            } else if let Some(primary) = session.primary_key() {
                statement.push_str(&returning_clause(primary));
                return_id = ReturnId::Known;
            } else {
                statement.push_str(&returning_clause(GUESSED_PRIMARY_KEY));
                return_id = ReturnId::Guessed;
            }
            params.insert(ID_PARAM, BindParam::Out(OutBindType::Number));
        }

        let options = self.options();
        let connection = self.connection_mut()?;
        debug!(
            sql = %statement,
            params = params.len(),
            auto_commit = options.auto_commit,
            "executing statement"
        );

        let first = connection.execute(&statement, &params, options).await;
        let result = match first {
            Ok(result) => result,
            Err(err) if return_id == ReturnId::Guessed => {
                warn!(
                    error = %err,
                    "insert with guessed \"id\" returning clause failed; retrying without it"
                );
                params.remove(ID_PARAM);
                return_id = ReturnId::None;
                connection
                    .execute(&named_sql, &params, options)
                    .await
                    .map_err(OracleAdapterError::QueryError)?
            }
            Err(err) => return Err(OracleAdapterError::QueryError(err)),
        };

        if return_id != ReturnId::None {
            session.insert_id = result
                .out_binds
                .get(ID_PARAM)
                .and_then(|values| values.first())
                .and_then(RowValues::as_id);
        }

        session.affected_rows = result.rows_affected.unwrap_or(0);

        let has_rows = result.rows.as_ref().is_some_and(|rows| !rows.is_empty());
        if has_rows || session.command.is_select() {
            session.data = build_result_set(&result);
        }

        Ok(())
    }

    async fn transaction(&mut self, _session: &mut Session) -> Result<(), OracleAdapterError> {
        self.in_transaction = true;
        Ok(())
    }

    async fn commit(&mut self, _session: &mut Session) -> Result<(), OracleAdapterError> {
        self.connection_mut()?
            .commit()
            .await
            .map_err(OracleAdapterError::QueryError)?;
        self.in_transaction = false;
        Ok(())
    }

    async fn rollback(&mut self, _session: &mut Session) -> Result<(), OracleAdapterError> {
        self.connection_mut()?
            .rollback()
            .await
            .map_err(OracleAdapterError::QueryError)?;
        self.in_transaction = false;
        Ok(())
    }

    async fn release(&mut self) {
        if let Some(connection) = self.connection.take() {
            if let Err(err) = connection.release().await {
                warn!(error = %err, "failed to release connection");
            }
        }
    }

    async fn close(&mut self) {
        if let Some(connection) = self.connection.take() {
            if let Err(err) = connection.close().await {
                warn!(error = %err, "failed to close connection");
            }
        }
    }

    fn get_ddl(&self, table: &TableDescriptor) -> CreateStatement {
        generate_create_statement(table)
    }

    async fn create(&mut self, table: &mut TableDescriptor) -> Result<(), OracleAdapterError> {
        let CreateStatement {
            sql: ddl,
            auto_increment,
        } = self.get_ddl(table);
        self.execute_ddl(&ddl).await?;

        let Some(plan) = auto_increment else {
            table.sql = ddl;
            return Ok(());
        };

        let drop_sequence = drop_sequence_statement(&plan);
        match self.execute_ddl(&drop_sequence).await {
            Ok(()) => {}
            Err(err)
                if matches!(
                    err.code(),
                    Some(ORA_TABLE_NOT_EXISTS | ORA_SEQUENCE_NOT_EXISTS)
                ) =>
            {
                debug!(error = %err, "no previous sequence to drop");
            }
            Err(err) => return Err(err),
        }

        let create_sequence = create_sequence_statement(&plan);
        self.execute_ddl(&create_sequence).await?;

        let create_trigger = create_trigger_statement(&plan);
        self.execute_ddl(&create_trigger).await?;

        table.sql = format!("{ddl};\n{drop_sequence}\n/\n{create_sequence};\n{create_trigger}");
        Ok(())
    }

    fn random<'q>(&self, query: &'q mut QueryDescriptor) -> &'q mut QueryDescriptor {
        query_builder::randomize(query)
    }

    fn limit<'q>(
        &self,
        query: &'q mut QueryDescriptor,
        length: u64,
        offset: Option<u64>,
    ) -> &'q mut QueryDescriptor {
        query_builder::limit(query, length, offset)
    }

    fn get_select_sql(&self, query: &QueryDescriptor) -> String {
        build_select_statement(query)
    }
}
