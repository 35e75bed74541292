//! Convenient imports for common functionality.

pub use crate::adapter::{Adapter, OracleAdapter};
pub use crate::config::{DataSourceConfig, OracleOptions, OracleOptionsBuilder, PoolAttributes};
pub use crate::ddl::{CreateStatement, ForeignKey, TableDescriptor};
pub use crate::driver::{
    BindParam, ColumnMetadata, Driver, DriverConnection, DriverError, DriverPool,
    ExecuteOptions, ExecuteResult, NamedParams, OutBindType,
};
pub use crate::error::OracleAdapterError;
pub use crate::pool::PoolRegistry;
pub use crate::query_builder::{Limit, QueryDescriptor};
pub use crate::results::{CustomDbRow, ResultSet};
pub use crate::session::Session;
pub use crate::types::{Command, RowValues};
