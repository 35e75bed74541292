//! Oracle dialect adapter for an ORM.
//!
//! The ORM hands this crate dialect-neutral SQL with `?` placeholders, clause fragments for
//! selects, and table descriptors. The adapter rewrites them for Oracle: named binds,
//! `rownum` pagination, `returning ... into :id` for generated keys, and sequence/trigger
//! pairs in place of auto-increment. Connections come from a native driver behind the
//! traits in [`driver`]; pools are shared per data source through a [`PoolRegistry`].

pub mod adapter;
pub mod config;
pub mod ddl;
pub mod dialect;
pub mod driver;
pub mod error;
pub mod pool;
pub mod prelude;
pub mod query_builder;
pub mod results;
pub mod session;
pub mod translation;
pub mod types;

pub use adapter::{Adapter, OracleAdapter};
pub use error::OracleAdapterError;
pub use pool::PoolRegistry;
pub use session::Session;
