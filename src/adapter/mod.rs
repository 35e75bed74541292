mod contract;
mod oracle;

pub use contract::Adapter;
pub use oracle::OracleAdapter;
