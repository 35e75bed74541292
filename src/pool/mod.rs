mod registry;

pub use registry::PoolRegistry;
