use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::config::{DataSourceConfig, PoolAttributes, strip_credentials};
use crate::driver::{Driver, DriverPool};
use crate::error::OracleAdapterError;

type PoolSlot<P> = Arc<OnceCell<Arc<P>>>;

/// Process-wide mapping from data-source name to a driver pool.
///
/// Create one registry at startup, share it behind an `Arc` with every adapter, and call
/// [`close_all`](PoolRegistry::close_all) on shutdown. Each data-source name gets its own
/// once-cell, so concurrent first-time connects to the same name wait on a single pool
/// creation instead of racing to build duplicates.
pub struct PoolRegistry<D: Driver> {
    driver: D,
    pools: Mutex<HashMap<String, PoolSlot<D::Pool>>>,
}

impl<D: Driver> std::fmt::Debug for PoolRegistry<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolRegistry")
            .field("pools", &self.len())
            .finish()
    }
}

impl<D: Driver> PoolRegistry<D> {
    #[must_use]
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            pools: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, PoolSlot<D::Pool>>> {
        match self.pools.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Return the pool registered for `dsn`, creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns `OracleAdapterError::ConnectionError` if the driver cannot create the pool.
    /// A failed creation leaves nothing registered, so the next call tries again.
    pub async fn acquire(
        &self,
        dsn: &str,
        config: &DataSourceConfig,
    ) -> Result<Arc<D::Pool>, OracleAdapterError> {
        let slot = Arc::clone(self.lock().entry(dsn.to_string()).or_default());

        let pool = slot
            .get_or_try_init(|| async {
                let attributes = PoolAttributes::from_config(dsn, config);
                info!(
                    connect_string = %attributes.connect_string,
                    pool_max = attributes.pool_max,
                    pool_timeout = attributes.pool_timeout,
                    "creating Oracle connection pool"
                );
                self.driver
                    .create_pool(&attributes)
                    .await
                    .map(Arc::new)
                    .map_err(OracleAdapterError::ConnectionError)
            })
            .await?;

        Ok(Arc::clone(pool))
    }

    /// The pool registered for `dsn`, if one has been created.
    #[must_use]
    pub fn get(&self, dsn: &str) -> Option<Arc<D::Pool>> {
        self.lock()
            .get(dsn)
            .and_then(|slot| slot.get().map(Arc::clone))
    }

    #[must_use]
    pub fn contains(&self, dsn: &str) -> bool {
        self.get(dsn).is_some()
    }

    /// Number of live pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Close every registered pool and empty the registry.
    ///
    /// Only call this once no adapter holds a checked-out connection. Every pool is
    /// closed even if an earlier one fails; the first failure is returned.
    ///
    /// # Errors
    ///
    /// Returns `OracleAdapterError::ConnectionError` if a pool fails to close.
    pub async fn close_all(&self) -> Result<(), OracleAdapterError> {
        let drained: Vec<(String, PoolSlot<D::Pool>)> = self.lock().drain().collect();
        let mut first_error = None;

        for (dsn, slot) in drained {
            let Some(pool) = slot.get() else {
                continue;
            };
            let connect_string = strip_credentials(&dsn);
            match pool.close().await {
                Ok(()) => info!(connect_string = %connect_string, "closed Oracle connection pool"),
                Err(err) => {
                    warn!(connect_string = %connect_string, error = %err, "failed to close Oracle connection pool");
                    first_error.get_or_insert(OracleAdapterError::ConnectionError(err));
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
