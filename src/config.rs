use serde::{Deserialize, Serialize};

use crate::error::OracleAdapterError;
use crate::session::Session;

fn default_max() -> u32 {
    50
}

fn default_timeout() -> u64 {
    5000
}

/// Connection settings the ORM hands to `connect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceConfig {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    /// Maximum pooled connections.
    #[serde(default = "default_max")]
    pub max: u32,
    /// Idle/acquire timeout in milliseconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Explicit Easy Connect / TNS string; wins over the one derived from the dsn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_string: Option<String>,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            user: String::new(),
            password: String::new(),
            max: default_max(),
            timeout: default_timeout(),
            connection_string: None,
        }
    }
}

/// Settings passed to the driver's pool factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolAttributes {
    pub user: String,
    pub password: String,
    pub connect_string: String,
    pub pool_max: u32,
    /// Seconds an idle connection may linger.
    pub pool_timeout: u64,
    /// Seconds a checkout may wait for a free connection.
    pub queue_timeout: u64,
}

impl PoolAttributes {
    /// Derive pool settings for `dsn` from the caller's configuration.
    #[must_use]
    pub fn from_config(dsn: &str, config: &DataSourceConfig) -> Self {
        let connect_string = match config.connection_string.as_deref() {
            Some(explicit) if !explicit.is_empty() => explicit.to_string(),
            _ => strip_credentials(dsn).to_string(),
        };
        let seconds = millis_to_seconds(config.timeout);

        Self {
            user: config.user.clone(),
            password: config.password.clone(),
            connect_string,
            pool_max: config.max,
            pool_timeout: seconds,
            queue_timeout: seconds,
        }
    }
}

/// Everything after the first `@`, or the whole dsn when there is none.
#[must_use]
pub fn strip_credentials(dsn: &str) -> &str {
    match dsn.find('@') {
        Some(idx) => &dsn[idx + 1..],
        None => dsn,
    }
}

fn millis_to_seconds(millis: u64) -> u64 {
    millis.saturating_add(500) / 1000
}

/// Options for building an Oracle [`Session`].
#[derive(Debug, Clone)]
pub struct OracleOptions {
    pub host: String,
    pub port: u16,
    pub service_name: String,
    pub config: DataSourceConfig,
}

impl OracleOptions {
    /// Create options with the default listener port (1521) and pool sizing.
    ///
    /// # Arguments
    ///
    /// * `host` - Database host
    /// * `service_name` - Service name, e.g. `XE` or `ORCLPDB1`
    /// * `user` - Login user
    /// * `password` - Login password
    #[must_use]
    pub fn new(host: String, service_name: String, user: String, password: String) -> Self {
        Self {
            host,
            port: 1521,
            service_name,
            config: DataSourceConfig {
                user,
                password,
                ..DataSourceConfig::default()
            },
        }
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: u32) -> Self {
        self.config.max = max;
        self
    }

    /// Pool idle and queue timeout, in milliseconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.config.timeout = timeout_ms;
        self
    }

    /// Override the connect string otherwise derived from the dsn.
    #[must_use]
    pub fn with_connection_string(mut self, connection_string: Option<String>) -> Self {
        self.config.connection_string = connection_string;
        self
    }

    /// Data-source name identifying this target, e.g. `oracle://scott:tiger@db:1521/XE`.
    #[must_use]
    pub fn dsn(&self) -> String {
        format!(
            "oracle://{}:{}@{}:{}/{}",
            self.config.user, self.config.password, self.host, self.port, self.service_name
        )
    }

    /// Build a session for these options.
    ///
    /// # Errors
    ///
    /// Returns `OracleAdapterError::ConfigError` if required fields are missing.
    pub fn into_session(self) -> Result<Session, OracleAdapterError> {
        if self.host.is_empty() {
            return Err(OracleAdapterError::ConfigError(
                "host is required".to_string(),
            ));
        }
        if self.service_name.is_empty() {
            return Err(OracleAdapterError::ConfigError(
                "service name is required".to_string(),
            ));
        }
        if self.config.max == 0 {
            return Err(OracleAdapterError::ConfigError(
                "max must be at least 1".to_string(),
            ));
        }
        let dsn = self.dsn();
        Ok(Session::new(dsn, self.config))
    }
}

/// Fluent builder for Oracle options.
#[derive(Debug, Clone)]
pub struct OracleOptionsBuilder {
    opts: OracleOptions,
}

impl OracleOptionsBuilder {
    #[must_use]
    pub fn new(host: String, service_name: String, user: String, password: String) -> Self {
        Self {
            opts: OracleOptions::new(host, service_name, user, password),
        }
    }

    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.opts.port = port;
        self
    }

    #[must_use]
    pub fn max(mut self, max: u32) -> Self {
        self.opts.config.max = max;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout_ms: u64) -> Self {
        self.opts.config.timeout = timeout_ms;
        self
    }

    #[must_use]
    pub fn connection_string(mut self, connection_string: impl Into<String>) -> Self {
        self.opts.config.connection_string = Some(connection_string.into());
        self
    }

    #[must_use]
    pub fn finish(self) -> OracleOptions {
        self.opts
    }

    /// Build a [`Session`].
    ///
    /// # Errors
    ///
    /// Returns `OracleAdapterError::ConfigError` if required fields are missing.
    pub fn build(self) -> Result<Session, OracleAdapterError> {
        self.finish().into_session()
    }
}
