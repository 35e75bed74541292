use crate::config::DataSourceConfig;
use crate::results::ResultSet;
use crate::types::Command;

/// The ORM's database object as seen by the adapter.
///
/// `connect` reads the data-source name and configuration; `query` reads the command and
/// primary key and writes back `insert_id`, `affected_rows`, and `data`.
#[derive(Debug, Clone)]
pub struct Session {
    dsn: String,
    config: DataSourceConfig,
    pub command: Command,
    /// Primary-key column of the model behind this session, when there is one.
    pub primary_key: Option<String>,
    pub insert_id: Option<i64>,
    pub affected_rows: u64,
    pub data: ResultSet,
}

impl Session {
    /// Create a session for one data source.
    ///
    /// # Arguments
    ///
    /// * `dsn` - Data-source name; also the pool registry key
    /// * `config` - Credentials and pool sizing
    ///
    /// # Returns
    ///
    /// * `Session` - A select session with no primary key and empty results
    pub fn new(dsn: impl Into<String>, config: DataSourceConfig) -> Self {
        Self {
            dsn: dsn.into(),
            config,
            command: Command::default(),
            primary_key: None,
            insert_id: None,
            affected_rows: 0,
            data: ResultSet::default(),
        }
    }

    #[must_use]
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    #[must_use]
    pub fn config(&self) -> &DataSourceConfig {
        &self.config
    }

    /// Primary-key column used for `returning ... into :id` on inserts.
    #[must_use]
    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = Some(primary_key.into());
        self
    }

    pub fn set_command(&mut self, command: Command) -> &mut Self {
        self.command = command;
        self
    }

    /// The primary key, treating an empty name as absent.
    #[must_use]
    pub fn primary_key(&self) -> Option<&str> {
        self.primary_key.as_deref().filter(|pk| !pk.is_empty())
    }
}
