mod loader;

pub use loader::{ConfigFile, ConfigLoader, PoolOverrides, CONFIG_FILE_NAME};

use crate::error::{CityGridError, Result};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3306;
pub const DEFAULT_DATABASE: &str = "world";
pub const DEFAULT_USERNAME: &str = "root";
pub const DEFAULT_PASSWORD: &str = "pass";
pub const DEFAULT_MAX_POOL_SIZE: u32 = 3;
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the pooled data source. Built once and never
/// mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct PoolConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    pub max_pool_size: u32,
    pub acquire_timeout: Duration,
}

impl PoolConfig {
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(CityGridError::Config("host must not be empty".to_string()));
        }
        if self.database.trim().is_empty() {
            return Err(CityGridError::Config(
                "database must not be empty".to_string(),
            ));
        }
        if self.username.trim().is_empty() {
            return Err(CityGridError::Config(
                "username must not be empty".to_string(),
            ));
        }
        if self.acquire_timeout.is_zero() {
            return Err(CityGridError::Config(
                "acquire_timeout must be greater than zero".to_string(),
            ));
        }
        if self.max_pool_size == 0 {
            return Err(CityGridError::Config(
                "max_pool_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Connection URL without the password, safe for logs.
    pub fn url(&self) -> String {
        format!(
            "mysql://{}@{}:{}/{}",
            self.username, self.host, self.port, self.database
        )
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: DEFAULT_DATABASE.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            max_pool_size: DEFAULT_MAX_POOL_SIZE,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

impl std::fmt::Debug for PoolConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"***")
            .field("max_pool_size", &self.max_pool_size)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}
