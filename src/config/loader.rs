use super::PoolConfig;
use crate::error::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "citygrid.yaml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub max_pool_size: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
}

/// Values supplied on the command line or through the environment. They win
/// over anything read from a config file.
#[derive(Debug, Clone, Default)]
pub struct PoolOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub max_pool_size: Option<u32>,
}

pub struct ConfigLoader {
    default_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            default_path: dirs::config_dir().map(|dir| dir.join("citygrid").join(CONFIG_FILE_NAME)),
        }
    }

    pub fn with_default_path(mut self, path: Option<PathBuf>) -> Self {
        self.default_path = path;
        self
    }

    /// Reads the explicit path when given, otherwise the platform default if it
    /// exists. A missing default file is not an error.
    pub fn load_file(&self, explicit: Option<&Path>) -> Result<Option<ConfigFile>> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match &self.default_path {
                Some(path) if path.is_file() => path.clone(),
                _ => return Ok(None),
            },
        };

        debug!(path = %path.display(), "Reading config file");
        let content = std::fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(Some(ConfigFile::default()));
        }
        let file: ConfigFile = serde_yaml::from_str(&content)?;
        Ok(Some(file))
    }

    pub fn resolve(&self, file: Option<ConfigFile>, overrides: PoolOverrides) -> Result<PoolConfig> {
        let file = file.unwrap_or_default();
        let defaults = PoolConfig::default();

        let config = PoolConfig {
            host: overrides.host.or(file.host).unwrap_or(defaults.host),
            port: overrides.port.or(file.port).unwrap_or(defaults.port),
            database: overrides
                .database
                .or(file.database)
                .unwrap_or(defaults.database),
            username: overrides
                .username
                .or(file.username)
                .unwrap_or(defaults.username),
            password: overrides
                .password
                .or(file.password)
                .unwrap_or(defaults.password),
            max_pool_size: overrides
                .max_pool_size
                .or(file.max_pool_size)
                .unwrap_or(defaults.max_pool_size),
            acquire_timeout: file
                .acquire_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.acquire_timeout),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn load(&self, explicit: Option<&Path>, overrides: PoolOverrides) -> Result<PoolConfig> {
        let file = self.load_file(explicit)?;
        self.resolve(file, overrides)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CityGridError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn loader() -> ConfigLoader {
        ConfigLoader::new().with_default_path(None)
    }

    #[test]
    fn no_file_and_no_overrides_gives_defaults() {
        let config = loader().load(None, PoolOverrides::default()).unwrap();
        assert_eq!(config, PoolConfig::default());
    }

    #[test]
    fn file_values_replace_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "host: db.internal\nport: 3307\nmax_pool_size: 5").unwrap();

        let config = loader()
            .load(Some(file.path()), PoolOverrides::default())
            .unwrap();
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 3307);
        assert_eq!(config.max_pool_size, 5);
        assert_eq!(config.database, "world");
    }

    #[test]
    fn overrides_win_over_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "host: db.internal\nusername: reader").unwrap();

        let overrides = PoolOverrides {
            host: Some("override.local".to_string()),
            ..PoolOverrides::default()
        };
        let config = loader().load(Some(file.path()), overrides).unwrap();
        assert_eq!(config.host, "override.local");
        assert_eq!(config.username, "reader");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "hostname: typo").unwrap();

        let err = loader()
            .load(Some(file.path()), PoolOverrides::default())
            .unwrap_err();
        assert!(matches!(err, CityGridError::Yaml(_)));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        let err = loader()
            .load(Some(&missing), PoolOverrides::default())
            .unwrap_err();
        assert!(matches!(err, CityGridError::Io(_)));
    }

    #[test]
    fn default_path_is_used_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "database: sakila\n").unwrap();

        let config = ConfigLoader::new()
            .with_default_path(Some(path))
            .load(None, PoolOverrides::default())
            .unwrap();
        assert_eq!(config.database, "sakila");
    }

    #[test]
    fn zero_acquire_timeout_in_file_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "acquire_timeout_secs: 0").unwrap();

        let err = loader()
            .load(Some(file.path()), PoolOverrides::default())
            .unwrap_err();
        assert!(matches!(err, CityGridError::Config(_)));
    }

    #[test]
    fn invalid_resolved_config_is_rejected() {
        let overrides = PoolOverrides {
            max_pool_size: Some(0),
            ..PoolOverrides::default()
        };
        let err = loader().load(None, overrides).unwrap_err();
        assert!(matches!(err, CityGridError::Config(_)));
    }
}
