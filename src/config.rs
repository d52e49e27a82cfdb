use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::info;

pub const ENV_BASE_URL: &str = "MOVIE_BASE_URL";
pub const ENV_API_KEY: &str = "MOVIE_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub appdir: Option<String>,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(skip)]
    pub debug_logs: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CatalogConfig {
    #[serde(alias = "base_url", rename = "baseurl")]
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(alias = "api_key", rename = "apikey")]
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default)]
    pub sqlite: Option<SqliteConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    pub filename: String,
}

/// Where the favorites snapshot lives.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    File(PathBuf),
    Sqlite(String),
}

fn default_port() -> String {
    "8080".to_string()
}

fn default_storage_dir() -> String {
    "./data".to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::parse(path, &content)
    }

    fn parse(path: &str, content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(path.to_string(), e))
    }

    /// Read the config file if it exists, then apply environment overrides.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let mut config = match Self::from_file(path) {
            Ok(config) => config,
            Err(ConfigError::ReadError(_, e)) if e.kind() == ErrorKind::NotFound => {
                info!("Config file {} not found, using defaults", path);
                Config::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_overrides(
            std::env::var(ENV_BASE_URL).ok(),
            std::env::var(ENV_API_KEY).ok(),
        );
        Ok(config)
    }

    pub fn apply_overrides(&mut self, base_url: Option<String>, api_key: Option<String>) {
        if let Some(base_url) = base_url.filter(|s| !s.is_empty()) {
            self.catalog.base_url = Some(base_url);
        }
        if let Some(api_key) = api_key.filter(|s| !s.is_empty()) {
            self.catalog.api_key = Some(api_key);
        }
    }

    /// Base URL and API key; both are required.
    pub fn catalog_settings(&self) -> Result<(&str, &str), ConfigError> {
        let base_url = self
            .catalog
            .base_url
            .as_deref()
            .ok_or(ConfigError::Missing("catalog.baseurl", ENV_BASE_URL))?;
        let api_key = self
            .catalog
            .api_key
            .as_deref()
            .ok_or(ConfigError::Missing("catalog.apikey", ENV_API_KEY))?;
        Ok((base_url, api_key))
    }

    pub fn storage_backend(&self) -> StorageBackend {
        if let Some(ref sqlite) = self.storage.sqlite {
            return StorageBackend::Sqlite(sqlite.filename.clone());
        }

        let dir = self.storage.dir.clone().unwrap_or_else(default_storage_dir);
        StorageBackend::File(PathBuf::from(dir))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
    #[error("Missing setting {0} (or environment variable {1})")]
    Missing(&'static str, &'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
listen:
  address: 127.0.0.1
  port: "9000"
appdir: ./dist
catalog:
  baseurl: https://api.themoviedb.org/3
  apikey: secret
storage:
  sqlite:
    filename: favorites.db
"#;
        let config = Config::parse("test.yaml", yaml).unwrap();
        assert_eq!(config.listen.address.as_deref(), Some("127.0.0.1"));
        assert_eq!(config.listen.port, "9000");
        assert_eq!(config.appdir.as_deref(), Some("./dist"));
        assert_eq!(
            config.catalog_settings().unwrap(),
            ("https://api.themoviedb.org/3", "secret")
        );
        assert_eq!(
            config.storage_backend(),
            StorageBackend::Sqlite("favorites.db".to_string())
        );
    }

    #[test]
    fn test_defaults() {
        let config = Config::parse("test.yaml", "{}").unwrap();
        assert_eq!(config.listen.port, "8080");
        assert_eq!(
            config.storage_backend(),
            StorageBackend::File(PathBuf::from("./data"))
        );
        assert!(matches!(
            config.catalog_settings(),
            Err(ConfigError::Missing("catalog.baseurl", _))
        ));
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::parse("test.yaml", "catalog:\n  apikey: from-file\n").unwrap();
        config.apply_overrides(Some("http://localhost:1234".to_string()), Some(String::new()));
        assert_eq!(
            config.catalog_settings().unwrap(),
            ("http://localhost:1234", "from-file")
        );
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.yaml");
        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.listen.port, "8080");
    }

    #[test]
    fn test_bad_yaml() {
        let err = Config::parse("bad.yaml", "listen: [").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_, _)));
    }
}
