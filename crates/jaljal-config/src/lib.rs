use jaljal_client::{ClientOptions, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DataSource};
use jaljal_core::{DEFAULT_ATTEMPTS, DurationPolicy, MAX_ATTEMPTS, MAX_MINUTES, RenderOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding `api.base_url`
pub const BASE_URL_ENV: &str = "JALJAL_API_BASE_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Simple configuration for jaljal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Only sent to the service when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<DataSource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_attempts")]
    pub default_attempts: u32,

    #[serde(default = "default_max_minutes")]
    pub max_minutes: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_placeholders")]
    pub placeholder_blocks: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            data_source: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_attempts: default_attempts(),
            max_minutes: default_max_minutes(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            placeholder_blocks: default_placeholders(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_attempts() -> u32 {
    DEFAULT_ATTEMPTS
}

fn default_max_minutes() -> f64 {
    MAX_MINUTES
}

fn default_placeholders() -> usize {
    3
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            // Create default config file
            let config = Config::default();
            config.save_to(&path)?;
            config
        };

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "jaljal", "jaljal") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.jaljal/config.toml")
        }
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
    }

    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.trim();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must start with http:// or https://: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be at least 1".to_string(),
            ));
        }

        if !(1..=MAX_ATTEMPTS).contains(&self.search.default_attempts) {
            return Err(ConfigError::Invalid(format!(
                "search.default_attempts must be between 1 and {}: {}",
                MAX_ATTEMPTS, self.search.default_attempts
            )));
        }

        if !self.search.max_minutes.is_finite() || self.search.max_minutes <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "search.max_minutes must be a positive number: {}",
                self.search.max_minutes
            )));
        }

        Ok(())
    }

    pub fn duration_policy(&self) -> DurationPolicy {
        DurationPolicy::new(self.search.max_minutes)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            placeholders: self.ui.placeholder_blocks,
        }
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.api.base_url.clone(),
            timeout: Duration::from_secs(self.api.timeout_secs),
            data_source: self.api.data_source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert!(config.api.data_source.is_none());
        assert_eq!(config.search.default_attempts, 1);
        assert_eq!(config.search.max_minutes, 1000.0);
        assert_eq!(config.ui.placeholder_blocks, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.api.base_url, config.api.base_url);
        assert_eq!(parsed.search.default_attempts, config.search.default_attempts);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml_str = r#"
[api]
base_url = "https://jaljal.example.com/api"
data_source = "youtube"

[search]
default_attempts = 3
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url, "https://jaljal.example.com/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.data_source, Some(DataSource::Youtube));
        assert_eq!(config.search.default_attempts, 3);
        assert_eq!(config.search.max_minutes, 1000.0);
        assert_eq!(config.ui.placeholder_blocks, 3);
    }

    #[test]
    fn test_env_overrides_base_url() {
        let mut config = Config::default();
        config.apply_env_from(|key| {
            (key == BASE_URL_ENV).then(|| "http://10.0.0.5:8080/api".to_string())
        });
        assert_eq!(config.api.base_url, "http://10.0.0.5:8080/api");

        // blank values are ignored
        config.apply_env_from(|_| Some("  ".to_string()));
        assert_eq!(config.api.base_url, "http://10.0.0.5:8080/api");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.api.base_url = "localhost:5000".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.search.default_attempts = 11;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.search.max_minutes = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_save_and_load_roundtrip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.ui.placeholder_blocks = 5;
        config.api.data_source = Some(DataSource::Memory);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.ui.placeholder_blocks, 5);
        assert_eq!(loaded.api.data_source, Some(DataSource::Memory));
        assert_eq!(loaded.render_options().placeholders, 5);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_client_options() {
        let mut config = Config::default();
        config.api.timeout_secs = 5;
        config.api.data_source = Some(DataSource::Database);

        let options = config.client_options();
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.data_source, Some(DataSource::Database));
        assert_eq!(config.duration_policy().max_minutes, 1000.0);
    }
}
