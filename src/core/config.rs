use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

fn default_cache_size() -> usize {
    1
}

fn default_cache_duration() -> u64 {
    300
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Endpoint returning the JSON array of transactions
    #[serde(alias = "apiUrl")]
    pub api_url: String,
    /// How many cache generations are retained for replay
    #[serde(default = "default_cache_size", alias = "cacheSize")]
    pub cache_size: usize,
    /// Seconds a fetched transaction set stays fresh
    #[serde(default = "default_cache_duration", alias = "cacheDuration")]
    pub cache_duration: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "txboard", "txboard")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
api_url: "http://localhost:3000/transactions"
cache_size: 2
cache_duration: 60
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.api_url, "http://localhost:3000/transactions");
        assert_eq!(config.cache_size, 2);
        assert_eq!(config.cache_duration, 60);
        assert_eq!(config.cache_ttl(), Duration::from_millis(60_000));
    }

    #[test]
    fn test_config_defaults_and_aliases() {
        let yaml_str = r#"
apiUrl: "http://example.com/api"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert_eq!(config.api_url, "http://example.com/api");
        assert_eq!(config.cache_size, 1);
        assert_eq!(config.cache_duration, 300);

        let yaml_str = r#"
apiUrl: "http://example.com/api"
cacheSize: 4
cacheDuration: 10
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert_eq!(config.cache_size, 4);
        assert_eq!(config.cache_ttl(), Duration::from_secs(10));
    }

    #[test]
    fn test_config_requires_api_url() {
        let result: Result<AppConfig, _> = serde_yaml::from_str("cache_size: 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_path() -> Result<()> {
        let file = tempfile::NamedTempFile::new()?;
        fs::write(file.path(), "api_url: http://localhost:1234/tx\n")?;

        let config = AppConfig::load_from_path(file.path())?;
        assert_eq!(config.api_url, "http://localhost:1234/tx");

        let missing = AppConfig::load_from_path(file.path().with_extension("missing"));
        assert!(
            missing
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
        Ok(())
    }
}
