use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

const CONFIG_DIR_NAME: &str = "patternhub";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_host")]
    pub host: String,
    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl ServerConfig {
    fn default_host() -> String {
        "127.0.0.1".to_string()
    }

    const fn default_port() -> u16 {
        5000
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "DatabaseConfig::default_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
        }
    }
}

impl DatabaseConfig {
    fn default_url() -> String {
        let path = Config::config_dir().map_or_else(
            |_| PathBuf::from(CONFIG_DIR_NAME).join("catalog.db"),
            |dir| dir.join("catalog.db"),
        );
        format!("sqlite://{}?mode=rwc", path.display())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub llm: ProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    #[serde(default = "ProviderConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "ProviderConfig::default_model")]
    pub model: String,
}

impl ProviderConfig {
    fn default_base_url() -> String {
        "https://api.openai.com/v1".to_string()
    }

    fn default_model() -> String {
        "gpt-4o-mini".to_string()
    }

    /// Whether the key still holds the template placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.api_key.trim().is_empty() || self.api_key.starts_with("your-")
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CatalogConfig {
    /// Seed file imported by `patternhub seed` when no path is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_path: Option<PathBuf>,
}

const CONFIG_TEMPLATE: &str = r#"{
  "server": {
    "host": "127.0.0.1",
    "port": 5000
  },
  "providers": {
    "llm": {
      "api_key": "your-api-key-here",
      "base_url": "https://api.openai.com/v1",
      "model": "gpt-4o-mini"
    }
  },
  "catalog": {}
}"#;

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR_NAME))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_dir()?.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'patternhub init' to create config.",
                config_path.display()
            );
        }

        Self::from_path(&config_path)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config at {}: {e}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_dir = Self::ensure_config_dir()?;
        Self::create_config_in(&config_dir)
    }

    /// Write the template config into `dir`, refusing to overwrite.
    pub fn create_config_in(dir: &Path) -> anyhow::Result<PathBuf> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, CONFIG_TEMPLATE)?;
        Ok(config_path)
    }
}
