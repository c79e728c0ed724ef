use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Locale sent as `language` on every request
    #[serde(default = "default_language")]
    pub language: String,
}

/// Staleness window for catalog responses memoised by the front end
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_cache_ttl_seconds")]
    pub ttl_seconds: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

pub fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

pub fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

pub fn default_language() -> String {
    "es-MX".to_string()
}

fn default_cache_ttl_seconds() -> u64 {
    300 // 5 minutes
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            language: default_language(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            ttl_seconds: default_cache_ttl_seconds(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, or defaults when it has not been written yet
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let base_url = &self.catalog.base_url;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(anyhow::anyhow!("catalog.base_url must start with http:// or https://: {}", base_url));
        }

        let image_base_url = &self.catalog.image_base_url;
        if !(image_base_url.starts_with("http://") || image_base_url.starts_with("https://")) {
            return Err(anyhow::anyhow!("catalog.image_base_url must start with http:// or https://: {}", image_base_url));
        }

        if self.catalog.language.trim().is_empty() {
            return Err(anyhow::anyhow!("catalog.language cannot be empty"));
        }

        if self.cache.enabled && self.cache.ttl_seconds == 0 {
            return Err(anyhow::anyhow!("cache.ttl_seconds must be positive when the cache is enabled"));
        }

        Ok(())
    }
}
