pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{CacheConfig, CatalogConfig, Config, LoggingConfig, default_base_url, default_image_base_url, default_language};
pub use credentials::{CredentialStore, API_KEY_ENV};
pub use paths::{PathManager, container_base_path};
