use crate::app::App;
use crate::render;
use crate::ConfigCommands;
use cinelista_config::{CredentialStore, API_KEY_ENV};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;

pub async fn run_config(app: &App, cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(app, full),
        ConfigCommands::SetApiKey { key } => set_api_key(app, key),
        ConfigCommands::SetLanguage { language } => set_language(app, &language),
    }
}

fn show_config(app: &App, full: bool) -> Result<()> {
    let config = &app.config;
    let (api_key, key_source) = match (std::env::var(API_KEY_ENV).ok(), app.credentials().get_tmdb_api_key()) {
        (Some(key), _) if !key.trim().is_empty() => (Some(key), API_KEY_ENV.to_string()),
        (_, Some(key)) => (Some(key.clone()), "credentials file".to_string()),
        _ => (None, "-".to_string()),
    };
    let api_key_display = match &api_key {
        Some(key) if full => key.clone(),
        Some(key) => mask_string(key),
        None => "<not set>".to_string(),
    };
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string());

    if !app.output.is_human() {
        app.output.json(&json!({
            "config_file": app.paths.config_file(),
            "saved_dir": app.paths.saved_dir(),
            "cache_dir": app.paths.response_cache_dir(),
            "catalog": config.catalog,
            "cache": config.cache,
            "logging": config.logging,
            "api_key": api_key_display,
            "api_key_source": key_source,
        }));
        return Ok(());
    }

    let paths = [
        ("Config file", app.paths.config_file().display().to_string()),
        ("Saved lists", app.paths.saved_dir().display().to_string()),
        ("Response cache", app.paths.response_cache_dir().display().to_string()),
        ("Log file", log_file),
    ];
    app.output.info(render::fields_table("Files", &paths).to_string());

    let catalog = [
        ("Base URL", config.catalog.base_url.clone()),
        ("Image base URL", config.catalog.image_base_url.clone()),
        ("Language", config.catalog.language.clone()),
        ("API key", api_key_display),
        ("API key source", key_source),
    ];
    app.output.info(render::fields_table("Catalog", &catalog).to_string());

    let cache = [
        ("Enabled", config.cache.enabled.to_string()),
        ("TTL", format!("{}s", config.cache.ttl_seconds)),
    ];
    app.output.info(render::fields_table("Response cache", &cache).to_string());

    Ok(())
}

fn set_api_key(app: &App, key: Option<String>) -> Result<()> {
    let key = match key {
        Some(key) => key,
        None => rpassword::prompt_password("TMDB API key: ")
            .map_err(|e| eyre!("Failed to read API key: {}", e))?,
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(eyre!("API key cannot be empty"));
    }

    app.paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create cinelista directories: {}", e))?;

    let credentials_file = app.paths.credentials_file();
    let mut store = CredentialStore::new(credentials_file.clone());
    store
        .load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    store.set_tmdb_api_key(key.to_string());
    store
        .save()
        .map_err(|e| eyre!("Failed to save credentials to {}: {}", credentials_file.display(), e))?;

    app.output.success(format!("API key saved to {}", credentials_file.display()));
    if std::env::var(API_KEY_ENV).is_ok() {
        app.output.warn(format!("{} is set and takes precedence over the saved key", API_KEY_ENV));
    }
    Ok(())
}

fn set_language(app: &App, language: &str) -> Result<()> {
    let mut config = app.config.clone();
    config.catalog.language = language.trim().to_string();
    config
        .validate()
        .map_err(|e| eyre!("Invalid language: {}", e))?;

    app.paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create cinelista directories: {}", e))?;

    let config_file = app.paths.config_file();
    config
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    app.output.success(format!("Catalog language set to {}", config.catalog.language));
    Ok(())
}

/// Keep the first and last two characters of a secret
fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
