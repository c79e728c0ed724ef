use crate::cache::ResponseCache;
use crate::output::Output;
use cinelista_catalog::{CatalogApi, CatalogClient, CatalogResult};
use cinelista_config::{Config, CredentialStore, PathManager, API_KEY_ENV};
use cinelista_models::{ContentKind, ContentSnapshot, MovieDetails, TvShowDetails};
use cinelista_store::{FileStorage, SavedContentStore};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use tracing::warn;

/// Everything a command needs for one invocation: loaded config, the saved
/// store, the response cache and the output sink.
pub struct App {
    pub paths: PathManager,
    pub config: Config,
    pub output: Output,
    credentials: CredentialStore,
    cache: ResponseCache,
    store: SavedContentStore<FileStorage>,
}

impl App {
    pub fn new(paths: PathManager, config: Config, output: Output, no_cache: bool) -> Result<Self> {
        let credentials_file = paths.credentials_file();
        let mut credentials = CredentialStore::new(credentials_file.clone());
        credentials
            .load()
            .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

        let cache = if no_cache || !config.cache.enabled {
            ResponseCache::disabled(paths.response_cache_dir())
        } else {
            ResponseCache::new(paths.response_cache_dir(), config.cache.ttl_seconds)
        };
        let store = SavedContentStore::open(paths.saved_dir());

        Ok(Self {
            paths,
            config,
            output,
            credentials,
            cache,
            store,
        })
    }

    pub fn store(&self) -> &SavedContentStore<FileStorage> {
        &self.store
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn image_base_url(&self) -> &str {
        &self.config.catalog.image_base_url
    }

    /// Catalog client for the configured endpoint and language
    pub fn catalog(&self) -> Result<CatalogClient> {
        let api_key = self.credentials.resolve_tmdb_api_key().ok_or_else(|| {
            eyre!(
                "No catalog API key configured. Run `cinelista config set-api-key` or set {}",
                API_KEY_ENV
            )
        })?;

        Ok(CatalogClient::new(api_key)
            .with_base_url(&self.config.catalog.base_url)
            .with_language(&self.config.catalog.language))
    }

    /// Serve `key` from the response cache, or await `fetch` and remember its result.
    /// Failed fetches are never cached.
    pub async fn cached<T, F>(&self, key: &str, fetch: F) -> CatalogResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: Future<Output = CatalogResult<T>>,
    {
        let key = format!("{}/{}", self.config.catalog.language, key);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }

        let value = fetch.await?;
        if let Err(e) = self.cache.put(&key, &value) {
            warn!("Failed to cache response for {}: {}", key, e);
        }
        Ok(value)
    }

    pub async fn movie_details(&self, client: &CatalogClient, id: u64) -> CatalogResult<MovieDetails> {
        self.cached(&format!("movie/{}", id), client.movie_details(id)).await
    }

    pub async fn series_details(&self, client: &CatalogClient, id: u64) -> CatalogResult<TvShowDetails> {
        self.cached(&format!("tv/{}", id), client.series_details(id)).await
    }

    /// Snapshot to save for a title, projected from its (possibly cached) detail payload
    pub async fn snapshot(&self, client: &CatalogClient, kind: ContentKind, id: u64) -> CatalogResult<ContentSnapshot> {
        match kind {
            ContentKind::Movie => Ok(ContentSnapshot::from(&self.movie_details(client, id).await?)),
            ContentKind::Series => Ok(ContentSnapshot::from(&self.series_details(client, id).await?)),
        }
    }
}
