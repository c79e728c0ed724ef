use crate::error::{CatalogError, CatalogResult};
use crate::traits::CatalogApi;
use async_trait::async_trait;
use cinelista_models::{
    ContentKind, Credits, Genre, GenreList, Movie, MovieDetails, Page, SearchResult, Season,
    TvShow, TvShowDetails,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "es-MX";

/// Error body the catalog sends with non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    status_message: Option<String>,
}

/// HTTP client for a TMDB v3 compatible catalog.
///
/// Every request is a GET carrying `api_key` and `language` on the query string.
#[derive(Clone)]
pub struct CatalogClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
    language: String,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Arc::new(Client::new()),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// GET `path` and decode the body as `T`
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> CatalogResult<T> {
        if self.api_key.trim().is_empty() {
            return Err(CatalogError::InvalidRequest("no catalog API key configured".to_string()));
        }

        let url = format!("{}{}", self.base_url, path);
        let mut query: Vec<(&str, String)> = vec![
            ("api_key", self.api_key.clone()),
            ("language", self.language.clone()),
        ];
        query.extend(params.iter().cloned());

        debug!(endpoint = path, ?params, "Catalog request");

        let response = self.client.get(&url).query(&query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.status_message);
            debug!(endpoint = path, status = status.as_u16(), "Catalog request failed");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                endpoint: path.to_string(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|source| CatalogError::Decode {
            endpoint: path.to_string(),
            source,
        })
    }

    async fn fetch_page<T: DeserializeOwned>(&self, path: &str, page: u32, mut params: Vec<(&str, String)>) -> CatalogResult<Page<T>> {
        params.push(("page", page.max(1).to_string()));
        self.fetch(path, &params).await
    }

    async fn fetch_results<T: DeserializeOwned>(&self, path: &str) -> CatalogResult<Vec<T>> {
        let page: Page<T> = self.fetch(path, &[]).await?;
        Ok(page.results)
    }

    async fn trending<T: DeserializeOwned>(&self, kind: ContentKind) -> CatalogResult<Vec<T>> {
        self.fetch_results(&format!("/trending/{}/day", kind.as_path())).await
    }

    async fn popular<T: DeserializeOwned>(&self, kind: ContentKind, page: u32) -> CatalogResult<Page<T>> {
        self.fetch_page(&format!("/{}/popular", kind.as_path()), page, Vec::new()).await
    }

    async fn top_rated<T: DeserializeOwned>(&self, kind: ContentKind, page: u32) -> CatalogResult<Page<T>> {
        self.fetch_page(&format!("/{}/top_rated", kind.as_path()), page, Vec::new()).await
    }

    async fn discover<T: DeserializeOwned>(&self, kind: ContentKind, genre_id: u64, page: u32) -> CatalogResult<Page<T>> {
        self.fetch_page(
            &format!("/discover/{}", kind.as_path()),
            page,
            vec![("with_genres", genre_id.to_string())],
        )
        .await
    }

    async fn similar<T: DeserializeOwned>(&self, kind: ContentKind, id: u64) -> CatalogResult<Vec<T>> {
        self.fetch_results(&format!("/{}/{}/similar", kind.as_path(), id)).await
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn trending_movies(&self) -> CatalogResult<Vec<Movie>> {
        self.trending(ContentKind::Movie).await
    }

    async fn popular_movies(&self, page: u32) -> CatalogResult<Page<Movie>> {
        self.popular(ContentKind::Movie, page).await
    }

    async fn top_rated_movies(&self, page: u32) -> CatalogResult<Page<Movie>> {
        self.top_rated(ContentKind::Movie, page).await
    }

    async fn movies_by_genre(&self, genre_id: u64, page: u32) -> CatalogResult<Page<Movie>> {
        self.discover(ContentKind::Movie, genre_id, page).await
    }

    async fn movie_details(&self, id: u64) -> CatalogResult<MovieDetails> {
        self.fetch(&format!("/movie/{}", id), &[]).await
    }

    async fn similar_movies(&self, id: u64) -> CatalogResult<Vec<Movie>> {
        self.similar(ContentKind::Movie, id).await
    }

    async fn trending_series(&self) -> CatalogResult<Vec<TvShow>> {
        self.trending(ContentKind::Series).await
    }

    async fn popular_series(&self, page: u32) -> CatalogResult<Page<TvShow>> {
        self.popular(ContentKind::Series, page).await
    }

    async fn top_rated_series(&self, page: u32) -> CatalogResult<Page<TvShow>> {
        self.top_rated(ContentKind::Series, page).await
    }

    async fn series_by_genre(&self, genre_id: u64, page: u32) -> CatalogResult<Page<TvShow>> {
        self.discover(ContentKind::Series, genre_id, page).await
    }

    async fn series_details(&self, id: u64) -> CatalogResult<TvShowDetails> {
        self.fetch(&format!("/tv/{}", id), &[]).await
    }

    async fn similar_series(&self, id: u64) -> CatalogResult<Vec<TvShow>> {
        self.similar(ContentKind::Series, id).await
    }

    async fn season(&self, series_id: u64, season_number: u32) -> CatalogResult<Season> {
        self.fetch(&format!("/tv/{}/season/{}", series_id, season_number), &[]).await
    }

    async fn credits(&self, kind: ContentKind, id: u64) -> CatalogResult<Credits> {
        self.fetch(&format!("/{}/{}/credits", kind.as_path(), id), &[]).await
    }

    async fn genres(&self, kind: ContentKind) -> CatalogResult<Vec<Genre>> {
        let list: GenreList = self.fetch(&format!("/genre/{}/list", kind.as_path()), &[]).await?;
        Ok(list.genres)
    }

    async fn search_multi(&self, query: &str, page: u32) -> CatalogResult<Page<SearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(CatalogError::InvalidRequest("search query is empty".to_string()));
        }
        self.fetch_page("/search/multi", page, vec![("query", query.to_string())]).await
    }
}
