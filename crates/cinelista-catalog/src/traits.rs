use crate::error::CatalogResult;
use async_trait::async_trait;
use cinelista_models::{
    ContentKind, ContentSnapshot, Credits, Genre, Movie, MovieDetails, Page, SearchResult, Season,
    TvShow, TvShowDetails,
};

/// Read-only queries against the movie/TV catalog.
///
/// Every call is one HTTP round trip: no retry, no caching. Callers decide how
/// long a result stays fresh.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    // Movies
    async fn trending_movies(&self) -> CatalogResult<Vec<Movie>>;
    async fn popular_movies(&self, page: u32) -> CatalogResult<Page<Movie>>;
    async fn top_rated_movies(&self, page: u32) -> CatalogResult<Page<Movie>>;
    async fn movies_by_genre(&self, genre_id: u64, page: u32) -> CatalogResult<Page<Movie>>;
    async fn movie_details(&self, id: u64) -> CatalogResult<MovieDetails>;
    async fn similar_movies(&self, id: u64) -> CatalogResult<Vec<Movie>>;

    // Series
    async fn trending_series(&self) -> CatalogResult<Vec<TvShow>>;
    async fn popular_series(&self, page: u32) -> CatalogResult<Page<TvShow>>;
    async fn top_rated_series(&self, page: u32) -> CatalogResult<Page<TvShow>>;
    async fn series_by_genre(&self, genre_id: u64, page: u32) -> CatalogResult<Page<TvShow>>;
    async fn series_details(&self, id: u64) -> CatalogResult<TvShowDetails>;
    async fn similar_series(&self, id: u64) -> CatalogResult<Vec<TvShow>>;
    async fn season(&self, series_id: u64, season_number: u32) -> CatalogResult<Season>;

    // Either kind
    async fn credits(&self, kind: ContentKind, id: u64) -> CatalogResult<Credits>;
    async fn genres(&self, kind: ContentKind) -> CatalogResult<Vec<Genre>>;
    async fn search_multi(&self, query: &str, page: u32) -> CatalogResult<Page<SearchResult>>;

    /// Current catalog metadata for a title, in the shape stored by saved lists
    async fn snapshot(&self, kind: ContentKind, id: u64) -> CatalogResult<ContentSnapshot> {
        match kind {
            ContentKind::Movie => Ok(ContentSnapshot::from(&self.movie_details(id).await?)),
            ContentKind::Series => Ok(ContentSnapshot::from(&self.series_details(id).await?)),
        }
    }
}
