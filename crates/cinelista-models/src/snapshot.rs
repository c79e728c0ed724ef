use serde::Serialize;
use crate::details::{MovieDetails, TvShowDetails};
use crate::media::{ContentKind, Movie, TvShow};

/// Catalog metadata captured for a title, tagged by kind.
///
/// Serializes as the bare catalog object; the kind travels next to it (see
/// [`crate::ContentReference`]) rather than inside it.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ContentSnapshot {
    Movie(Movie),
    Series(TvShow),
}

impl ContentSnapshot {
    pub fn id(&self) -> u64 {
        match self {
            ContentSnapshot::Movie(movie) => movie.id,
            ContentSnapshot::Series(show) => show.id,
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            ContentSnapshot::Movie(_) => ContentKind::Movie,
            ContentSnapshot::Series(_) => ContentKind::Series,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ContentSnapshot::Movie(movie) => &movie.title,
            ContentSnapshot::Series(show) => &show.name,
        }
    }

    pub fn year(&self) -> Option<i32> {
        match self {
            ContentSnapshot::Movie(movie) => movie.release_year(),
            ContentSnapshot::Series(show) => show.first_air_year(),
        }
    }

    pub fn poster_path(&self) -> Option<&str> {
        match self {
            ContentSnapshot::Movie(movie) => movie.poster_path.as_deref(),
            ContentSnapshot::Series(show) => show.poster_path.as_deref(),
        }
    }

    pub fn vote_average(&self) -> f64 {
        match self {
            ContentSnapshot::Movie(movie) => movie.vote_average,
            ContentSnapshot::Series(show) => show.vote_average,
        }
    }

    /// Decode a stored catalog object whose shape is given by `kind`
    pub fn from_value(kind: ContentKind, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        match kind {
            ContentKind::Movie => serde_json::from_value(value).map(ContentSnapshot::Movie),
            ContentKind::Series => serde_json::from_value(value).map(ContentSnapshot::Series),
        }
    }
}

impl From<Movie> for ContentSnapshot {
    fn from(movie: Movie) -> Self {
        ContentSnapshot::Movie(movie)
    }
}

impl From<TvShow> for ContentSnapshot {
    fn from(show: TvShow) -> Self {
        ContentSnapshot::Series(show)
    }
}

impl From<&MovieDetails> for ContentSnapshot {
    fn from(details: &MovieDetails) -> Self {
        ContentSnapshot::Movie(details.summary())
    }
}

impl From<&TvShowDetails> for ContentSnapshot {
    fn from(details: &TvShowDetails) -> Self {
        ContentSnapshot::Series(details.summary())
    }
}
