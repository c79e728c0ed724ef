use serde::{Deserialize, Serialize};
use crate::media::{format_runtime, Genre, Movie, TvShow};
use crate::season::SeasonSummary;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub id: u64,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Credits {
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductionCompany {
    pub id: u64,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Creator {
    pub id: u64,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub name: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: u64,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub overview: String,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub tagline: String,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub budget: u64,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub revenue: u64,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub production_companies: Vec<ProductionCompany>,
}

impl MovieDetails {
    /// Project the detail payload down to the summary shape used in lists
    pub fn summary(&self) -> Movie {
        Movie {
            id: self.id,
            title: self.title.clone(),
            poster_path: self.poster_path.clone(),
            backdrop_path: self.backdrop_path.clone(),
            overview: self.overview.clone(),
            release_date: self.release_date.clone(),
            vote_average: self.vote_average,
            genre_ids: self.genres.iter().map(|g| g.id).collect(),
        }
    }

    pub fn formatted_runtime(&self) -> Option<String> {
        self.runtime.and_then(format_runtime)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TvShowDetails {
    pub id: u64,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub name: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub overview: String,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub first_air_date: String,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub vote_average: f64,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub genres: Vec<Genre>,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub number_of_seasons: u32,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub number_of_episodes: u32,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub tagline: String,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub created_by: Vec<Creator>,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub seasons: Vec<SeasonSummary>,
}

impl TvShowDetails {
    pub fn summary(&self) -> TvShow {
        TvShow {
            id: self.id,
            name: self.name.clone(),
            poster_path: self.poster_path.clone(),
            backdrop_path: self.backdrop_path.clone(),
            overview: self.overview.clone(),
            first_air_date: self.first_air_date.clone(),
            vote_average: self.vote_average,
            genre_ids: self.genres.iter().map(|g| g.id).collect(),
        }
    }

    /// Numbered seasons in ascending order. Season 0 holds specials and is hidden.
    pub fn regular_seasons(&self) -> Vec<&SeasonSummary> {
        let mut seasons: Vec<&SeasonSummary> = self
            .seasons
            .iter()
            .filter(|s| s.season_number > 0)
            .collect();
        seasons.sort_by_key(|s| s.season_number);
        seasons
    }
}
