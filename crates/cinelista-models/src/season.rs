use serde::{Deserialize, Serialize};
use crate::media::format_runtime;

/// Season entry as listed inside a series detail payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonSummary {
    pub id: u64,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    pub season_number: u32,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub episode_count: u32,
    #[serde(default)]
    pub air_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Season {
    pub id: u64,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    pub season_number: u32,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Episode {
    pub id: u64,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub overview: String,
    #[serde(default)]
    pub still_path: Option<String>,
    pub episode_number: u32,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub season_number: u32,
    #[serde(default)]
    pub air_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub vote_average: f64,
}

impl Episode {
    /// Runtime as `1h 5m`, `2h` or `45m`. Unknown or zero runtimes render as nothing.
    pub fn formatted_runtime(&self) -> Option<String> {
        self.runtime.and_then(format_runtime)
    }
}
