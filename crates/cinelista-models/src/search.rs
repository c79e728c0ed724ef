use serde::{Deserialize, Serialize};
use crate::media::{Movie, TvShow};
use crate::snapshot::ContentSnapshot;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: u64,
    #[serde(default, deserialize_with = "crate::media::null_as_default")]
    pub name: String,
    #[serde(default)]
    pub known_for_department: Option<String>,
}

/// One entry of a multi-search, discriminated by the catalog's `media_type`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "media_type")]
pub enum SearchResult {
    #[serde(rename = "movie")]
    Movie(Movie),
    #[serde(rename = "tv")]
    Series(TvShow),
    #[serde(rename = "person")]
    Person(Person),
    #[serde(other)]
    Other,
}

impl SearchResult {
    /// Movies and series only; people and unknown entries are not browsable titles
    pub fn into_content(self) -> Option<ContentSnapshot> {
        match self {
            SearchResult::Movie(movie) => Some(ContentSnapshot::Movie(movie)),
            SearchResult::Series(show) => Some(ContentSnapshot::Series(show)),
            SearchResult::Person(_) | SearchResult::Other => None,
        }
    }
}
