use serde::{Deserialize, Serialize};

/// Paginated list envelope returned by list, discover and search endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

fn first_page() -> u32 {
    1
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page: self.page,
            results: self.results.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_results: self.total_results,
        }
    }
}

/// Envelope of `/genre/{kind}/list`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<crate::media::Genre>,
}
