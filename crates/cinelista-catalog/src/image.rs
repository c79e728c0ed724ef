use std::fmt;

pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Shown in place of artwork the catalog does not have
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Size tokens of the catalog image CDN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageSize {
    W185,
    W300,
    W500,
    W780,
    W1280,
    #[default]
    Original,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W185 => "w185",
            ImageSize::W300 => "w300",
            ImageSize::W500 => "w500",
            ImageSize::W780 => "w780",
            ImageSize::W1280 => "w1280",
            ImageSize::Original => "original",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full image URL for a catalog path, or the placeholder when there is no path
pub fn image_url(path: Option<&str>, size: &str) -> String {
    image_url_with_base(IMAGE_BASE_URL, path, size)
}

pub fn image_url_with_base(base: &str, path: Option<&str>, size: &str) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(path) => format!("{}/{}{}", base.trim_end_matches('/'), size, path),
        None => PLACEHOLDER_IMAGE.to_string(),
    }
}
