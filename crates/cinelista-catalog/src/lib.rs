pub mod client;
pub mod error;
pub mod image;
pub mod traits;

pub use client::{CatalogClient, DEFAULT_BASE_URL, DEFAULT_LANGUAGE};
pub use error::{CatalogError, CatalogResult};
pub use image::{image_url, image_url_with_base, ImageSize, IMAGE_BASE_URL, PLACEHOLDER_IMAGE};
pub use traits::CatalogApi;
