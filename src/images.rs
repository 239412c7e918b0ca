//! Image URL collection
//!
//! Picks one random image for the breed and one per sub-breed, naming each
//! file after its breed path and the basename of the source URL.

use crate::dog::DogApiService;
use crate::models::ImageUrls;
use crate::Result;
use tracing::{info, warn};

/// Last path segment of `url`, or the whole string when it has no `/`.
pub fn url_basename(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

pub fn image_file_name(breed: &str, sub_breed: Option<&str>, url: &str) -> String {
    match sub_breed {
        Some(sub) => format!("{}_{}_{}", breed, sub, url_basename(url)),
        None => format!("{}_{}", breed, url_basename(url)),
    }
}

/// Collect one image URL for `breed` and one for each of `sub_breeds`.
///
/// Requests the API rejects are skipped; the result is empty only when
/// every request was rejected.
pub async fn collect_image_urls(
    dog_api: &dyn DogApiService,
    breed: &str,
    sub_breeds: &[String],
) -> Result<ImageUrls> {
    let mut image_urls = ImageUrls::new();

    match dog_api.random_image(breed, None).await? {
        Some(url) => image_urls.insert(image_file_name(breed, None, &url), url),
        None => warn!("No image for breed '{}', skipping", breed),
    }

    for sub in sub_breeds {
        match dog_api.random_image(breed, Some(sub)).await? {
            Some(url) => image_urls.insert(image_file_name(breed, Some(sub), &url), url),
            None => warn!("No image for sub-breed '{}/{}', skipping", breed, sub),
        }
    }

    info!("Collected {} image URL(s) for '{}'", image_urls.len(), breed);
    Ok(image_urls)
}
