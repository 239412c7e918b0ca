//! dog.ceo image API integration
//!
//! Lists sub-breeds and picks random image URLs. Non-success statuses are
//! soft failures and surface as empty results rather than errors.

pub mod client;
pub mod mock;

pub use client::DogApiClient;
pub use mock::MockDogApiClient;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait DogApiService: Send + Sync {
    /// Sub-breed names for `breed`; empty when the API rejects the request.
    async fn list_sub_breeds(&self, breed: &str) -> Result<Vec<String>>;

    /// One random image URL for `breed` (or `breed`/`sub_breed`).
    ///
    /// Returns `Ok(None)` when the API answers with a non-200 status.
    async fn random_image(&self, breed: &str, sub_breed: Option<&str>) -> Result<Option<String>>;
}
