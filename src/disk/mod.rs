//! Cloud disk integration for server-side uploads
//!
//! Talks to the Yandex Disk REST resources API: creates the destination
//! folder and asks the backend to fetch each image URL into it.

pub mod client;
pub mod mock;

pub use client::{auth_headers, DiskClient};
pub use mock::{MockDiskClient, RemoteUpload};

use crate::models::FolderStatus;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait DiskService: Send + Sync {
    /// Ensure `folder` exists. Creating it and finding it already present
    /// are both successes.
    async fn create_folder(&self, folder: &str) -> Result<FolderStatus>;

    /// Ask the backend to download `source_url` into `{folder}/{file_name}`.
    ///
    /// Returns once the request is accepted; the remote fetch itself may
    /// still be running or fail later.
    async fn upload_from_url(&self, file_name: &str, source_url: &str, folder: &str)
        -> Result<()>;
}
