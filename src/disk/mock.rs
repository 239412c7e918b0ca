use super::DiskService;
use crate::models::FolderStatus;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUpload {
    pub file_name: String,
    pub source_url: String,
    pub folder: String,
}

#[derive(Clone, Default)]
pub struct MockDiskClient {
    folders: Arc<Mutex<HashSet<String>>>,
    uploads: Arc<Mutex<Vec<RemoteUpload>>>,
    folder_call_count: Arc<Mutex<usize>>,
    folder_error: Option<String>,
    failing_upload: Option<(String, String)>,
}

impl MockDiskClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_folder(self, folder: &str) -> Self {
        self.folders.lock().unwrap().insert(folder.to_string());
        self
    }

    /// Every folder creation fails with `body` as the backend response.
    pub fn with_folder_error(mut self, body: &str) -> Self {
        self.folder_error = Some(body.to_string());
        self
    }

    /// Uploading `file_name` fails with `body` as the backend response.
    pub fn with_upload_error(mut self, file_name: &str, body: &str) -> Self {
        self.failing_upload = Some((file_name.to_string(), body.to_string()));
        self
    }

    pub fn get_folder_call_count(&self) -> usize {
        *self.folder_call_count.lock().unwrap()
    }

    pub fn get_folders(&self) -> HashSet<String> {
        self.folders.lock().unwrap().clone()
    }

    /// Upload requests in the order they were issued, failed ones included.
    pub fn get_uploads(&self) -> Vec<RemoteUpload> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl DiskService for MockDiskClient {
    async fn create_folder(&self, folder: &str) -> Result<FolderStatus> {
        *self.folder_call_count.lock().unwrap() += 1;

        if let Some(body) = &self.folder_error {
            return Err(Error::Storage(format!("Failed to create folder: {}", body)));
        }

        if self.folders.lock().unwrap().insert(folder.to_string()) {
            Ok(FolderStatus::Created)
        } else {
            Ok(FolderStatus::AlreadyExists)
        }
    }

    async fn upload_from_url(
        &self,
        file_name: &str,
        source_url: &str,
        folder: &str,
    ) -> Result<()> {
        self.uploads.lock().unwrap().push(RemoteUpload {
            file_name: file_name.to_string(),
            source_url: source_url.to_string(),
            folder: folder.to_string(),
        });

        match &self.failing_upload {
            Some((failing, body)) if failing == file_name => Err(Error::Storage(format!(
                "Failed to upload file {}: {}",
                file_name, body
            ))),
            _ => Ok(()),
        }
    }
}
