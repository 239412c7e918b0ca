use super::DiskService;
use crate::models::FolderStatus;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{error, info};

/// Authorization headers for the disk API: `Authorization: OAuth <token>`.
pub fn auth_headers(token: &str) -> Result<HeaderMap> {
    let mut value = HeaderValue::from_str(&format!("OAuth {}", token))?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

pub struct DiskClient {
    client: Client,
    base_url: String,
    token: String,
}

impl DiskClient {
    pub fn new(base_url: String, token: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::new_with_client(base_url, token, builder.build()?))
    }

    pub fn new_with_client(base_url: String, token: String, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }
}

#[async_trait]
impl DiskService for DiskClient {
    async fn create_folder(&self, folder: &str) -> Result<FolderStatus> {
        let response = self
            .client
            .put(&self.base_url)
            .headers(auth_headers(&self.token)?)
            .query(&[("path", folder)])
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => {
                info!("Created folder '{}'", folder);
                Ok(FolderStatus::Created)
            }
            StatusCode::CONFLICT => {
                info!("Folder '{}' already exists", folder);
                Ok(FolderStatus::AlreadyExists)
            }
            status => {
                let body = response.text().await?;
                error!("Folder creation failed (status {}): {}", status, body);
                Err(Error::Storage(format!("Failed to create folder: {}", body)))
            }
        }
    }

    async fn upload_from_url(
        &self,
        file_name: &str,
        source_url: &str,
        folder: &str,
    ) -> Result<()> {
        let url = format!("{}/upload", self.base_url);
        let destination = format!("{}/{}", folder, file_name);

        let response = self
            .client
            .post(&url)
            .headers(auth_headers(&self.token)?)
            .query(&[
                ("url", source_url),
                ("path", destination.as_str()),
                ("disable_redirects", "true"),
            ])
            .send()
            .await?;

        if response.status() != StatusCode::ACCEPTED {
            let status = response.status();
            let body = response.text().await?;
            error!("Upload of {} failed (status {}): {}", file_name, status, body);
            return Err(Error::Storage(format!(
                "Failed to upload file {}: {}",
                file_name, body
            )));
        }

        Ok(())
    }
}
