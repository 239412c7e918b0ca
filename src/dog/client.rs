use super::DogApiService;
use crate::models::{RandomImageResponse, SubBreedListResponse};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

pub struct DogApiClient {
    client: Client,
    base_url: String,
}

impl DogApiClient {
    pub fn new(base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::new_with_client(base_url, builder.build()?))
    }

    pub fn new_with_client(base_url: String, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET `path` and decode the body, or `None` on any status other than 200.
    async fn get_json<Resp: DeserializeOwned>(&self, path: &str) -> Result<Option<Resp>> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Failed to send request to dog API: {}", e);
            e
        })?;

        if response.status() != StatusCode::OK {
            warn!("Dog API returned status {} for {}", response.status(), path);
            return Ok(None);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map(Some).map_err(|e| {
            tracing::error!("Failed to parse dog API response: {}\nBody: {}", e, body);
            Error::DogApi(format!("Failed to parse response from {}: {}", path, e))
        })
    }
}

#[async_trait]
impl DogApiService for DogApiClient {
    async fn list_sub_breeds(&self, breed: &str) -> Result<Vec<String>> {
        let path = format!("/breed/{}/list", breed);
        Ok(self
            .get_json::<SubBreedListResponse>(&path)
            .await?
            .map(|r| r.message)
            .unwrap_or_default())
    }

    async fn random_image(&self, breed: &str, sub_breed: Option<&str>) -> Result<Option<String>> {
        let path = match sub_breed {
            Some(sub) => format!("/breed/{}/{}/images/random", breed, sub),
            None => format!("/breed/{}/images/random", breed),
        };
        Ok(self
            .get_json::<RandomImageResponse>(&path)
            .await?
            .map(|r| r.message))
    }
}
