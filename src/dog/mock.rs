use super::DogApiService;
use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory dog API. Unknown breeds list no sub-breeds and unknown
/// (breed, sub-breed) pairs behave like a failed image request.
#[derive(Clone, Default)]
pub struct MockDogApiClient {
    sub_breeds: Arc<Mutex<HashMap<String, Vec<String>>>>,
    images: Arc<Mutex<HashMap<(String, Option<String>), String>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockDogApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sub_breeds(self, breed: &str, subs: &[&str]) -> Self {
        self.sub_breeds.lock().unwrap().insert(
            breed.to_string(),
            subs.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn with_image(self, breed: &str, sub_breed: Option<&str>, url: &str) -> Self {
        self.images.lock().unwrap().insert(
            (breed.to_string(), sub_breed.map(str::to_string)),
            url.to_string(),
        );
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Request paths in the order they were issued.
    pub fn get_requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DogApiService for MockDogApiClient {
    async fn list_sub_breeds(&self, breed: &str) -> Result<Vec<String>> {
        self.requests
            .lock()
            .unwrap()
            .push(format!("/breed/{}/list", breed));

        Ok(self
            .sub_breeds
            .lock()
            .unwrap()
            .get(breed)
            .cloned()
            .unwrap_or_default())
    }

    async fn random_image(&self, breed: &str, sub_breed: Option<&str>) -> Result<Option<String>> {
        let path = match sub_breed {
            Some(sub) => format!("/breed/{}/{}/images/random", breed, sub),
            None => format!("/breed/{}/images/random", breed),
        };
        self.requests.lock().unwrap().push(path);

        Ok(self
            .images
            .lock()
            .unwrap()
            .get(&(breed.to_string(), sub_breed.map(str::to_string)))
            .cloned())
    }
}
