//! Data models and structures
//!
//! Defines the image mapping built from the dog.ceo API, the manifest
//! records written after uploading, and runtime configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_DOG_API_BASE_URL: &str = "https://dog.ceo/api";
pub const DEFAULT_DISK_API_BASE_URL: &str = "https://cloud-api.yandex.net/v1/disk/resources";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub file_name: String,
    pub source_url: String,
}

/// Filename to source URL mapping that iterates in insertion order.
///
/// Re-inserting a known filename replaces its URL but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageUrls {
    entries: Vec<ImageEntry>,
}

impl ImageUrls {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, file_name: String, source_url: String) {
        match self.entries.iter_mut().find(|e| e.file_name == file_name) {
            Some(existing) => existing.source_url = source_url,
            None => self.entries.push(ImageEntry {
                file_name,
                source_url,
            }),
        }
    }

    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.file_name == file_name)
            .map(|e| e.source_url.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageEntry> {
        self.entries.iter()
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.file_name.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a ImageUrls {
    type Item = &'a ImageEntry;
    type IntoIter = std::slice::Iter<'a, ImageEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestEntry {
    pub file_name: String,
}

impl ManifestEntry {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderStatus {
    Created,
    AlreadyExists,
}

// dog.ceo API response models
#[derive(Debug, Deserialize)]
pub struct SubBreedListResponse {
    #[serde(default)]
    pub message: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RandomImageResponse {
    pub message: String,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub dog_api_base_url: String,
    pub disk_api_base_url: String,
    pub http_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dog_api_base_url: DEFAULT_DOG_API_BASE_URL.to_string(),
            disk_api_base_url: DEFAULT_DISK_API_BASE_URL.to_string(),
            http_timeout: None,
        }
    }
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let http_timeout = match std::env::var("HTTP_TIMEOUT_SECS") {
            Ok(raw) => Some(parse_timeout_secs(&raw)?),
            Err(_) => None,
        };

        Ok(Self {
            dog_api_base_url: std::env::var("DOG_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_DOG_API_BASE_URL.to_string()),
            disk_api_base_url: std::env::var("DISK_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_DISK_API_BASE_URL.to_string()),
            http_timeout,
        })
    }
}

fn parse_timeout_secs(raw: &str) -> crate::Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(crate::Error::Config(format!(
            "HTTP_TIMEOUT_SECS must be a positive integer, got '{}'",
            raw
        ))),
    }
}
