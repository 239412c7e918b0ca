//! Application orchestration for backing up a breed's images.

use crate::disk::{DiskClient, DiskService};
use crate::dog::{DogApiClient, DogApiService};
use crate::images::collect_image_urls;
use crate::manifest::write_manifest;
use crate::models::{Config, FolderStatus, ManifestEntry};
use crate::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{error, info};

/// Drives one backup run: collect image URLs, provision the folder,
/// request the uploads and write the manifest.
pub struct App {
    dog_api: Box<dyn DogApiService>,
    disk: Box<dyn DiskService>,
    manifest_path: PathBuf,
    show_progress: bool,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub dog_api: Box<dyn DogApiService>,
    pub disk: Box<dyn DiskService>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No image URL could be collected; nothing was sent to the disk.
    NoImages,
    Completed {
        uploaded: Vec<ManifestEntry>,
        manifest_path: PathBuf,
    },
}

/// Remote folder for `breed`: first letter upper-cased, the rest lower-cased.
pub fn folder_name_for(breed: &str) -> String {
    let mut chars = breed.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

impl App {
    /// Build an app from concrete service dependencies.
    ///
    /// Progress output is off; see [`App::with_progress`].
    pub fn with_services(services: AppServices, manifest_path: PathBuf) -> Self {
        Self {
            dog_api: services.dog_api,
            disk: services.disk,
            manifest_path,
            show_progress: false,
        }
    }

    /// Construct an app talking to the real APIs configured in `config`.
    pub fn new(config: &Config, token: String, manifest_path: PathBuf) -> Result<Self> {
        info!("Dog API: {}", config.dog_api_base_url);
        info!("Disk API: {}", config.disk_api_base_url);

        let dog_api = DogApiClient::new(config.dog_api_base_url.clone(), config.http_timeout)?;
        let disk = DiskClient::new(
            config.disk_api_base_url.clone(),
            token,
            config.http_timeout,
        )?;

        Ok(Self::with_services(
            AppServices {
                dog_api: Box::new(dog_api),
                disk: Box::new(disk),
            },
            manifest_path,
        ))
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub async fn run(&self, breed: &str) -> Result<RunOutcome> {
        info!("Fetching breed information for '{}'", breed);
        let sub_breeds = self.dog_api.list_sub_breeds(breed).await?;
        info!("Found {} sub-breed(s)", sub_breeds.len());

        let image_urls = collect_image_urls(&*self.dog_api, breed, &sub_breeds).await?;
        if image_urls.is_empty() {
            info!("No images found for '{}'", breed);
            return Ok(RunOutcome::NoImages);
        }

        let folder = folder_name_for(breed);
        info!("Creating folder '{}'", folder);
        match self.disk.create_folder(&folder).await? {
            FolderStatus::Created => {}
            FolderStatus::AlreadyExists => info!("Reusing existing folder '{}'", folder),
        }

        let progress = self.progress_bar(image_urls.len() as u64);
        let mut uploaded = Vec::with_capacity(image_urls.len());

        for entry in &image_urls {
            if let Err(e) = self
                .disk
                .upload_from_url(&entry.file_name, &entry.source_url, &folder)
                .await
            {
                progress.abandon();
                error!("Stopping after failed upload of {}", entry.file_name);
                return Err(e);
            }
            // Log lines would otherwise be drawn over the bar.
            progress.suspend(|| {
                info!("Requested upload of {} into '{}'", entry.file_name, folder)
            });
            uploaded.push(ManifestEntry::new(entry.file_name.as_str()));
            progress.inc(1);
        }
        progress.finish();

        write_manifest(&self.manifest_path, &uploaded)?;

        Ok(RunOutcome::Completed {
            uploaded,
            manifest_path: self.manifest_path.clone(),
        })
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len}") {
            bar.set_style(style);
        }
        bar.set_message("Uploading files");
        bar
    }
}

#[cfg(test)]
mod tests {
    use super::{folder_name_for, App, AppServices, RunOutcome};
    use crate::disk::{MockDiskClient, RemoteUpload};
    use crate::dog::MockDogApiClient;
    use crate::models::ManifestEntry;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    const AKITA_URL: &str = "https://images.dog.ceo/breeds/akita/Akita_Inu_dog.jpg";

    fn build_test_app(
        manifest_path: PathBuf,
        dog_api: MockDogApiClient,
        disk: MockDiskClient,
    ) -> App {
        App::with_services(
            AppServices {
                dog_api: Box::new(dog_api),
                disk: Box::new(disk),
            },
            manifest_path,
        )
    }

    fn read_manifest(path: &Path) -> Vec<ManifestEntry> {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_folder_name_for() {
        assert_eq!(folder_name_for("akita"), "Akita");
        assert_eq!(folder_name_for("germanShepherd"), "Germanshepherd");
        assert_eq!(folder_name_for(""), "");
    }

    #[tokio::test]
    async fn test_run_single_breed_end_to_end() {
        let dir = tempdir().unwrap();
        let manifest_path = dir.path().join("result.json");
        let dog_api = MockDogApiClient::new().with_image("akita", None, AKITA_URL);
        let disk = MockDiskClient::new();
        let disk_probe = disk.clone();

        let app = build_test_app(manifest_path.clone(), dog_api.clone(), disk);
        let outcome = app.run("akita").await.unwrap();

        let expected = vec![ManifestEntry::new("akita_Akita_Inu_dog.jpg")];
        assert_eq!(
            outcome,
            RunOutcome::Completed {
                uploaded: expected.clone(),
                manifest_path: manifest_path.clone(),
            }
        );
        assert_eq!(dog_api.get_call_count(), 2);
        assert!(disk_probe.get_folders().contains("Akita"));
        assert_eq!(
            disk_probe.get_uploads(),
            vec![RemoteUpload {
                file_name: "akita_Akita_Inu_dog.jpg".to_string(),
                source_url: AKITA_URL.to_string(),
                folder: "Akita".to_string(),
            }]
        );
        assert_eq!(read_manifest(&manifest_path), expected);
    }

    #[test]
    fn test_progress_bar_only_when_enabled() {
        let dir = tempdir().unwrap();
        let app = build_test_app(
            dir.path().join("result.json"),
            MockDogApiClient::new(),
            MockDiskClient::new(),
        );
        assert!(app.progress_bar(3).is_hidden());

        let app = app.with_progress(true);
        assert_eq!(app.progress_bar(3).length(), Some(3));
    }

    #[tokio::test]
    async fn test_run_with_progress_enabled_uploads_everything() {
        let dir = tempdir().unwrap();
        let manifest_path = dir.path().join("result.json");
        let dog_api = MockDogApiClient::new()
            .with_sub_breeds("hound", &["afghan"])
            .with_image("hound", None, "https://img/hound/0.jpg")
            .with_image("hound", Some("afghan"), "https://img/hound-afghan/1.jpg");
        let disk = MockDiskClient::new();
        let disk_probe = disk.clone();

        let app = build_test_app(manifest_path.clone(), dog_api, disk).with_progress(true);
        app.run("hound").await.unwrap();

        assert_eq!(disk_probe.get_uploads().len(), 2);
        assert_eq!(read_manifest(&manifest_path).len(), 2);
    }

    #[tokio::test]
    async fn test_run_without_images_touches_nothing() {
        let dir = tempdir().unwrap();
        let manifest_path = dir.path().join("result.json");
        let disk = MockDiskClient::new();
        let disk_probe = disk.clone();

        let app = build_test_app(
            manifest_path.clone(),
            MockDogApiClient::new().with_sub_breeds("hound", &["afghan"]),
            disk,
        );

        assert_eq!(app.run("hound").await.unwrap(), RunOutcome::NoImages);
        assert_eq!(disk_probe.get_folder_call_count(), 0);
        assert!(disk_probe.get_uploads().is_empty());
        assert!(!manifest_path.exists());
    }

    #[tokio::test]
    async fn test_run_manifest_follows_upload_order() {
        let dir = tempdir().unwrap();
        let manifest_path = dir.path().join("result.json");
        let dog_api = MockDogApiClient::new()
            .with_sub_breeds("hound", &["afghan", "basset"])
            .with_image("hound", None, "https://img/hound/0.jpg")
            .with_image("hound", Some("afghan"), "https://img/hound-afghan/1.jpg")
            .with_image("hound", Some("basset"), "https://img/hound-basset/2.jpg");
        let disk = MockDiskClient::new();
        let disk_probe = disk.clone();

        let app = build_test_app(manifest_path.clone(), dog_api, disk);
        app.run("hound").await.unwrap();

        let requested: Vec<String> = disk_probe
            .get_uploads()
            .into_iter()
            .map(|u| u.file_name)
            .collect();
        let written: Vec<String> = read_manifest(&manifest_path)
            .into_iter()
            .map(|e| e.file_name)
            .collect();

        assert_eq!(
            requested,
            vec!["hound_0.jpg", "hound_afghan_1.jpg", "hound_basset_2.jpg"]
        );
        assert_eq!(written, requested);
    }

    #[tokio::test]
    async fn test_run_reuses_existing_folder() {
        let dir = tempdir().unwrap();
        let manifest_path = dir.path().join("result.json");
        let disk = MockDiskClient::new().with_folder("Akita");
        let disk_probe = disk.clone();

        let app = build_test_app(
            manifest_path.clone(),
            MockDogApiClient::new().with_image("akita", None, AKITA_URL),
            disk,
        );

        assert!(matches!(
            app.run("akita").await.unwrap(),
            RunOutcome::Completed { .. }
        ));
        assert_eq!(disk_probe.get_folder_call_count(), 1);
        assert_eq!(disk_probe.get_uploads().len(), 1);
    }

    #[tokio::test]
    async fn test_run_folder_failure_writes_no_manifest() {
        let dir = tempdir().unwrap();
        let manifest_path = dir.path().join("result.json");
        let disk = MockDiskClient::new().with_folder_error("Internal Server Error");
        let disk_probe = disk.clone();

        let app = build_test_app(
            manifest_path.clone(),
            MockDogApiClient::new().with_image("akita", None, AKITA_URL),
            disk,
        );

        let err = app.run("akita").await.unwrap_err();
        assert!(err.to_string().contains("Internal Server Error"));
        assert!(disk_probe.get_uploads().is_empty());
        assert!(!manifest_path.exists());
    }

    #[tokio::test]
    async fn test_run_stops_at_first_failed_upload() {
        let dir = tempdir().unwrap();
        let manifest_path = dir.path().join("result.json");
        let dog_api = MockDogApiClient::new()
            .with_sub_breeds("hound", &["afghan", "basset"])
            .with_image("hound", None, "https://img/hound/0.jpg")
            .with_image("hound", Some("afghan"), "https://img/hound-afghan/1.jpg")
            .with_image("hound", Some("basset"), "https://img/hound-basset/2.jpg");
        let disk = MockDiskClient::new().with_upload_error("hound_afghan_1.jpg", "TooManyRequests");
        let disk_probe = disk.clone();

        let app = build_test_app(manifest_path.clone(), dog_api, disk);
        let err = app.run("hound").await.unwrap_err();

        assert!(err.to_string().contains("hound_afghan_1.jpg"));
        assert_eq!(disk_probe.get_uploads().len(), 2);
        assert!(!manifest_path.exists());
    }
}
