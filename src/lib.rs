//! Backs up dog breed photos to a cloud disk
//!
//! Collects one random image per breed and sub-breed from the dog.ceo API,
//! asks the disk backend to fetch each image into a per-breed folder, and
//! writes a JSON manifest of the requested uploads.

pub mod app;
pub mod disk;
pub mod dog;
pub mod error;
pub mod images;
pub mod manifest;
pub mod models;

pub use error::{Error, Result};
