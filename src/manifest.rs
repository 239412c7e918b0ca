//! Manifest of requested uploads
//!
//! Written once at the end of a successful run, replacing any previous file.

use crate::models::ManifestEntry;
use crate::Result;
use std::fs;
use std::path::Path;
use tracing::info;

pub const DEFAULT_MANIFEST_PATH: &str = "result.json";

/// Write `entries` to `path` as a pretty-printed JSON array.
pub fn write_manifest(path: &Path, entries: &[ManifestEntry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)?;
    fs::write(path, json)?;
    info!(
        "Saved manifest with {} entr{} to {}",
        entries.len(),
        if entries.len() == 1 { "y" } else { "ies" },
        path.display()
    );
    Ok(())
}
