//! Persisting captures as timestamped PNG files.

use crate::{
    constants::{DEFAULT_CAPTURE_DIR, DEFAULT_CAPTURE_PREFIX},
    Error, Result,
};
use chrono::{Local, NaiveDateTime};
use image::{ImageFormat, RgbImage};
use log::info;
use std::path::{Path, PathBuf};

/// Somewhere captures can be written
pub trait CaptureStore {
    /// Persist one crop and return where it went
    ///
    /// # Errors
    ///
    /// Returns an error if the crop could not be written; nothing is assumed saved
    fn save(&self, image: &RgbImage) -> Result<PathBuf>;
}

/// Writes `<prefix>_<YYYYMMDD_HHMMSS>.png` files into one directory
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    directory: PathBuf,
    prefix: String,
}

impl Default for DirectoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPTURE_DIR, DEFAULT_CAPTURE_PREFIX)
    }
}

impl DirectoryStore {
    pub fn new<P: AsRef<Path>>(directory: P, prefix: &str) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            prefix: prefix.to_string(),
        }
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// First free file name for `timestamp`. Adds `_1`, `_2`, ... when taken.
    #[must_use]
    pub fn file_path_for(&self, timestamp: NaiveDateTime) -> PathBuf {
        let stem = format!("{}_{}", self.prefix, timestamp.format("%Y%m%d_%H%M%S"));
        let mut path = self.directory.join(format!("{stem}.png"));
        let mut suffix = 1;
        while path.exists() {
            path = self.directory.join(format!("{stem}_{suffix}.png"));
            suffix += 1;
        }
        path
    }

    /// Save as if the current time were `timestamp`
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the directory cannot be created or the file cannot be written
    pub fn save_at(&self, image: &RgbImage, timestamp: NaiveDateTime) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.directory).map_err(|e| {
            Error::Storage(format!("Failed to create {}: {e}", self.directory.display()))
        })?;

        let path = self.file_path_for(timestamp);
        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| Error::Storage(format!("Failed to write {}: {e}", path.display())))?;

        info!("Capture saved to {}", path.display());
        Ok(path)
    }
}

impl CaptureStore for DirectoryStore {
    fn save(&self, image: &RgbImage) -> Result<PathBuf> {
        self.save_at(image, Local::now().naive_local())
    }
}
