//! Reference thumbnails shown next to the recognized gesture.

use crate::{
    constants::{DEFAULT_GESTURE_THUMBNAIL_SIZE, GESTURE_THUMBNAIL_ORIGIN},
    gesture::{Gesture, GestureClassifier},
    overlay::Overlay,
    utils::Point,
    Error, Result,
};
use image::{imageops, imageops::FilterType, RgbImage};
use log::{info, warn};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

/// `<dir>/<label>.png`
#[must_use]
pub fn asset_path(directory: &Path, gesture: Gesture) -> PathBuf {
    directory.join(format!("{}.png", gesture.as_str()))
}

/// Gesture thumbnails, all resized to one square size
#[derive(Debug, Clone)]
pub struct GestureAssets {
    size: u32,
    thumbnails: HashMap<Gesture, Arc<RgbImage>>,
}

impl Default for GestureAssets {
    fn default() -> Self {
        Self::new(DEFAULT_GESTURE_THUMBNAIL_SIZE)
    }
}

impl GestureAssets {
    /// Empty set producing `size`×`size` thumbnails
    #[must_use]
    pub fn new(size: u32) -> Self {
        Self {
            size,
            thumbnails: HashMap::new(),
        }
    }

    /// Load a thumbnail for every gesture in `gestures` from `directory`.
    ///
    /// Missing or unreadable files are logged and skipped.
    pub fn load_dir<I>(directory: &Path, gestures: I, size: u32) -> Self
    where
        I: IntoIterator<Item = Gesture>,
    {
        let mut assets = Self::new(size);
        for gesture in gestures {
            let path = asset_path(directory, gesture);
            match load_image(&path) {
                Ok(image) => {
                    assets.insert(gesture, &image);
                    info!("Loaded reference image for '{}' from {}", gesture, path.display());
                }
                Err(e) => warn!("Gesture '{}' has no usable reference image: {}", gesture, e),
            }
        }
        assets
    }

    /// Resize `image` and store it for `gesture`
    pub fn insert(&mut self, gesture: Gesture, image: &RgbImage) {
        let thumbnail = imageops::resize(image, self.size, self.size, FilterType::Triangle);
        self.thumbnails.insert(gesture, Arc::new(thumbnail));
    }

    #[must_use]
    pub fn get(&self, gesture: Gesture) -> Option<&Arc<RgbImage>> {
        self.thumbnails.get(&gesture)
    }

    #[must_use]
    pub fn contains(&self, gesture: Gesture) -> bool {
        self.thumbnails.contains_key(&gesture)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.thumbnails.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.thumbnails.is_empty()
    }

    /// Drop classifier definitions that have no thumbnail
    #[must_use]
    pub fn gate(&self, classifier: GestureClassifier) -> GestureClassifier {
        classifier.retain(|gesture| self.contains(gesture))
    }

    /// Draw the thumbnail for `gesture`, if there is one
    pub fn draw(&self, overlay: &mut Overlay, gesture: Gesture) {
        if let Some(image) = self.get(gesture) {
            let (x, y) = GESTURE_THUMBNAIL_ORIGIN;
            overlay.image(Point::new(x, y), Arc::clone(image));
        }
    }
}

fn load_image(path: &Path) -> Result<RgbImage> {
    if !path.exists() {
        return Err(Error::Asset(format!("{} not found", path.display())));
    }
    let image = image::open(path).map_err(|e| Error::Asset(format!("{}: {e}", path.display())))?;
    Ok(image.to_rgb8())
}
