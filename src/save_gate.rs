//! Click-to-confirm saving of a pending capture.

use crate::{
    capture::{draw_preview, CaptureArtifact},
    overlay::{Color, Overlay},
    storage::CaptureStore,
    utils::{BoundingBox, Point},
    Result,
};
use log::{info, warn};
use std::path::PathBuf;

/// Pointer event kinds the gate distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    /// Primary button pressed
    Press,
    /// Anything else (release, move, other buttons)
    Other,
}

/// Pointer event in display coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    pub kind: ClickKind,
    pub x: i32,
    pub y: i32,
}

impl ClickEvent {
    #[must_use]
    pub const fn press(x: i32, y: i32) -> Self {
        Self {
            kind: ClickKind::Press,
            x,
            y,
        }
    }

    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A capture awaiting confirmation together with its save button.
///
/// Both halves live and die together.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCapture {
    pub artifact: CaptureArtifact,
    pub button: BoundingBox,
}

/// Holds at most one pending capture
#[derive(Debug, Clone, Default)]
pub struct SaveGate {
    pending: Option<PendingCapture>,
}

impl SaveGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `artifact` the pending capture, replacing any older one
    pub fn arm(&mut self, artifact: CaptureArtifact, button: BoundingBox) {
        if self.pending.is_some() {
            info!("Replacing pending capture");
        }
        info!(
            "Capture ready: {}x{} at ({}, {})",
            artifact.region.width(),
            artifact.region.height(),
            artifact.region.x_min,
            artifact.region.y_min
        );
        self.pending = Some(PendingCapture { artifact, button });
    }

    /// Drop the pending capture without saving
    pub fn discard(&mut self) -> Option<PendingCapture> {
        self.pending.take()
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Save button rectangle, only while something is pending
    #[must_use]
    pub fn button(&self) -> Option<BoundingBox> {
        self.pending.as_ref().map(|p| p.button)
    }

    #[must_use]
    pub fn artifact(&self) -> Option<&CaptureArtifact> {
        self.pending.as_ref().map(|p| &p.artifact)
    }

    /// Save the pending capture if `click` is a press on the save button.
    ///
    /// Returns the written path, or `None` when the click did not apply.
    ///
    /// # Errors
    ///
    /// Returns the store's error. The capture stays pending so the user can retry.
    pub fn handle_click(&mut self, click: ClickEvent, store: &dyn CaptureStore) -> Result<Option<PathBuf>> {
        if click.kind != ClickKind::Press {
            return Ok(None);
        }
        let Some(pending) = &self.pending else {
            return Ok(None);
        };
        if !pending.button.contains(click.position()) {
            return Ok(None);
        }

        match store.save(&pending.artifact.crop) {
            Ok(path) => {
                self.pending = None;
                Ok(Some(path))
            }
            Err(e) => {
                warn!("Saving capture failed, keeping it pending: {}", e);
                Err(e)
            }
        }
    }

    /// Draw the pending preview and its save button
    pub fn render(&self, overlay: &mut Overlay, frame_width: i32, frame_height: i32) {
        if let Some(pending) = &self.pending {
            draw_preview(overlay, frame_width, frame_height, &pending.artifact.preview);
            overlay.button(pending.button, Color::YELLOW, None, "Save");
        }
    }
}
