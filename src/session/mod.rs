//! Capture sessions turning fingertip motion into crops.
//!
//! Each session owns its dwell state and a [`SaveGate`]. The pipeline feeds
//! the active session one [`SessionInput`] per frame and forwards clicks to
//! every session, so a capture left pending in one mode stays clickable
//! after switching to the other.

/// Single-pointer drawing with an index finger
pub mod freehand;

/// Box spanned by the index fingertips of two hands
pub mod two_point;

use crate::{
    gesture::Gesture,
    landmarks::HandObservation,
    overlay::Overlay,
    save_gate::{ClickEvent, SaveGate},
    storage::CaptureStore,
    Result,
};
use image::RgbImage;
use std::path::PathBuf;

pub use freehand::{FreehandSession, FreehandSettings, FreehandState};
pub use two_point::{TwoPointSession, TwoPointSettings};

/// Everything a session sees of one frame
#[derive(Debug, Clone, Copy)]
pub struct SessionInput<'a> {
    /// Undecorated frame; crops are taken from here
    pub frame: &'a RgbImage,
    /// Detected hands, first hand first
    pub hands: &'a [HandObservation],
    /// Stabilized gesture of the first hand, if classified
    pub gesture: Option<Gesture>,
}

impl<'a> SessionInput<'a> {
    #[must_use]
    pub const fn new(frame: &'a RgbImage, hands: &'a [HandObservation], gesture: Option<Gesture>) -> Self {
        Self { frame, hands, gesture }
    }
}

/// Trait for capture sessions
pub trait CaptureSession {
    /// Advance one frame and append this frame's drawing to `overlay`
    fn process_frame(&mut self, input: &SessionInput<'_>, overlay: &mut Overlay);

    /// Offer a pointer event to the session's save button
    ///
    /// # Errors
    ///
    /// Returns the store error when writing the pending capture fails
    fn handle_click(&mut self, click: ClickEvent, store: &dyn CaptureStore) -> Result<Option<PathBuf>>;

    /// Drop dwell progress, e.g. when the session is switched away from
    fn interrupt(&mut self);

    /// Draw the preview slot and save button, if any
    fn render_preview(&self, overlay: &mut Overlay, frame_width: i32, frame_height: i32);

    /// Pending capture state
    fn save_gate(&self) -> &SaveGate;

    /// Session name for logs
    fn name(&self) -> &str;
}
