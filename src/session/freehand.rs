use super::{CaptureSession, SessionInput};
use crate::{
    capture::{crop_artifact, draw_preview, frame_size, save_button_rect},
    constants::{
        DEFAULT_DRAW_MARGIN, DEFAULT_DWELL_FRAMES, DEFAULT_MOTION_THRESHOLD_PX, DEFAULT_PREVIEW_SIZE,
        DEFAULT_TIP_OFFSET_X, DEFAULT_TIP_OFFSET_Y, PATH_ALPHA, PATH_THICKNESS, PROGRESS_RING_RADIUS,
        PROGRESS_RING_THICKNESS,
    },
    dwell::DwellTracker,
    gesture::Gesture,
    landmarks::HandObservation,
    overlay::{Color, Overlay},
    save_gate::{ClickEvent, SaveGate},
    storage::CaptureStore,
    utils::{path_crop_box, Point},
    Result,
};
use image::RgbImage;
use log::{debug, info};
use std::{path::PathBuf, sync::Arc};

/// Freehand session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreehandState {
    /// Not drawing
    Idle,
    /// Draw trigger held, path growing
    Drawing,
    /// A capture waits for the save button
    PendingSave,
}

/// Tuning for [`FreehandSession`]
#[derive(Debug, Clone, PartialEq)]
pub struct FreehandSettings {
    /// Gesture that draws
    pub draw_gesture: Gesture,
    /// Gesture that clears path and pending capture
    pub cancel_gesture: Gesture,
    /// Subtracted from the index fingertip to get the drawing point
    pub tip_offset: (i32, i32),
    /// Pixels added around the path extrema
    pub margin: i32,
    pub preview_size: u32,
    /// Show a thumbnail of the path crop while drawing
    pub live_preview: bool,
    pub motion_threshold: f64,
    pub dwell_frames: u32,
}

impl Default for FreehandSettings {
    fn default() -> Self {
        Self {
            draw_gesture: Gesture::One,
            cancel_gesture: Gesture::OkSign,
            tip_offset: (DEFAULT_TIP_OFFSET_X, DEFAULT_TIP_OFFSET_Y),
            margin: DEFAULT_DRAW_MARGIN,
            preview_size: DEFAULT_PREVIEW_SIZE,
            live_preview: true,
            motion_threshold: DEFAULT_MOTION_THRESHOLD_PX,
            dwell_frames: DEFAULT_DWELL_FRAMES,
        }
    }
}

/// Draw a path with one finger, hold still to cut it out.
///
/// `Idle -> Drawing -> PendingSave -> Idle`. Leaving the draw gesture only
/// pauses: the path stays on screen until it is cancelled, captured or
/// saved.
#[derive(Debug, Clone)]
pub struct FreehandSession {
    settings: FreehandSettings,
    state: FreehandState,
    tracker: DwellTracker,
    path: Vec<Point>,
    live_preview: Option<Arc<RgbImage>>,
    gate: SaveGate,
}

impl Default for FreehandSession {
    fn default() -> Self {
        Self::new(FreehandSettings::default())
    }
}

impl FreehandSession {
    #[must_use]
    pub fn new(settings: FreehandSettings) -> Self {
        let tracker = DwellTracker::new(settings.motion_threshold, settings.dwell_frames);
        Self {
            settings,
            state: FreehandState::Idle,
            tracker,
            path: Vec::new(),
            live_preview: None,
            gate: SaveGate::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> FreehandState {
        self.state
    }

    #[must_use]
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    #[must_use]
    pub const fn tracker(&self) -> &DwellTracker {
        &self.tracker
    }

    #[must_use]
    pub fn live_preview(&self) -> Option<&Arc<RgbImage>> {
        self.live_preview.as_ref()
    }

    #[must_use]
    pub const fn settings(&self) -> &FreehandSettings {
        &self.settings
    }

    /// Drawing point for a hand: index fingertip minus the tip offset
    #[must_use]
    pub fn drawing_point(&self, hand: &HandObservation) -> Point {
        let (dx, dy) = self.settings.tip_offset;
        hand.index_tip().offset(-dx, -dy)
    }

    /// Advance one frame for the first hand, if any
    pub fn update(
        &mut self,
        hand: Option<&HandObservation>,
        gesture: Option<Gesture>,
        frame: &RgbImage,
        overlay: &mut Overlay,
    ) {
        let (width, height) = frame_size(frame);

        let Some(hand) = hand else {
            self.tracker.reset();
            if self.state == FreehandState::Drawing {
                self.state = FreehandState::Idle;
            }
            return;
        };

        if self.state == FreehandState::PendingSave {
            if gesture == Some(self.settings.cancel_gesture) {
                self.cancel();
            }
            return;
        }

        match gesture {
            Some(g) if g == self.settings.draw_gesture => self.draw(hand, frame, overlay, width, height),
            Some(g) if g == self.settings.cancel_gesture => self.cancel(),
            _ => {
                self.tracker.reset();
                self.state = FreehandState::Idle;
                self.render_path(overlay, width, height);
            }
        }
    }

    fn draw(&mut self, hand: &HandObservation, frame: &RgbImage, overlay: &mut Overlay, width: i32, height: i32) {
        self.state = FreehandState::Drawing;
        let tip = self.drawing_point(hand);

        let update = self.tracker.update(&[tip]);
        overlay.progress_ring(tip, PROGRESS_RING_RADIUS, PROGRESS_RING_THICKNESS, update.progress);

        if update.fired {
            self.freeze(frame, width, height);
            if self.state == FreehandState::PendingSave {
                return;
            }
        } else if !self.tracker.counter().is_completed() {
            self.path.push(tip);
            if self.settings.live_preview {
                self.refresh_live_preview(frame, width, height);
            }
        }

        self.render_path(overlay, width, height);
    }

    /// Cut the current path out of the frame and wait for the save button
    fn freeze(&mut self, frame: &RgbImage, width: i32, height: i32) {
        let artifact = path_crop_box(&self.path, self.settings.margin, width, height)
            .and_then(|region| crop_artifact(frame, region, self.settings.preview_size));

        let Some(artifact) = artifact else {
            debug!("Freehand dwell over {} points gave an empty region", self.path.len());
            return;
        };

        info!("Freehand capture from {} path points", self.path.len());
        self.gate.arm(artifact, save_button_rect(width, height));
        self.path.clear();
        self.live_preview = None;
        self.state = FreehandState::PendingSave;
    }

    fn refresh_live_preview(&mut self, frame: &RgbImage, width: i32, height: i32) {
        self.live_preview = path_crop_box(&self.path, self.settings.margin, width, height)
            .and_then(|region| crop_artifact(frame, region, self.settings.preview_size))
            .map(|artifact| artifact.preview);
    }

    fn cancel(&mut self) {
        if self.gate.discard().is_some() {
            info!("Pending freehand capture discarded");
        }
        self.tracker.reset();
        self.path.clear();
        self.live_preview = None;
        self.state = FreehandState::Idle;
    }

    fn render_path(&self, overlay: &mut Overlay, width: i32, height: i32) {
        overlay.polyline(&self.path, Color::RED, PATH_THICKNESS, PATH_ALPHA);
        if let Some(rect) = path_crop_box(&self.path, self.settings.margin, width, height) {
            overlay.rectangle(rect, Color::GREEN, 2);
        }
    }
}

impl CaptureSession for FreehandSession {
    fn process_frame(&mut self, input: &SessionInput<'_>, overlay: &mut Overlay) {
        self.update(input.hands.first(), input.gesture, input.frame, overlay);
    }

    fn handle_click(&mut self, click: ClickEvent, store: &dyn CaptureStore) -> Result<Option<PathBuf>> {
        let saved = self.gate.handle_click(click, store)?;
        if saved.is_some() {
            self.tracker.reset();
            self.path.clear();
            self.live_preview = None;
            self.state = FreehandState::Idle;
        }
        Ok(saved)
    }

    fn interrupt(&mut self) {
        self.tracker.reset();
        if self.state == FreehandState::Drawing {
            self.state = FreehandState::Idle;
        }
    }

    fn render_preview(&self, overlay: &mut Overlay, frame_width: i32, frame_height: i32) {
        if self.gate.is_pending() {
            self.gate.render(overlay, frame_width, frame_height);
        } else if let Some(preview) = &self.live_preview {
            draw_preview(overlay, frame_width, frame_height, preview);
        }
    }

    fn save_gate(&self) -> &SaveGate {
        &self.gate
    }

    fn name(&self) -> &str {
        "freehand"
    }
}
