use super::{CaptureSession, SessionInput};
use crate::{
    capture::{crop_artifact, frame_size, save_button_rect},
    constants::{
        DEFAULT_CAPTURE_PADDING, DEFAULT_DWELL_FRAMES, DEFAULT_MIN_SEPARATION_PX, DEFAULT_MOTION_THRESHOLD_PX,
        DEFAULT_PREVIEW_SIZE, PROGRESS_RING_RADIUS, PROGRESS_RING_THICKNESS,
    },
    dwell::DwellTracker,
    landmarks::HandObservation,
    overlay::{Color, Overlay},
    save_gate::{ClickEvent, SaveGate},
    storage::CaptureStore,
    utils::{padded_pair_box, Point},
    Result,
};
use image::RgbImage;
use log::{debug, info};
use std::path::PathBuf;

/// Tuning for [`TwoPointSession`]
#[derive(Debug, Clone, PartialEq)]
pub struct TwoPointSettings {
    /// Tips closer than this draw no rectangle
    pub min_separation: f64,
    /// Added to each side of the tip box; negative shrinks it
    pub padding: i32,
    pub preview_size: u32,
    pub motion_threshold: f64,
    pub dwell_frames: u32,
}

impl Default for TwoPointSettings {
    fn default() -> Self {
        Self {
            min_separation: DEFAULT_MIN_SEPARATION_PX,
            padding: DEFAULT_CAPTURE_PADDING,
            preview_size: DEFAULT_PREVIEW_SIZE,
            motion_threshold: DEFAULT_MOTION_THRESHOLD_PX,
            dwell_frames: DEFAULT_DWELL_FRAMES,
        }
    }
}

/// Span a box between two index fingertips and hold both still to cut it out.
///
/// Both tips share one dwell counter: moving either restarts it, and
/// losing either hand resets it.
#[derive(Debug, Clone)]
pub struct TwoPointSession {
    settings: TwoPointSettings,
    tracker: DwellTracker,
    gate: SaveGate,
}

impl Default for TwoPointSession {
    fn default() -> Self {
        Self::new(TwoPointSettings::default())
    }
}

impl TwoPointSession {
    #[must_use]
    pub fn new(settings: TwoPointSettings) -> Self {
        let tracker = DwellTracker::new(settings.motion_threshold, settings.dwell_frames);
        Self {
            settings,
            tracker,
            gate: SaveGate::new(),
        }
    }

    #[must_use]
    pub const fn tracker(&self) -> &DwellTracker {
        &self.tracker
    }

    #[must_use]
    pub const fn settings(&self) -> &TwoPointSettings {
        &self.settings
    }

    /// Advance one frame with the hands detected in it
    pub fn update(&mut self, hands: &[HandObservation], frame: &RgbImage, overlay: &mut Overlay) {
        let tips: Vec<Point> = hands.iter().take(2).map(HandObservation::index_tip).collect();
        let &[a, b] = tips.as_slice() else {
            self.tracker.reset();
            return;
        };
        let (width, height) = frame_size(frame);

        if a.distance(b) >= self.settings.min_separation {
            let rect = padded_pair_box(a, b, self.settings.padding, width, height);
            overlay.rectangle(rect, Color::GREEN, 2);
        }

        let update = self.tracker.update(&tips);
        for tip in &tips {
            overlay.progress_ring(*tip, PROGRESS_RING_RADIUS, PROGRESS_RING_THICKNESS, update.progress);
        }

        if update.fired {
            self.capture(a, b, frame, width, height);
        }
    }

    fn capture(&mut self, a: Point, b: Point, frame: &RgbImage, width: i32, height: i32) {
        let region = padded_pair_box(a, b, self.settings.padding, width, height);
        match crop_artifact(frame, region, self.settings.preview_size) {
            Some(artifact) => {
                info!("Two-point capture between {:?} and {:?}", a, b);
                self.gate.arm(artifact, save_button_rect(width, height));
            }
            None => debug!("Two-point dwell gave an empty region {:?}", region),
        }
    }
}

impl CaptureSession for TwoPointSession {
    fn process_frame(&mut self, input: &SessionInput<'_>, overlay: &mut Overlay) {
        self.update(input.hands, input.frame, overlay);
    }

    fn handle_click(&mut self, click: ClickEvent, store: &dyn CaptureStore) -> Result<Option<PathBuf>> {
        let saved = self.gate.handle_click(click, store)?;
        if saved.is_some() {
            self.tracker.reset();
        }
        Ok(saved)
    }

    fn interrupt(&mut self) {
        self.tracker.reset();
    }

    fn render_preview(&self, overlay: &mut Overlay, frame_width: i32, frame_height: i32) {
        self.gate.render(overlay, frame_width, frame_height);
    }

    fn save_gate(&self) -> &SaveGate {
        &self.gate
    }

    fn name(&self) -> &str {
        "two-point"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{landmarks::Landmark, utils::BoundingBox};

    fn hand_at(x: f32, y: f32) -> HandObservation {
        let mut points = [Landmark::new(0.0, 0.0, 0.0); 21];
        points[8] = Landmark::new(x, y, 0.0);
        HandObservation::new(points)
    }

    fn session(dwell_frames: u32) -> TwoPointSession {
        TwoPointSession::new(TwoPointSettings {
            dwell_frames,
            ..TwoPointSettings::default()
        })
    }

    #[test]
    fn test_capture_shrinks_box_by_padding() {
        let frame = RgbImage::new(640, 480);
        let mut session = session(3);
        let hands = [hand_at(100.0, 100.0), hand_at(300.0, 200.0)];

        for _ in 0..3 {
            session.update(&hands, &frame, &mut Overlay::new());
        }

        let artifact = session.save_gate().artifact().unwrap();
        assert_eq!(artifact.region, BoundingBox::new(110, 110, 290, 190));
        assert_eq!(artifact.crop.dimensions(), (180, 80));
    }

    #[test]
    fn test_close_tips_draw_nothing_and_capture_nothing() {
        let frame = RgbImage::new(640, 480);
        let mut session = session(3);
        let hands = [hand_at(100.0, 100.0), hand_at(105.0, 100.0)];

        for _ in 0..10 {
            let mut overlay = Overlay::new();
            session.update(&hands, &frame, &mut overlay);
            assert_eq!(overlay.rectangles().count(), 0);
            assert_eq!(overlay.ring_progress().count(), 2);
        }
        assert!(!session.save_gate().is_pending());
    }

    #[test]
    fn test_single_hand_resets_progress() {
        let frame = RgbImage::new(640, 480);
        let mut session = session(100);
        let hands = [hand_at(100.0, 100.0), hand_at(300.0, 200.0)];

        for _ in 0..40 {
            session.update(&hands, &frame, &mut Overlay::new());
        }
        assert_eq!(session.tracker().counter().count(), 40);

        session.update(&hands[..1], &frame, &mut Overlay::new());
        assert_eq!(session.tracker().counter().count(), 0);
        assert!(session.tracker().last_positions().is_empty());
    }

    #[test]
    fn test_newer_capture_replaces_pending() {
        let frame = RgbImage::new(640, 480);
        let mut session = session(2);

        let first = [hand_at(100.0, 100.0), hand_at(300.0, 200.0)];
        session.update(&first, &frame, &mut Overlay::new());
        session.update(&first, &frame, &mut Overlay::new());

        let second = [hand_at(200.0, 100.0), hand_at(400.0, 300.0)];
        session.update(&second, &frame, &mut Overlay::new());
        session.update(&second, &frame, &mut Overlay::new());
        session.update(&second, &frame, &mut Overlay::new());

        let artifact = session.save_gate().artifact().unwrap();
        assert_eq!(artifact.region, BoundingBox::new(210, 110, 390, 290));
    }
}
