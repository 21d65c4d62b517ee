//! Per-frame orchestration of gestures, mode switching and capture sessions.

use crate::{
    assets::GestureAssets,
    capture::frame_size,
    config::Config,
    constants::GESTURE_LABEL_ORIGIN,
    gesture::{default_definitions, Gesture, GestureClassifier},
    landmarks::HandObservation,
    mode_switch::{CaptureMode, ModeSwitch},
    overlay::{Color, Overlay, TextStyle},
    save_gate::ClickEvent,
    session::{CaptureSession, FreehandSession, SessionInput, TwoPointSession},
    stabilizer::GestureStabilizer,
    storage::{CaptureStore, DirectoryStore},
    utils::Point,
};
use image::RgbImage;
use log::{debug, info, warn};
use std::path::PathBuf;

/// Result of processing one frame
#[derive(Debug, Clone)]
pub struct FrameOutput {
    /// Drawing for the display copy of the frame
    pub overlay: Overlay,
    /// Stabilized gesture, freehand mode only
    pub gesture: Option<Gesture>,
    /// Mode active after this frame
    pub mode: CaptureMode,
    /// The mode switched on this frame
    pub mode_changed: bool,
}

/// Owns every per-frame component and runs them in order
pub struct CapturePipeline {
    classifier: GestureClassifier,
    stabilizer: GestureStabilizer,
    assets: GestureAssets,
    mode_switch: ModeSwitch,
    freehand: FreehandSession,
    two_point: TwoPointSession,
    store: Box<dyn CaptureStore>,
}

impl CapturePipeline {
    /// Pipeline with default components writing to `store`
    #[must_use]
    pub fn new(store: Box<dyn CaptureStore>) -> Self {
        let config = Config::default();
        Self {
            classifier: GestureClassifier::default(),
            stabilizer: GestureStabilizer::new(config.gestures.history_length),
            assets: GestureAssets::new(config.gestures.thumbnail_size),
            mode_switch: ModeSwitch::default(),
            freehand: FreehandSession::new(config.freehand_settings()),
            two_point: TwoPointSession::new(config.two_point_settings()),
            store,
        }
    }

    /// Build everything from configuration, loading reference images from disk
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let gestures = &config.gestures;
        let classifier = GestureClassifier::new(
            default_definitions(gestures.ok_pinch_distance),
            gestures.bend_threshold_deg,
        );
        let assets = GestureAssets::load_dir(&gestures.asset_dir, classifier.gestures(), gestures.thumbnail_size);
        let classifier = if gestures.require_assets {
            assets.gate(classifier)
        } else {
            classifier
        };
        info!(
            "Gesture registry: [{}]",
            classifier.gestures().map(|g| g.as_str()).collect::<Vec<_>>().join(", ")
        );

        let store = DirectoryStore::new(&config.capture.directory, &config.capture.prefix);

        Self::new(Box::new(store))
            .with_classifier(classifier, assets)
            .with_history_length(gestures.history_length)
            .with_mode_switch(ModeSwitch::new(config.capture.initial_mode, config.dwell.mode_hover_frames))
            .with_sessions(
                FreehandSession::new(config.freehand_settings()),
                TwoPointSession::new(config.two_point_settings()),
            )
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: GestureClassifier, assets: GestureAssets) -> Self {
        self.classifier = classifier;
        self.assets = assets;
        self
    }

    #[must_use]
    pub fn with_history_length(mut self, history_length: usize) -> Self {
        self.stabilizer = GestureStabilizer::new(history_length);
        self
    }

    #[must_use]
    pub fn with_mode_switch(mut self, mode_switch: ModeSwitch) -> Self {
        self.mode_switch = mode_switch;
        self
    }

    #[must_use]
    pub fn with_sessions(mut self, freehand: FreehandSession, two_point: TwoPointSession) -> Self {
        self.freehand = freehand;
        self.two_point = two_point;
        self
    }

    #[must_use]
    pub const fn mode(&self) -> CaptureMode {
        self.mode_switch.active()
    }

    #[must_use]
    pub const fn freehand(&self) -> &FreehandSession {
        &self.freehand
    }

    #[must_use]
    pub const fn two_point(&self) -> &TwoPointSession {
        &self.two_point
    }

    #[must_use]
    pub const fn stabilizer(&self) -> &GestureStabilizer {
        &self.stabilizer
    }

    #[must_use]
    pub const fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    /// Process one frame. `frame` must be the undecorated camera image.
    pub fn process_frame(&mut self, frame: &RgbImage, hands: &[HandObservation]) -> FrameOutput {
        let (width, height) = frame_size(frame);
        let mut overlay = Overlay::new();

        let pointer = hands.first().map(HandObservation::index_tip);
        let changed = self.mode_switch.update(pointer, width, height);
        if let Some(mode) = changed {
            self.leave_mode(mode);
        }
        self.mode_switch.render(&mut overlay, width, height);

        let mode = self.mode_switch.active();
        let gesture = match mode {
            CaptureMode::Freehand => self.run_freehand(frame, hands, &mut overlay),
            CaptureMode::TwoPoint => {
                self.two_point
                    .process_frame(&SessionInput::new(frame, hands, None), &mut overlay);
                None
            }
        };

        self.active_session().render_preview(&mut overlay, width, height);

        FrameOutput {
            overlay,
            gesture,
            mode,
            mode_changed: changed.is_some(),
        }
    }

    fn run_freehand(&mut self, frame: &RgbImage, hands: &[HandObservation], overlay: &mut Overlay) -> Option<Gesture> {
        let gesture = match hands.first() {
            Some(hand) => {
                let detected = self.classifier.classify(hand);
                debug!("Detected gestures: {:?}", detected);
                self.stabilizer.push(detected)
            }
            None => {
                self.stabilizer.clear();
                None
            }
        };

        if let Some(gesture) = gesture {
            self.assets.draw(overlay, gesture);
        }
        self.freehand
            .process_frame(&SessionInput::new(frame, hands, gesture), overlay);

        let label = gesture.map_or("None", |g| g.as_str());
        let (x, y) = GESTURE_LABEL_ORIGIN;
        overlay.text(format!("Gesture: {label}"), Point::new(x, y), Color::GREEN, TextStyle::Heading);

        gesture
    }

    /// Reset dwell state of the session that was just left
    fn leave_mode(&mut self, entered: CaptureMode) {
        match entered {
            CaptureMode::Freehand => self.two_point.interrupt(),
            CaptureMode::TwoPoint => {
                self.freehand.interrupt();
                self.stabilizer.clear();
            }
        }
    }

    fn active_session(&self) -> &dyn CaptureSession {
        match self.mode_switch.active() {
            CaptureMode::Freehand => &self.freehand,
            CaptureMode::TwoPoint => &self.two_point,
        }
    }

    /// Deliver a pointer event to both sessions. Returns the files written.
    ///
    /// Save failures are logged and leave the capture pending.
    pub fn handle_click(&mut self, click: ClickEvent) -> Vec<PathBuf> {
        let store = self.store.as_ref();
        let sessions: [&mut dyn CaptureSession; 2] = [&mut self.freehand, &mut self.two_point];

        let mut saved = Vec::new();
        for session in sessions {
            match session.handle_click(click, store) {
                Ok(Some(path)) => saved.push(path),
                Ok(None) => {}
                Err(e) => warn!("Failed to save {} capture: {}", session.name(), e),
            }
        }
        saved
    }
}
