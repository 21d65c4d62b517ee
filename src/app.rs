//! Main application module for the hand gesture capture tool.

use crate::{
    config::{Config, Flip},
    error::{Error, Result},
    landmarks::LandmarkSource,
    pipeline::CapturePipeline,
    render::render_overlay,
    save_gate::ClickEvent,
    utils::image_conversion::bgr_mat_to_rgb,
};
use log::{debug, info, warn};
use opencv::{
    core::Mat,
    highgui::{self, EVENT_LBUTTONDOWN, WINDOW_NORMAL},
    prelude::*,
    videoio::{self, VideoCapture, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH},
};
use std::sync::{Arc, Mutex};

/// Video source type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// Webcam index
    Camera(i32),
    /// Stream URL or video file
    Url(String),
}

impl VideoSource {
    /// Source selected by the camera configuration
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        match &config.camera.url {
            Some(url) => Self::Url(url.clone()),
            None => Self::Camera(config.camera.device),
        }
    }

    /// Cameras are mirrored; streams are turned around on both axes
    #[must_use]
    pub const fn default_flip(&self) -> Flip {
        match self {
            Self::Camera(_) => Flip::Horizontal,
            Self::Url(_) => Flip::Both,
        }
    }
}

/// `OpenCV` flip code, `None` when the frame is left alone
#[must_use]
pub const fn flip_code(flip: Flip) -> Option<i32> {
    match flip {
        Flip::None => None,
        Flip::Horizontal => Some(1),
        Flip::Vertical => Some(0),
        Flip::Both => Some(-1),
    }
}

/// Main application struct
pub struct HandCaptureApp {
    config: Config,
    source: VideoSource,
    flip: Flip,
    video_capture: VideoCapture,
    landmarks: Box<dyn LandmarkSource>,
    pipeline: CapturePipeline,
    clicks: Arc<Mutex<Vec<ClickEvent>>>,
}

impl HandCaptureApp {
    /// Open the frame source and the display window
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be opened or the window cannot be created
    pub fn new(config: Config, mut landmarks: Box<dyn LandmarkSource>) -> Result<Self> {
        info!("Initializing Hand Gesture Capture application");

        let source = VideoSource::from_config(&config);
        let mut video_capture = match &source {
            VideoSource::Camera(index) => {
                info!("Opening camera {}", index);
                VideoCapture::new(*index, videoio::CAP_ANY)?
            }
            VideoSource::Url(url) => {
                info!("Opening stream: {}", url);
                VideoCapture::from_file(url, videoio::CAP_ANY)?
            }
        };
        if !video_capture.is_opened()? {
            return Err(Error::FrameSource(format!("Could not open {:?}", source)));
        }
        video_capture.set(CAP_PROP_FRAME_WIDTH, f64::from(config.camera.width))?;
        video_capture.set(CAP_PROP_FRAME_HEIGHT, f64::from(config.camera.height))?;

        let flip = config.camera.flip.unwrap_or_else(|| source.default_flip());
        debug!("Frame flip: {:?}", flip);

        let window = config.display.window_name.as_str();
        highgui::named_window(window, WINDOW_NORMAL)?;
        highgui::resize_window(window, config.display.window_width, config.display.window_height)?;

        let clicks = Arc::new(Mutex::new(Vec::new()));
        let queue = Arc::clone(&clicks);
        highgui::set_mouse_callback(
            window,
            Some(Box::new(move |event, x, y, _flags| {
                if event == EVENT_LBUTTONDOWN {
                    if let Ok(mut queue) = queue.lock() {
                        queue.push(ClickEvent::press(x, y));
                    }
                }
            })),
        )?;

        let pipeline = CapturePipeline::from_config(&config);
        landmarks.set_max_hands(pipeline.mode().max_hands());
        info!(
            "Landmarks from '{}', starting in {} mode",
            landmarks.name(),
            pipeline.mode()
        );

        Ok(Self {
            config,
            source,
            flip,
            video_capture,
            landmarks,
            pipeline,
            clicks,
        })
    }

    /// Run the main application loop until the source ends or the user quits
    ///
    /// # Errors
    ///
    /// Returns an error if `OpenCV` fails or the landmark source dies
    pub fn run(&mut self) -> Result<()> {
        info!("Entering main loop");

        loop {
            let mut frame = Mat::default();
            if !self.video_capture.read(&mut frame)? || frame.empty() {
                warn!("Failed to read frame from {:?}, stopping", self.source);
                break;
            }
            let mut display = self.apply_flip(frame)?;
            let raw = bgr_mat_to_rgb(&display)?;

            for click in self.drain_clicks() {
                for path in self.pipeline.handle_click(click) {
                    info!("Saved {}", path.display());
                }
            }

            let hands = match self.landmarks.detect(&raw) {
                Ok(hands) => hands,
                Err(Error::Json(e)) => {
                    warn!("Unreadable landmark response, skipping frame: {}", e);
                    Vec::new()
                }
                Err(e) => return Err(e),
            };

            let output = self.pipeline.process_frame(&raw, &hands);
            if output.mode_changed {
                self.landmarks.set_max_hands(output.mode.max_hands());
            }

            render_overlay(&mut display, &output.overlay)?;
            highgui::imshow(&self.config.display.window_name, &display)?;

            let key = highgui::wait_key(1)?;
            if key == 27 || key == i32::from(b'q') {
                info!("Exit requested by user");
                break;
            }
        }

        highgui::destroy_all_windows()?;
        info!("Application shutting down");
        Ok(())
    }

    fn apply_flip(&self, frame: Mat) -> Result<Mat> {
        let Some(code) = flip_code(self.flip) else {
            return Ok(frame);
        };
        let mut flipped = Mat::default();
        opencv::core::flip(&frame, &mut flipped, code)?;
        Ok(flipped)
    }

    fn drain_clicks(&self) -> Vec<ClickEvent> {
        match self.clicks.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => Vec::new(),
        }
    }
}
