//! Configuration management for the hand gesture capture tool

use crate::{
    constants::{
        DEFAULT_ASSET_DIR, DEFAULT_BEND_THRESHOLD_DEG, DEFAULT_CAPTURE_DIR, DEFAULT_CAPTURE_PADDING,
        DEFAULT_CAPTURE_PREFIX, DEFAULT_DRAW_MARGIN, DEFAULT_DWELL_FRAMES, DEFAULT_GESTURE_THUMBNAIL_SIZE,
        DEFAULT_HISTORY_LENGTH, DEFAULT_MIN_SEPARATION_PX, DEFAULT_MODE_HOVER_FRAMES, DEFAULT_MOTION_THRESHOLD_PX,
        DEFAULT_OK_PINCH_DISTANCE_PX, DEFAULT_PREVIEW_SIZE, DEFAULT_TIP_OFFSET_X, DEFAULT_TIP_OFFSET_Y,
    },
    mode_switch::CaptureMode,
    session::{FreehandSettings, TwoPointSettings},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Frame source
    pub camera: CameraConfig,

    /// Landmark helper process
    pub landmarks: LandmarkConfig,

    /// Gesture classification
    pub gestures: GestureConfig,

    /// Dwell and hover thresholds
    pub dwell: DwellConfig,

    /// Freehand capture mode
    pub freehand: FreehandConfig,

    /// Two-point capture mode
    pub two_point: TwoPointConfig,

    /// Capture output
    pub capture: CaptureConfig,

    /// Display window
    pub display: DisplayConfig,
}

/// How frames are flipped before processing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flip {
    None,
    Horizontal,
    Vertical,
    Both,
}

/// Frame source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera device index
    pub device: i32,

    /// Stream URL or video file; used instead of the camera when set
    pub url: Option<String>,

    /// Requested frame width
    pub width: u32,

    /// Requested frame height
    pub height: u32,

    /// Override the source's default flip (mirror for cameras, both axes for URLs)
    pub flip: Option<Flip>,
}

/// Landmark helper process configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandmarkConfig {
    /// Program to run
    pub program: String,

    /// Arguments passed to the program
    pub args: Vec<String>,

    /// Hands scored below this are ignored (0.0-1.0)
    pub confidence_threshold: f32,
}

/// Gesture classification configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Bend angle below which a finger counts as extended (degrees)
    pub bend_threshold_deg: f64,

    /// Thumb-index distance for the "ok" pinch (pixels)
    pub ok_pinch_distance: f64,

    /// Majority vote window (frames)
    pub history_length: usize,

    /// Directory holding `<label>.png` reference images
    pub asset_dir: PathBuf,

    /// Edge length of the reference thumbnail
    pub thumbnail_size: u32,

    /// Disable gestures whose reference image is missing
    pub require_assets: bool,
}

/// Dwell configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DwellConfig {
    /// Displacement that counts as motion (pixels)
    pub motion_threshold: f64,

    /// Stationary frames that complete a capture
    pub dwell_frames: u32,

    /// Hover frames that activate a mode button
    pub mode_hover_frames: u32,
}

/// Freehand mode configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FreehandConfig {
    /// Horizontal fingertip correction (pixels, subtracted)
    pub tip_offset_x: i32,

    /// Vertical fingertip correction (pixels, subtracted)
    pub tip_offset_y: i32,

    /// Margin around the drawn path (pixels)
    pub margin: i32,

    /// Show the path crop while drawing
    pub live_preview: bool,
}

/// Two-point mode configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwoPointConfig {
    /// Minimum fingertip distance to draw the rectangle (pixels)
    pub min_separation: f64,

    /// Added to each side of the capture box; negative shrinks it
    pub padding: i32,
}

/// Capture output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Directory saved captures go to
    pub directory: PathBuf,

    /// File name prefix
    pub prefix: String,

    /// Preview thumbnail edge length
    pub preview_size: u32,

    /// Mode active at start-up
    pub initial_mode: CaptureMode,
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Window title
    pub window_name: String,

    /// Window width
    pub window_width: i32,

    /// Window height
    pub window_height: i32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: 0,
            url: None,
            width: 1280,
            height: 768,
            flip: None,
        }
    }
}

impl Default for LandmarkConfig {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
            args: vec!["scripts/hand_landmarks.py".to_string()],
            confidence_threshold: 0.8,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            bend_threshold_deg: DEFAULT_BEND_THRESHOLD_DEG,
            ok_pinch_distance: DEFAULT_OK_PINCH_DISTANCE_PX,
            history_length: DEFAULT_HISTORY_LENGTH,
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
            thumbnail_size: DEFAULT_GESTURE_THUMBNAIL_SIZE,
            require_assets: true,
        }
    }
}

impl Default for DwellConfig {
    fn default() -> Self {
        Self {
            motion_threshold: DEFAULT_MOTION_THRESHOLD_PX,
            dwell_frames: DEFAULT_DWELL_FRAMES,
            mode_hover_frames: DEFAULT_MODE_HOVER_FRAMES,
        }
    }
}

impl Default for FreehandConfig {
    fn default() -> Self {
        Self {
            tip_offset_x: DEFAULT_TIP_OFFSET_X,
            tip_offset_y: DEFAULT_TIP_OFFSET_Y,
            margin: DEFAULT_DRAW_MARGIN,
            live_preview: true,
        }
    }
}

impl Default for TwoPointConfig {
    fn default() -> Self {
        Self {
            min_separation: DEFAULT_MIN_SEPARATION_PX,
            padding: DEFAULT_CAPTURE_PADDING,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_CAPTURE_DIR),
            prefix: DEFAULT_CAPTURE_PREFIX.to_string(),
            preview_size: DEFAULT_PREVIEW_SIZE,
            initial_mode: CaptureMode::Freehand,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window_name: "Hand Gesture Capture".to_string(),
            window_width: 1280,
            window_height: 720,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_yaml()?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Serialize to YAML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Settings for the freehand session
    #[must_use]
    pub fn freehand_settings(&self) -> FreehandSettings {
        FreehandSettings {
            tip_offset: (self.freehand.tip_offset_x, self.freehand.tip_offset_y),
            margin: self.freehand.margin,
            preview_size: self.capture.preview_size,
            live_preview: self.freehand.live_preview,
            motion_threshold: self.dwell.motion_threshold,
            dwell_frames: self.dwell.dwell_frames,
            ..FreehandSettings::default()
        }
    }

    /// Settings for the two-point session
    #[must_use]
    pub fn two_point_settings(&self) -> TwoPointSettings {
        TwoPointSettings {
            min_separation: self.two_point.min_separation,
            padding: self.two_point.padding,
            preview_size: self.capture.preview_size,
            motion_threshold: self.dwell.motion_threshold,
            dwell_frames: self.dwell.dwell_frames,
        }
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` naming the first invalid value
    pub fn validate(&self) -> Result<()> {
        // Validate frame source
        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(Error::ConfigError("Camera frame size must be greater than 0".to_string()));
        }
        if self.landmarks.program.trim().is_empty() {
            return Err(Error::ConfigError("Landmark program must not be empty".to_string()));
        }
        if !(0.0..=1.0).contains(&self.landmarks.confidence_threshold) {
            return Err(Error::ConfigError(
                "Confidence threshold must be between 0.0 and 1.0".to_string(),
            ));
        }

        // Validate gesture parameters
        if !(self.gestures.bend_threshold_deg > 0.0 && self.gestures.bend_threshold_deg < 180.0) {
            return Err(Error::ConfigError(
                "Bend threshold must be between 0 and 180 degrees".to_string(),
            ));
        }
        if self.gestures.ok_pinch_distance <= 0.0 {
            return Err(Error::ConfigError("Pinch distance must be greater than 0".to_string()));
        }
        if self.gestures.history_length == 0 {
            return Err(Error::ConfigError("Gesture history length must be greater than 0".to_string()));
        }
        if self.gestures.thumbnail_size == 0 {
            return Err(Error::ConfigError("Thumbnail size must be greater than 0".to_string()));
        }

        // Validate dwell thresholds
        if self.dwell.motion_threshold <= 0.0 {
            return Err(Error::ConfigError("Motion threshold must be greater than 0".to_string()));
        }
        if self.dwell.dwell_frames == 0 {
            return Err(Error::ConfigError("Dwell frames must be greater than 0".to_string()));
        }
        if self.dwell.mode_hover_frames == 0 {
            return Err(Error::ConfigError("Mode hover frames must be greater than 0".to_string()));
        }

        // Validate capture geometry
        if self.freehand.margin < 0 {
            return Err(Error::ConfigError("Freehand margin must not be negative".to_string()));
        }
        if self.two_point.min_separation < 0.0 {
            return Err(Error::ConfigError("Minimum separation must not be negative".to_string()));
        }
        if self.capture.preview_size == 0 {
            return Err(Error::ConfigError("Preview size must be greater than 0".to_string()));
        }
        if self.capture.prefix.is_empty() {
            return Err(Error::ConfigError("Capture prefix must not be empty".to_string()));
        }

        // Validate display settings
        if self.display.window_width <= 0 || self.display.window_height <= 0 {
            return Err(Error::ConfigError("Window size must be greater than 0".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Hand Gesture Capture Configuration

# Frame source
camera:
  device: 0
  # url: "http://192.168.1.10:8080/video"
  width: 1280
  height: 768
  # flip: horizontal

# Landmark helper; prints READY, then one JSON line per frame
landmarks:
  program: "python3"
  args: ["scripts/hand_landmarks.py"]
  confidence_threshold: 0.8

# Gesture classification
gestures:
  bend_threshold_deg: 30.0
  ok_pinch_distance: 30.0
  history_length: 5
  asset_dir: "hand_images"
  thumbnail_size: 200
  require_assets: true

# Dwell detection
dwell:
  motion_threshold: 10.0
  dwell_frames: 100
  mode_hover_frames: 30

# Freehand mode (option1)
freehand:
  tip_offset_x: 20
  tip_offset_y: 20
  margin: 10
  live_preview: true

# Two-point mode (option2)
two_point:
  min_separation: 30.0
  padding: -10

# Capture output
capture:
  directory: "captures"
  prefix: "hand"
  preview_size: 200
  initial_mode: freehand

# Display window
display:
  window_name: "Hand Gesture Capture"
  window_width: 1280
  window_height: 720
"#;
