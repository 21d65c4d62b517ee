//! Constants used throughout the application

/// Number of landmarks in one hand observation
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Number of fingers per hand
pub const NUM_FINGERS: usize = 5;

/// Landmark indices used directly by the capture logic
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_FINGER_TIP: usize = 8;

/// Normalized landmark coordinates may overshoot the frame by at most this
/// much on either side before the whole hand is rejected
pub const MAX_LANDMARK_OVERSHOOT: f32 = 1.0;

/// A finger counts as extended when both bends are below this angle (degrees)
pub const DEFAULT_BEND_THRESHOLD_DEG: f64 = 30.0;

/// Thumb-tip to index-tip distance (pixels) below which the "ok" pinch matches
pub const DEFAULT_OK_PINCH_DISTANCE_PX: f64 = 30.0;

/// Gesture majority-vote window length (frames)
pub const DEFAULT_HISTORY_LENGTH: usize = 5;

/// Displacement (pixels) at or above which a tracked point counts as moving
pub const DEFAULT_MOTION_THRESHOLD_PX: f64 = 10.0;

/// Stationary frames needed to complete a capture dwell
pub const DEFAULT_DWELL_FRAMES: u32 = 100;

/// Hover frames needed to activate a mode button
pub const DEFAULT_MODE_HOVER_FRAMES: u32 = 30;

/// Fingertip correction applied in freehand drawing (pixels)
pub const DEFAULT_TIP_OFFSET_X: i32 = 20;
pub const DEFAULT_TIP_OFFSET_Y: i32 = 20;

/// Margin added around the freehand path bounding box (pixels)
pub const DEFAULT_DRAW_MARGIN: i32 = 10;

/// Minimum fingertip separation for the two-point rectangle (pixels)
pub const DEFAULT_MIN_SEPARATION_PX: f64 = 30.0;

/// Padding applied to the two-point box; negative shrinks it
pub const DEFAULT_CAPTURE_PADDING: i32 = -10;

/// Preview thumbnail edge length (pixels)
pub const DEFAULT_PREVIEW_SIZE: u32 = 200;

/// Gesture reference thumbnail edge length (pixels)
pub const DEFAULT_GESTURE_THUMBNAIL_SIZE: u32 = 200;

/// Save button geometry, anchored to the bottom-right corner
pub const SAVE_BUTTON_WIDTH: i32 = 200;
pub const SAVE_BUTTON_HEIGHT: i32 = 40;
pub const SAVE_BUTTON_RIGHT_INSET: i32 = 220;
pub const SAVE_BUTTON_BOTTOM_INSET: i32 = 35;

/// Preview placement insets from the bottom-right corner
pub const PREVIEW_RIGHT_INSET: i32 = 20;
pub const PREVIEW_BOTTOM_INSET: i32 = 45;

/// Progress ring geometry
pub const PROGRESS_RING_RADIUS: i32 = 20;
pub const PROGRESS_RING_THICKNESS: i32 = 5;

/// Freehand path stroke
pub const PATH_THICKNESS: i32 = 5;
pub const PATH_ALPHA: f32 = 0.7;

/// Where the gesture reference thumbnail and label are drawn
pub const GESTURE_THUMBNAIL_ORIGIN: (i32, i32) = (50, 100);
pub const GESTURE_LABEL_ORIGIN: (i32, i32) = (30, 60);

/// Mode button layout factors
pub const MODE_BUTTON_SIZE_FACTOR: f64 = 0.075;
pub const MODE_BUTTON_SPACING_FACTOR: f64 = 1.5;

/// Default capture directory and file prefix
pub const DEFAULT_CAPTURE_DIR: &str = "captures";
pub const DEFAULT_CAPTURE_PREFIX: &str = "hand";

/// Default gesture reference image directory
pub const DEFAULT_ASSET_DIR: &str = "hand_images";

