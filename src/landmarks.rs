//! Hand landmark types and the landmark source seam.
//!
//! Landmark extraction itself is an external capability. The capture core
//! only sees [`HandObservation`]s; anything that can produce them from a
//! frame implements [`LandmarkSource`].
//!
//! [`SubprocessLandmarkSource`] talks to a helper process (typically a
//! MediaPipe hand landmarker script) over stdin/stdout:
//!
//! - the helper prints `READY` once it has loaded its model,
//! - per frame the host writes a little-endian header
//!   `width:u32, height:u32, channels:u32, max_hands:u32` and then the raw
//!   RGB bytes,
//! - the helper answers with one JSON line:
//!   `{"hands":[{"handedness":"Left","score":0.9,"landmarks":[{"x":0.5,"y":0.4,"z":0.0}, ...]}]}`
//!   with coordinates normalized to the frame size.

use crate::{
    constants::{INDEX_FINGER_TIP, MAX_LANDMARK_OVERSHOOT, NUM_HAND_LANDMARKS, THUMB_TIP},
    utils::{safe_cast::landmark_to_pixel, Point},
    Error, Result,
};
use image::RgbImage;
use log::{debug, info, warn};
use serde::Deserialize;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// A single hand keypoint. `x`/`y` are pixels, `z` is relative depth.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    /// Create a new landmark
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Component-wise difference `self - other` as a 3D vector
    #[must_use]
    pub fn sub(self, other: Self) -> [f64; 3] {
        [
            f64::from(self.x) - f64::from(other.x),
            f64::from(self.y) - f64::from(other.y),
            f64::from(self.z) - f64::from(other.z),
        ]
    }

    /// Planar distance, ignoring depth
    #[must_use]
    pub fn distance_2d(self, other: Self) -> f64 {
        (f64::from(self.x) - f64::from(other.x)).hypot(f64::from(self.y) - f64::from(other.y))
    }

    /// Truncated pixel position
    #[must_use]
    pub fn to_pixel(self) -> Point {
        Point::new(landmark_to_pixel(self.x), landmark_to_pixel(self.y))
    }
}

/// Which hand the detector believes it saw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Handedness {
    Left,
    Right,
    #[default]
    Unknown,
}

impl Handedness {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "left" => Self::Left,
            "right" => Self::Right,
            _ => Self::Unknown,
        }
    }
}

/// All 21 landmarks of one hand in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HandObservation {
    landmarks: [Landmark; NUM_HAND_LANDMARKS],
    /// Detector's handedness guess
    pub handedness: Handedness,
    /// Detection confidence (0.0-1.0)
    pub score: f32,
}

impl HandObservation {
    /// Create an observation from a full landmark array
    #[must_use]
    pub const fn new(landmarks: [Landmark; NUM_HAND_LANDMARKS]) -> Self {
        Self {
            landmarks,
            handedness: Handedness::Unknown,
            score: 1.0,
        }
    }

    /// Create an observation from a list that must hold exactly 21 points
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the list has any other length
    pub fn from_points(points: &[Landmark]) -> Result<Self> {
        let landmarks: [Landmark; NUM_HAND_LANDMARKS] = points.try_into().map_err(|_| {
            Error::InvalidInput(format!(
                "Expected {NUM_HAND_LANDMARKS} hand landmarks, got {}",
                points.len()
            ))
        })?;
        Ok(Self::new(landmarks))
    }

    /// Attach detector metadata
    #[must_use]
    pub const fn with_metadata(mut self, handedness: Handedness, score: f32) -> Self {
        self.handedness = handedness;
        self.score = score;
        self
    }

    #[must_use]
    pub const fn landmarks(&self) -> &[Landmark; NUM_HAND_LANDMARKS] {
        &self.landmarks
    }

    /// Landmark by index, `None` past the last one
    #[must_use]
    pub fn landmark(&self, index: usize) -> Option<Landmark> {
        self.landmarks.get(index).copied()
    }

    /// Index fingertip in pixels
    #[must_use]
    pub fn index_tip(&self) -> Point {
        self.landmarks[INDEX_FINGER_TIP].to_pixel()
    }

    /// Thumb tip in pixels
    #[must_use]
    pub fn thumb_tip(&self) -> Point {
        self.landmarks[THUMB_TIP].to_pixel()
    }
}

/// Anything that can find hands in a frame
pub trait LandmarkSource {
    /// Detect hands in an RGB frame
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails in a way the caller should not ignore
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<HandObservation>>;

    /// Limit the number of hands reported per frame
    fn set_max_hands(&mut self, max_hands: usize);

    /// Backend name for logging
    fn name(&self) -> &str;
}

#[derive(Deserialize, Debug)]
struct LandmarkJson {
    x: f32,
    y: f32,
    #[serde(default)]
    z: f32,
}

impl LandmarkJson {
    fn in_range(&self) -> bool {
        let range = -MAX_LANDMARK_OVERSHOOT..=1.0 + MAX_LANDMARK_OVERSHOOT;
        range.contains(&self.x) && range.contains(&self.y) && self.z.is_finite()
    }
}

#[derive(Deserialize, Debug)]
struct HandJson {
    #[serde(default)]
    handedness: String,
    #[serde(default = "default_score")]
    score: f32,
    landmarks: Vec<LandmarkJson>,
}

#[derive(Deserialize, Debug)]
struct DetectionResult {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

const fn default_score() -> f32 {
    1.0
}

/// Parse one detection line into pixel-space observations.
///
/// Hands below `min_score`, with the wrong landmark count or with a
/// coordinate far outside the frame are skipped;
/// at most `max_hands` are returned, in the order the helper reported them.
/// A helper-side `error` is logged and treated as "no hands".
///
/// # Errors
///
/// Returns an error if the line is not valid JSON
#[allow(clippy::cast_precision_loss)] // Frame sizes are far below f32 precision limits
pub fn parse_detection_line(
    line: &str,
    frame_width: u32,
    frame_height: u32,
    min_score: f32,
    max_hands: usize,
) -> Result<Vec<HandObservation>> {
    let result: DetectionResult = serde_json::from_str(line.trim())?;

    if let Some(error) = result.error {
        warn!("Landmark helper reported an error: {}", error);
        return Ok(Vec::new());
    }

    let width = frame_width as f32;
    let height = frame_height as f32;
    let mut hands = Vec::new();

    for hand in result.hands {
        if hands.len() >= max_hands {
            break;
        }
        if hand.score < min_score {
            debug!("Skipping hand with score {:.2}", hand.score);
            continue;
        }
        if hand.landmarks.len() != NUM_HAND_LANDMARKS {
            warn!(
                "Expected {} landmarks, got {}",
                NUM_HAND_LANDMARKS,
                hand.landmarks.len()
            );
            continue;
        }
        if !hand.landmarks.iter().all(LandmarkJson::in_range) {
            warn!("Skipping hand with landmarks outside the frame");
            continue;
        }

        let points: Vec<Landmark> = hand
            .landmarks
            .iter()
            .map(|lm| Landmark::new(lm.x * width, lm.y * height, lm.z))
            .collect();
        let observation = HandObservation::from_points(&points)?
            .with_metadata(Handedness::parse(&hand.handedness), hand.score);
        hands.push(observation);
    }

    Ok(hands)
}

/// Landmark source backed by a helper subprocess
pub struct SubprocessLandmarkSource {
    process: Child,
    stdin: ChildStdin,
    stdout_reader: BufReader<ChildStdout>,
    confidence_threshold: f32,
    max_hands: usize,
}

impl SubprocessLandmarkSource {
    /// Start the helper and wait for its `READY` line
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The helper cannot be spawned
    /// - Its pipes cannot be taken
    /// - It does not print `READY` as its first line
    pub fn spawn(program: &str, args: &[String], confidence_threshold: f32, max_hands: usize) -> Result<Self> {
        info!("Starting landmark helper: {} {}", program, args.join(" "));

        let mut process = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::LandmarkSource(format!("Failed to start {program}: {e}")))?;

        let stdin = process
            .stdin
            .take()
            .ok_or_else(|| Error::LandmarkSource("Failed to get helper stdin".to_string()))?;
        let stdout = process
            .stdout
            .take()
            .ok_or_else(|| Error::LandmarkSource("Failed to get helper stdout".to_string()))?;
        let mut stdout_reader = BufReader::new(stdout);

        let mut ready_line = String::new();
        stdout_reader.read_line(&mut ready_line)?;
        if ready_line.trim() != "READY" {
            let _ = process.kill();
            let _ = process.wait();
            return Err(Error::LandmarkSource(format!(
                "Helper did not signal ready, got: {}",
                ready_line.trim()
            )));
        }

        info!("Landmark helper ready");

        Ok(Self {
            process,
            stdin,
            stdout_reader,
            confidence_threshold: confidence_threshold.clamp(0.0, 1.0),
            max_hands,
        })
    }
}

impl LandmarkSource for SubprocessLandmarkSource {
    fn detect(&mut self, frame: &RgbImage) -> Result<Vec<HandObservation>> {
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 {
            return Ok(Vec::new());
        }

        let max_hands = u32::try_from(self.max_hands).unwrap_or(u32::MAX);
        self.stdin.write_all(&width.to_le_bytes())?;
        self.stdin.write_all(&height.to_le_bytes())?;
        self.stdin.write_all(&3u32.to_le_bytes())?;
        self.stdin.write_all(&max_hands.to_le_bytes())?;
        self.stdin.write_all(frame.as_raw())?;
        self.stdin.flush()?;

        let mut response = String::new();
        if self.stdout_reader.read_line(&mut response)? == 0 {
            return Err(Error::LandmarkSource("Helper closed its output".to_string()));
        }

        parse_detection_line(&response, width, height, self.confidence_threshold, self.max_hands)
    }

    fn set_max_hands(&mut self, max_hands: usize) {
        debug!("Landmark helper max hands: {}", max_hands);
        self.max_hands = max_hands;
    }

    fn name(&self) -> &str {
        "subprocess"
    }
}

impl Drop for SubprocessLandmarkSource {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}
