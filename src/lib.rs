//! Hand gesture driven image capture.
//!
//! This library turns hand landmarks from a live video feed into cropped
//! snapshots:
//! - a finger-bend classifier recognizes static gestures (`one`, `ok`)
//! - a sliding-window majority vote stabilizes them
//! - dwell detection fires when fingertips hold still long enough
//! - two capture modes turn the fingertip motion into a crop region
//! - a save button confirms a pending capture and writes it as PNG
//!
//! The core works on [`image::RgbImage`] frames and emits backend-neutral
//! [`overlay::Overlay`] draw commands. The `gui` feature adds an `OpenCV`
//! camera loop and renderer.
//!
//! The per-frame pipeline consists of:
//! 1. Mode switching by hovering one of two on-screen buttons
//! 2. Gesture classification and stabilization (freehand mode)
//! 3. The active capture session updating its dwell state and drawing
//! 4. The pending preview and save button
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use hand_gesture_capture::{
//!     config::Config,
//!     landmarks::{LandmarkSource, SubprocessLandmarkSource},
//!     pipeline::CapturePipeline,
//!     save_gate::ClickEvent,
//! };
//! use image::RgbImage;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let mut pipeline = CapturePipeline::from_config(&config);
//! let mut source = SubprocessLandmarkSource::spawn(
//!     &config.landmarks.program,
//!     &config.landmarks.args,
//!     config.landmarks.confidence_threshold,
//!     pipeline.mode().max_hands(),
//! )?;
//!
//! let frame = RgbImage::new(1280, 768);
//! let hands = source.detect(&frame)?;
//! let output = pipeline.process_frame(&frame, &hands);
//! println!("{} draw commands, gesture {:?}", output.overlay.len(), output.gesture);
//!
//! // A press on the save button writes the pending capture
//! for path in pipeline.handle_click(ClickEvent::press(1100, 700)) {
//!     println!("Saved {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Gesture Classification
//!
//! ```no_run
//! use hand_gesture_capture::{
//!     gesture::GestureClassifier, landmarks::HandObservation, stabilizer::GestureStabilizer,
//! };
//!
//! # fn classify(hands: &[HandObservation]) {
//! let classifier = GestureClassifier::default();
//! let mut stabilizer = GestureStabilizer::new(5);
//!
//! for hand in hands {
//!     let detected = classifier.classify(hand);
//!     if let Some(gesture) = stabilizer.push(detected) {
//!         println!("Gesture: {gesture}");
//!     }
//! }
//! # }
//! ```
//!
//! ## Dwell Detection
//!
//! ```
//! use hand_gesture_capture::{dwell::DwellTracker, utils::Point};
//!
//! let mut tracker = DwellTracker::new(10.0, 3);
//! assert!(!tracker.update(&[Point::new(100, 100)]).fired);
//! assert!(!tracker.update(&[Point::new(104, 102)]).fired);
//! assert!(tracker.update(&[Point::new(103, 101)]).fired);
//! ```

/// Reference thumbnails for recognized gestures
pub mod assets;

/// Crop artifacts and preview placement
pub mod capture;

/// Configuration management
pub mod config;

/// Constants used throughout the application
pub mod constants;

/// Dwell and hover detection
pub mod dwell;

/// Error types and result handling
pub mod error;

/// Finger-bend gesture classification
pub mod gesture;

/// Hand landmarks and landmark sources
pub mod landmarks;

/// Hover-activated capture mode buttons
pub mod mode_switch;

/// Backend-neutral draw commands
pub mod overlay;

/// Per-frame orchestration
pub mod pipeline;

/// Click-to-confirm saving
pub mod save_gate;

/// Freehand and two-point capture sessions
pub mod session;

/// Majority vote over recent gestures
pub mod stabilizer;

/// Persisting captures to disk
pub mod storage;

/// Pixel geometry and conversions
pub mod utils;

/// Main application module
#[cfg(feature = "gui")]
pub mod app;

/// `OpenCV` renderer for overlays
#[cfg(feature = "gui")]
pub mod render;

pub use error::{Error, Result};
