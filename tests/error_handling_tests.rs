//! Error handling tests for all modules

use hand_gesture_capture::{
    capture::crop_artifact,
    error::{AppError, Result},
    landmarks::{HandObservation, Landmark},
    utils::{padded_pair_box, path_crop_box, safe_cast::*, BoundingBox, Point},
};
use image::RgbImage;

#[test]
fn test_error_messages() {
    let cases = vec![
        (AppError::InvalidInput("bad frame".into()), "Invalid input: bad frame"),
        (AppError::LandmarkSource("helper died".into()), "Landmark source error: helper died"),
        (AppError::FrameSource("camera 3".into()), "Frame source error: camera 3"),
        (AppError::Asset("one.png not found".into()), "Asset error: one.png not found"),
        (AppError::Storage("disk full".into()), "Storage error: disk full"),
        (AppError::ConfigError("dwell".into()), "Configuration error: dwell"),
    ];

    for (error, expected) in cases {
        assert_eq!(error.to_string(), expected);
    }
}

#[test]
fn test_io_errors_convert() {
    fn read_missing() -> Result<String> {
        Ok(std::fs::read_to_string("/nonexistent/landmarks.json")?)
    }
    assert!(matches!(read_missing(), Err(AppError::Io(_))));
}

#[test]
fn test_json_errors_convert() {
    fn parse() -> Result<serde_json::Value> {
        Ok(serde_json::from_str("{")?)
    }
    assert!(matches!(parse(), Err(AppError::Json(_))));
}

#[test]
fn test_safe_cast_errors() {
    // Test u32 overflow
    assert!(u32_to_i32(u32::MAX).is_err());
    assert_eq!(u32_to_i32(1280).unwrap(), 1280);

    // Negative pixels cannot become sizes
    assert!(i32_to_u32(-1).is_err());

    // Non-finite landmarks collapse to the origin
    assert_eq!(landmark_to_pixel(f32::NAN), 0);
    assert_eq!(landmark_to_pixel(f32::INFINITY), 0);
    assert_eq!(landmark_to_pixel(1e12), i32::MAX);
    assert_eq!(landmark_to_pixel(-3.7), -3);

    assert_eq!(f64_to_i32_clamp(f64::NAN, 0, 10), 0);
    assert_eq!(f64_to_i32_clamp(57.6, 0, i32::MAX), 57);
}

#[test]
fn test_wrong_landmark_count() {
    for count in [0, 20, 22] {
        let points = vec![Landmark::default(); count];
        assert!(HandObservation::from_points(&points).is_err(), "{count} landmarks");
    }
}

#[test]
fn test_hand_outside_frame_is_clamped() {
    let boxed = path_crop_box(&[Point::new(-50, -50), Point::new(2000, 2000)], 10, 640, 480).unwrap();
    assert_eq!(boxed, BoundingBox::new(0, 0, 639, 479));

    let pair = padded_pair_box(Point::new(-100, 50), Point::new(900, 400), -10, 640, 480);
    assert_eq!(pair, BoundingBox::new(0, 60, 640, 390));
}

#[test]
fn test_crop_of_degenerate_regions() {
    let frame = RgbImage::new(640, 480);
    // Fingertips closer than twice the shrink padding
    let pair = padded_pair_box(Point::new(100, 100), Point::new(105, 100), -10, 640, 480);
    assert!(pair.is_empty());
    assert!(crop_artifact(&frame, pair, 200).is_none());

    // Zero preview size
    assert!(crop_artifact(&frame, BoundingBox::new(0, 0, 10, 10), 0).is_none());
}

#[test]
fn test_empty_path_has_no_box() {
    assert!(path_crop_box(&[], 10, 640, 480).is_none());
}
