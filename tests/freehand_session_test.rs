//! Freehand session behaviour driven by synthetic hands


use hand_gesture_capture::{
    gesture::Gesture,
    overlay::{DrawCommand, Overlay},
    save_gate::ClickEvent,
    session::{CaptureSession, FreehandSession, FreehandSettings, FreehandState},
    utils::{BoundingBox, Point},
};
use image::RgbImage;
use test_helpers::{gradient_frame, one_hand, MemoryStore};

fn session(dwell_frames: u32) -> FreehandSession {
    FreehandSession::new(FreehandSettings {
        dwell_frames,
        ..FreehandSettings::default()
    })
}

fn step(session: &mut FreehandSession, frame: &RgbImage, tip: (f32, f32), gesture: Option<Gesture>) -> Overlay {
    let hand = one_hand(tip);
    let mut overlay = Overlay::new();
    session.update(Some(&hand), gesture, frame, &mut overlay);
    overlay
}

#[test]
fn test_drawing_point_is_offset_from_tip() {
    let session = FreehandSession::default();
    assert_eq!(session.drawing_point(&one_hand((520.0, 320.0))), Point::new(500, 300));
}

#[test]
fn test_saturated_tip_keeps_drawing_point_in_range() {
    let frame = gradient_frame(640, 480);
    let mut session = session(5);
    let hand = one_hand((-3.0e9, 200.0));
    assert_eq!(session.drawing_point(&hand), Point::new(i32::MIN, 180));

    // A tip jump from the saturated edge to the frame is plain motion
    let mut overlay = Overlay::new();
    session.update(Some(&hand), Some(Gesture::One), &frame, &mut overlay);
    step(&mut session, &frame, (300.0, 200.0), Some(Gesture::One));
    assert_eq!(session.state(), FreehandState::Drawing);
    assert!(!session.save_gate().is_pending());
}

#[test]
fn test_moving_path_grows_and_never_fires() {
    let frame = gradient_frame(640, 480);
    let mut session = session(5);

    for i in 0..20 {
        let x = 100.0 + 15.0 * i as f32;
        step(&mut session, &frame, (x, 200.0), Some(Gesture::One));
    }
    assert_eq!(session.state(), FreehandState::Drawing);
    assert_eq!(session.path().len(), 20);
    assert!(!session.save_gate().is_pending());
}

#[test]
fn test_path_then_hold_captures_whole_path() {
    let frame = gradient_frame(640, 480);
    let mut session = session(3);

    // Moving stroke, then hold at the last point
    for x in [120.0, 160.0, 200.0, 240.0] {
        step(&mut session, &frame, (x, 220.0), Some(Gesture::One));
    }
    for _ in 0..2 {
        step(&mut session, &frame, (240.0, 220.0), Some(Gesture::One));
    }
    assert_eq!(session.state(), FreehandState::Drawing);
    step(&mut session, &frame, (240.0, 220.0), Some(Gesture::One));
    assert_eq!(session.state(), FreehandState::PendingSave);

    let artifact = session.save_gate().artifact().unwrap();
    // Drawing points run from (100, 200) to (220, 200), margin 10
    assert_eq!(artifact.region, BoundingBox::new(90, 190, 230, 210));
    assert_eq!(artifact.crop.dimensions(), (140, 20));
    assert_eq!(artifact.crop.get_pixel(0, 0), frame.get_pixel(90, 190));
}

#[test]
fn test_drawing_overlay_has_ring_path_and_box() {
    let frame = gradient_frame(640, 480);
    let mut session = session(100);
    step(&mut session, &frame, (200.0, 200.0), Some(Gesture::One));
    let overlay = step(&mut session, &frame, (260.0, 200.0), Some(Gesture::One));

    assert_eq!(overlay.ring_progress().count(), 1);
    assert_eq!(overlay.rectangles().count(), 1);
    assert!(overlay
        .commands()
        .iter()
        .any(|c| matches!(c, DrawCommand::Polyline { points, .. } if points.len() == 2)));
}

#[test]
fn test_hand_loss_stops_drawing_keeps_path() {
    let frame = gradient_frame(640, 480);
    let mut session = session(100);
    step(&mut session, &frame, (200.0, 200.0), Some(Gesture::One));
    step(&mut session, &frame, (260.0, 200.0), Some(Gesture::One));

    session.update(None, None, &frame, &mut Overlay::new());
    assert_eq!(session.state(), FreehandState::Idle);
    assert_eq!(session.path().len(), 2);
    assert_eq!(session.tracker().counter().count(), 0);
}

#[test]
fn test_save_click_writes_crop_and_returns_to_idle() {
    let frame = gradient_frame(640, 480);
    let store = MemoryStore::new();
    let mut session = session(2);
    step(&mut session, &frame, (300.0, 300.0), Some(Gesture::One));
    step(&mut session, &frame, (300.0, 300.0), Some(Gesture::One));

    let button = session.save_gate().button().unwrap();
    let center = ClickEvent::press((button.x_min + button.x_max) / 2, (button.y_min + button.y_max) / 2);
    let path = session.handle_click(center, &store).unwrap();

    assert!(path.is_some());
    assert_eq!(store.count(), 1);
    assert_eq!(session.state(), FreehandState::Idle);
    assert!(!session.save_gate().is_pending());
}

#[test]
fn test_failed_save_keeps_capture() {
    let frame = gradient_frame(640, 480);
    let store = MemoryStore::new();
    store.set_failing(true);
    let mut session = session(2);
    step(&mut session, &frame, (300.0, 300.0), Some(Gesture::One));
    step(&mut session, &frame, (300.0, 300.0), Some(Gesture::One));

    let button = session.save_gate().button().unwrap();
    assert!(session.handle_click(ClickEvent::press(button.x_min + 1, button.y_min + 1), &store).is_err());
    assert_eq!(session.state(), FreehandState::PendingSave);

    store.set_failing(false);
    let saved = session.handle_click(ClickEvent::press(button.x_min + 1, button.y_min + 1), &store).unwrap();
    assert!(saved.is_some());
    assert_eq!(store.count(), 1);
}

#[test]
fn test_pending_capture_renders_preview_and_button() {
    let frame = gradient_frame(640, 480);
    let mut session = session(2);
    step(&mut session, &frame, (300.0, 300.0), Some(Gesture::One));
    step(&mut session, &frame, (300.0, 300.0), Some(Gesture::One));

    let mut overlay = Overlay::new();
    session.render_preview(&mut overlay, 640, 480);
    assert_eq!(overlay.buttons_labelled("Save").count(), 1);
    assert!(overlay
        .commands()
        .iter()
        .any(|c| matches!(c, DrawCommand::Image { image, .. } if image.dimensions() == (200, 200))));
}

#[test]
fn test_interrupt_keeps_pending_capture() {
    let frame = gradient_frame(640, 480);
    let mut session = session(2);
    step(&mut session, &frame, (300.0, 300.0), Some(Gesture::One));
    step(&mut session, &frame, (300.0, 300.0), Some(Gesture::One));

    session.interrupt();
    assert_eq!(session.state(), FreehandState::PendingSave);
    assert!(session.save_gate().is_pending());
}

#[test]
fn test_live_preview_can_be_disabled() {
    let frame = gradient_frame(640, 480);
    let mut session = FreehandSession::new(FreehandSettings {
        live_preview: false,
        ..FreehandSettings::default()
    });
    step(&mut session, &frame, (300.0, 300.0), Some(Gesture::One));
    assert!(session.live_preview().is_none());
}
