//! Two-point session behaviour


use hand_gesture_capture::{
    landmarks::HandObservation,
    overlay::Overlay,
    save_gate::ClickEvent,
    session::{CaptureSession, TwoPointSession, TwoPointSettings},
    utils::BoundingBox,
};
use image::RgbImage;
use test_helpers::{gradient_frame, one_hand, open_hand, MemoryStore};

fn session(dwell_frames: u32) -> TwoPointSession {
    TwoPointSession::new(TwoPointSettings {
        dwell_frames,
        ..TwoPointSettings::default()
    })
}

fn pair(a: (f32, f32), b: (f32, f32)) -> [HandObservation; 2] {
    // Gesture does not matter in two-point mode
    [one_hand(a), open_hand(b)]
}

fn run(session: &mut TwoPointSession, frame: &RgbImage, hands: &[HandObservation], frames: usize) -> Overlay {
    let mut overlay = Overlay::new();
    for _ in 0..frames {
        overlay = Overlay::new();
        session.update(hands, frame, &mut overlay);
    }
    overlay
}

#[test]
fn test_rectangle_drawn_when_apart() {
    let frame = gradient_frame(1280, 768);
    let mut session = session(100);
    let overlay = run(&mut session, &frame, &pair((400.0, 300.0), (800.0, 500.0)), 1);

    let rects: Vec<_> = overlay.rectangles().copied().collect();
    assert_eq!(rects, vec![BoundingBox::new(410, 310, 790, 490)]);
    assert_eq!(overlay.ring_progress().count(), 2);
}

#[test]
fn test_tip_order_does_not_matter() {
    let frame = gradient_frame(1280, 768);
    let mut session = session(3);
    run(&mut session, &frame, &pair((800.0, 500.0), (400.0, 300.0)), 3);
    assert_eq!(
        session.save_gate().artifact().unwrap().region,
        BoundingBox::new(410, 310, 790, 490)
    );
}

#[test]
fn test_crop_matches_frame_pixels() {
    let frame = gradient_frame(1280, 768);
    let mut session = session(3);
    run(&mut session, &frame, &pair((100.0, 100.0), (300.0, 200.0)), 3);

    let artifact = session.save_gate().artifact().unwrap();
    assert_eq!(artifact.crop.get_pixel(0, 0), frame.get_pixel(110, 110));
    assert_eq!(artifact.crop.get_pixel(179, 79), frame.get_pixel(289, 189));
    assert_eq!(artifact.preview.dimensions(), (200, 200));
}

#[test]
fn test_moving_one_hand_restarts_dwell() {
    let frame = gradient_frame(1280, 768);
    let mut session = session(10);
    run(&mut session, &frame, &pair((100.0, 100.0), (300.0, 200.0)), 9);
    run(&mut session, &frame, &pair((100.0, 100.0), (320.0, 200.0)), 1);
    assert_eq!(session.tracker().counter().count(), 0);

    run(&mut session, &frame, &pair((100.0, 100.0), (320.0, 200.0)), 9);
    assert!(!session.save_gate().is_pending());
    run(&mut session, &frame, &pair((100.0, 100.0), (320.0, 200.0)), 1);
    assert!(session.save_gate().is_pending());
}

#[test]
fn test_touching_fingers_never_capture() {
    let frame = gradient_frame(1280, 768);
    let mut session = session(100);
    for _ in 0..200 {
        let overlay = run(&mut session, &frame, &pair((500.0, 300.0), (505.0, 300.0)), 1);
        assert_eq!(overlay.rectangles().count(), 0);
    }
    assert!(!session.save_gate().is_pending());
}

#[test]
fn test_save_resets_tracker_and_recaptures() {
    let frame = gradient_frame(1280, 768);
    let store = MemoryStore::new();
    let mut session = session(2);
    let hands = pair((100.0, 100.0), (300.0, 200.0));
    run(&mut session, &frame, &hands, 2);

    let button = session.save_gate().button().unwrap();
    let saved = session
        .handle_click(ClickEvent::press(button.x_min + 5, button.y_min + 5), &store)
        .unwrap();
    assert!(saved.is_some());
    assert_eq!(store.saved()[0].dimensions(), (180, 80));
    assert!(!session.save_gate().is_pending());

    // Still holding still after the save starts a fresh dwell
    run(&mut session, &frame, &hands, 2);
    assert!(session.save_gate().is_pending());
}

#[test]
fn test_hand_loss_keeps_pending_capture() {
    let frame = gradient_frame(1280, 768);
    let mut session = session(2);
    run(&mut session, &frame, &pair((100.0, 100.0), (300.0, 200.0)), 2);

    run(&mut session, &frame, &[], 5);
    assert!(session.save_gate().is_pending());
    assert_eq!(session.tracker().counter().count(), 0);
}
