//! Static gesture classification from hand landmarks.
//!
//! Each finger contributes two bend angles: the base bend between the
//! wrist-to-base segment and the first phalanx, and the tip bend between the
//! first phalanx and the last one. A finger is extended when both are below
//! the bend threshold. The resulting [`FingerState`] is matched against a
//! small registry of [`GestureDefinition`]s.

use crate::{
    constants::{DEFAULT_BEND_THRESHOLD_DEG, DEFAULT_OK_PINCH_DISTANCE_PX, NUM_FINGERS, THUMB_TIP, INDEX_FINGER_TIP, WRIST},
    landmarks::HandObservation,
};
use std::fmt;

/// Gestures the capture tool reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Index finger only. Starts and continues freehand drawing.
    One,
    /// Thumb and index fingertips pinched together. Cancels a capture.
    OkSign,
}

impl Gesture {
    /// Label used in asset file names and on screen
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::One => "one",
            Self::OkSign => "ok",
        }
    }

    /// Parse a label as written by [`Gesture::as_str`]
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "one" => Some(Self::One),
            "ok" => Some(Self::OkSign),
            _ => None,
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extended/curled flag per finger, thumb first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FingerState(pub [bool; NUM_FINGERS]);

impl FingerState {
    /// Build from a 0/1 pattern such as `[0, 1, 0, 0, 0]`
    #[must_use]
    pub fn from_bits(bits: [u8; NUM_FINGERS]) -> Self {
        Self(bits.map(|b| b != 0))
    }

    /// 0/1 pattern view
    #[must_use]
    pub fn bits(&self) -> [u8; NUM_FINGERS] {
        self.0.map(u8::from)
    }

    /// Number of extended fingers
    #[must_use]
    pub fn extended_count(&self) -> usize {
        self.0.iter().filter(|&&f| f).count()
    }
}

/// Ten bend angles in degrees: `[base, tip]` per finger, thumb first
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FingerBends(pub [f64; NUM_FINGERS * 2]);

impl FingerBends {
    /// Compute the bend angles of every finger
    #[must_use]
    pub fn from_hand(hand: &HandObservation) -> Self {
        let lm = hand.landmarks();
        let wrist = lm[WRIST];
        let mut bends = [0.0; NUM_FINGERS * 2];

        for finger in 0..NUM_FINGERS {
            let p1 = lm[1 + 4 * finger];
            let p2 = lm[2 + 4 * finger];
            let p3 = lm[3 + 4 * finger];
            let p4 = lm[4 + 4 * finger];

            let phalanx = p2.sub(p1);
            bends[2 * finger] = angle_between(p1.sub(wrist), phalanx);
            bends[2 * finger + 1] = angle_between(p4.sub(p3), phalanx);
        }

        Self(bends)
    }

    /// Base and tip bend of one finger
    #[must_use]
    pub fn finger(&self, finger: usize) -> (f64, f64) {
        (self.0[2 * finger], self.0[2 * finger + 1])
    }

    /// Extended iff both bends are strictly below `threshold_deg`
    #[must_use]
    pub fn finger_state(&self, threshold_deg: f64) -> FingerState {
        let mut state = [false; NUM_FINGERS];
        for (finger, extended) in state.iter_mut().enumerate() {
            let (base, tip) = self.finger(finger);
            *extended = base < threshold_deg && tip < threshold_deg;
        }
        FingerState(state)
    }
}

/// Angle between two vectors in degrees, 0 when either has zero length
#[must_use]
pub fn angle_between(v1: [f64; 3], v2: [f64; 3]) -> f64 {
    let dot = v1[0] * v2[0] + v1[1] * v2[1] + v1[2] * v2[2];
    let mag1 = (v1[0] * v1[0] + v1[1] * v1[1] + v1[2] * v1[2]).sqrt();
    let mag2 = (v2[0] * v2[0] + v2[1] * v2[1] + v2[2] * v2[2]).sqrt();

    if mag1 * mag2 == 0.0 {
        return 0.0;
    }

    (dot / (mag1 * mag2)).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Predicate over a whole hand
pub type HandPredicate = Box<dyn Fn(&HandObservation) -> bool + Send + Sync>;

/// How a gesture is recognized
pub enum GestureMatcher {
    /// Exact finger-state pattern
    FingerPattern(FingerState),
    /// Arbitrary test over the landmarks
    Predicate(HandPredicate),
}

impl fmt::Debug for GestureMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FingerPattern(state) => f.debug_tuple("FingerPattern").field(&state.bits()).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// One registry entry
#[derive(Debug)]
pub struct GestureDefinition {
    pub gesture: Gesture,
    pub matcher: GestureMatcher,
}

impl GestureDefinition {
    /// Pattern-based definition
    #[must_use]
    pub fn pattern(gesture: Gesture, bits: [u8; NUM_FINGERS]) -> Self {
        Self {
            gesture,
            matcher: GestureMatcher::FingerPattern(FingerState::from_bits(bits)),
        }
    }

    /// Predicate-based definition
    pub fn predicate<F>(gesture: Gesture, predicate: F) -> Self
    where
        F: Fn(&HandObservation) -> bool + Send + Sync + 'static,
    {
        Self {
            gesture,
            matcher: GestureMatcher::Predicate(Box::new(predicate)),
        }
    }

    fn matches(&self, state: FingerState, hand: &HandObservation) -> bool {
        match &self.matcher {
            GestureMatcher::FingerPattern(pattern) => *pattern == state,
            GestureMatcher::Predicate(predicate) => predicate(hand),
        }
    }
}

/// True when thumb tip and index tip are closer than `max_distance` pixels
#[must_use]
pub fn is_pinched(hand: &HandObservation, max_distance: f64) -> bool {
    let lm = hand.landmarks();
    lm[THUMB_TIP].distance_2d(lm[INDEX_FINGER_TIP]) < max_distance
}

/// The built-in registry: `one` then `ok`
#[must_use]
pub fn default_definitions(pinch_distance: f64) -> Vec<GestureDefinition> {
    vec![
        GestureDefinition::pattern(Gesture::One, [0, 1, 0, 0, 0]),
        GestureDefinition::predicate(Gesture::OkSign, move |hand| is_pinched(hand, pinch_distance)),
    ]
}

/// Matches hands against an ordered gesture registry
#[derive(Debug)]
pub struct GestureClassifier {
    definitions: Vec<GestureDefinition>,
    bend_threshold_deg: f64,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(default_definitions(DEFAULT_OK_PINCH_DISTANCE_PX), DEFAULT_BEND_THRESHOLD_DEG)
    }
}

impl GestureClassifier {
    /// Create a classifier over `definitions`, evaluated in order
    #[must_use]
    pub fn new(definitions: Vec<GestureDefinition>, bend_threshold_deg: f64) -> Self {
        Self {
            definitions,
            bend_threshold_deg,
        }
    }

    /// Keep only definitions for which `keep` returns true
    #[must_use]
    pub fn retain<F>(mut self, mut keep: F) -> Self
    where
        F: FnMut(Gesture) -> bool,
    {
        self.definitions.retain(|d| keep(d.gesture));
        self
    }

    /// Gestures present in the registry, in order
    pub fn gestures(&self) -> impl Iterator<Item = Gesture> + '_ {
        self.definitions.iter().map(|d| d.gesture)
    }

    /// Finger state of a hand under this classifier's threshold
    #[must_use]
    pub fn finger_state(&self, hand: &HandObservation) -> FingerState {
        FingerBends::from_hand(hand).finger_state(self.bend_threshold_deg)
    }

    /// All gestures matching this hand, in registry order
    #[must_use]
    pub fn classify(&self, hand: &HandObservation) -> Vec<Gesture> {
        let state = self.finger_state(hand);
        self.definitions
            .iter()
            .filter(|d| d.matches(state, hand))
            .map(|d| d.gesture)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::Landmark;

    /// Every finger a straight ray from the wrist, optionally curled
    fn hand(extended: [bool; NUM_FINGERS]) -> HandObservation {
        let wrist = (400.0f32, 600.0f32);
        let dirs = [(-1.0f32, -0.3f32), (-0.4, -1.0), (0.0, -1.0), (0.4, -1.0), (0.8, -0.8)];
        let mut points = vec![Landmark::new(wrist.0, wrist.1, 0.0); 21];
        for (finger, (&(dx, dy), &ext)) in dirs.iter().zip(extended.iter()).enumerate() {
            let step = 40.0;
            let base = (wrist.0 + dx * step, wrist.1 + dy * step);
            points[1 + 4 * finger] = Landmark::new(base.0, base.1, 0.0);
            if ext {
                for k in 1..4 {
                    let s = step * (k as f32 + 1.0);
                    points[1 + 4 * finger + k] = Landmark::new(wrist.0 + dx * s, wrist.1 + dy * s, 0.0);
                }
            } else {
                // Perpendicular phalanx, then fold back
                let (px, py) = (-dy, dx);
                let p2 = (base.0 + px * 20.0, base.1 + py * 20.0);
                let p3 = (p2.0 + px * 20.0, p2.1 + py * 20.0);
                let p4 = (p3.0 - px * 20.0, p3.1 - py * 20.0);
                points[2 + 4 * finger] = Landmark::new(p2.0, p2.1, 0.0);
                points[3 + 4 * finger] = Landmark::new(p3.0, p3.1, 0.0);
                points[4 + 4 * finger] = Landmark::new(p4.0, p4.1, 0.0);
            }
        }
        HandObservation::from_points(&points).unwrap()
    }

    #[test]
    fn test_angle_between() {
        assert!((angle_between([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]) - 90.0).abs() < 1e-9);
        assert!(angle_between([1.0, 0.0, 0.0], [2.0, 0.0, 0.0]).abs() < 1e-6);
        assert!((angle_between([1.0, 0.0, 0.0], [-1.0, 0.0, 0.0]) - 180.0).abs() < 1e-9);
        assert_eq!(angle_between([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_open_hand_and_fist() {
        let classifier = GestureClassifier::default();
        assert_eq!(classifier.finger_state(&hand([true; 5])).bits(), [1, 1, 1, 1, 1]);
        assert_eq!(classifier.finger_state(&hand([false; 5])).bits(), [0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_classify_one() {
        let classifier = GestureClassifier::default();
        let gestures = classifier.classify(&hand([false, true, false, false, false]));
        assert_eq!(gestures, vec![Gesture::One]);
    }

    #[test]
    fn test_retain_drops_definitions() {
        let classifier = GestureClassifier::default().retain(|g| g != Gesture::One);
        assert_eq!(classifier.gestures().collect::<Vec<_>>(), vec![Gesture::OkSign]);
        assert!(classifier.classify(&hand([false, true, false, false, false])).is_empty());
    }

    #[test]
    fn test_label_round_trip() {
        for gesture in [Gesture::One, Gesture::OkSign] {
            assert_eq!(Gesture::from_label(gesture.as_str()), Some(gesture));
        }
        assert_eq!(Gesture::from_label("fist"), None);
    }
}
