//! Majority-vote smoothing of per-frame gesture matches.
//!
//! Classifier output flickers between frames. [`GestureStabilizer`] keeps a
//! bounded window of recent matches and reports the most frequent gesture.

use crate::gesture::Gesture;
use std::collections::VecDeque;

/// Majority vote over the last few frames of classifier output
#[derive(Debug, Clone)]
pub struct GestureStabilizer {
    window_size: usize,
    history: VecDeque<Vec<Gesture>>,
}

impl GestureStabilizer {
    #[must_use]
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            history: VecDeque::with_capacity(window_size),
        }
    }

    /// Record one frame's matches (possibly none) and return the stabilized gesture
    pub fn push(&mut self, detected: Vec<Gesture>) -> Option<Gesture> {
        if self.window_size == 0 {
            return None;
        }
        if self.history.len() >= self.window_size {
            self.history.pop_front();
        }
        self.history.push_back(detected);

        self.current()
    }

    /// Most frequent gesture across the window.
    ///
    /// Ties go to the gesture seen first, scanning from the oldest frame.
    #[must_use]
    pub fn current(&self) -> Option<Gesture> {
        let mut counts: Vec<(Gesture, usize)> = Vec::new();
        for &gesture in self.history.iter().flatten() {
            match counts.iter_mut().find(|(g, _)| *g == gesture) {
                Some((_, count)) => *count += 1,
                None => counts.push((gesture, 1)),
            }
        }

        let mut best: Option<(Gesture, usize)> = None;
        for (gesture, count) in counts {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((gesture, count));
            }
        }
        best.map(|(gesture, _)| gesture)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_window_is_empty() {
        let mut stabilizer = GestureStabilizer::new(5);
        assert!(stabilizer.is_empty());
        assert_eq!(stabilizer.current(), None);
        stabilizer.push(vec![Gesture::One]);
        assert_eq!(stabilizer.len(), 1);
    }

    #[test]
    fn test_majority_vote() {
        let mut stabilizer = GestureStabilizer::new(5);

        assert_eq!(stabilizer.push(vec![Gesture::One]), Some(Gesture::One));
        assert_eq!(stabilizer.push(vec![Gesture::OkSign]), Some(Gesture::One));
        assert_eq!(stabilizer.push(vec![Gesture::OkSign]), Some(Gesture::OkSign));
        assert_eq!(stabilizer.push(vec![]), Some(Gesture::OkSign));
    }

    #[test]
    fn test_window_evicts_oldest() {
        let mut stabilizer = GestureStabilizer::new(3);

        stabilizer.push(vec![Gesture::One]);
        stabilizer.push(vec![Gesture::One]);
        stabilizer.push(vec![Gesture::OkSign]);
        assert_eq!(stabilizer.current(), Some(Gesture::One));

        // Window is full, the two oldest `one` entries drop out
        stabilizer.push(vec![Gesture::OkSign]);
        stabilizer.push(vec![Gesture::OkSign]);
        assert_eq!(stabilizer.len(), 3);
        assert_eq!(stabilizer.current(), Some(Gesture::OkSign));
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let mut stabilizer = GestureStabilizer::new(5);
        stabilizer.push(vec![Gesture::OkSign]);
        stabilizer.push(vec![Gesture::One]);
        assert_eq!(stabilizer.current(), Some(Gesture::OkSign));

        stabilizer.clear();
        stabilizer.push(vec![Gesture::One, Gesture::OkSign]);
        assert_eq!(stabilizer.current(), Some(Gesture::One));
    }

    #[test]
    fn test_only_empty_entries() {
        let mut stabilizer = GestureStabilizer::new(5);
        assert_eq!(stabilizer.current(), None);
        for _ in 0..7 {
            assert_eq!(stabilizer.push(Vec::new()), None);
        }
        assert_eq!(stabilizer.len(), 5);
    }
}
