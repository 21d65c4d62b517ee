//! Dwell detection for tracked points and hover targets.
//!
//! A dwell is a run of consecutive frames in which the pointer did not
//! move. All dwell-style interactions share one primitive,
//! [`DwellCounter`], which fires once when the run reaches its threshold and
//! stays quiet until it is interrupted:
//!
//! - [`DwellTracker`] interrupts on displacement of any tracked point,
//! - [`HoverTracker`] interrupts when the hovered target changes.

use crate::utils::Point;
use log::debug;

/// Edge-triggered run counter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DwellCounter {
    threshold: u32,
    count: u32,
    completed: bool,
}

impl DwellCounter {
    /// Create a counter that fires after `threshold` held frames
    #[must_use]
    pub const fn new(threshold: u32) -> Self {
        Self {
            threshold,
            count: 0,
            completed: false,
        }
    }

    /// Count one stationary frame. Returns true on the frame the threshold is reached.
    pub fn hold(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.count = self.count.saturating_add(1);
        if self.count >= self.threshold {
            self.completed = true;
            return true;
        }
        false
    }

    /// Restart the run
    pub fn interrupt(&mut self) {
        self.count = 0;
        self.completed = false;
    }

    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    #[must_use]
    pub const fn threshold(&self) -> u32 {
        self.threshold
    }

    /// True once fired and until the next interrupt
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Fraction of the threshold reached, clamped to [0, 1]
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.threshold == 0 {
            return 1.0;
        }
        #[allow(clippy::cast_precision_loss)] // Frame counts are small
        let ratio = self.count as f32 / self.threshold as f32;
        ratio.clamp(0.0, 1.0)
    }
}

/// Outcome of one tracker update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DwellUpdate {
    /// Some tracked point moved at least the motion threshold
    pub moving: bool,
    /// The dwell completed on this frame
    pub fired: bool,
    /// Progress after this frame
    pub progress: f32,
}

/// Dwell detection over a group of points sharing one counter.
///
/// Positions are compared slot by slot with the previous frame. A frame
/// without a previous position for its slots (first frame, after a reset,
/// or after the slot count changed) only seeds the positions and counts as
/// stationary.
#[derive(Debug, Clone)]
pub struct DwellTracker {
    motion_threshold: f64,
    last_positions: Vec<Point>,
    counter: DwellCounter,
}

impl DwellTracker {
    /// Create a tracker
    #[must_use]
    pub const fn new(motion_threshold: f64, dwell_frames: u32) -> Self {
        Self {
            motion_threshold,
            last_positions: Vec::new(),
            counter: DwellCounter::new(dwell_frames),
        }
    }

    /// Feed the current positions of all tracked points
    pub fn update(&mut self, positions: &[Point]) -> DwellUpdate {
        let moving = self.last_positions.len() == positions.len()
            && self
                .last_positions
                .iter()
                .zip(positions)
                .any(|(last, now)| last.distance(*now) >= self.motion_threshold);

        self.last_positions.clear();
        self.last_positions.extend_from_slice(positions);

        let fired = if moving {
            self.counter.interrupt();
            false
        } else {
            self.counter.hold()
        };

        if fired {
            debug!("Dwell completed after {} frames", self.counter.count());
        }

        DwellUpdate {
            moving,
            fired,
            progress: self.counter.progress(),
        }
    }

    /// Forget positions and progress
    pub fn reset(&mut self) {
        self.last_positions.clear();
        self.counter.interrupt();
    }

    #[must_use]
    pub fn last_positions(&self) -> &[Point] {
        &self.last_positions
    }

    #[must_use]
    pub const fn counter(&self) -> &DwellCounter {
        &self.counter
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        self.counter.progress()
    }
}

/// Dwell over discrete targets, e.g. on-screen buttons
#[derive(Debug, Clone)]
pub struct HoverTracker<K> {
    target: Option<K>,
    counter: DwellCounter,
}

impl<K: Copy + PartialEq> HoverTracker<K> {
    #[must_use]
    pub const fn new(hover_frames: u32) -> Self {
        Self {
            target: None,
            counter: DwellCounter::new(hover_frames),
        }
    }

    /// Feed the currently hovered target. Returns it on the frame the hover completes.
    pub fn update(&mut self, hovered: Option<K>) -> Option<K> {
        let Some(target) = hovered else {
            self.reset();
            return None;
        };

        if self.target != Some(target) {
            self.target = Some(target);
            self.counter.interrupt();
        }

        self.counter.hold().then_some(target)
    }

    pub fn reset(&mut self) {
        self.target = None;
        self.counter.interrupt();
    }

    #[must_use]
    pub const fn target(&self) -> Option<K> {
        self.target
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        self.counter.progress()
    }
}
