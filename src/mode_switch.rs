//! Hover-activated toggle between the capture modes.

use crate::{
    constants::{DEFAULT_MODE_HOVER_FRAMES, MODE_BUTTON_SIZE_FACTOR, MODE_BUTTON_SPACING_FACTOR},
    dwell::HoverTracker,
    overlay::{Color, Overlay},
    utils::{safe_cast::f64_to_i32_clamp, BoundingBox, Point},
};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which capture session is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
    /// One hand draws a path
    #[default]
    Freehand,
    /// Two hands span a box
    TwoPoint,
}

impl CaptureMode {
    pub const ALL: [Self; 2] = [Self::Freehand, Self::TwoPoint];

    /// Hands the landmark source should look for in this mode
    #[must_use]
    pub const fn max_hands(self) -> usize {
        match self {
            Self::Freehand => 1,
            Self::TwoPoint => 2,
        }
    }

    /// Caption of the mode's button
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Freehand => "option1",
            Self::TwoPoint => "option2",
        }
    }
}

impl fmt::Display for CaptureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Freehand => write!(f, "freehand"),
            Self::TwoPoint => write!(f, "two-point"),
        }
    }
}

/// Mode button rectangles for a frame size.
///
/// Both buttons sit in the top-right quarter, `size` high and
/// `spacing + size` wide.
#[must_use]
pub fn button_layout(frame_width: i32, frame_height: i32) -> [(CaptureMode, BoundingBox); 2] {
    let size = f64_to_i32_clamp(
        f64::from(frame_width.min(frame_height)) * MODE_BUTTON_SIZE_FACTOR,
        0,
        i32::MAX,
    );
    let spacing = f64_to_i32_clamp(f64::from(size) * MODE_BUTTON_SPACING_FACTOR, 0, i32::MAX);
    let width = spacing + size;
    let top = spacing - size;

    let first_x = f64_to_i32_clamp(
        f64::from(frame_width) - f64::from(frame_width) / 4.0,
        0,
        i32::MAX,
    );
    let second_x = first_x + width - size + spacing;

    [
        (CaptureMode::Freehand, BoundingBox::from_origin_size(first_x, top, width, size)),
        (CaptureMode::TwoPoint, BoundingBox::from_origin_size(second_x, top, width, size)),
    ]
}

/// Active mode plus the hover state of its buttons
#[derive(Debug, Clone)]
pub struct ModeSwitch {
    active: CaptureMode,
    hover: HoverTracker<CaptureMode>,
}

impl Default for ModeSwitch {
    fn default() -> Self {
        Self::new(CaptureMode::default(), DEFAULT_MODE_HOVER_FRAMES)
    }
}

impl ModeSwitch {
    #[must_use]
    pub const fn new(initial: CaptureMode, hover_frames: u32) -> Self {
        Self {
            active: initial,
            hover: HoverTracker::new(hover_frames),
        }
    }

    #[must_use]
    pub const fn active(&self) -> CaptureMode {
        self.active
    }

    /// Button currently hovered, if any
    #[must_use]
    pub const fn hovered(&self) -> Option<CaptureMode> {
        self.hover.target()
    }

    /// Feed the pointer for this frame. Returns the new mode when it changed.
    pub fn update(&mut self, pointer: Option<Point>, frame_width: i32, frame_height: i32) -> Option<CaptureMode> {
        let hovered = pointer.and_then(|p| {
            button_layout(frame_width, frame_height)
                .into_iter()
                .find(|(_, rect)| rect.contains_strict(p))
                .map(|(mode, _)| mode)
        });

        let selected = self.hover.update(hovered)?;
        if selected == self.active {
            return None;
        }

        info!("Switching capture mode from {} to {}", self.active, selected);
        self.active = selected;
        Some(selected)
    }

    /// Draw both buttons, the active one highlighted
    pub fn render(&self, overlay: &mut Overlay, frame_width: i32, frame_height: i32) {
        for (mode, rect) in button_layout(frame_width, frame_height) {
            let fill = if mode == self.active { Color::CYAN } else { Color::GRAY };
            overlay.button(rect, fill, Some(Color::BLACK), mode.label());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_1280x768() {
        let [(first, a), (second, b)] = button_layout(1280, 768);
        assert_eq!(first, CaptureMode::Freehand);
        assert_eq!(second, CaptureMode::TwoPoint);
        assert_eq!(a, BoundingBox::new(960, 28, 1102, 85));
        assert_eq!(b, BoundingBox::new(1130, 28, 1272, 85));
    }

    #[test]
    fn test_hover_switches_after_threshold() {
        let mut switch = ModeSwitch::default();
        let on_second = Some(Point::new(1200, 50));

        for _ in 0..29 {
            assert_eq!(switch.update(on_second, 1280, 768), None);
        }
        assert_eq!(switch.update(on_second, 1280, 768), Some(CaptureMode::TwoPoint));
        assert_eq!(switch.active(), CaptureMode::TwoPoint);

        // Continuing to hover does not fire again
        for _ in 0..100 {
            assert_eq!(switch.update(on_second, 1280, 768), None);
        }
    }

    #[test]
    fn test_hovering_active_button_is_noop() {
        let mut switch = ModeSwitch::new(CaptureMode::Freehand, 3);
        let on_first = Some(Point::new(1000, 50));
        for _ in 0..10 {
            assert_eq!(switch.update(on_first, 1280, 768), None);
        }
        assert_eq!(switch.active(), CaptureMode::Freehand);
    }

    #[test]
    fn test_edges_are_outside() {
        let mut switch = ModeSwitch::new(CaptureMode::Freehand, 1);
        assert_eq!(switch.update(Some(Point::new(1130, 50)), 1280, 768), None);
        assert_eq!(switch.hovered(), None);
        assert_eq!(switch.update(Some(Point::new(1131, 50)), 1280, 768), Some(CaptureMode::TwoPoint));
    }

    #[test]
    fn test_render_highlights_active() {
        let switch = ModeSwitch::new(CaptureMode::TwoPoint, 30);
        let mut overlay = Overlay::new();
        switch.render(&mut overlay, 1280, 768);
        assert_eq!(overlay.buttons_labelled("option1").count(), 1);
        assert_eq!(overlay.buttons_labelled("option2").count(), 1);
    }
}
