//! Backend-neutral draw commands.
//!
//! The capture core never touches display pixels. Each frame it emits an
//! [`Overlay`], an ordered list of [`DrawCommand`]s that a renderer applies
//! to the display copy of the frame. Later commands draw on top of earlier
//! ones.

use crate::utils::{BoundingBox, Point};
use image::RgbImage;
use std::sync::Arc;

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    pub const LIGHT_GRAY: Self = Self::rgb(200, 200, 200);
}

/// Text size hint for renderers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextStyle {
    /// Large status line
    Heading,
    /// Button caption
    Label,
}

/// One primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Rectangle outline
    Rectangle {
        rect: BoundingBox,
        color: Color,
        thickness: i32,
    },
    /// Connected line segments blended over the frame
    Polyline {
        points: Vec<Point>,
        color: Color,
        thickness: i32,
        alpha: f32,
    },
    /// Gray circle with a clockwise arc from 12 o'clock covering `progress` of a turn
    ProgressRing {
        center: Point,
        radius: i32,
        thickness: i32,
        progress: f32,
    },
    /// Image pasted with its top-left corner at `origin`
    Image { origin: Point, image: Arc<RgbImage> },
    /// Text with its baseline starting at `origin`
    Text {
        text: String,
        origin: Point,
        color: Color,
        style: TextStyle,
    },
    /// Filled rectangle with a centered caption
    Button {
        rect: BoundingBox,
        fill: Color,
        border: Option<Color>,
        label: String,
    },
}

/// Ordered draw commands for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlay {
    commands: Vec<DrawCommand>,
}

impl Overlay {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn rectangle(&mut self, rect: BoundingBox, color: Color, thickness: i32) {
        self.push(DrawCommand::Rectangle { rect, color, thickness });
    }

    pub fn polyline(&mut self, points: &[Point], color: Color, thickness: i32, alpha: f32) {
        if points.len() < 2 {
            return;
        }
        self.push(DrawCommand::Polyline {
            points: points.to_vec(),
            color,
            thickness,
            alpha,
        });
    }

    pub fn progress_ring(&mut self, center: Point, radius: i32, thickness: i32, progress: f32) {
        self.push(DrawCommand::ProgressRing {
            center,
            radius,
            thickness,
            progress,
        });
    }

    pub fn image(&mut self, origin: Point, image: Arc<RgbImage>) {
        self.push(DrawCommand::Image { origin, image });
    }

    pub fn text(&mut self, text: impl Into<String>, origin: Point, color: Color, style: TextStyle) {
        self.push(DrawCommand::Text {
            text: text.into(),
            origin,
            color,
            style,
        });
    }

    pub fn button(&mut self, rect: BoundingBox, fill: Color, border: Option<Color>, label: impl Into<String>) {
        self.push(DrawCommand::Button {
            rect,
            fill,
            border,
            label: label.into(),
        });
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Rectangle outlines, in draw order
    pub fn rectangles(&self) -> impl Iterator<Item = &BoundingBox> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Rectangle { rect, .. } => Some(rect),
            _ => None,
        })
    }

    /// Buttons with the given caption
    pub fn buttons_labelled<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a BoundingBox> + 'a {
        self.commands.iter().filter_map(move |c| match c {
            DrawCommand::Button { rect, label: l, .. } if l == label => Some(rect),
            _ => None,
        })
    }

    /// Progress values of all rings, in draw order
    pub fn ring_progress(&self) -> impl Iterator<Item = f32> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::ProgressRing { progress, .. } => Some(*progress),
            _ => None,
        })
    }
}

impl IntoIterator for Overlay {
    type Item = DrawCommand;
    type IntoIter = std::vec::IntoIter<DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_needs_two_points() {
        let mut overlay = Overlay::new();
        overlay.polyline(&[Point::new(1, 1)], Color::RED, 5, 0.7);
        assert!(overlay.is_empty());
        overlay.polyline(&[Point::new(1, 1), Point::new(2, 2)], Color::RED, 5, 0.7);
        assert_eq!(overlay.len(), 1);
    }

    #[test]
    fn test_filters_by_kind() {
        let mut overlay = Overlay::new();
        overlay.rectangle(BoundingBox::new(0, 0, 10, 10), Color::GREEN, 2);
        overlay.button(BoundingBox::new(0, 0, 5, 5), Color::YELLOW, None, "Save");
        overlay.progress_ring(Point::new(3, 3), 20, 5, 0.25);

        assert_eq!(overlay.rectangles().count(), 1);
        assert_eq!(overlay.buttons_labelled("Save").count(), 1);
        assert_eq!(overlay.buttons_labelled("option1").count(), 0);
        assert_eq!(overlay.ring_progress().collect::<Vec<_>>(), vec![0.25]);
    }
}
