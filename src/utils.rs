//! Pixel geometry shared by the capture sessions and the renderer.

pub mod safe_cast;

#[cfg(feature = "gui")]
pub mod image_conversion;

/// Integer pixel position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Point {
    /// Create a new point
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (f64::from(self.x) - f64::from(other.x)).hypot(f64::from(self.y) - f64::from(other.y))
    }

    /// Shift by a fixed amount
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// Axis-aligned box in pixel coordinates.
///
/// As a crop region the maximum edges are exclusive, so `width()` is
/// `x_max - x_min`. Button hit-testing uses the inclusive variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

impl BoundingBox {
    /// Create a box from its edges
    #[must_use]
    pub const fn new(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Self {
        Self { x_min, y_min, x_max, y_max }
    }

    /// Create a box from a top-left corner and a size
    #[must_use]
    pub const fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Extrema of a point set, `None` when the set is empty
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let init = Self::new(first.x, first.y, first.x, first.y);
        Some(points.iter().skip(1).fold(init, |b, p| {
            Self::new(b.x_min.min(p.x), b.y_min.min(p.y), b.x_max.max(p.x), b.y_max.max(p.y))
        }))
    }

    #[must_use]
    pub const fn width(&self) -> i32 {
        self.x_max - self.x_min
    }

    #[must_use]
    pub const fn height(&self) -> i32 {
        self.y_max - self.y_min
    }

    /// True when the box covers no pixels
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Inclusive hit test, edges count as inside
    #[must_use]
    pub const fn contains(&self, point: Point) -> bool {
        self.x_min <= point.x && point.x <= self.x_max && self.y_min <= point.y && point.y <= self.y_max
    }

    /// Exclusive hit test, edges count as outside
    #[must_use]
    pub const fn contains_strict(&self, point: Point) -> bool {
        self.x_min < point.x && point.x < self.x_max && self.y_min < point.y && point.y < self.y_max
    }

    #[must_use]
    pub const fn top_left(&self) -> Point {
        Point::new(self.x_min, self.y_min)
    }

    #[must_use]
    pub const fn bottom_right(&self) -> Point {
        Point::new(self.x_max, self.y_max)
    }
}

/// Crop box for a freehand path.
///
/// The path extrema are first clamped to the last valid pixel, then grown
/// by `margin` and clamped again. Returns `None` for an empty path; the
/// result may still be empty (see [`BoundingBox::is_empty`]).
pub fn path_crop_box(points: &[Point], margin: i32, frame_width: i32, frame_height: i32) -> Option<BoundingBox> {
    let extrema = BoundingBox::from_points(points)?;
    let last_x = frame_width - 1;
    let last_y = frame_height - 1;

    let x_min = extrema.x_min.max(0);
    let y_min = extrema.y_min.max(0);
    let x_max = extrema.x_max.min(last_x);
    let y_max = extrema.y_max.min(last_y);

    Some(BoundingBox::new(
        (x_min - margin).max(0),
        (y_min - margin).max(0),
        (x_max + margin).min(last_x),
        (y_max + margin).min(last_y),
    ))
}

/// Box spanned by two fingertips with `padding` on every side.
///
/// A negative padding shrinks the box. Edges are clamped to the frame
/// (`0..=width`, `0..=height`).
#[must_use]
pub fn padded_pair_box(a: Point, b: Point, padding: i32, frame_width: i32, frame_height: i32) -> BoundingBox {
    BoundingBox::new(
        a.x.min(b.x).saturating_sub(padding).max(0),
        a.y.min(b.y).saturating_sub(padding).max(0),
        a.x.max(b.x).saturating_add(padding).min(frame_width),
        a.y.max(b.y).saturating_add(padding).min(frame_height),
    )
}
