//! Draws [`Overlay`] commands onto an `OpenCV` display frame.

use crate::{
    overlay::{Color, DrawCommand, Overlay, TextStyle},
    utils::{image_conversion::rgb_to_bgr_mat, safe_cast::u32_to_i32, BoundingBox, Point},
    Result,
};
use image::RgbImage;
use opencv::{
    core::{self, Mat, Scalar, Size, Vec3b, Vector},
    imgproc::{self, FILLED, FONT_HERSHEY_SIMPLEX, LINE_8},
    prelude::*,
};

/// Apply every command in order; later commands draw on top
///
/// # Errors
///
/// Returns an error if an `OpenCV` drawing call fails
pub fn render_overlay(display: &mut Mat, overlay: &Overlay) -> Result<()> {
    for command in overlay.commands() {
        draw_command(display, command)?;
    }
    Ok(())
}

fn draw_command(display: &mut Mat, command: &DrawCommand) -> Result<()> {
    match command {
        DrawCommand::Rectangle { rect, color, thickness } => {
            imgproc::rectangle_points(
                display,
                cv_point(rect.top_left()),
                cv_point(rect.bottom_right()),
                scalar(*color),
                *thickness,
                LINE_8,
                0,
            )?;
        }
        DrawCommand::Polyline {
            points,
            color,
            thickness,
            alpha,
        } => draw_translucent_polyline(display, points, *color, *thickness, *alpha)?,
        DrawCommand::ProgressRing {
            center,
            radius,
            thickness,
            progress,
        } => draw_progress_ring(display, *center, *radius, *thickness, *progress)?,
        DrawCommand::Image { origin, image } => paste_image(display, *origin, image)?,
        DrawCommand::Text {
            text,
            origin,
            color,
            style,
        } => {
            let (scale, weight) = text_metrics(*style);
            imgproc::put_text(
                display,
                text,
                cv_point(*origin),
                FONT_HERSHEY_SIMPLEX,
                scale,
                scalar(*color),
                weight,
                LINE_8,
                false,
            )?;
        }
        DrawCommand::Button {
            rect,
            fill,
            border,
            label,
        } => draw_button(display, *rect, *fill, *border, label)?,
    }
    Ok(())
}

const fn text_metrics(style: TextStyle) -> (f64, i32) {
    match style {
        TextStyle::Heading => (1.2, 3),
        TextStyle::Label => (0.6, 2),
    }
}

fn scalar(color: Color) -> Scalar {
    Scalar::new(f64::from(color.b), f64::from(color.g), f64::from(color.r), 0.0)
}

fn cv_point(point: Point) -> core::Point {
    core::Point::new(point.x, point.y)
}

/// Lines drawn on a copy, then blended back with `alpha`
fn draw_translucent_polyline(display: &mut Mat, points: &[Point], color: Color, thickness: i32, alpha: f32) -> Result<()> {
    let mut layer = display.try_clone()?;
    let mut polylines = Vector::<Vector<core::Point>>::new();
    polylines.push(points.iter().copied().map(cv_point).collect());
    imgproc::polylines(&mut layer, &polylines, false, scalar(color), thickness, LINE_8, 0)?;

    let alpha = f64::from(alpha.clamp(0.0, 1.0));
    let mut blended = Mat::default();
    core::add_weighted(&layer, alpha, &*display, 1.0 - alpha, 0.0, &mut blended, -1)?;
    *display = blended;
    Ok(())
}

fn draw_progress_ring(display: &mut Mat, center: Point, radius: i32, thickness: i32, progress: f32) -> Result<()> {
    let center = cv_point(center);
    imgproc::circle(display, center, radius, scalar(Color::LIGHT_GRAY), thickness, LINE_8, 0)?;

    let sweep = 360.0 * f64::from(progress.clamp(0.0, 1.0));
    if sweep > 0.0 {
        imgproc::ellipse(
            display,
            center,
            Size::new(radius, radius),
            -90.0,
            0.0,
            sweep,
            scalar(Color::GREEN),
            thickness,
            LINE_8,
            0,
        )?;
    }
    Ok(())
}

/// Copy `image` with its top-left at `origin`, clipped to the display
fn paste_image(display: &mut Mat, origin: Point, image: &RgbImage) -> Result<()> {
    let source = rgb_to_bgr_mat(image)?;
    let width = u32_to_i32(image.width())?;
    let height = u32_to_i32(image.height())?;

    for y in 0..height {
        let dy = origin.y + y;
        if dy < 0 || dy >= display.rows() {
            continue;
        }
        for x in 0..width {
            let dx = origin.x + x;
            if dx < 0 || dx >= display.cols() {
                continue;
            }
            *display.at_2d_mut::<Vec3b>(dy, dx)? = *source.at_2d::<Vec3b>(y, x)?;
        }
    }
    Ok(())
}

fn draw_button(display: &mut Mat, rect: BoundingBox, fill: Color, border: Option<Color>, label: &str) -> Result<()> {
    let top_left = cv_point(rect.top_left());
    let bottom_right = cv_point(rect.bottom_right());

    if let Some(border) = border {
        imgproc::rectangle_points(display, top_left, bottom_right, scalar(border), 2, LINE_8, 0)?;
    }
    imgproc::rectangle_points(display, top_left, bottom_right, scalar(fill), FILLED, LINE_8, 0)?;

    let (scale, weight) = text_metrics(TextStyle::Label);
    let mut baseline = 0;
    let size = imgproc::get_text_size(label, FONT_HERSHEY_SIMPLEX, scale, weight, &mut baseline)?;
    let origin = core::Point::new(
        rect.x_min + (rect.width() - size.width) / 2,
        rect.y_min + (rect.height() + size.height) / 2,
    );
    imgproc::put_text(
        display,
        label,
        origin,
        FONT_HERSHEY_SIMPLEX,
        scale,
        scalar(Color::BLACK),
        weight,
        LINE_8,
        false,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn blank(width: i32, height: i32) -> Mat {
        Mat::new_rows_cols_with_default(height, width, core::CV_8UC3, Scalar::all(0.0)).unwrap()
    }

    #[test]
    fn test_image_is_pasted_and_clipped() {
        let mut display = blank(40, 30);
        let mut overlay = Overlay::new();
        let image = RgbImage::from_pixel(20, 20, image::Rgb([255, 0, 0]));
        overlay.image(Point::new(30, 20), Arc::new(image));

        render_overlay(&mut display, &overlay).unwrap();
        assert_eq!(*display.at_2d::<Vec3b>(25, 35).unwrap(), Vec3b::from([0, 0, 255]));
        assert_eq!(*display.at_2d::<Vec3b>(5, 5).unwrap(), Vec3b::from([0, 0, 0]));
    }

    #[test]
    fn test_filled_button_uses_bgr() {
        let mut display = blank(100, 60);
        let mut overlay = Overlay::new();
        overlay.button(BoundingBox::new(0, 0, 99, 59), Color::YELLOW, None, "");

        render_overlay(&mut display, &overlay).unwrap();
        assert_eq!(*display.at_2d::<Vec3b>(2, 2).unwrap(), Vec3b::from([0, 255, 255]));
    }
}
