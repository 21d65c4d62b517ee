//! Capture artifacts: a crop of the undecorated frame plus its preview.

use crate::{
    constants::{
        PREVIEW_BOTTOM_INSET, PREVIEW_RIGHT_INSET, SAVE_BUTTON_BOTTOM_INSET, SAVE_BUTTON_HEIGHT,
        SAVE_BUTTON_RIGHT_INSET, SAVE_BUTTON_WIDTH,
    },
    overlay::Overlay,
    utils::{
        safe_cast::{i32_to_u32, u32_to_i32},
        BoundingBox, Point,
    },
};
use image::{imageops, imageops::FilterType, RgbImage};
use log::debug;
use std::sync::Arc;

/// A pending or saved capture
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureArtifact {
    /// Full-resolution crop of the raw frame
    pub crop: RgbImage,
    /// Square thumbnail of the crop
    pub preview: Arc<RgbImage>,
    /// Region of the frame the crop was taken from
    pub region: BoundingBox,
}

/// Crop `region` out of `frame` and build a `preview_size` square thumbnail.
///
/// Returns `None` when the region is empty or falls outside the frame.
#[must_use]
pub fn crop_artifact(frame: &RgbImage, region: BoundingBox, preview_size: u32) -> Option<CaptureArtifact> {
    if region.is_empty() || preview_size == 0 {
        debug!("Skipping capture of empty region {:?}", region);
        return None;
    }

    let x = i32_to_u32(region.x_min).ok()?;
    let y = i32_to_u32(region.y_min).ok()?;
    let width = i32_to_u32(region.width()).ok()?;
    let height = i32_to_u32(region.height()).ok()?;
    if x.saturating_add(width) > frame.width() || y.saturating_add(height) > frame.height() {
        debug!("Capture region {:?} exceeds frame {:?}", region, frame.dimensions());
        return None;
    }

    let crop = imageops::crop_imm(frame, x, y, width, height).to_image();
    let preview = imageops::resize(&crop, preview_size, preview_size, FilterType::Triangle);

    Some(CaptureArtifact {
        crop,
        preview: Arc::new(preview),
        region,
    })
}

/// Frame dimensions as signed pixel coordinates
#[must_use]
pub fn frame_size(frame: &RgbImage) -> (i32, i32) {
    (
        u32_to_i32(frame.width()).unwrap_or(i32::MAX),
        u32_to_i32(frame.height()).unwrap_or(i32::MAX),
    )
}

/// Save button rectangle for a frame of the given size
#[must_use]
pub const fn save_button_rect(frame_width: i32, frame_height: i32) -> BoundingBox {
    BoundingBox::from_origin_size(
        frame_width - SAVE_BUTTON_RIGHT_INSET,
        frame_height - SAVE_BUTTON_BOTTOM_INSET,
        SAVE_BUTTON_WIDTH,
        SAVE_BUTTON_HEIGHT,
    )
}

/// Paste a preview thumbnail into the bottom-right corner, above the save button
pub fn draw_preview(overlay: &mut Overlay, frame_width: i32, frame_height: i32, preview: &Arc<RgbImage>) {
    let (Ok(w), Ok(h)) = (u32_to_i32(preview.width()), u32_to_i32(preview.height())) else {
        return;
    };
    let origin = Point::new(
        frame_width - w - PREVIEW_RIGHT_INSET,
        frame_height - h - PREVIEW_BOTTOM_INSET,
    );
    overlay.image(origin, Arc::clone(preview));
}
