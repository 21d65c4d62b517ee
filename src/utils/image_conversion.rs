//! Conversions between `OpenCV` BGR frames and `image` RGB buffers.

use crate::{
    utils::safe_cast::{i32_to_u32, u32_to_i32},
    Error, Result,
};
use image::RgbImage;
use opencv::{
    core::{Mat, Scalar, CV_8UC3},
    prelude::*,
};

/// Convert an 8-bit BGR Mat to an RGB image
///
/// # Errors
/// * Returns error if the Mat is not 8-bit 3-channel
/// * Returns error if Mat data cannot be accessed
pub fn bgr_mat_to_rgb(mat: &Mat) -> Result<RgbImage> {
    if mat.typ() != CV_8UC3 {
        return Err(Error::InvalidInput(format!(
            "Expected an 8-bit BGR frame, got Mat type {}",
            mat.typ()
        )));
    }

    let width = i32_to_u32(mat.cols())?;
    let height = i32_to_u32(mat.rows())?;

    // Row padding would break the flat copy below
    let owned;
    let continuous = if mat.is_continuous() {
        mat
    } else {
        owned = mat.try_clone()?;
        &owned
    };

    let bgr = continuous.data_bytes()?;
    let mut rgb = Vec::with_capacity(bgr.len());
    for pixel in bgr.chunks_exact(3) {
        rgb.extend_from_slice(&[pixel[2], pixel[1], pixel[0]]);
    }

    RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| Error::InvalidInput(format!("Frame buffer does not match {width}x{height}")))
}

/// Convert an RGB image to an 8-bit BGR Mat
///
/// # Errors
/// * Returns error if the image is too large for `OpenCV`
/// * Returns error if Mat creation fails
pub fn rgb_to_bgr_mat(image: &RgbImage) -> Result<Mat> {
    let rows = u32_to_i32(image.height())?;
    let cols = u32_to_i32(image.width())?;

    let mut mat = Mat::new_rows_cols_with_default(rows, cols, CV_8UC3, Scalar::all(0.0))?;
    let bgr = mat.data_bytes_mut()?;
    for (dst, src) in bgr.chunks_exact_mut(3).zip(image.as_raw().chunks_exact(3)) {
        dst[0] = src[2];
        dst[1] = src[1];
        dst[2] = src[0];
    }

    Ok(mat)
}
