//! Utility functions for basic image operations.
//!
//! This module provides functions for converting, inverting, cropping, and
//! padding the images that flow through the digit pipeline. All functions
//! produce new buffers; no input is mutated in place.

use crate::core::DigitError;
use crate::processors::BoundingBox;
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, RgbImage};

/// Converts a DynamicImage to a GrayImage.
///
/// This function takes a DynamicImage (which can be in any format) and
/// reduces it to a GrayImage (8-bit grayscale) using the standard
/// perceptual luminance weighting. Single-channel input passes through
/// unchanged.
///
/// # Arguments
///
/// * `img` - The DynamicImage to convert
///
/// # Returns
///
/// * `GrayImage` - The converted grayscale image
pub fn dynamic_to_gray(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Inverts the polarity of a grayscale image.
///
/// Every sample `v` becomes `255 - v`, turning dark-ink-on-light-background
/// drawings into the bright-digit-on-dark-background convention classifiers
/// are trained on. Applying the function twice restores the original image.
///
/// # Arguments
///
/// * `img` - The grayscale image to invert
///
/// # Returns
///
/// * `GrayImage` - A new inverted image
pub fn invert_colors(img: &GrayImage) -> GrayImage {
    ImageBuffer::from_fn(img.width(), img.height(), |x, y| {
        Luma([255 - img.get_pixel(x, y)[0]])
    })
}

/// Creates a GrayImage from raw pixel data.
///
/// The data must contain exactly one byte per pixel.
///
/// # Arguments
///
/// * `width` - The width of the image in pixels
/// * `height` - The height of the image in pixels
/// * `data` - A vector containing the raw pixel data
///
/// # Returns
///
/// * `Ok(GrayImage)` - The created image if the buffer matches the dimensions
/// * `Err(DigitError)` - If the buffer length does not match the dimensions
pub fn create_gray_image(width: u32, height: u32, data: Vec<u8>) -> Result<GrayImage, DigitError> {
    let expected = (width as usize) * (height as usize);
    if data.len() != expected {
        return Err(DigitError::invalid_image(format!(
            "raw buffer length {} does not match {}x{} grayscale image",
            data.len(),
            width,
            height
        )));
    }

    ImageBuffer::from_raw(width, height, data).ok_or_else(|| {
        DigitError::invalid_image(format!("unreadable {}x{} grayscale buffer", width, height))
    })
}

/// Creates an RgbImage from raw pixel data.
///
/// The data must be in RGB format, three bytes per pixel.
///
/// # Arguments
///
/// * `width` - The width of the image in pixels
/// * `height` - The height of the image in pixels
/// * `data` - A vector containing the raw pixel data (RGB format)
///
/// # Returns
///
/// * `Ok(RgbImage)` - The created image if the buffer matches the dimensions
/// * `Err(DigitError)` - If the buffer length does not match the dimensions
pub fn create_rgb_image(width: u32, height: u32, data: Vec<u8>) -> Result<RgbImage, DigitError> {
    let expected = (width as usize) * (height as usize) * 3;
    if data.len() != expected {
        return Err(DigitError::invalid_image(format!(
            "raw buffer length {} does not match {}x{} RGB image",
            data.len(),
            width,
            height
        )));
    }

    ImageBuffer::from_raw(width, height, data).ok_or_else(|| {
        DigitError::invalid_image(format!("unreadable {}x{} RGB buffer", width, height))
    })
}

/// Crops a grayscale image to a bounding box.
///
/// # Arguments
///
/// * `img` - Reference to the source grayscale image
/// * `region` - The bounding box to crop to
///
/// # Returns
///
/// * `Ok(GrayImage)` - The cropped image region
/// * `Err(DigitError)` - If the box extends outside the image
pub fn crop_gray(img: &GrayImage, region: &BoundingBox) -> Result<GrayImage, DigitError> {
    let (img_width, img_height) = img.dimensions();

    if region.right() > img_width || region.bottom() > img_height {
        return Err(DigitError::invalid_image(format!(
            "crop region {}x{}+{}+{} extends outside {}x{} image",
            region.width, region.height, region.x, region.y, img_width, img_height
        )));
    }

    let mut cropped = GrayImage::new(region.width, region.height);
    for y in 0..region.height {
        for x in 0..region.width {
            let pixel = img.get_pixel(region.x + x, region.y + y);
            cropped.put_pixel(x, y, *pixel);
        }
    }

    Ok(cropped)
}

/// Pads a grayscale image symmetrically with a constant value.
///
/// The source image is placed `margin` pixels in from every edge of a new
/// canvas filled with `fill`.
///
/// # Arguments
///
/// * `img` - Reference to the source grayscale image
/// * `margin` - Number of pixels added on every side
/// * `fill` - Sample value used for the padding
///
/// # Returns
///
/// * `GrayImage` - The padded image
pub fn pad_gray(img: &GrayImage, margin: u32, fill: u8) -> GrayImage {
    if margin == 0 {
        return img.clone();
    }

    let (src_width, src_height) = img.dimensions();
    let mut padded = GrayImage::from_pixel(
        src_width + 2 * margin,
        src_height + 2 * margin,
        Luma([fill]),
    );

    image::imageops::overlay(&mut padded, img, margin as i64, margin as i64);

    padded
}
