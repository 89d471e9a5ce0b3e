//! Digit geometry normalization: scale, pad, and square up.
//!
//! Classifiers trained on canonical digit data expect the digit to span a
//! 20-unit long edge centered in a 28x28 canvas with a 4-unit margin. This
//! module takes the cropped ink mask and reproduces that convention:
//! aspect-preserving resize of the long edge, symmetric zero padding, and a
//! final forcing resize whenever integer rounding left the padded canvas
//! off-size.

use crate::core::PreprocessConfig;
use image::{GrayImage, imageops};
use tracing::debug;

/// Resizes cropped digit masks onto the classifier's canvas.
///
/// This struct handles the geometric half of preprocessing: it owns the
/// canvas dimensions and produces images of exactly `canvas_size` squared.
#[derive(Debug)]
pub struct DigitResize {
    /// Length the digit's longer edge is scaled to.
    pub crop_long_edge: u32,
    /// Side length of the output canvas.
    pub canvas_size: u32,
    /// Margin padded on every side of the resized digit.
    pub margin: u32,
}

impl DigitResize {
    /// Creates a resizer from a pipeline configuration.
    pub fn new(config: &PreprocessConfig) -> Self {
        Self {
            crop_long_edge: config.crop_long_edge,
            canvas_size: config.canvas_size,
            margin: config.margin,
        }
    }

    /// Scales an image so its longer edge is exactly `crop_long_edge`.
    ///
    /// The shorter edge is scaled by the same ratio, truncated to an
    /// integer and floored at 1 pixel, so proportions are preserved within
    /// rounding.
    ///
    /// # Arguments
    ///
    /// * `img` - The cropped ink mask (nonzero dimensions)
    ///
    /// # Returns
    ///
    /// The resized image.
    pub fn resize_to_long_edge(&self, img: &GrayImage) -> GrayImage {
        let (width, height) = img.dimensions();

        let (new_width, new_height) = if height > width {
            let scaled = (width as f32 / height as f32) * self.crop_long_edge as f32;
            ((scaled as u32).max(1), self.crop_long_edge)
        } else {
            let scaled = (height as f32 / width as f32) * self.crop_long_edge as f32;
            (self.crop_long_edge, (scaled as u32).max(1))
        };

        // Triangle stands in for OpenCV's area interpolation; the image
        // crate has no dedicated area filter.
        imageops::resize(img, new_width, new_height, imageops::FilterType::Triangle)
    }

    /// Pads the resized digit onto the canvas.
    ///
    /// Adds `margin` background pixels on every side. If integer rounding
    /// during the long-edge resize left the padded result off-size, a
    /// final resize forces exactly `canvas_size` squared.
    ///
    /// # Arguments
    ///
    /// * `img` - The resized digit
    ///
    /// # Returns
    ///
    /// An image of exactly `canvas_size` x `canvas_size`.
    pub fn pad_to_canvas(&self, img: &GrayImage) -> GrayImage {
        let padded = crate::utils::pad_gray(img, self.margin, 0);

        let (width, height) = padded.dimensions();
        if width == self.canvas_size && height == self.canvas_size {
            return padded;
        }

        debug!(width, height, canvas = self.canvas_size, "forcing canvas size");
        imageops::resize(
            &padded,
            self.canvas_size,
            self.canvas_size,
            imageops::FilterType::Triangle,
        )
    }

    /// Applies the full geometric normalization to a cropped mask.
    ///
    /// # Arguments
    ///
    /// * `img` - The cropped ink mask
    ///
    /// # Returns
    ///
    /// An image of exactly `canvas_size` x `canvas_size`.
    pub fn apply(&self, img: &GrayImage) -> GrayImage {
        let resized = self.resize_to_long_edge(img);
        self.pad_to_canvas(&resized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn resizer() -> DigitResize {
        DigitResize::new(&PreprocessConfig::default())
    }

    #[test]
    fn test_tall_aspect_is_preserved() {
        // 2:1 tall rectangle stays 2:1 after the long-edge resize.
        let img = GrayImage::from_pixel(20, 40, Luma([255]));
        let resized = resizer().resize_to_long_edge(&img);
        assert_eq!(resized.dimensions(), (10, 20));
    }

    #[test]
    fn test_wide_aspect_is_preserved() {
        let img = GrayImage::from_pixel(40, 20, Luma([255]));
        let resized = resizer().resize_to_long_edge(&img);
        assert_eq!(resized.dimensions(), (20, 10));
    }

    #[test]
    fn test_square_fills_long_edge() {
        let img = GrayImage::from_pixel(35, 35, Luma([255]));
        let resized = resizer().resize_to_long_edge(&img);
        assert_eq!(resized.dimensions(), (20, 20));
    }

    #[test]
    fn test_extreme_aspect_keeps_one_pixel() {
        // A 1x100 stroke would truncate to zero width without the floor.
        let img = GrayImage::from_pixel(1, 100, Luma([255]));
        let resized = resizer().resize_to_long_edge(&img);
        assert_eq!(resized.dimensions(), (1, 20));
    }

    #[test]
    fn test_apply_always_yields_canvas() {
        for (w, h) in [(1, 1), (3, 17), (100, 40), (20, 40), (400, 400)] {
            let img = GrayImage::from_pixel(w, h, Luma([255]));
            let out = resizer().apply(&img);
            assert_eq!(out.dimensions(), (28, 28), "input {}x{}", w, h);
        }
    }

    #[test]
    fn test_margin_stays_background() {
        let img = GrayImage::from_pixel(30, 30, Luma([255]));
        let out = resizer().apply(&img);
        // Corners sit inside the 4-pixel margin.
        assert_eq!(out.get_pixel(0, 0)[0], 0);
        assert_eq!(out.get_pixel(27, 27)[0], 0);
        // The center belongs to the digit.
        assert_eq!(out.get_pixel(14, 14)[0], 255);
    }
}
