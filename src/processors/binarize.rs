//! Ink mask extraction: smoothing and automatic thresholding.
//!
//! This module separates ink strokes from the canvas background. The input
//! (already inverted to bright-ink-on-dark) is smoothed with a small
//! Gaussian kernel to suppress antialiasing jitter at stroke edges, then
//! binarized with Otsu's method, which picks a data-driven cut point
//! between ink and background so no manual threshold is required.

use image::GrayImage;
use imageproc::contrast::{ThresholdType, otsu_level, threshold};
use imageproc::filter::gaussian_blur_f32;
use tracing::debug;

/// Derives the Gaussian sigma from a kernel side length.
///
/// Standard rule used when a blur is specified by kernel size alone:
/// `0.3 * ((k - 1) / 2 - 1) + 0.8`, which gives 1.1 for the default
/// 5-pixel kernel.
fn sigma_for_kernel(kernel: u32) -> f32 {
    0.3 * ((kernel as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Converts a smoothed grayscale image into a binary ink mask.
///
/// The binarizer owns the smoothing parameters so a pipeline configured
/// once keeps producing identical masks for identical input.
#[derive(Debug)]
pub struct InkBinarizer {
    /// Sigma of the Gaussian blur applied before thresholding.
    pub blur_sigma: f32,
}

impl InkBinarizer {
    /// Creates a binarizer whose blur matches the given kernel side length.
    ///
    /// # Arguments
    ///
    /// * `blur_kernel` - Side length of the smoothing kernel (odd, >= 1)
    ///
    /// # Returns
    ///
    /// A new `InkBinarizer` instance.
    pub fn new(blur_kernel: u32) -> Self {
        Self {
            blur_sigma: sigma_for_kernel(blur_kernel),
        }
    }

    /// Produces the `{0, 255}` ink mask for an inverted grayscale image.
    ///
    /// Samples above the Otsu level become foreground (255), everything
    /// else background (0). A uniform input degenerates to an entirely
    /// background (or entirely foreground) mask rather than failing; the
    /// caller's fallback policy handles that case.
    ///
    /// # Arguments
    ///
    /// * `img` - Inverted grayscale image (bright ink on dark background)
    ///
    /// # Returns
    ///
    /// The binary mask, same dimensions as the input.
    pub fn apply(&self, img: &GrayImage) -> GrayImage {
        let blurred = gaussian_blur_f32(img, self.blur_sigma);
        let level = otsu_level(&blurred);
        debug!(level, "otsu threshold selected");
        threshold(&blurred, level, ThresholdType::Binary)
    }
}
