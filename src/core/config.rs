//! Configuration for the preprocessing pipeline.
//!
//! The configuration describes the geometry of the normalized digit
//! (canvas size, digit long edge, margin) and the smoothing kernel used
//! before thresholding. Defaults follow the canonical 28x28 convention.

use crate::core::constants::{
    DEFAULT_BLUR_KERNEL, DEFAULT_CANVAS_SIZE, DEFAULT_CROP_LONG_EDGE, DEFAULT_MARGIN,
};
use crate::core::errors::DigitError;
use serde::{Deserialize, Serialize};

/// Configuration for the ink preprocessing pipeline.
///
/// This struct holds the geometric and smoothing parameters of the
/// pipeline. All fields have defaults matching the canonical digit input
/// convention, so `PreprocessConfig::default()` is the configuration used
/// by classifiers trained on standard 28x28 digit data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Side length of the output canvas.
    pub canvas_size: u32,
    /// Length the digit's longer edge is scaled to before padding.
    pub crop_long_edge: u32,
    /// Margin padded on every side of the resized digit.
    pub margin: u32,
    /// Side length of the Gaussian smoothing kernel (must be odd).
    pub blur_kernel: u32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            canvas_size: DEFAULT_CANVAS_SIZE,
            crop_long_edge: DEFAULT_CROP_LONG_EDGE,
            margin: DEFAULT_MARGIN,
            blur_kernel: DEFAULT_BLUR_KERNEL,
        }
    }
}

impl PreprocessConfig {
    /// Creates a new configuration with default settings.
    ///
    /// # Returns
    ///
    /// A new instance of `PreprocessConfig` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// Ok if the configuration is valid, or a `DigitError` if validation
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * Any dimension is zero
    /// * The blur kernel is even
    /// * The digit long edge does not fit inside the canvas
    pub fn validate(&self) -> Result<(), DigitError> {
        if self.canvas_size == 0 {
            return Err(DigitError::config_error("canvas_size must be greater than 0"));
        }

        if self.crop_long_edge == 0 {
            return Err(DigitError::config_error(
                "crop_long_edge must be greater than 0",
            ));
        }

        if self.blur_kernel == 0 || self.blur_kernel % 2 == 0 {
            return Err(DigitError::config_error(format!(
                "blur_kernel must be a positive odd number, got {}",
                self.blur_kernel
            )));
        }

        if self.crop_long_edge > self.canvas_size {
            return Err(DigitError::config_error(format!(
                "crop_long_edge {} does not fit inside canvas_size {}",
                self.crop_long_edge, self.canvas_size
            )));
        }

        Ok(())
    }
}
