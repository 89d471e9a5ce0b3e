//! The ink preprocessing pipeline.
//!
//! This module converts an arbitrary freehand ink drawing into the
//! normalized tensor a digit classifier expects. The transform is pure and
//! stateless: it never mutates its input, performs no I/O, and identical
//! input always produces identical output, so a single [`Preprocessor`]
//! can serve concurrent callers.
//!
//! The pipeline runs these stages in order:
//!
//! 1. Grayscale reduction (perceptual luminance; single-channel input
//!    passes through)
//! 2. Polarity inversion, turning dark-on-light ink into the bright-digit
//!    convention
//! 3. Gaussian smoothing and Otsu binarization into an ink mask
//! 4. Crop to the largest connected ink region; a blank canvas skips the
//!    crop and keeps the full mask
//! 5. Aspect-preserving resize of the digit's long edge, symmetric
//!    padding, and canvas squaring
//! 6. Division by 255 into a `(1, canvas, canvas, 1)` float tensor
//!
//! Only malformed input (a zero-area image) is an error. Content
//! degeneracies such as a blank canvas or a single-pixel mark degrade
//! gracefully into a valid tensor.

use crate::core::{DigitError, PreprocessConfig, Tensor4D};
use crate::processors::{DigitResize, GrayNormalize, InkBinarizer, largest_ink_region};
use crate::utils::{crop_gray, dynamic_to_gray, invert_colors};
use image::DynamicImage;
use rayon::prelude::*;
use tracing::debug;

/// Converts ink drawings into normalized classifier input tensors.
///
/// Construct once and reuse; the struct only holds configuration and is
/// safe to share across threads.
#[derive(Debug)]
pub struct Preprocessor {
    config: PreprocessConfig,
    binarizer: InkBinarizer,
    resize: DigitResize,
    normalize: GrayNormalize,
}

impl Preprocessor {
    /// Creates a preprocessor with the canonical 28x28 digit configuration.
    ///
    /// # Returns
    ///
    /// A new `Preprocessor` instance.
    pub fn new() -> Self {
        let config = PreprocessConfig::default();
        Self {
            binarizer: InkBinarizer::new(config.blur_kernel),
            resize: DigitResize::new(&config),
            normalize: GrayNormalize {
                alpha: 1.0 / 255.0,
                beta: 0.0,
            },
            config,
        }
    }

    /// Creates a preprocessor from a custom configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - The pipeline configuration
    ///
    /// # Returns
    ///
    /// A new `Preprocessor` instance, or a `DigitError` if the
    /// configuration is invalid.
    pub fn with_config(config: PreprocessConfig) -> Result<Self, DigitError> {
        config.validate()?;
        Ok(Self {
            binarizer: InkBinarizer::new(config.blur_kernel),
            resize: DigitResize::new(&config),
            normalize: GrayNormalize::for_classifier_input()?,
            config,
        })
    }

    /// Returns the configuration this preprocessor was built with.
    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    /// Preprocesses an ink drawing into a classifier input tensor.
    ///
    /// # Arguments
    ///
    /// * `image` - The raster image from the drawing surface (color or
    ///   grayscale, dark ink on a light background). The image is not
    ///   mutated.
    ///
    /// # Returns
    ///
    /// A `(1, canvas, canvas, 1)` float tensor with values in `[0, 1]`,
    /// bright digit on dark background, centered and scaled.
    ///
    /// # Errors
    ///
    /// Returns `DigitError::InvalidImage` if the image has a zero-area
    /// extent. A blank canvas is not an error.
    pub fn preprocess(&self, image: &DynamicImage) -> Result<Tensor4D, DigitError> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(DigitError::invalid_image(format!(
                "zero-area input ({width}x{height})"
            )));
        }

        let gray = dynamic_to_gray(image);
        let inverted = invert_colors(&gray);
        let mask = self.binarizer.apply(&inverted);

        let cropped = match largest_ink_region(&mask) {
            Some(region) => {
                debug!(
                    x = region.x,
                    y = region.y,
                    width = region.width,
                    height = region.height,
                    "cropping to largest ink region"
                );
                crop_gray(&mask, &region)?
            }
            None => {
                // Blank canvas: keep the full mask rather than failing, so
                // empty drawings still reach the classifier.
                debug!("no ink region found, using full mask");
                mask
            }
        };

        let canvas = self.resize.apply(&cropped);
        self.normalize.normalize_to(&canvas)
    }

    /// Preprocesses a batch of independent drawings.
    ///
    /// Each drawing is transformed exactly as by [`Self::preprocess`];
    /// batches larger than one image run in parallel. The first malformed
    /// image aborts the batch.
    ///
    /// # Arguments
    ///
    /// * `images` - The raster images to preprocess
    ///
    /// # Returns
    ///
    /// One tensor per input image, in input order.
    pub fn preprocess_batch(&self, images: &[DynamicImage]) -> Result<Vec<Tensor4D>, DigitError> {
        if images.len() <= 1 {
            // Avoid rayon overhead for single-image batches
            images.iter().map(|img| self.preprocess(img)).collect()
        } else {
            images.par_iter().map(|img| self.preprocess(img)).collect()
        }
    }
}

impl Default for Preprocessor {
    /// Creates a preprocessor with the canonical configuration.
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    /// A white canvas with a black filled rectangle of ink.
    fn canvas_with_ink(size: u32, x: u32, y: u32, w: u32, h: u32) -> DynamicImage {
        let mut img = RgbImage::from_pixel(size, size, Rgb([255, 255, 255]));
        for yy in y..y + h {
            for xx in x..x + w {
                img.put_pixel(xx, yy, Rgb([0, 0, 0]));
            }
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_output_shape_and_range() {
        let tensor = Preprocessor::new()
            .preprocess(&canvas_with_ink(200, 50, 50, 60, 90))
            .unwrap();

        assert_eq!(tensor.shape(), &[1, 28, 28, 1]);
        assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
        // The digit itself is present as bright samples.
        assert!(tensor.iter().any(|&v| v > 0.5));
    }

    #[test]
    fn test_determinism() {
        let preprocessor = Preprocessor::new();
        let canvas = canvas_with_ink(300, 40, 120, 80, 100);

        let a = preprocessor.preprocess(&canvas).unwrap();
        let b = preprocessor.preprocess(&canvas).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_blank_canvas_yields_valid_tensor() {
        let blank = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            400,
            400,
            Rgb([255, 255, 255]),
        ));
        let tensor = Preprocessor::new().preprocess(&blank).unwrap();

        assert_eq!(tensor.shape(), &[1, 28, 28, 1]);
        assert!(tensor.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_corner_blob_is_centered() {
        // A small blob near the top-left corner of a large canvas must end
        // up roughly centered after crop and padding.
        let tensor = Preprocessor::new()
            .preprocess(&canvas_with_ink(400, 10, 10, 30, 30))
            .unwrap();

        let mut sum_row = 0.0f32;
        let mut sum_col = 0.0f32;
        let mut mass = 0.0f32;
        for row in 0..28 {
            for col in 0..28 {
                let v = tensor[[0, row, col, 0]];
                sum_row += row as f32 * v;
                sum_col += col as f32 * v;
                mass += v;
            }
        }
        assert!(mass > 0.0);

        let centroid_row = sum_row / mass;
        let centroid_col = sum_col / mass;
        assert!((6.0..=22.0).contains(&centroid_row), "row {centroid_row}");
        assert!((6.0..=22.0).contains(&centroid_col), "col {centroid_col}");
    }

    #[test]
    fn test_single_pixel_mark_degrades_gracefully() {
        let tensor = Preprocessor::new()
            .preprocess(&canvas_with_ink(50, 25, 25, 1, 1))
            .unwrap();
        assert_eq!(tensor.shape(), &[1, 28, 28, 1]);
        assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_zero_area_input_is_rejected() {
        let preprocessor = Preprocessor::new();

        let empty = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        assert!(matches!(
            preprocessor.preprocess(&empty),
            Err(DigitError::InvalidImage { .. })
        ));

        let flat = DynamicImage::ImageLuma8(GrayImage::new(0, 7));
        assert!(matches!(
            preprocessor.preprocess(&flat),
            Err(DigitError::InvalidImage { .. })
        ));
    }

    #[test]
    fn test_grayscale_input_passes_through() {
        let mut img = GrayImage::from_pixel(100, 100, Luma([250]));
        for y in 30..70 {
            for x in 40..60 {
                img.put_pixel(x, y, Luma([10]));
            }
        }

        let tensor = Preprocessor::new()
            .preprocess(&DynamicImage::ImageLuma8(img))
            .unwrap();
        assert_eq!(tensor.shape(), &[1, 28, 28, 1]);
        assert!(tensor.iter().any(|&v| v > 0.5));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let canvas = canvas_with_ink(120, 30, 30, 40, 40);
        let before = canvas.clone();
        let _ = Preprocessor::new().preprocess(&canvas).unwrap();
        assert_eq!(canvas.as_bytes(), before.as_bytes());
    }

    #[test]
    fn test_batch_matches_single_calls() {
        let preprocessor = Preprocessor::new();
        let drawings = vec![
            canvas_with_ink(200, 20, 20, 50, 80),
            canvas_with_ink(200, 100, 60, 70, 35),
            canvas_with_ink(150, 5, 5, 10, 10),
        ];

        let batch = preprocessor.preprocess_batch(&drawings).unwrap();
        assert_eq!(batch.len(), 3);
        for (tensor, drawing) in batch.iter().zip(&drawings) {
            assert_eq!(tensor, &preprocessor.preprocess(drawing).unwrap());
        }
    }

    #[test]
    fn test_custom_config_is_validated() {
        let config = PreprocessConfig {
            blur_kernel: 2,
            ..Default::default()
        };
        assert!(Preprocessor::with_config(config).is_err());
    }
}
