//! Image normalization: 8-bit samples to float tensors.
//!
//! This module converts the finished 28x28 canvas into the float tensor
//! layout the classifier consumes: NHWC with a single channel, samples
//! scaled into `[0, 1]`.

use crate::core::{DigitError, Tensor4D};
use image::GrayImage;
use rayon::prelude::*;

/// Normalizes grayscale canvases into float tensors.
///
/// This struct encapsulates the affine normalization parameters
/// (alpha = scale / std, beta = -mean / std) and provides methods to apply
/// them to single images or batches. The defaults divide by 255, mapping
/// 8-bit samples onto `[0, 1]`.
#[derive(Debug)]
pub struct GrayNormalize {
    /// Scaling factor applied to each sample (alpha = scale / std).
    pub alpha: f32,
    /// Offset applied to each sample (beta = -mean / std).
    pub beta: f32,
}

impl GrayNormalize {
    /// Creates a new GrayNormalize instance with the specified parameters.
    ///
    /// # Arguments
    ///
    /// * `scale` - Optional scaling factor (defaults to 1.0/255.0)
    /// * `mean` - Optional mean value (defaults to 0.0)
    /// * `std` - Optional standard deviation (defaults to 1.0)
    ///
    /// # Returns
    ///
    /// A Result containing the new GrayNormalize instance or a DigitError
    /// if validation fails.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * Scale is less than or equal to 0
    /// * Standard deviation is less than or equal to 0
    pub fn new(scale: Option<f32>, mean: Option<f32>, std: Option<f32>) -> Result<Self, DigitError> {
        let scale = scale.unwrap_or(1.0 / 255.0);
        let mean = mean.unwrap_or(0.0);
        let std = std.unwrap_or(1.0);

        if scale <= 0.0 {
            return Err(DigitError::config_error("Scale must be greater than 0"));
        }

        if std <= 0.0 {
            return Err(DigitError::config_error(
                "Standard deviation must be greater than 0",
            ));
        }

        let alpha = scale / std;
        let beta = -mean / std;

        if !alpha.is_finite() || !beta.is_finite() {
            return Err(DigitError::config_error(format!(
                "Normalization parameters are not finite: alpha={alpha}, beta={beta}"
            )));
        }

        Ok(Self { alpha, beta })
    }

    /// Creates the normalization used for classifier input: divide by 255.
    pub fn for_classifier_input() -> Result<Self, DigitError> {
        Self::new(None, None, None)
    }

    /// Normalizes a single canvas into a 4D tensor.
    ///
    /// The output layout is NHWC: shape `(1, height, width, 1)`. Samples
    /// are clamped into `[0, 1]` so the output always honors the tensor
    /// range contract, including under non-default parameters.
    ///
    /// # Arguments
    ///
    /// * `img` - The grayscale canvas to normalize
    ///
    /// # Returns
    ///
    /// A Result containing the normalized tensor or a DigitError.
    pub fn normalize_to(&self, img: &GrayImage) -> Result<Tensor4D, DigitError> {
        let (width, height) = img.dimensions();

        let data: Vec<f32> = img
            .as_raw()
            .iter()
            .map(|&v| (v as f32 * self.alpha + self.beta).clamp(0.0, 1.0))
            .collect();

        let len = data.len();
        ndarray::Array4::from_shape_vec((1, height as usize, width as usize, 1), data).map_err(
            |e| {
                DigitError::tensor_operation(
                    &format!("failed to shape {len} samples as (1, {height}, {width}, 1)"),
                    e,
                )
            },
        )
    }

    /// Normalizes a batch of canvases into a single 4D tensor.
    ///
    /// All images must share the same dimensions. The output shape is
    /// `(batch, height, width, 1)`. Batches larger than one image are
    /// normalized in parallel.
    ///
    /// # Arguments
    ///
    /// * `imgs` - The grayscale canvases to normalize
    ///
    /// # Returns
    ///
    /// A Result containing the batch tensor or a DigitError.
    ///
    /// # Errors
    ///
    /// Returns an error if the images do not all have the same dimensions.
    pub fn normalize_batch_to(&self, imgs: &[GrayImage]) -> Result<Tensor4D, DigitError> {
        if imgs.is_empty() {
            return Ok(ndarray::Array4::zeros((0, 0, 0, 0)));
        }

        let (width, height) = imgs[0].dimensions();
        for (i, img) in imgs.iter().enumerate() {
            if img.dimensions() != (width, height) {
                return Err(DigitError::invalid_image(format!(
                    "all images in batch must have the same dimensions: image 0 is {}x{}, image {} is {}x{}",
                    width,
                    height,
                    i,
                    img.dimensions().0,
                    img.dimensions().1
                )));
            }
        }

        let img_size = (width as usize) * (height as usize);
        if img_size == 0 {
            return Err(DigitError::invalid_image(format!(
                "cannot normalize zero-area {width}x{height} images"
            )));
        }
        let mut data = vec![0.0f32; imgs.len() * img_size];

        if imgs.len() <= 1 {
            // Avoid rayon overhead for single-image batches
            self.fill_slice(&imgs[0], &mut data);
        } else {
            data.par_chunks_mut(img_size)
                .zip(imgs.par_iter())
                .for_each(|(chunk, img)| self.fill_slice(img, chunk));
        }

        let batch = imgs.len();
        ndarray::Array4::from_shape_vec((batch, height as usize, width as usize, 1), data).map_err(
            |e| {
                DigitError::tensor_operation(
                    &format!("failed to shape batch of {batch} {width}x{height} images"),
                    e,
                )
            },
        )
    }

    fn fill_slice(&self, img: &GrayImage, out: &mut [f32]) {
        for (dst, &v) in out.iter_mut().zip(img.as_raw().iter()) {
            *dst = (v as f32 * self.alpha + self.beta).clamp(0.0, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(GrayNormalize::new(Some(0.0), None, None).is_err());
        assert!(GrayNormalize::new(None, None, Some(0.0)).is_err());
        assert!(GrayNormalize::new(None, None, Some(-1.0)).is_err());
    }

    #[test]
    fn test_normalize_shape_and_range() {
        let img = GrayImage::from_pixel(28, 28, Luma([128]));
        let tensor = GrayNormalize::for_classifier_input()
            .unwrap()
            .normalize_to(&img)
            .unwrap();

        assert_eq!(tensor.shape(), &[1, 28, 28, 1]);
        assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert!((tensor[[0, 0, 0, 0]] - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_extreme_samples_map_to_bounds() {
        let normalize = GrayNormalize::for_classifier_input().unwrap();

        let white = GrayImage::from_pixel(2, 2, Luma([255]));
        let tensor = normalize.normalize_to(&white).unwrap();
        assert!((tensor[[0, 0, 0, 0]] - 1.0).abs() < 1e-6);

        let black = GrayImage::from_pixel(2, 2, Luma([0]));
        let tensor = normalize.normalize_to(&black).unwrap();
        assert_eq!(tensor[[0, 0, 0, 0]], 0.0);
    }

    #[test]
    fn test_batch_requires_matching_dimensions() {
        let normalize = GrayNormalize::for_classifier_input().unwrap();
        let imgs = vec![GrayImage::new(28, 28), GrayImage::new(14, 28)];
        assert!(normalize.normalize_batch_to(&imgs).is_err());
    }

    #[test]
    fn test_batch_shape() {
        let normalize = GrayNormalize::for_classifier_input().unwrap();
        let imgs = vec![
            GrayImage::from_pixel(28, 28, Luma([255])),
            GrayImage::from_pixel(28, 28, Luma([0])),
            GrayImage::from_pixel(28, 28, Luma([51])),
        ];
        let tensor = normalize.normalize_batch_to(&imgs).unwrap();
        assert_eq!(tensor.shape(), &[3, 28, 28, 1]);
        assert!((tensor[[0, 5, 5, 0]] - 1.0).abs() < 1e-6);
        assert_eq!(tensor[[1, 5, 5, 0]], 0.0);
        assert!((tensor[[2, 5, 5, 0]] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_empty_batch() {
        let normalize = GrayNormalize::for_classifier_input().unwrap();
        let tensor = normalize.normalize_batch_to(&[]).unwrap();
        assert_eq!(tensor.shape(), &[0, 0, 0, 0]);
    }
}
