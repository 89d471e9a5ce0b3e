//! Digit recognition orchestration.
//!
//! This module connects the preprocessing pipeline to a classifier. The
//! classifier is an external collaborator: anything that can turn a
//! `(batch, 28, 28, 1)` tensor into per-class score rows implements
//! [`Classifier`] and is injected into [`DigitRecognizer`] explicitly;
//! there is no ambient global model state.

#[cfg(feature = "onnx")]
mod ort_classifier;

#[cfg(feature = "onnx")]
pub use ort_classifier::OrtClassifier;

use crate::core::constants::{
    LOW_CONFIDENCE_THRESHOLD, MEDIUM_CONFIDENCE_THRESHOLD, NUM_DIGIT_CLASSES,
};
use crate::core::{DigitError, SimpleError, Tensor2D, Tensor4D};
use crate::preprocess::Preprocessor;
use crate::processors::Topk;
use image::DynamicImage;
use tracing::warn;

/// A pre-trained digit classifier.
///
/// Implementors consume the NHWC tensor produced by the preprocessing
/// pipeline and return one row of per-class scores per batch entry. The
/// scores are expected to form a probability distribution over the ten
/// digit classes, but the recognizer only relies on their ordering and on
/// the winning score being comparable against the confidence thresholds.
pub trait Classifier {
    /// Runs the classifier over a batch tensor.
    ///
    /// # Arguments
    ///
    /// * `input` - A `(batch, height, width, 1)` tensor in `[0, 1]`
    ///
    /// # Returns
    ///
    /// A `(batch, classes)` tensor of scores, or a `DigitError` if
    /// inference fails.
    fn classify(&self, input: &Tensor4D) -> Result<Tensor2D, DigitError>;
}

/// Confidence band of a prediction.
///
/// Bands follow the winning score: below 0.5 is `Low`, below 0.8 is
/// `Medium`, everything else is `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    /// The classifier is unsure; the drawing may not be a digit at all.
    Low,
    /// Plausible but not decisive.
    Medium,
    /// A clear winner.
    High,
}

impl ConfidenceLevel {
    /// Derives the band for a winning score.
    pub fn from_score(score: f32) -> Self {
        if score < LOW_CONFIDENCE_THRESHOLD {
            ConfidenceLevel::Low
        } else if score < MEDIUM_CONFIDENCE_THRESHOLD {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::High
        }
    }
}

/// Result of recognizing a single drawing.
#[derive(Debug, Clone)]
pub struct DigitPrediction {
    /// The winning digit class (0-9).
    pub digit: usize,
    /// Label name of the winning class.
    pub label: String,
    /// Score of the winning class.
    pub confidence: f32,
    /// Confidence band of the winning score.
    pub level: ConfidenceLevel,
    /// The full score row, one entry per class.
    pub scores: Vec<f32>,
}

/// Recognizes handwritten digits by composing preprocessing with an
/// injected classifier.
///
/// The recognizer owns a [`Preprocessor`] and any [`Classifier`]
/// implementation; both are supplied by the caller, so swapping models or
/// pipeline configurations needs no global state.
#[derive(Debug)]
pub struct DigitRecognizer<C: Classifier> {
    preprocessor: Preprocessor,
    classifier: C,
    post_op: Topk,
}

impl<C: Classifier> DigitRecognizer<C> {
    /// Creates a recognizer with the canonical preprocessing configuration.
    ///
    /// # Arguments
    ///
    /// * `classifier` - The classifier to run over preprocessed tensors
    pub fn new(classifier: C) -> Self {
        Self::with_preprocessor(Preprocessor::new(), classifier)
    }

    /// Creates a recognizer with a custom preprocessor.
    ///
    /// # Arguments
    ///
    /// * `preprocessor` - The preprocessing pipeline to use
    /// * `classifier` - The classifier to run over preprocessed tensors
    pub fn with_preprocessor(preprocessor: Preprocessor, classifier: C) -> Self {
        Self {
            preprocessor,
            classifier,
            post_op: Topk::for_digits(),
        }
    }

    /// Returns the preprocessor used by this recognizer.
    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    /// Recognizes the digit drawn in a single image.
    ///
    /// # Arguments
    ///
    /// * `image` - The raster drawing (dark ink on light background)
    ///
    /// # Returns
    ///
    /// The prediction for the drawing, or a `DigitError` if preprocessing
    /// rejects the input or the classifier fails.
    pub fn recognize(&self, image: &DynamicImage) -> Result<DigitPrediction, DigitError> {
        let tensor = self.preprocessor.preprocess(image)?;
        let scores = self.classifier.classify(&tensor)?;
        let row = scores
            .outer_iter()
            .next()
            .ok_or_else(|| {
                DigitError::classification_error(SimpleError::new(
                    "classifier returned an empty batch",
                ))
            })?
            .to_vec();

        self.prediction_from_row(row)
    }

    /// Recognizes the digits drawn in a batch of independent images.
    ///
    /// Drawings are preprocessed individually, stacked into one batch
    /// tensor, and classified in a single pass.
    ///
    /// # Arguments
    ///
    /// * `images` - The raster drawings
    ///
    /// # Returns
    ///
    /// One prediction per drawing, in input order.
    pub fn recognize_batch(
        &self,
        images: &[DynamicImage],
    ) -> Result<Vec<DigitPrediction>, DigitError> {
        if images.is_empty() {
            return Ok(Vec::new());
        }

        let tensors = self.preprocessor.preprocess_batch(images)?;
        let views: Vec<_> = tensors.iter().map(|t| t.view()).collect();
        let batch = ndarray::concatenate(ndarray::Axis(0), &views)?;

        let scores = self.classifier.classify(&batch)?;
        if scores.nrows() != images.len() {
            return Err(DigitError::classification_error(SimpleError::new(format!(
                "classifier returned {} rows for {} images",
                scores.nrows(),
                images.len()
            ))));
        }

        scores
            .outer_iter()
            .map(|row| self.prediction_from_row(row.to_vec()))
            .collect()
    }

    fn prediction_from_row(&self, scores: Vec<f32>) -> Result<DigitPrediction, DigitError> {
        if scores.len() != NUM_DIGIT_CLASSES {
            warn!(
                classes = scores.len(),
                "classifier score row does not cover the ten digit classes"
            );
        }

        let top = self
            .post_op
            .process(&scores, 1)
            .map_err(|e| DigitError::classification_error(SimpleError::new(e)))?;

        let confidence = top.scores[0];
        Ok(DigitPrediction {
            digit: top.indexes[0],
            label: top.labels[0].clone(),
            confidence,
            level: ConfidenceLevel::from_score(confidence),
            scores,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// Classifier stub returning the same score row for every batch entry.
    struct FixedClassifier {
        row: Vec<f32>,
    }

    impl Classifier for FixedClassifier {
        fn classify(&self, input: &Tensor4D) -> Result<Tensor2D, DigitError> {
            let batch = input.shape()[0];
            let mut out = Tensor2D::zeros((batch, self.row.len()));
            for mut row in out.outer_iter_mut() {
                for (dst, &v) in row.iter_mut().zip(&self.row) {
                    *dst = v;
                }
            }
            Ok(out)
        }
    }

    fn drawing() -> DynamicImage {
        let mut img = RgbImage::from_pixel(100, 100, Rgb([255, 255, 255]));
        for y in 20..80 {
            for x in 40..60 {
                img.put_pixel(x, y, Rgb([0, 0, 0]));
            }
        }
        DynamicImage::ImageRgb8(img)
    }

    fn one_hot(digit: usize, confidence: f32) -> Vec<f32> {
        let rest = (1.0 - confidence) / 9.0;
        (0..10)
            .map(|d| if d == digit { confidence } else { rest })
            .collect()
    }

    #[test]
    fn test_recognize_picks_argmax() {
        let recognizer = DigitRecognizer::new(FixedClassifier {
            row: one_hot(7, 0.92),
        });

        let prediction = recognizer.recognize(&drawing()).unwrap();
        assert_eq!(prediction.digit, 7);
        assert_eq!(prediction.label, "7");
        assert!((prediction.confidence - 0.92).abs() < 1e-6);
        assert_eq!(prediction.level, ConfidenceLevel::High);
        assert_eq!(prediction.scores.len(), 10);
    }

    #[test]
    fn test_confidence_bands() {
        assert_eq!(ConfidenceLevel::from_score(0.2), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(0.49), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(0.5), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.79), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.8), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(1.0), ConfidenceLevel::High);
    }

    #[test]
    fn test_recognize_batch() {
        let recognizer = DigitRecognizer::new(FixedClassifier {
            row: one_hot(3, 0.6),
        });

        let drawings = vec![drawing(), drawing()];
        let predictions = recognizer.recognize_batch(&drawings).unwrap();
        assert_eq!(predictions.len(), 2);
        for prediction in predictions {
            assert_eq!(prediction.digit, 3);
            assert_eq!(prediction.level, ConfidenceLevel::Medium);
        }
    }

    #[test]
    fn test_recognize_batch_empty() {
        let recognizer = DigitRecognizer::new(FixedClassifier { row: one_hot(0, 1.0) });
        assert!(recognizer.recognize_batch(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_image_propagates() {
        let recognizer = DigitRecognizer::new(FixedClassifier { row: one_hot(0, 1.0) });
        let empty = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        assert!(matches!(
            recognizer.recognize(&empty),
            Err(DigitError::InvalidImage { .. })
        ));
    }
}
