//! # ink-digit
//!
//! A handwritten-digit recognition core. It converts a freehand ink
//! drawing (dark strokes on a light canvas) into the normalized
//! `(1, 28, 28, 1)` float tensor a 10-class digit classifier expects, and
//! orchestrates an injected classifier over that tensor.
//!
//! ## Features
//!
//! - Pure, deterministic preprocessing pipeline from raster drawing to
//!   classifier input tensor
//! - Automatic ink extraction: Otsu thresholding and largest-region
//!   cropping, with a well-defined fallback for blank canvases
//! - Canonical digit geometry: 20-unit long edge, 4-unit margins, 28x28
//!   canvas
//! - Classifier injection through a trait seam - no global model state
//! - Optional ONNX Runtime adapter (`onnx` feature) for exported models
//! - Batch processing support
//!
//! ## Modules
//!
//! * [`core`] - Errors, constants, configuration, and tensor aliases
//! * [`preprocess`] - The preprocessing pipeline
//! * [`predictor`] - Classifier trait and digit recognizer
//! * [`processors`] - Individual image processing stages
//! * [`utils`] - Image helpers and logging setup
//!
//! ## Quick Start
//!
//! ### Preprocessing a drawing
//!
//! ```rust,no_run
//! use ink_digit::prelude::*;
//! use image::DynamicImage;
//!
//! # fn main() -> Result<(), ink_digit::DigitError> {
//! let preprocessor = Preprocessor::new();
//!
//! // A drawing captured from a canvas: dark ink on a light background.
//! let drawing = DynamicImage::new_rgb8(400, 400);
//!
//! let tensor = preprocessor.preprocess(&drawing)?;
//! assert_eq!(tensor.shape(), &[1, 28, 28, 1]);
//! # Ok(())
//! # }
//! ```
//!
//! ### Recognizing with an injected classifier
//!
//! ```rust,no_run
//! use ink_digit::prelude::*;
//! use ink_digit::core::{Tensor2D, Tensor4D};
//! use image::DynamicImage;
//!
//! struct UniformClassifier;
//!
//! impl Classifier for UniformClassifier {
//!     fn classify(&self, input: &Tensor4D) -> Result<Tensor2D, DigitError> {
//!         Ok(Tensor2D::from_elem((input.shape()[0], 10), 0.1))
//!     }
//! }
//!
//! # fn main() -> Result<(), ink_digit::DigitError> {
//! let recognizer = DigitRecognizer::new(UniformClassifier);
//! let drawing = DynamicImage::new_rgb8(400, 400);
//! let prediction = recognizer.recognize(&drawing)?;
//! println!("{} ({:.1}%)", prediction.label, prediction.confidence * 100.0);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod predictor;
pub mod preprocess;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use ink_digit::prelude::*;
/// ```
///
/// Included items focus on the most common tasks: the preprocessing
/// pipeline, the classifier seam, and the error type. For the individual
/// processing stages, import directly from [`crate::processors`].
pub mod prelude {
    pub use crate::core::{DigitError, PreprocessConfig, Tensor4D};
    pub use crate::predictor::{Classifier, ConfidenceLevel, DigitPrediction, DigitRecognizer};
    pub use crate::preprocess::Preprocessor;

    #[cfg(feature = "onnx")]
    pub use crate::predictor::OrtClassifier;
}

pub use crate::core::DigitError;
