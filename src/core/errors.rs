//! Error types for the digit recognition pipeline.
//!
//! This module defines the errors that can occur while preprocessing an ink
//! drawing or running an injected classifier over the resulting tensor, plus
//! utility constructors for creating these errors with appropriate context.

use thiserror::Error;

/// Enum representing different stages of the preprocessing pipeline.
///
/// This enum is used to identify which stage of the pipeline an error
/// occurred in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProcessingStage {
    /// Error occurred during smoothing or thresholding.
    Binarization,
    /// Error occurred during connected-region extraction or cropping.
    RegionExtraction,
    /// Error occurred during digit resizing or padding.
    Resize,
    /// Error occurred during float normalization.
    Normalization,
    /// Error occurred during tensor operations.
    TensorOperation,
    /// Generic processing error.
    Generic,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::Binarization => write!(f, "binarization"),
            ProcessingStage::RegionExtraction => write!(f, "region extraction"),
            ProcessingStage::Resize => write!(f, "resize"),
            ProcessingStage::Normalization => write!(f, "normalization"),
            ProcessingStage::TensorOperation => write!(f, "tensor operation"),
            ProcessingStage::Generic => write!(f, "processing"),
        }
    }
}

/// Enum representing the errors that can occur in the digit pipeline.
///
/// Malformed input (an empty image, a raw buffer that does not match its
/// declared dimensions) surfaces as [`DigitError::InvalidImage`]. Content
/// degeneracies such as a blank canvas are not errors; the pipeline handles
/// them via its fallback policy and always produces a tensor.
#[derive(Error, Debug)]
pub enum DigitError {
    /// Input image is malformed: empty, zero-area, or an unreadable buffer.
    #[error("invalid image: {message}")]
    InvalidImage {
        /// A message describing what was wrong with the input.
        message: String,
    },

    /// Error occurred in a pipeline stage.
    #[error("{stage} failed: {context}")]
    Processing {
        /// The stage of the pipeline where the error occurred.
        stage: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error from the injected classifier.
    #[error("classification")]
    Classification(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error from tensor shape operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// Error from the ONNX Runtime session.
    #[cfg(feature = "onnx")]
    #[error(transparent)]
    Session(#[from] ort::Error),
}

impl DigitError {
    /// Creates a DigitError for malformed input images.
    ///
    /// # Arguments
    ///
    /// * `message` - A message describing what was wrong with the input.
    ///
    /// # Returns
    ///
    /// A DigitError instance.
    pub fn invalid_image(message: impl Into<String>) -> Self {
        Self::InvalidImage {
            message: message.into(),
        }
    }

    /// Creates a DigitError for a pipeline stage failure.
    ///
    /// # Arguments
    ///
    /// * `stage` - The stage of the pipeline where the error occurred.
    /// * `context` - Additional context about the error.
    /// * `error` - The underlying error that caused this error.
    ///
    /// # Returns
    ///
    /// A DigitError instance.
    pub fn processing_error(
        stage: ProcessingStage,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            stage,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a DigitError for resize operations.
    pub fn resize_error(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::processing_error(ProcessingStage::Resize, context, error)
    }

    /// Creates a DigitError for normalization operations.
    pub fn normalization(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::processing_error(ProcessingStage::Normalization, context, error)
    }

    /// Creates a DigitError for tensor operations.
    pub fn tensor_operation(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::processing_error(ProcessingStage::TensorOperation, context, error)
    }

    /// Creates a DigitError for classifier failures.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying error reported by the classifier.
    ///
    /// # Returns
    ///
    /// A DigitError instance.
    pub fn classification_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Classification(Box::new(error))
    }

    /// Creates a DigitError for configuration errors.
    ///
    /// # Arguments
    ///
    /// * `message` - A message describing the configuration error.
    ///
    /// # Returns
    ///
    /// A DigitError instance.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }
}

/// A lightweight error wrapping a plain message.
///
/// Used as the source of [`DigitError::Processing`] when no richer
/// underlying error exists.
#[derive(Debug)]
pub struct SimpleError {
    message: String,
}

impl SimpleError {
    /// Creates a SimpleError from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SimpleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SimpleError {}
