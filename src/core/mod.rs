//! The core module of the digit pipeline.
//!
//! This module contains the fundamental components shared by the rest of
//! the crate:
//! - Configuration management
//! - Constants describing the canonical digit input convention
//! - Error handling
//! - Tensor type aliases
//!
//! It also provides re-exports of commonly used types for convenience.

pub mod config;
pub mod constants;
pub mod errors;

pub use config::PreprocessConfig;
pub use constants::*;
pub use errors::{DigitError, ProcessingStage, SimpleError};

/// A 2D float tensor, used for per-class score rows (batch, classes).
pub type Tensor2D = ndarray::Array2<f32>;

/// A 4D float tensor in NHWC layout (batch, height, width, channels).
pub type Tensor4D = ndarray::Array4<f32>;
