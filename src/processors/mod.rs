//! Image processing stages of the digit pipeline.
//!
//! This module provides the individual transforms the preprocessing
//! pipeline composes: binarization, connected-region extraction, geometric
//! normalization, float conversion, and score ranking.
//!
//! # Modules
//!
//! * `binarize` - Gaussian smoothing and Otsu thresholding into an ink mask
//! * `geometry` - Bounding-box primitive for ink regions
//! * `normalization` - 8-bit canvases to `[0, 1]` float tensors
//! * `region` - Largest connected ink region extraction
//! * `resize` - Long-edge resize, padding, and canvas squaring
//! * `topk` - Top-k ranking of classifier score rows

mod binarize;
mod geometry;
mod normalization;
mod region;
mod resize;
mod topk;

pub use binarize::InkBinarizer;
pub use geometry::BoundingBox;
pub use normalization::GrayNormalize;
pub use region::largest_ink_region;
pub use resize::DigitResize;
pub use topk::{Topk, TopkResult};
