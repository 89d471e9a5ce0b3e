//! Constants used throughout the digit pipeline.
//!
//! These describe the canonical handwritten-digit input convention: a
//! 28x28 single-channel canvas holding a digit whose long edge spans 20
//! units, leaving a 4-unit margin on every side.

/// Side length of the canvas fed to the classifier.
pub const DEFAULT_CANVAS_SIZE: u32 = 28;

/// Length the digit's longer edge is scaled to before padding.
pub const DEFAULT_CROP_LONG_EDGE: u32 = 20;

/// Margin added on every side of the resized digit.
pub const DEFAULT_MARGIN: u32 = 4;

/// Side length of the Gaussian smoothing kernel applied before thresholding.
pub const DEFAULT_BLUR_KERNEL: u32 = 5;

/// Number of digit classes the classifier distinguishes.
pub const NUM_DIGIT_CLASSES: usize = 10;

/// Score below which a prediction is considered low confidence.
pub const LOW_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Score below which a prediction is considered medium confidence.
pub const MEDIUM_CONFIDENCE_THRESHOLD: f32 = 0.8;

/// Returns the label names for the ten digit classes.
///
/// The vector index corresponds to the class ID, so label `i` is simply
/// the digit `i` rendered as a string.
pub fn digit_class_labels() -> Vec<String> {
    (0..NUM_DIGIT_CLASSES).map(|d| d.to_string()).collect()
}
