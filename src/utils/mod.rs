//! Utility functions for the digit pipeline.
//!
//! This module provides image helper functions used throughout the
//! pipeline, along with logging setup.

pub mod image;

pub use image::{
    create_gray_image, create_rgb_image, crop_gray, dynamic_to_gray, invert_colors, pad_gray,
};

/// Initializes the tracing subscriber for logging.
///
/// This function sets up the tracing subscriber with environment filter and
/// formatting layer. It's typically called at the start of an application
/// to enable logging.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
