#![deny(missing_docs)]
//! Image types shared by the pairaug processing crates.

/// image representation for the processing pipelines.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageDtype, ImageSize};
