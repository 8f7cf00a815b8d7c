#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color conversions and per-pixel color operations.
pub mod color;

/// image statistics module.
pub mod core;

/// image cropping module.
pub mod crop;

/// image filtering module.
pub mod filter;

/// image flipping module.
pub mod flip;

/// utilities for interpolation.
pub mod interpolation;

mod parallel;

/// spatial padding module.
pub mod padding;

/// utility functions for resizing images.
pub mod resize;

/// image geometric transformations module.
pub mod warp;
