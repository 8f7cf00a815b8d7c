#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the sketch conversion.
pub mod error;

/// Conversion parameters.
pub mod params;

/// Resize and padding helpers that make the filter size-insensitive.
pub mod prepare;

/// The XDoG filter and the full sketch pipeline.
pub mod xdog;

pub use error::SketchError;
pub use params::SketchParams;
pub use prepare::{pad_to_multiple, remove_padding, resize_short_side, PadRecord};
pub use xdog::{sketch, xdog_edges, SketchFilter};
