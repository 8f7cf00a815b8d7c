#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// The pair augmenter.
pub mod augmenter;

/// Error types for the augmentation.
pub mod error;

/// Fill color policies for newly exposed canvas area.
pub mod fill;

/// Augmentation parameters.
pub mod params;

/// The geometry shared by the two images of a pair.
pub mod transform;

pub use augmenter::{expand_to_square, AugmentedPair, PairAugmenter, MAX_CANVAS_PIXELS};
pub use error::AugmentError;
pub use fill::{average_color, edge_mode_color, FillColor, FillPolicy};
pub use params::AugmentationParams;
pub use transform::{target_offset, CorrespondenceTransform, CropWindow};
