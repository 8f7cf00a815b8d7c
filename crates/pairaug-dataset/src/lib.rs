#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Batch drivers over image folders.
pub mod batch;

/// Dataset configuration files.
pub mod config;

/// Error types for the dataset drivers.
pub mod error;

/// Image folder listing.
pub mod listing;

pub use batch::{augment_folders, sketch_folder, BatchReport, AUG_SOURCE_DIR, AUG_TARGET_DIR};
pub use config::DatasetConfig;
pub use error::DatasetError;
pub use listing::list_images;
