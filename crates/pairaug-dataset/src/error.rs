use std::path::PathBuf;

use pairaug_augment::AugmentError;
use pairaug_io::IoError;
use pairaug_sketch::SketchError;

/// An error type for the dataset drivers.
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// The input path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The source image has no counterpart in the target directory.
    #[error("Missing target image for {0}")]
    MissingTarget(PathBuf),

    /// The configuration file could not be parsed.
    #[error("Failed to parse the configuration file {0}. {1}")]
    ConfigParse(PathBuf, serde_json::Error),

    /// The configuration holds an out of range value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error to manipulate a file or directory.
    #[error("Failed to manipulate the file. {0}")]
    FileError(#[from] std::io::Error),

    /// Error to read or write an image.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Error from the pair augmentation.
    #[error(transparent)]
    Augment(#[from] AugmentError),

    /// Error from the sketch conversion.
    #[error(transparent)]
    Sketch(#[from] SketchError),
}
