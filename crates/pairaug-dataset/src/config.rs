use std::path::Path;

use pairaug_augment::AugmentationParams;
use pairaug_sketch::SketchParams;
use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

/// Settings of a dataset preparation run, usually read from a JSON file.
///
/// Every field is optional in the file and falls back to its default.
///
/// ```json
/// {
///   "augment": { "output_size": 512, "rotation_range": 10.0 },
///   "num_copies": 4,
///   "seed": 42
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Parameters of the pair augmentation.
    pub augment: AugmentationParams,
    /// Augmented copies written per input pair.
    pub num_copies: usize,
    /// Seed of the random generator; drawn from the OS when missing.
    pub seed: Option<u64>,
    /// Parameters of the sketch conversion.
    pub sketch: SketchParams,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            augment: AugmentationParams::default(),
            num_copies: 1,
            seed: None,
            sketch: SketchParams::default(),
        }
    }
}

impl DatasetConfig {
    /// Read a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid configuration.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| DatasetError::ConfigParse(path.to_path_buf(), e))
    }

    /// Check the configuration before any file is processed.
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.num_copies == 0 {
            return Err(DatasetError::InvalidConfig(
                "num_copies must be greater than zero".to_string(),
            ));
        }
        self.augment.validate()?;
        self.sketch.validate()?;
        Ok(())
    }
}
