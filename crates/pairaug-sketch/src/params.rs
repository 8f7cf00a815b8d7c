use serde::{Deserialize, Serialize};

use crate::error::SketchError;

/// Parameters of the XDoG sketch conversion.
///
/// Missing fields take their default when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchParams {
    /// Length of the shorter side the image is resized to before filtering.
    pub resolution: usize,
    /// Edge sensitivity, compared against the doubled edge response.
    pub threshold: u8,
    /// Sigma of the narrow gaussian blur.
    pub sigma_fine: f32,
    /// Sigma of the wide gaussian blur.
    pub sigma_coarse: f32,
    /// Both sides of the working image are padded up to a multiple of this value.
    pub pad_multiple: usize,
}

impl Default for SketchParams {
    fn default() -> Self {
        Self {
            resolution: 2048,
            threshold: 16,
            sigma_fine: 0.5,
            sigma_coarse: 5.0,
            pad_multiple: 64,
        }
    }
}

impl SketchParams {
    /// Check that every parameter is in range.
    pub fn validate(&self) -> Result<(), SketchError> {
        if self.resolution == 0 {
            return Err(SketchError::InvalidParameter(
                "resolution",
                "must be greater than zero".to_string(),
            ));
        }
        if self.pad_multiple == 0 {
            return Err(SketchError::InvalidParameter(
                "pad_multiple",
                "must be greater than zero".to_string(),
            ));
        }
        for (name, sigma) in [
            ("sigma_fine", self.sigma_fine),
            ("sigma_coarse", self.sigma_coarse),
        ] {
            if !(sigma.is_finite() && sigma > 0.0) {
                return Err(SketchError::InvalidParameter(
                    name,
                    format!("must be a positive number, got {sigma}"),
                ));
            }
        }
        Ok(())
    }
}
