use serde::{Deserialize, Serialize};

use crate::{error::AugmentError, fill::FillPolicy};

/// Parameters shared by every augmented copy of a pair.
///
/// Each copy samples its own angle, flip and scale within these ranges. Missing fields take
/// their default when deserialized.
///
/// # Example
///
/// ```
/// use pairaug_augment::{AugmentationParams, FillPolicy};
///
/// let params = AugmentationParams {
///     output_size: 512,
///     rotation_range: 15.0,
///     min_scale: 0.8,
///     max_scale: 1.2,
///     target_fill: FillPolicy::EdgeMode { edge_width: 10 },
///     ..Default::default()
/// };
///
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentationParams {
    /// Side length of the square outputs.
    pub output_size: usize,
    /// Whether a horizontal flip is drawn with probability 0.5.
    pub flip: bool,
    /// Rotation angles are drawn from `[-rotation_range, rotation_range]` degrees.
    pub rotation_range: f32,
    /// Lower bound of the zoom scale.
    pub min_scale: f64,
    /// Upper bound of the zoom scale.
    pub max_scale: f64,
    /// Fill policy of the source image.
    pub source_fill: FillPolicy,
    /// Fill policy of the target image.
    pub target_fill: FillPolicy,
    /// Center both images on a square canvas of their long side before anything else.
    pub expand_to_long_side: bool,
}

impl Default for AugmentationParams {
    fn default() -> Self {
        Self {
            output_size: 1024,
            flip: true,
            rotation_range: 0.0,
            min_scale: 1.0,
            max_scale: 1.0,
            source_fill: FillPolicy::AverageColor,
            target_fill: FillPolicy::White,
            expand_to_long_side: false,
        }
    }
}

impl AugmentationParams {
    /// Check that every parameter is in range.
    pub fn validate(&self) -> Result<(), AugmentError> {
        if self.output_size == 0 {
            return Err(AugmentError::InvalidParameter(
                "output_size",
                "must be greater than zero".to_string(),
            ));
        }

        if !(self.rotation_range.is_finite() && self.rotation_range >= 0.0) {
            return Err(AugmentError::InvalidParameter(
                "rotation_range",
                format!("must be a finite non-negative angle, got {}", self.rotation_range),
            ));
        }

        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            return Err(AugmentError::InvalidParameter(
                "min_scale",
                format!("must be a finite positive number, got {}", self.min_scale),
            ));
        }

        if !(self.max_scale.is_finite() && self.max_scale >= self.min_scale) {
            return Err(AugmentError::InvalidParameter(
                "max_scale",
                format!(
                    "must be finite and at least min_scale ({}), got {}",
                    self.min_scale, self.max_scale
                ),
            ));
        }

        for policy in [self.source_fill, self.target_fill] {
            if let FillPolicy::EdgeMode { edge_width: 0 } = policy {
                return Err(AugmentError::InvalidParameter(
                    "edge_width",
                    "must be greater than zero".to_string(),
                ));
            }
        }

        Ok(())
    }
}
