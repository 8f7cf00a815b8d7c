use std::str::FromStr;

use pairaug_image::Image;
use pairaug_imgproc::core::{mean, pixel_histogram};
use serde::{Deserialize, Serialize};

use crate::error::AugmentError;

/// An RGB color used to paint canvas area that no source pixel covers.
pub type FillColor = [u8; 3];

/// Width in pixels of the border ring sampled by [`FillPolicy::EdgeMode`] when not given.
pub const DEFAULT_EDGE_WIDTH: usize = 10;

fn default_edge_width() -> usize {
    DEFAULT_EDGE_WIDTH
}

/// How the fill color of an image is derived.
///
/// Serialized with a `kind` tag: `{"kind": "white"}`, `{"kind": "average"}` or
/// `{"kind": "edge-mode", "edge_width": 10}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FillPolicy {
    /// Constant white.
    #[default]
    White,
    /// The mean color of the image.
    #[serde(rename = "average")]
    AverageColor,
    /// The most frequent color of the border ring of the image.
    EdgeMode {
        /// Width of the border ring in pixels.
        #[serde(default = "default_edge_width")]
        edge_width: usize,
    },
}

impl FillPolicy {
    /// Compute the fill color of `image` under this policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the policy needs image statistics and the image is empty.
    pub fn fill_color(&self, image: &Image<u8, 3>) -> Result<FillColor, AugmentError> {
        match self {
            FillPolicy::White => Ok([255, 255, 255]),
            FillPolicy::AverageColor => average_color(image),
            FillPolicy::EdgeMode { edge_width } => edge_mode_color(image, *edge_width),
        }
    }
}

impl FromStr for FillPolicy {
    type Err = String;

    /// Parse `white`, `average` or `edge-mode`; the edge width takes its default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" => Ok(FillPolicy::White),
            "average" | "average-color" => Ok(FillPolicy::AverageColor),
            "edge-mode" | "edge_mode" => Ok(FillPolicy::EdgeMode {
                edge_width: DEFAULT_EDGE_WIDTH,
            }),
            other => Err(format!(
                "unknown fill policy `{other}`, expected white, average or edge-mode"
            )),
        }
    }
}

/// The mean color of an image, each channel rounded to the nearest integer.
///
/// # Example
///
/// ```
/// use pairaug_image::{Image, ImageSize};
/// use pairaug_augment::average_color;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize { width: 2, height: 1 },
///     vec![0, 10, 255, 100, 11, 255],
/// )
/// .unwrap();
///
/// assert_eq!(average_color(&image).unwrap(), [50, 11, 255]);
/// ```
pub fn average_color(image: &Image<u8, 3>) -> Result<FillColor, AugmentError> {
    if image.is_empty() {
        return Err(AugmentError::EmptyImage("fill", image.size()));
    }

    let mean = mean(image)?;
    Ok(mean.map(|m| m.round().clamp(0.0, 255.0) as u8))
}

/// The most frequent color in the border ring of an image.
///
/// The ring is sampled as four strips of `edge_width` pixels: left, right, top and bottom, in
/// that order. Corner pixels are counted once for every strip they belong to. Ties go to the
/// color seen first. `edge_width` is clamped to the shorter side of the image.
///
/// # Errors
///
/// Returns an error if the image is empty or `edge_width` is zero.
pub fn edge_mode_color(image: &Image<u8, 3>, edge_width: usize) -> Result<FillColor, AugmentError> {
    if image.is_empty() {
        return Err(AugmentError::EmptyImage("fill", image.size()));
    }
    if edge_width == 0 {
        return Err(AugmentError::InvalidParameter(
            "edge_width",
            "must be greater than zero".to_string(),
        ));
    }

    let (w, h) = (image.cols(), image.rows());
    let ew = edge_width.min(image.size().min_side());

    let strips = [
        (0, 0, ew, h),
        (w - ew, 0, ew, h),
        (0, 0, w, ew),
        (0, h - ew, w, ew),
    ];

    let counts = pixel_histogram(image, &strips)?;

    let mut best: Option<(FillColor, usize)> = None;
    for (color, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((color, count)),
        }
    }

    // the strips are never empty for a non-empty image
    best.map(|(color, _)| color)
        .ok_or(AugmentError::EmptyImage("fill", image.size()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairaug_image::ImageSize;

    /// A white image with a black frame of `border` pixels.
    fn framed(size: usize, border: usize) -> Result<Image<u8, 3>, AugmentError> {
        let mut data = Vec::with_capacity(size * size * 3);
        for y in 0..size {
            for x in 0..size {
                let on_border =
                    x < border || y < border || x >= size - border || y >= size - border;
                let v = if on_border { 0 } else { 255 };
                data.extend_from_slice(&[v, v, v]);
            }
        }
        Ok(Image::new(
            ImageSize {
                width: size,
                height: size,
            },
            data,
        )?)
    }

    #[test]
    fn white_policy() -> Result<(), AugmentError> {
        let image = framed(20, 2)?;
        assert_eq!(FillPolicy::White.fill_color(&image)?, [255, 255, 255]);
        Ok(())
    }

    #[test]
    fn edge_mode_of_black_frame() -> Result<(), AugmentError> {
        let image = framed(200, 10)?;
        let policy = FillPolicy::EdgeMode {
            edge_width: DEFAULT_EDGE_WIDTH,
        };
        assert_eq!(policy.fill_color(&image)?, [0, 0, 0]);
        Ok(())
    }

    #[test]
    fn edge_mode_ignores_interior() -> Result<(), AugmentError> {
        // a thin frame is outvoted once the ring reaches into the interior
        let image = framed(40, 1)?;
        assert_eq!(edge_mode_color(&image, 1)?, [0, 0, 0]);
        assert_eq!(edge_mode_color(&image, 10)?, [255, 255, 255]);
        Ok(())
    }

    #[test]
    fn edge_mode_tie_goes_to_first_seen() -> Result<(), AugmentError> {
        // left column red, right column blue, two rows: every strip covers both colors
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![255, 0, 0, 0, 0, 255, 255, 0, 0, 0, 0, 255],
        )?;
        assert_eq!(edge_mode_color(&image, 1)?, [255, 0, 0]);
        Ok(())
    }

    #[test]
    fn edge_width_is_clamped() -> Result<(), AugmentError> {
        let image = Image::<u8, 3>::from_size_pixel(
            ImageSize {
                width: 3,
                height: 2,
            },
            [1, 2, 3],
        )?;
        assert_eq!(edge_mode_color(&image, 50)?, [1, 2, 3]);
        assert!(edge_mode_color(&image, 0).is_err());
        Ok(())
    }

    #[test]
    fn average_of_half_white_half_black() -> Result<(), AugmentError> {
        let size = ImageSize {
            width: 10,
            height: 4,
        };
        let data = (0..size.area())
            .flat_map(|i| {
                let v = if i % size.width < 5 { 255 } else { 0 };
                [v, v, v]
            })
            .collect();
        let image = Image::<u8, 3>::new(size, data)?;

        let color = FillPolicy::AverageColor.fill_color(&image)?;
        for c in color {
            assert!(c.abs_diff(128) <= 1, "{color:?}");
        }
        Ok(())
    }

    #[test]
    fn empty_image_fails() -> Result<(), AugmentError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 0,
                height: 0,
            },
            vec![],
        )?;
        assert!(average_color(&image).is_err());
        assert!(edge_mode_color(&image, 10).is_err());
        // white needs no statistics
        assert_eq!(FillPolicy::White.fill_color(&image)?, [255, 255, 255]);
        Ok(())
    }

    #[test]
    fn parse_and_serialize() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("white".parse::<FillPolicy>()?, FillPolicy::White);
        assert_eq!("Average".parse::<FillPolicy>()?, FillPolicy::AverageColor);
        assert_eq!(
            "edge-mode".parse::<FillPolicy>()?,
            FillPolicy::EdgeMode { edge_width: 10 }
        );
        assert!("mean".parse::<FillPolicy>().is_err());

        let json = serde_json::to_string(&FillPolicy::EdgeMode { edge_width: 4 })?;
        assert_eq!(json, r#"{"kind":"edge-mode","edge_width":4}"#);

        let policy: FillPolicy = serde_json::from_str(r#"{"kind":"edge-mode"}"#)?;
        assert_eq!(policy, FillPolicy::EdgeMode { edge_width: 10 });

        let policy: FillPolicy = serde_json::from_str(r#"{"kind":"average"}"#)?;
        assert_eq!(policy, FillPolicy::AverageColor);
        Ok(())
    }
}
