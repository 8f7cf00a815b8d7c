use pairaug_image::{Image, ImageSize};
use pairaug_imgproc::{
    crop::crop_image,
    interpolation::InterpolationMode,
    padding::{spatial_padding, Padding2D, PaddingMode},
    resize::resize_fast,
};

use crate::error::SketchError;

/// Remembers the size of an image before [`pad_to_multiple`] so the padding can be undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PadRecord {
    /// Size before padding.
    pub original: ImageSize,
    /// Size after padding.
    pub padded: ImageSize,
}

fn pad_amount(len: usize, multiple: usize) -> usize {
    len.div_ceil(multiple) * multiple - len
}

/// Resize an image so that its shorter side equals `resolution`.
///
/// The scale is `k = resolution / min(width, height)` and the new sides are `round(side * k)`.
/// Upscaling uses bicubic interpolation, downscaling uses area interpolation.
///
/// # Errors
///
/// Returns an error if the image is empty or `resolution` is zero.
///
/// # Example
///
/// ```
/// use pairaug_image::{Image, ImageSize};
/// use pairaug_sketch::resize_short_side;
///
/// let image = Image::<u8, 3>::from_size_val(ImageSize { width: 30, height: 20 }, 0).unwrap();
/// let resized = resize_short_side(&image, 64).unwrap();
///
/// assert_eq!(resized.size(), ImageSize { width: 96, height: 64 });
/// ```
pub fn resize_short_side<const C: usize>(
    src: &Image<u8, C>,
    resolution: usize,
) -> Result<Image<u8, C>, SketchError> {
    if src.is_empty() {
        return Err(SketchError::EmptyImage(src.cols(), src.rows()));
    }
    if resolution == 0 {
        return Err(SketchError::InvalidParameter(
            "resolution",
            "must be greater than zero".to_string(),
        ));
    }

    let k = resolution as f64 / src.size().min_side() as f64;
    let interpolation = if k > 1.0 {
        InterpolationMode::Bicubic
    } else {
        InterpolationMode::Area
    };

    let new_size = ImageSize {
        width: ((src.cols() as f64 * k).round() as usize).max(1),
        height: ((src.rows() as f64 * k).round() as usize).max(1),
    };

    log::debug!(
        "resizing {} to {} with {:?}",
        src.size(),
        new_size,
        interpolation
    );

    let mut dst = Image::from_size_val(new_size, 0u8)?;
    resize_fast(src, &mut dst, interpolation)?;

    Ok(dst)
}

/// Pad the bottom and right edges of an image so both sides become multiples of `multiple`.
///
/// The padding replicates the edge pixels.
///
/// # Returns
///
/// The padded image and the record needed by [`remove_padding`].
///
/// # Example
///
/// ```
/// use pairaug_image::{Image, ImageSize};
/// use pairaug_sketch::{pad_to_multiple, remove_padding};
///
/// let image = Image::<u8, 3>::from_size_val(ImageSize { width: 70, height: 64 }, 9).unwrap();
/// let (padded, record) = pad_to_multiple(&image, 64).unwrap();
///
/// assert_eq!(padded.size(), ImageSize { width: 128, height: 64 });
/// assert_eq!(remove_padding(&padded, &record).unwrap(), image);
/// ```
pub fn pad_to_multiple<const C: usize>(
    src: &Image<u8, C>,
    multiple: usize,
) -> Result<(Image<u8, C>, PadRecord), SketchError> {
    if src.is_empty() {
        return Err(SketchError::EmptyImage(src.cols(), src.rows()));
    }
    if multiple == 0 {
        return Err(SketchError::InvalidParameter(
            "pad_multiple",
            "must be greater than zero".to_string(),
        ));
    }

    let padding = Padding2D {
        bottom: pad_amount(src.rows(), multiple),
        right: pad_amount(src.cols(), multiple),
        ..Default::default()
    };
    let padded_size = padding.padded_size(src.size());

    let mut dst = Image::from_size_val(padded_size, 0u8)?;
    spatial_padding(src, &mut dst, padding, PaddingMode::Replicate, [0; C])?;

    Ok((
        dst,
        PadRecord {
            original: src.size(),
            padded: padded_size,
        },
    ))
}

/// Strip the padding added by [`pad_to_multiple`], keeping the top left region.
///
/// # Errors
///
/// Returns an error if the image does not have the padded size of the record.
pub fn remove_padding<const C: usize>(
    src: &Image<u8, C>,
    record: &PadRecord,
) -> Result<Image<u8, C>, SketchError> {
    if src.size() != record.padded {
        return Err(pairaug_image::ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            record.padded.width,
            record.padded.height,
        )
        .into());
    }

    let mut dst = Image::from_size_val(record.original, 0u8)?;
    crop_image(src, &mut dst, 0, 0)?;
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_amounts() {
        assert_eq!(pad_amount(64, 64), 0);
        assert_eq!(pad_amount(65, 64), 63);
        assert_eq!(pad_amount(1, 64), 63);
        assert_eq!(pad_amount(2048, 64), 0);
    }

    #[test]
    fn resize_short_side_downscale() -> Result<(), SketchError> {
        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 300,
                height: 200,
            },
            80,
        )?;
        let resized = resize_short_side(&image, 50)?;
        assert_eq!(
            resized.size(),
            ImageSize {
                width: 75,
                height: 50
            }
        );
        assert!(resized.as_slice().iter().all(|&v| v.abs_diff(80) <= 1));
        Ok(())
    }

    #[test]
    fn resize_short_side_rounds() -> Result<(), SketchError> {
        let image = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 7,
            },
            0,
        )?;
        // k = 2 / 3, 7 * k = 4.67
        let resized = resize_short_side(&image, 2)?;
        assert_eq!(
            resized.size(),
            ImageSize {
                width: 2,
                height: 5
            }
        );
        Ok(())
    }

    #[test]
    fn pad_replicates_edges() -> Result<(), SketchError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![3, 7],
        )?;
        let (padded, record) = pad_to_multiple(&image, 4)?;

        assert_eq!(record.original, image.size());
        assert_eq!(
            record.padded,
            ImageSize {
                width: 4,
                height: 4
            }
        );
        for row in padded.as_slice().chunks_exact(4) {
            assert_eq!(row, &[3, 7, 7, 7]);
        }
        Ok(())
    }

    #[test]
    fn remove_padding_checks_size() -> Result<(), SketchError> {
        let image = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 5,
                height: 5,
            },
            0,
        )?;
        let record = PadRecord {
            original: ImageSize {
                width: 3,
                height: 3,
            },
            padded: ImageSize {
                width: 4,
                height: 4,
            },
        };
        assert!(remove_padding(&image, &record).is_err());
        Ok(())
    }

    #[test]
    fn empty_input_fails() {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 0,
                height: 0,
            },
            vec![],
        );
        let Ok(image) = image else {
            panic!("an empty buffer matches an empty size");
        };
        assert_eq!(
            resize_short_side(&image, 16),
            Err(SketchError::EmptyImage(0, 0))
        );
        assert!(pad_to_multiple(&image, 64).is_err());
    }
}
