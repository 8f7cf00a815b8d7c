use pairaug_image::Image;
use pairaug_imgproc::{
    color::{invert, rgb_from_gray},
    filter::{gaussian_blur, kernels::gaussian_kernel_size},
    interpolation::InterpolationMode,
    resize::resize_fast,
};

use crate::{
    error::SketchError,
    params::SketchParams,
    prepare::{pad_to_multiple, remove_padding, resize_short_side},
};

/// Map the blurred responses of one pixel to black (0) or white (255).
///
/// `dog = trunc(clamp(255 - min_c(coarse - fine), 0, 255))` and the pixel is white when
/// `2 * (255 - dog)` computed in 8 bits exceeds the threshold.
#[inline]
fn binarize(fine: &[f32], coarse: &[f32], threshold: u8) -> u8 {
    let response = coarse
        .iter()
        .zip(fine)
        .map(|(c, f)| c - f)
        .fold(f32::INFINITY, f32::min);

    let dog = (255.0 - response).clamp(0.0, 255.0) as u8;

    // the doubling is done in 8 bits and wraps around
    if 2u8.wrapping_mul(255 - dog) > threshold {
        255
    } else {
        0
    }
}

/// Compute the binary XDoG edge map of an image.
///
/// The image is blurred with a narrow and a wide gaussian, the per channel difference is
/// reduced with a minimum across channels and thresholded.
///
/// # Arguments
///
/// * `src` - The RGB image, usually the output of [`pad_to_multiple`].
/// * `params` - The blur sigmas and threshold.
///
/// # Returns
///
/// A single channel image where edges are white (255) and everything else is black (0).
pub fn xdog_edges(src: &Image<u8, 3>, params: &SketchParams) -> Result<Image<u8, 1>, SketchError> {
    if src.is_empty() {
        return Err(SketchError::EmptyImage(src.cols(), src.rows()));
    }

    let src_f32 = src.cast::<f32>()?;

    let mut fine = Image::<f32, 3>::from_size_val(src.size(), 0.0)?;
    let k_fine = gaussian_kernel_size(params.sigma_fine);
    gaussian_blur(
        &src_f32,
        &mut fine,
        (k_fine, k_fine),
        (params.sigma_fine, params.sigma_fine),
    )?;

    let mut coarse = Image::<f32, 3>::from_size_val(src.size(), 0.0)?;
    let k_coarse = gaussian_kernel_size(params.sigma_coarse);
    gaussian_blur(
        &src_f32,
        &mut coarse,
        (k_coarse, k_coarse),
        (params.sigma_coarse, params.sigma_coarse),
    )?;

    let data = fine
        .as_slice()
        .chunks_exact(3)
        .zip(coarse.as_slice().chunks_exact(3))
        .map(|(f, c)| binarize(f, c, params.threshold))
        .collect();

    Ok(Image::new(src.size(), data)?)
}

/// Converts images into dark-on-light line art.
///
/// # Example
///
/// ```
/// use pairaug_image::{Image, ImageSize};
/// use pairaug_sketch::{SketchFilter, SketchParams};
///
/// let filter = SketchFilter::new(SketchParams {
///     resolution: 64,
///     ..Default::default()
/// })
/// .unwrap();
///
/// let image = Image::<u8, 3>::from_size_val(ImageSize { width: 40, height: 30 }, 128).unwrap();
/// let sketch = filter.apply(&image).unwrap();
///
/// assert_eq!(sketch.size(), image.size());
/// ```
#[derive(Debug, Clone)]
pub struct SketchFilter {
    params: SketchParams,
}

impl SketchFilter {
    /// Create a filter, validating the parameters.
    pub fn new(params: SketchParams) -> Result<Self, SketchError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// The parameters of the filter.
    pub fn params(&self) -> &SketchParams {
        &self.params
    }

    /// Convert an RGB image into a sketch of the same size.
    pub fn apply(&self, src: &Image<u8, 3>) -> Result<Image<u8, 3>, SketchError> {
        if src.is_empty() {
            return Err(SketchError::EmptyImage(src.cols(), src.rows()));
        }

        let params = &self.params;

        let resized = resize_short_side(src, params.resolution)?;
        let (padded, record) = pad_to_multiple(&resized, params.pad_multiple)?;

        log::debug!(
            "xdog on {} (from {}, padded {})",
            record.original,
            src.size(),
            record.padded
        );

        let edges = xdog_edges(&padded, params)?;
        let edges = remove_padding(&edges, &record)?;

        let mut restored = Image::<u8, 1>::from_size_val(src.size(), 0)?;
        resize_fast(&edges, &mut restored, InterpolationMode::Bicubic)?;

        let mut inverted = Image::<u8, 1>::from_size_val(src.size(), 0)?;
        invert(&restored, &mut inverted)?;

        let mut rgb = Image::<u8, 3>::from_size_val(src.size(), 0)?;
        rgb_from_gray(&inverted, &mut rgb)?;

        Ok(rgb)
    }
}

/// Convert an RGB image into dark-on-light line art with the XDoG filter.
///
/// The image is resized so its shorter side equals `params.resolution`, padded, filtered,
/// cropped back, resized to the input size and inverted. The three output channels are equal.
///
/// # Errors
///
/// Returns an error if the image is empty or the parameters are out of range.
pub fn sketch(src: &Image<u8, 3>, params: &SketchParams) -> Result<Image<u8, 3>, SketchError> {
    SketchFilter::new(*params)?.apply(src)
}
