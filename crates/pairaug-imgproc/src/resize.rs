use crate::interpolation::InterpolationMode;
use fast_image_resize as fr;
use pairaug_image::{Image, ImageError};

/// Map the interpolation mode to a [fast_image_resize] algorithm.
fn resize_alg(interpolation: InterpolationMode) -> fr::ResizeAlg {
    match interpolation {
        InterpolationMode::Nearest => fr::ResizeAlg::Nearest,
        InterpolationMode::Bilinear => fr::ResizeAlg::Convolution(fr::FilterType::Bilinear),
        InterpolationMode::Bicubic => fr::ResizeAlg::Convolution(fr::FilterType::CatmullRom),
        InterpolationMode::Area => fr::ResizeAlg::Convolution(fr::FilterType::Box),
    }
}

fn pixel_type<const C: usize>() -> Result<fr::PixelType, ImageError> {
    match C {
        1 => Ok(fr::PixelType::U8),
        3 => Ok(fr::PixelType::U8x3),
        _ => Err(ImageError::UnsupportedChannels(C)),
    }
}

/// Resize an image to a new size using the [fast_image_resize](https://crates.io/crates/fast_image_resize) crate.
///
/// The output size is taken from `dst`. When source and destination sizes match the pixels
/// are copied through unchanged, whatever the interpolation mode.
///
/// # Arguments
///
/// * `src` - The input image container with 1 or 3 channels.
/// * `dst` - The output image container, already allocated with the new size.
/// * `interpolation` - The interpolation mode to use.
///
/// # Example
///
/// ```
/// use pairaug_image::{Image, ImageSize};
/// use pairaug_imgproc::interpolation::InterpolationMode;
/// use pairaug_imgproc::resize::resize_fast;
///
/// let image = Image::<_, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0u8; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let new_size = ImageSize {
///     width: 2,
///     height: 3,
/// };
///
/// let mut image_resized = Image::<_, 3>::from_size_val(new_size, 0).unwrap();
///
/// resize_fast(&image, &mut image_resized, InterpolationMode::Bicubic).unwrap();
///
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
///
/// # Errors
///
/// The function returns an error if either image is empty, the number of channels is not
/// supported or the image cannot be resized.
pub fn resize_fast<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    if src.is_empty() {
        return Err(ImageError::EmptyImage(src.cols(), src.rows()));
    }
    if dst.is_empty() {
        return Err(ImageError::EmptyImage(dst.cols(), dst.rows()));
    }

    let pixel_type = pixel_type::<C>()?;

    if src.size() == dst.size() {
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        return Ok(());
    }

    let src_image = fr::images::ImageRef::new(
        src.width() as u32,
        src.height() as u32,
        src.as_slice(),
        pixel_type,
    )
    .map_err(|e| ImageError::ResizeError(e.to_string()))?;

    let mut dst_image = fr::images::Image::new(dst.width() as u32, dst.height() as u32, pixel_type);

    let options = fr::ResizeOptions::new().resize_alg(resize_alg(interpolation));
    fr::Resizer::new()
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| ImageError::ResizeError(e.to_string()))?;

    dst.as_slice_mut().copy_from_slice(dst_image.buffer());

    Ok(())
}
