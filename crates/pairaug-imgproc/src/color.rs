use crate::parallel;
use pairaug_image::{Image, ImageError};

fn check_same_size<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &Image<T2, C2>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }
    Ok(())
}

/// Convert a grayscale image to an RGB image by replicating the grayscale value across all channels.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output RGB image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use pairaug_image::{Image, ImageSize};
/// use pairaug_imgproc::color::rgb_from_gray;
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 2, height: 1 }, vec![7, 9]).unwrap();
/// let mut rgb = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();
///
/// rgb_from_gray(&image, &mut rgb).unwrap();
///
/// assert_eq!(rgb.as_slice(), &[7, 7, 7, 9, 9, 9]);
/// ```
pub fn rgb_from_gray<T>(src: &Image<T, 1>, dst: &mut Image<T, 3>) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    check_same_size(src, dst)?;

    // parallelize the conversion by rows
    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel[0] = src_pixel[0];
        dst_pixel[1] = src_pixel[0];
        dst_pixel[2] = src_pixel[0];
    });

    Ok(())
}

/// Convert an RGBA image to RGB image.
///
/// # Arguments
///
/// * `src` - The input RGBA image.
/// * `dst` - The output RGB image.
/// * `background` - When set, the pixels are alpha blended over this color and the result is
///   truncated to 8 bit. Otherwise the alpha channel is dropped.
///
/// Precondition: the input and output images must have the same size.
pub fn rgb_from_rgba(
    src: &Image<u8, 4>,
    dst: &mut Image<u8, 3>,
    background: Option<[u8; 3]>,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;

    if let Some(bg) = background {
        // alpha blend the background with the source image, truncating to 8 bit
        parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
            let alpha = src_pixel[3] as f32 / 255.0;
            for c in 0..3 {
                let blended = src_pixel[c] as f32 * alpha + bg[c] as f32 * (1.0 - alpha);
                dst_pixel[c] = blended.clamp(0.0, 255.0) as u8;
            }
        });
    } else {
        // just drop the alpha channel in the last index
        parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
            dst_pixel.copy_from_slice(&src_pixel[..3]);
        });
    }

    Ok(())
}

/// Invert an 8-bit image, mapping every value `v` to `255 - v`.
///
/// # Example
///
/// ```
/// use pairaug_image::{Image, ImageSize};
/// use pairaug_imgproc::color::invert;
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 3, height: 1 }, vec![0, 55, 255]).unwrap();
/// let mut inverted = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// invert(&image, &mut inverted).unwrap();
///
/// assert_eq!(inverted.as_slice(), &[255, 200, 0]);
/// ```
pub fn invert<const C: usize>(src: &Image<u8, C>, dst: &mut Image<u8, C>) -> Result<(), ImageError> {
    check_same_size(src, dst)?;

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        for (out, &val) in dst_pixel.iter_mut().zip(src_pixel) {
            *out = 255 - val;
        }
    });

    Ok(())
}
