use pairaug_image::{Image, ImageError};

use super::{kernels, separable_filter};
use crate::padding::PaddingMode;

/// Blur an image using a gaussian blur filter
///
/// Borders are handled by reflecting around the edge pixel (`Reflect101`).
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The size of the kernel (kernel_x, kernel_y), odd values.
/// * `sigma` - The sigma of the gaussian kernel (sigma_x, sigma_y).
///
/// PRECONDITION: `src` and `dst` must have the same shape.
///
/// # Example
///
/// ```
/// use pairaug_image::{Image, ImageSize};
/// use pairaug_imgproc::filter::gaussian_blur;
///
/// let src = Image::<f32, 1>::from_size_val(ImageSize { width: 8, height: 8 }, 3.0).unwrap();
/// let mut dst = Image::<f32, 1>::from_size_val(src.size(), 0.0).unwrap();
///
/// gaussian_blur(&src, &mut dst, (5, 5), (0.5, 0.5)).unwrap();
/// ```
pub fn gaussian_blur<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    kernel_size: (usize, usize),
    sigma: (f32, f32),
) -> Result<(), ImageError> {
    let kernel_x = kernels::gaussian_kernel_1d(kernel_size.0, sigma.0);
    let kernel_y = kernels::gaussian_kernel_1d(kernel_size.1, sigma.1);
    separable_filter(src, dst, &kernel_x, &kernel_y, PaddingMode::Reflect101)?;
    Ok(())
}
