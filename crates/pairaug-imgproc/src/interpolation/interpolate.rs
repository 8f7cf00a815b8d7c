use pairaug_image::{Image, ImageDtype};

/// Interpolation mode for the resize operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationMode {
    /// Nearest neighbor interpolation
    Nearest,
    /// Bilinear interpolation
    Bilinear,
    /// Bicubic (Catmull-Rom) interpolation
    Bicubic,
    /// Pixel area relation, the usual choice when shrinking images
    Area,
}

/// Fetch the channels of pixel (`x`, `y`) as f32, or `border` when out of bounds.
#[inline]
pub(crate) fn fetch<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    x: i64,
    y: i64,
    border: &[f32; C],
) -> [f32; C] {
    if x < 0 || y < 0 || x >= image.cols() as i64 || y >= image.rows() as i64 {
        return *border;
    }

    let base = (y as usize * image.cols() + x as usize) * C;
    let data = &image.as_slice()[base..base + C];

    let mut pixel = [0.0; C];
    for (dst, &src) in pixel.iter_mut().zip(data) {
        *dst = src.into();
    }
    pixel
}
