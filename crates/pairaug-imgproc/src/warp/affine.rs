use std::f32::consts::PI;

use pairaug_image::{Image, ImageDtype, ImageError, ImageSize};
use rayon::prelude::*;

use crate::interpolation::bilinear_interpolation;

/// Inverts a 2x3 affine transformation matrix.
///
/// Arguments:
///
/// * `m` - The 2x3 affine transformation matrix.
///
/// Returns:
///
/// The inverted 2x3 affine transformation matrix.
pub fn invert_affine_transform(m: &[f32; 6]) -> [f32; 6] {
    let (a, b, c, d, e, f) = (m[0], m[1], m[2], m[3], m[4], m[5]);

    // follow OpenCV: check for determinant == 0
    let determinant = a * e - b * d;
    let inv_determinant = if determinant != 0.0 {
        1.0 / determinant
    } else {
        0.0
    };

    let new_a = e * inv_determinant;
    let new_b = -b * inv_determinant;
    let new_d = -d * inv_determinant;
    let new_e = a * inv_determinant;
    let new_c = -(new_a * c + new_b * f);
    let new_f = -(new_d * c + new_e * f);

    [new_a, new_b, new_c, new_d, new_e, new_f]
}

/// Returns a 2x3 rotation matrix for a 2D rotation around a center point.
///
/// The rotation matrix is defined as:
///
/// | alpha  beta  tx |
/// | -beta  alpha ty |
///
/// where:
///
/// alpha = scale * cos(angle)
/// beta = scale * sin(angle)
/// tx = (1 - alpha) * center.x - beta * center.y
/// ty = beta * center.x + (1 - alpha) * center.y
///
/// Positive angles rotate the image counter-clockwise on screen.
///
/// # Arguments
///
/// * `center` - The center point of the rotation.
/// * `angle` - The angle of rotation in degrees.
/// * `scale` - The scale factor.
///
/// # Example
///
/// ```
/// use pairaug_imgproc::warp::get_rotation_matrix2d;
///
/// let rotation_matrix = get_rotation_matrix2d((0.0, 0.0), 0.0, 1.0);
/// assert_eq!(rotation_matrix, [1.0, 0.0, 0.0, -0.0, 1.0, 0.0]);
/// ```
pub fn get_rotation_matrix2d(center: (f32, f32), angle: f32, scale: f32) -> [f32; 6] {
    let angle = angle * PI / 180.0f32;
    let alpha = scale * angle.cos();
    let beta = scale * angle.sin();

    let tx = (1.0 - alpha) * center.0 - beta * center.1;
    let ty = beta * center.0 + (1.0 - alpha) * center.1;

    [alpha, beta, tx, -beta, alpha, ty]
}

/// Applies an affine transformation to a point.
#[inline]
fn transform_point(x: f32, y: f32, m: &[f32; 6]) -> (f32, f32) {
    let u = m[0] * x + m[1] * y + m[2];
    let v = m[3] * x + m[4] * y + m[5];
    (u, v)
}

/// Applies an affine transformation to an image.
///
/// Every destination pixel is mapped back into `src` through the inverse of `m`; locations
/// that land outside of `src` take the `border` value.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (new_height, new_width, channels).
/// * `m` - The 2x3 affine transformation matrix, mapping `src` to `dst` coordinates.
/// * `border` - The pixel value for the uncovered area.
///
/// # Example
///
/// ```
/// use pairaug_image::{Image, ImageSize};
/// use pairaug_imgproc::warp::warp_affine;
///
/// let src = Image::<_, 3>::from_size_val(ImageSize { width: 4, height: 5 }, 1u8).unwrap();
///
/// let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
///
/// let mut dst = Image::<_, 3>::from_size_val(ImageSize { width: 4, height: 5 }, 0u8).unwrap();
///
/// warp_affine(&src, &mut dst, &m, [0, 0, 0]).unwrap();
///
/// assert_eq!(dst, src);
/// ```
pub fn warp_affine<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    m: &[f32; 6],
    border: [T; C],
) -> Result<(), ImageError> {
    if src.is_empty() {
        return Err(ImageError::EmptyImage(src.cols(), src.rows()));
    }

    // invert affine transform matrix to find corresponding positions in src from dst
    let m_inv = invert_affine_transform(m);

    let mut border_f32 = [0.0f32; C];
    for (dst, &src) in border_f32.iter_mut().zip(border.iter()) {
        *dst = src.into();
    }

    let dst_cols = dst.cols();
    if dst_cols == 0 {
        return Ok(());
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_cols * C)
        .enumerate()
        .for_each(|(y, dst_row)| {
            for (x, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
                let (u, v) = transform_point(x as f32, y as f32, &m_inv);
                let pixel = bilinear_interpolation(src, u, v, &border_f32);
                for (out, val) in dst_pixel.iter_mut().zip(pixel) {
                    *out = T::from_f32(val);
                }
            }
        });

    Ok(())
}

/// Size of the smallest canvas holding an image of `size` rotated by `angle` degrees.
///
/// # Example
///
/// ```
/// use pairaug_image::ImageSize;
/// use pairaug_imgproc::warp::rotated_bounds;
///
/// let size = ImageSize { width: 4, height: 2 };
/// assert_eq!(rotated_bounds(size, 0.0), size);
/// assert_eq!(rotated_bounds(size, 90.0), ImageSize { width: 2, height: 4 });
/// ```
pub fn rotated_bounds(size: ImageSize, angle: f32) -> ImageSize {
    let angle = angle * PI / 180.0f32;
    let (sin, cos) = (angle.sin().abs(), angle.cos().abs());

    let (w, h) = (size.width as f32, size.height as f32);

    // tolerate the f32 noise of sin/cos at right angles
    let width = (w * cos + h * sin - 1e-3).ceil().max(1.0) as usize;
    let height = (w * sin + h * cos - 1e-3).ceil().max(1.0) as usize;

    ImageSize { width, height }
}

/// Rotate an image around its center, growing the canvas so that no corner is clipped.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `angle` - The rotation angle in degrees, counter-clockwise.
/// * `fill` - The pixel value of the newly exposed canvas area.
///
/// # Returns
///
/// The rotated image with size [`rotated_bounds`]`(src.size(), angle)`.
///
/// # Example
///
/// ```
/// use pairaug_image::{Image, ImageSize};
/// use pairaug_imgproc::warp::rotate_expand;
///
/// let src = Image::<u8, 1>::new(ImageSize { width: 2, height: 1 }, vec![1, 2]).unwrap();
/// let rotated = rotate_expand(&src, 90.0, [0]).unwrap();
///
/// assert_eq!(rotated.size(), ImageSize { width: 1, height: 2 });
/// assert_eq!(rotated.as_slice(), &[2, 1]);
/// ```
pub fn rotate_expand<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    angle: f32,
    fill: [T; C],
) -> Result<Image<T, C>, ImageError> {
    if src.is_empty() {
        return Err(ImageError::EmptyImage(src.cols(), src.rows()));
    }

    let new_size = rotated_bounds(src.size(), angle);

    let src_center = (
        (src.cols() as f32 - 1.0) / 2.0,
        (src.rows() as f32 - 1.0) / 2.0,
    );
    let dst_center = (
        (new_size.width as f32 - 1.0) / 2.0,
        (new_size.height as f32 - 1.0) / 2.0,
    );

    // rotate around the source center, then move it onto the center of the new canvas
    let mut m = get_rotation_matrix2d(src_center, angle, 1.0);
    m[2] += dst_center.0 - src_center.0;
    m[5] += dst_center.1 - src_center.1;

    let mut dst = Image::from_size_pixel(new_size, fill)?;
    warp_affine(src, &mut dst, &m, fill)?;

    Ok(dst)
}
