use super::interpolate::fetch;
use pairaug_image::{Image, ImageDtype};

/// Kernel for bilinear interpolation
///
/// Neighbors that fall outside of the image contribute the `border` value, which keeps
/// the edges of a warped image blended with the fill color instead of clipped.
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `border` - The value used for out of bounds neighbors.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn bilinear_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    border: &[f32; C],
) -> [f32; C] {
    let u0 = u.floor();
    let v0 = v.floor();

    let frac_u = u - u0;
    let frac_v = v - v0;
    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    let (iu0, iv0) = (u0 as i64, v0 as i64);

    let p00 = fetch(image, iu0, iv0, border);
    let p01 = fetch(image, iu0 + 1, iv0, border);
    let p10 = fetch(image, iu0, iv0 + 1, border);
    let p11 = fetch(image, iu0 + 1, iv0 + 1, border);

    let w00 = frac_uu * frac_vv;
    let w01 = frac_u * frac_vv;
    let w10 = frac_uu * frac_v;
    let w11 = frac_u * frac_v;

    let mut pixel = [0.0; C];
    for k in 0..C {
        pixel[k] = p00[k] * w00 + p01[k] * w01 + p10[k] * w10 + p11[k] * w11;
    }

    pixel
}
