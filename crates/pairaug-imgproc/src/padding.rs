use pairaug_image::{Image, ImageError, ImageSize};
use rayon::prelude::*;

/// A border type for the spatial padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingMode {
    /// This border type fills the border with a single, constant color value.
    ///
    /// Example: ...d c b a | 0 0 0 0...
    Constant,

    /// This border type takes the outermost row or column of pixels and repeats it into the padded region.
    ///
    /// Example: ...d c b a | a a a a...
    Replicate,

    /// This border type reflects the pixel values at the boundary, starting with the pixel 'next' to the edge.
    ///
    /// Example: ...d c b a | b c d e...
    Reflect101,
}

impl PaddingMode {
    #[inline]
    fn reflect101(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let len = len as isize;
        let mut i = i;
        while i < 0 || i >= len {
            if i < 0 {
                i = -i;
            } else {
                i = 2 * len - i - 2;
            }
        }
        i as usize
    }

    /// Maps index `i` to a valid index i.e. within `[0, len)` according to the padding mode.
    ///
    /// - `Replicate`: clamp to edge
    /// - `Reflect101`: mirror excluding edge
    /// - `Constant`: returns 0 (not used directly)
    ///
    /// `len` must be greater than zero.
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> usize {
        match self {
            PaddingMode::Replicate => i.clamp(0, len as isize - 1) as usize,
            PaddingMode::Reflect101 => Self::reflect101(i, len),
            PaddingMode::Constant => 0,
        }
    }
}

/// Represents 2D padding with top, bottom, left, and right values (in pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding2D {
    /// Amount of padding to add on the top side.
    pub top: usize,
    /// Amount of padding to add on the bottom side.
    pub bottom: usize,
    /// Amount of padding to add on the left side.
    pub left: usize,
    /// Amount of padding to add on the right side.
    pub right: usize,
}

impl Padding2D {
    /// Padding that places an image of `inner` size at the center of an `outer` canvas.
    ///
    /// Odd leftovers go to the bottom and right sides.
    ///
    /// # Errors
    ///
    /// Returns an error if `inner` does not fit in `outer`.
    pub fn centered(inner: ImageSize, outer: ImageSize) -> Result<Self, ImageError> {
        if inner.width > outer.width || inner.height > outer.height {
            return Err(ImageError::InvalidImageSize(
                inner.width,
                inner.height,
                outer.width,
                outer.height,
            ));
        }

        let left = (outer.width - inner.width) / 2;
        let top = (outer.height - inner.height) / 2;

        Ok(Self {
            top,
            bottom: outer.height - inner.height - top,
            left,
            right: outer.width - inner.width - left,
        })
    }

    /// The size of an image of `size` after applying this padding.
    pub fn padded_size(&self, size: ImageSize) -> ImageSize {
        ImageSize {
            width: size.width + self.left + self.right,
            height: size.height + self.top + self.bottom,
        }
    }
}

/// Creates a new image with spatial padding applied to reach target size.
///
/// # Arguments
///
/// * `src` - The source image to pad.
/// * `dst` - The destination image where the padded output will be stored.
/// * `padding` - The amount of padding (in pixels) for all four sides.
/// * `padding_mode` - The type of border handling to use defined in [`PaddingMode`].
/// * `constant_value` - The pixel value used for constant padding, one value per channel.
///
/// # Errors
///
/// Returns an error if the size of `dst` does not match the padded size of `src`, or if
/// `src` is empty and the mode needs source pixels to fill the border.
///
/// # Example
///
/// ```rust
/// use pairaug_image::{Image, ImageSize};
/// use pairaug_imgproc::padding::{spatial_padding, Padding2D, PaddingMode};
///
/// let src = Image::<u8, 1>::new(ImageSize { width: 2, height: 1 }, vec![1, 2]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(ImageSize { width: 4, height: 2 }, 0).unwrap();
///
/// spatial_padding(
///     &src,
///     &mut dst,
///     Padding2D { top: 0, bottom: 1, left: 0, right: 2 },
///     PaddingMode::Replicate,
///     [0u8],
/// )
/// .unwrap();
///
/// assert_eq!(dst.as_slice(), &[1, 2, 2, 2, 1, 2, 2, 2]);
/// ```
pub fn spatial_padding<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    padding: Padding2D,
    padding_mode: PaddingMode,
    constant_value: [T; C],
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    let expected = padding.padded_size(src.size());
    if dst.size() != expected {
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            expected.width,
            expected.height,
        ));
    }

    if src.is_empty() && padding_mode != PaddingMode::Constant {
        return Err(ImageError::EmptyImage(src.width(), src.height()));
    }

    let (old_width, old_height) = (src.width(), src.height());
    let new_width = dst.width();
    let old_stride = old_width * C;
    let new_stride = new_width * C;

    if new_stride == 0 {
        return Ok(());
    }

    let old_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(new_stride)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let src_y = y as isize - padding.top as isize;
            let inside_rows = src_y >= 0 && (src_y as usize) < old_height;

            if padding_mode == PaddingMode::Constant {
                dst_row
                    .chunks_exact_mut(C)
                    .for_each(|px| px.copy_from_slice(&constant_value));
                if inside_rows && old_stride > 0 {
                    let row = &old_data[src_y as usize * old_stride..(src_y as usize + 1) * old_stride];
                    dst_row[padding.left * C..padding.left * C + old_stride].copy_from_slice(row);
                }
                return;
            }

            let sy = padding_mode.map_index(src_y, old_height);
            let row = &old_data[sy * old_stride..(sy + 1) * old_stride];
            for (x, px) in dst_row.chunks_exact_mut(C).enumerate() {
                let sx = padding_mode.map_index(x as isize - padding.left as isize, old_width);
                px.copy_from_slice(&row[sx * C..sx * C + C]);
            }
        });

    Ok(())
}

/// Place `src` at the center of a new canvas of `canvas_size` filled with `fill`.
///
/// # Errors
///
/// Returns an error if `src` is larger than the canvas in either dimension.
///
/// # Example
///
/// ```rust
/// use pairaug_image::{Image, ImageSize};
/// use pairaug_imgproc::padding::center_on_canvas;
///
/// let src = Image::<u8, 1>::new(ImageSize { width: 1, height: 1 }, vec![9]).unwrap();
/// let canvas = center_on_canvas(&src, ImageSize { width: 3, height: 1 }, [0]).unwrap();
///
/// assert_eq!(canvas.as_slice(), &[0, 9, 0]);
/// ```
pub fn center_on_canvas<T, const C: usize>(
    src: &Image<T, C>,
    canvas_size: ImageSize,
    fill: [T; C],
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Send + Sync,
{
    let padding = Padding2D::centered(src.size(), canvas_size)?;
    let mut dst = Image::from_size_pixel(canvas_size, fill)?;
    spatial_padding(src, &mut dst, padding, PaddingMode::Constant, fill)?;
    Ok(dst)
}
