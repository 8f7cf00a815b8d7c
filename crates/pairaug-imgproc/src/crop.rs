use pairaug_image::{Image, ImageError};
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// Crop an image to a specified region.
///
/// The size of the region is taken from `dst`.
///
/// # Arguments
///
/// * `src` - The source image to crop.
/// * `dst` - The destination image to store the cropped image.
/// * `x` - The x-coordinate of the top-left corner of the region to crop.
/// * `y` - The y-coordinate of the top-left corner of the region to crop.
///
/// # Errors
///
/// Returns an error if the region does not fit inside `src`.
///
/// # Examples
///
/// ```rust
/// use pairaug_image::{Image, ImageSize};
/// use pairaug_imgproc::crop::crop_image;
///
/// let image = Image::<_, 1>::new(ImageSize { width: 4, height: 4 }, vec![
///     0u8, 1, 2, 3,
///     4u8, 5, 6, 7,
///     8u8, 9, 10, 11,
///     12u8, 13, 14, 15
/// ]).unwrap();
///
/// let mut cropped = Image::<_, 1>::from_size_val(ImageSize { width: 2, height: 2 }, 0u8).unwrap();
///
/// crop_image(&image, &mut cropped, 1, 1).unwrap();
///
/// assert_eq!(cropped.as_slice(), &[5u8, 6, 9, 10]);
/// ```
pub fn crop_image<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    x: usize,
    y: usize,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if x + dst.cols() > src.cols() || y + dst.rows() > src.rows() {
        return Err(ImageError::RegionOutOfBounds {
            x,
            y,
            width: dst.cols(),
            height: dst.rows(),
            cols: src.cols(),
            rows: src.rows(),
        });
    }

    let dst_cols = dst.cols();
    if dst_cols == 0 {
        return Ok(());
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_cols * C)
        .enumerate()
        .for_each(|(i, dst_row)| {
            // get the slice at the top left corner
            let offset = (y + i) * src.cols() * C + x * C;
            let src_slice = &src.as_slice()[offset..offset + dst_cols * C];

            // copy the slice to the destination
            dst_row.copy_from_slice(src_slice);
        });

    Ok(())
}

/// Crop a region that may extend past the right or bottom edge of `src`.
///
/// Destination pixels not covered by `src` are set to `fill`.
///
/// # Examples
///
/// ```rust
/// use pairaug_image::{Image, ImageSize};
/// use pairaug_imgproc::crop::crop_image_fill;
///
/// let image = Image::<_, 1>::new(ImageSize { width: 2, height: 1 }, vec![1u8, 2]).unwrap();
/// let mut cropped = Image::<_, 1>::from_size_val(ImageSize { width: 2, height: 2 }, 0u8).unwrap();
///
/// crop_image_fill(&image, &mut cropped, 1, 0, [9]).unwrap();
///
/// assert_eq!(cropped.as_slice(), &[2u8, 9, 9, 9]);
/// ```
pub fn crop_image_fill<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    x: usize,
    y: usize,
    fill: [T; C],
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    let dst_cols = dst.cols();
    if dst_cols == 0 {
        return Ok(());
    }

    // number of columns actually covered by the source
    let covered = src.cols().saturating_sub(x).min(dst_cols);

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_cols * C)
        .enumerate()
        .for_each(|(i, dst_row)| {
            dst_row
                .chunks_exact_mut(C)
                .for_each(|px| px.copy_from_slice(&fill));

            let sy = y + i;
            if sy >= src.rows() || covered == 0 {
                return;
            }

            let offset = (sy * src.cols() + x) * C;
            dst_row[..covered * C].copy_from_slice(&src.as_slice()[offset..offset + covered * C]);
        });

    Ok(())
}
