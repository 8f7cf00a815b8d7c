use pairaug_image::{Image, ImageError};
use rayon::{iter::ParallelIterator, slice::ParallelSliceMut};

/// Flip the input image horizontally (mirror left to right).
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
/// * `dst` - The output image with the same shape as `src`.
///
/// # Errors
///
/// Returns an error if `src` and `dst` have different sizes.
///
/// # Example
///
/// ```
/// use pairaug_image::{Image, ImageSize};
/// use pairaug_imgproc::flip::horizontal_flip;
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 3, height: 1 }, vec![1, 2, 3]).unwrap();
/// let mut flipped = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// horizontal_flip(&image, &mut flipped).unwrap();
///
/// assert_eq!(flipped.as_slice(), &[3, 2, 1]);
/// ```
pub fn horizontal_flip<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            dst.cols(),
            dst.rows(),
            src.cols(),
            src.rows(),
        ));
    }

    let cols = src.cols();
    if cols == 0 {
        return Ok(());
    }

    dst.as_slice_mut().copy_from_slice(src.as_slice());
    dst.as_slice_mut()
        .par_chunks_exact_mut(cols * C)
        .for_each(|row| {
            let mut i = 0;
            let mut j = cols - 1;
            while i < j {
                for c in 0..C {
                    row.swap(i * C + c, j * C + c);
                }
                i += 1;
                j -= 1;
            }
        });

    Ok(())
}
