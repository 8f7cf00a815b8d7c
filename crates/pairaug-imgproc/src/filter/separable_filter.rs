use pairaug_image::{Image, ImageDtype, ImageError};
use rayon::prelude::*;

use crate::padding::PaddingMode;

/// A separable 2D filter that applies horizontal and vertical 1D convolutions sequentially.
///
/// Caches the kernel offsets around the center tap.
struct SeparableFilter<'a> {
    kernel_x: &'a [f32],
    kernel_y: &'a [f32],
    offsets_x: Vec<isize>,
    offsets_y: Vec<isize>,
    border: PaddingMode,
}

impl<'a> SeparableFilter<'a> {
    fn new(kernel_x: &'a [f32], kernel_y: &'a [f32], border: PaddingMode) -> Self {
        let half_x = (kernel_x.len() / 2) as isize;
        let half_y = (kernel_y.len() / 2) as isize;

        Self {
            kernel_x,
            kernel_y,
            offsets_x: (0..kernel_x.len() as isize).map(|i| i - half_x).collect(),
            offsets_y: (0..kernel_y.len() as isize).map(|i| i - half_y).collect(),
            border,
        }
    }

    /// Resolve a neighbor index, `None` when the tap reads the zero border.
    #[inline]
    fn tap(&self, i: isize, len: usize) -> Option<usize> {
        if i >= 0 && (i as usize) < len {
            return Some(i as usize);
        }
        match self.border {
            PaddingMode::Constant => None,
            mode => Some(mode.map_index(i, len)),
        }
    }

    fn apply<T: ImageDtype, const C: usize>(
        &self,
        src: &Image<T, C>,
        dst: &mut Image<T, C>,
    ) -> Result<(), ImageError> {
        let rows = src.rows();
        let cols = src.cols();
        let stride = cols * C;

        if stride == 0 || rows == 0 {
            return Ok(());
        }

        let src_data = src.as_slice();
        let mut temp = vec![0.0f32; src_data.len()];

        // horizontal pass into the f32 scratch buffer
        temp.par_chunks_exact_mut(stride)
            .zip(src_data.par_chunks_exact(stride))
            .for_each(|(row_temp, row_src)| {
                for c in 0..cols {
                    let mut acc = [0.0f32; C];
                    for (&k, &off) in self.kernel_x.iter().zip(self.offsets_x.iter()) {
                        if let Some(x) = self.tap(c as isize + off, cols) {
                            for (ch, acc_val) in acc.iter_mut().enumerate() {
                                let val: f32 = row_src[x * C + ch].into();
                                *acc_val += val * k;
                            }
                        }
                    }
                    row_temp[c * C..c * C + C].copy_from_slice(&acc);
                }
            });

        // vertical pass
        dst.as_slice_mut()
            .par_chunks_exact_mut(stride)
            .enumerate()
            .for_each(|(r, row_dst)| {
                for c in 0..cols {
                    let mut acc = [0.0f32; C];
                    for (&k, &off) in self.kernel_y.iter().zip(self.offsets_y.iter()) {
                        if let Some(y) = self.tap(r as isize + off, rows) {
                            let idx = y * stride + c * C;
                            for (ch, acc_val) in acc.iter_mut().enumerate() {
                                *acc_val += temp[idx + ch] * k;
                            }
                        }
                    }
                    for (out, &val) in row_dst[c * C..c * C + C].iter_mut().zip(acc.iter()) {
                        *out = T::from_f32(val);
                    }
                }
            });

        Ok(())
    }
}

/// Apply a separable filter to an image.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_x` - The horizontal kernel, with an odd length.
/// * `kernel_y` - The vertical kernel, with an odd length.
/// * `border` - How taps outside of the image are resolved. `Constant` reads zeros.
///
/// # Errors
///
/// Returns an error if a kernel is empty or even, or if the images differ in size.
pub fn separable_filter<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel_x: &[f32],
    kernel_y: &[f32],
    border: PaddingMode,
) -> Result<(), ImageError> {
    for kernel in [kernel_x, kernel_y] {
        if kernel.len() % 2 == 0 {
            return Err(ImageError::InvalidKernelLength(kernel.len()));
        }
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    SeparableFilter::new(kernel_x, kernel_y, border).apply(src, dst)
}
