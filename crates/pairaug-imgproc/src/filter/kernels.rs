/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the kernel, normalized to sum to one.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Vec<f32> {
    let mut kernel = Vec::with_capacity(kernel_size);

    let mean = kernel_size.saturating_sub(1) as f32 / 2.0;
    let sigma_sq = sigma * sigma;

    // compute the kernel
    for i in 0..kernel_size {
        let x = i as f32 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}

/// The odd kernel size covering about four sigmas on each side of the center.
///
/// Computed as `round(8 * sigma + 1)`, forced to be odd.
///
/// # Example
///
/// ```
/// use pairaug_imgproc::filter::kernels::gaussian_kernel_size;
///
/// assert_eq!(gaussian_kernel_size(0.5), 5);
/// assert_eq!(gaussian_kernel_size(5.0), 41);
/// ```
pub fn gaussian_kernel_size(sigma: f32) -> usize {
    ((8.0 * sigma + 1.0).round().max(1.0) as usize) | 1
}
