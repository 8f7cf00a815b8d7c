use pairaug_image::{Image, ImageError};

/// Compute the mean of each channel of an 8-bit image.
///
/// # Arguments
///
/// * `image` - The input image.
///
/// # Returns
///
/// The per channel mean, in the channel order of the image.
///
/// # Errors
///
/// Returns an error if the image has no pixels.
///
/// # Example
///
/// ```
/// use pairaug_image::{Image, ImageSize};
/// use pairaug_imgproc::core::mean;
///
/// let image = Image::<u8, 3>::new(
///    ImageSize {
///      width: 2,
///      height: 2,
///  },
/// vec![0, 1, 2, 253, 254, 255, 128, 129, 130, 64, 65, 66],
/// ).unwrap();
///
/// let mean = mean(&image).unwrap();
///
/// assert_eq!(mean, [111.25, 112.25, 113.25]);
/// ```
pub fn mean<const C: usize>(image: &Image<u8, C>) -> Result<[f64; C], ImageError> {
    if image.is_empty() {
        return Err(ImageError::EmptyImage(image.cols(), image.rows()));
    }

    let mut sum = [0u64; C];
    for pixel in image.as_slice().chunks_exact(C) {
        for (acc, &val) in sum.iter_mut().zip(pixel) {
            *acc += val as u64;
        }
    }

    let n = (image.cols() * image.rows()) as f64;
    let mut mean = [0f64; C];
    for (m, &s) in mean.iter_mut().zip(sum.iter()) {
        *m = s as f64 / n;
    }

    Ok(mean)
}

/// Count the occurrences of every pixel value in a set of image regions.
///
/// Regions are given as `(x, y, width, height)` and are visited in order, row-major inside
/// each region. The counts are returned in order of first appearance.
///
/// # Errors
///
/// Returns an error if a region does not fit inside the image.
pub fn pixel_histogram<const C: usize>(
    image: &Image<u8, C>,
    regions: &[(usize, usize, usize, usize)],
) -> Result<Vec<([u8; C], usize)>, ImageError> {
    let mut counts: Vec<([u8; C], usize)> = Vec::new();
    let mut index = std::collections::HashMap::<[u8; C], usize>::new();

    for &(x, y, width, height) in regions {
        if x + width > image.cols() || y + height > image.rows() {
            return Err(ImageError::RegionOutOfBounds {
                x,
                y,
                width,
                height,
                cols: image.cols(),
                rows: image.rows(),
            });
        }

        for row in y..y + height {
            let start = (row * image.cols() + x) * C;
            for px in image.as_slice()[start..start + width * C].chunks_exact(C) {
                let mut pixel = [0u8; C];
                pixel.copy_from_slice(px);
                match index.get(&pixel) {
                    Some(&i) => counts[i].1 += 1,
                    None => {
                        index.insert(pixel, counts.len());
                        counts.push((pixel, 1));
                    }
                }
            }
        }
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairaug_image::ImageSize;

    #[test]
    fn test_mean_empty() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 0,
                height: 3,
            },
            vec![],
        )?;
        assert_eq!(mean(&image), Err(ImageError::EmptyImage(0, 3)));
        Ok(())
    }

    #[test]
    fn test_mean_gray() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 1,
            },
            vec![0, 1, 255],
        )?;
        assert_eq!(mean(&image)?, [256.0 / 3.0]);
        Ok(())
    }

    #[test]
    fn test_pixel_histogram_first_seen_order() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::<u8, 1>::new(
            ImageSize { width: 3, height: 2 },
            vec![
                5, 7, 7,
                5, 9, 7,
            ],
        )?;

        // left column, then right column
        let counts = pixel_histogram(&image, &[(0, 0, 1, 2), (2, 0, 1, 2)])?;
        assert_eq!(counts, vec![([5], 2), ([7], 2)]);

        let counts = pixel_histogram(&image, &[(0, 0, 3, 2)])?;
        assert_eq!(counts, vec![([5], 2), ([7], 3), ([9], 1)]);

        assert!(pixel_histogram(&image, &[(2, 0, 2, 1)]).is_err());
        Ok(())
    }
}
