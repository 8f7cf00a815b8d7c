use std::borrow::Cow;

use pairaug_image::{Image, ImageSize};
use pairaug_imgproc::{
    crop::{crop_image, crop_image_fill},
    flip::horizontal_flip,
    interpolation::InterpolationMode,
    padding::center_on_canvas,
    resize::resize_fast,
    warp::rotate_expand,
};
use rand::Rng;

use crate::{
    error::AugmentError,
    fill::{FillColor, FillPolicy},
    params::AugmentationParams,
    transform::{target_offset, CorrespondenceTransform, CropWindow},
};

/// Largest canvas, in pixels, that zooming out may allocate.
pub const MAX_CANVAS_PIXELS: usize = 1 << 28;

/// One augmented copy of a pair and the draw that produced it.
#[derive(Debug, Clone)]
pub struct AugmentedPair {
    /// The augmented source image.
    pub source: Image<u8, 3>,
    /// The augmented target image.
    pub target: Image<u8, 3>,
    /// The geometry applied to both images.
    pub transform: CorrespondenceTransform,
}

/// Center an image on a square canvas whose side is the long side of the image.
///
/// # Example
///
/// ```
/// use pairaug_image::{Image, ImageSize};
/// use pairaug_augment::expand_to_square;
///
/// let image = Image::<u8, 3>::from_size_val(ImageSize { width: 4, height: 2 }, 0).unwrap();
/// let square = expand_to_square(&image, [255, 255, 255]).unwrap();
///
/// assert_eq!(square.size(), ImageSize { width: 4, height: 4 });
/// assert_eq!(square.pixel(0, 0).unwrap(), [255, 255, 255]);
/// assert_eq!(square.pixel(0, 1).unwrap(), [0, 0, 0]);
/// ```
pub fn expand_to_square(
    image: &Image<u8, 3>,
    fill: FillColor,
) -> Result<Image<u8, 3>, AugmentError> {
    let side = image.size().max_side();
    Ok(center_on_canvas(
        image,
        ImageSize {
            width: side,
            height: side,
        },
        fill,
    )?)
}

/// Per image state computed once per [`PairAugmenter::augment`] call.
struct PreparedImage<'a> {
    role: &'static str,
    /// The input image, or its square expansion.
    base: Cow<'a, Image<u8, 3>>,
    fill: FillColor,
    original: ImageSize,
}

impl<'a> PreparedImage<'a> {
    fn new(
        role: &'static str,
        image: &'a Image<u8, 3>,
        policy: FillPolicy,
        expand: bool,
    ) -> Result<Self, AugmentError> {
        if image.is_empty() {
            return Err(AugmentError::EmptyImage(role, image.size()));
        }

        let fill = policy.fill_color(image)?;
        let base = if expand {
            Cow::Owned(expand_to_square(image, fill)?)
        } else {
            Cow::Borrowed(image)
        };

        Ok(Self {
            role,
            base,
            fill,
            original: image.size(),
        })
    }

    /// Rotate and flip the base image.
    fn orient(&self, angle: Option<f32>, flip: bool) -> Result<Image<u8, 3>, AugmentError> {
        let mut canvas = match angle {
            Some(angle) => rotate_expand(&*self.base, angle, self.fill)?,
            None => self.base.clone().into_owned(),
        };

        if flip {
            let mut flipped = Image::from_size_val(canvas.size(), 0u8)?;
            horizontal_flip(&canvas, &mut flipped)?;
            canvas = flipped;
        }

        Ok(canvas)
    }

    /// Grow the canvas by `canvas_scale` when zooming out, keeping the image centered.
    fn grow(&self, canvas: Image<u8, 3>, canvas_scale: f64) -> Result<Image<u8, 3>, AugmentError> {
        if canvas_scale <= 1.0 {
            return Ok(canvas);
        }

        let grown = ImageSize {
            width: (canvas.cols() as f64 * canvas_scale) as usize,
            height: (canvas.rows() as f64 * canvas_scale) as usize,
        };
        match grown.width.checked_mul(grown.height) {
            Some(area) if area <= MAX_CANVAS_PIXELS => {}
            _ => return Err(AugmentError::CanvasTooLarge(self.role, grown)),
        }

        Ok(center_on_canvas(&canvas, grown, self.fill)?)
    }

    /// Side of the square crop taken from an oriented canvas.
    fn crop_size(&self, oriented: ImageSize, canvas_scale: f64) -> Result<usize, AugmentError> {
        let size = (oriented.min_side() as f64 * canvas_scale) as usize;
        if size == 0 {
            return Err(AugmentError::ZeroCropSize(self.role, oriented, canvas_scale));
        }
        Ok(size)
    }
}

/// Produces randomized, mutually registered augmentations of a source/target pair.
///
/// Both images of a pair get the same rotation angle, flip decision and zoom scale. The crop
/// window is drawn on the source and mapped onto the target by the ratio of the original image
/// sizes, so the two crops show the same region of the scene as long as both images share the
/// same aspect ratio.
///
/// # Example
///
/// ```
/// use pairaug_image::{Image, ImageSize};
/// use pairaug_augment::{AugmentationParams, PairAugmenter};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let augmenter = PairAugmenter::new(AugmentationParams {
///     output_size: 32,
///     rotation_range: 10.0,
///     min_scale: 0.8,
///     max_scale: 1.2,
///     ..Default::default()
/// })
/// .unwrap();
///
/// let source = Image::<u8, 3>::from_size_val(ImageSize { width: 64, height: 48 }, 20).unwrap();
/// let target = Image::<u8, 3>::from_size_val(ImageSize { width: 128, height: 96 }, 200).unwrap();
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let pairs = augmenter.augment(&source, &target, 3, &mut rng).unwrap();
///
/// assert_eq!(pairs.len(), 3);
/// for pair in &pairs {
///     assert_eq!(pair.source.size(), ImageSize { width: 32, height: 32 });
///     assert_eq!(pair.target.size(), ImageSize { width: 32, height: 32 });
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PairAugmenter {
    params: AugmentationParams,
}

impl PairAugmenter {
    /// Create an augmenter, validating the parameters.
    pub fn new(params: AugmentationParams) -> Result<Self, AugmentError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// The parameters of the augmenter.
    pub fn params(&self) -> &AugmentationParams {
        &self.params
    }

    /// Produce `num_copies` independent augmentations of a pair.
    ///
    /// Fill colors and the optional square expansion are computed once; every copy draws its
    /// own angle, flip, scale and crop position from `rng`.
    ///
    /// # Errors
    ///
    /// Returns an error if either image is empty, a crop degenerates to zero pixels or a
    /// zoomed out canvas would exceed [`MAX_CANVAS_PIXELS`].
    pub fn augment<R: Rng>(
        &self,
        source: &Image<u8, 3>,
        target: &Image<u8, 3>,
        num_copies: usize,
        rng: &mut R,
    ) -> Result<Vec<AugmentedPair>, AugmentError> {
        let (source, target) = self.prepare(source, target)?;
        (0..num_copies)
            .map(|_| self.draw(&source, &target, rng))
            .collect()
    }

    /// Produce a single augmentation of a pair.
    pub fn augment_pair<R: Rng>(
        &self,
        source: &Image<u8, 3>,
        target: &Image<u8, 3>,
        rng: &mut R,
    ) -> Result<AugmentedPair, AugmentError> {
        let (source, target) = self.prepare(source, target)?;
        self.draw(&source, &target, rng)
    }

    fn prepare<'a>(
        &self,
        source: &'a Image<u8, 3>,
        target: &'a Image<u8, 3>,
    ) -> Result<(PreparedImage<'a>, PreparedImage<'a>), AugmentError> {
        let expand = self.params.expand_to_long_side;
        let source = PreparedImage::new("source", source, self.params.source_fill, expand)?;
        let target = PreparedImage::new("target", target, self.params.target_fill, expand)?;

        log::debug!(
            "fill colors: source {:?}, target {:?}",
            source.fill,
            target.fill
        );

        Ok((source, target))
    }

    fn draw<R: Rng>(
        &self,
        source: &PreparedImage,
        target: &PreparedImage,
        rng: &mut R,
    ) -> Result<AugmentedPair, AugmentError> {
        let params = &self.params;

        let angle = if params.rotation_range > 0.0 {
            Some(rng.random_range(-params.rotation_range..=params.rotation_range))
        } else {
            None
        };

        let flip = params.flip && rng.random_bool(0.5);

        let scale = if params.min_scale < params.max_scale {
            rng.random_range(params.min_scale..=params.max_scale)
        } else {
            params.min_scale
        };
        let canvas_scale = 1.0 / scale;

        let source_oriented = source.orient(angle, flip)?;
        let target_oriented = target.orient(angle, flip)?;

        let source_crop_size = source.crop_size(source_oriented.size(), canvas_scale)?;
        let target_crop_size = target.crop_size(target_oriented.size(), canvas_scale)?;

        let source_canvas = source.grow(source_oriented, canvas_scale)?;
        let target_canvas = target.grow(target_oriented, canvas_scale)?;

        let (sw, sh) = (source_canvas.cols(), source_canvas.rows());
        if source_crop_size > sw || source_crop_size > sh {
            return Err(AugmentError::CropExceedsCanvas(
                source_crop_size,
                source_canvas.size(),
            ));
        }

        let source_crop = CropWindow {
            x: rng.random_range(0..=sw - source_crop_size),
            y: rng.random_range(0..=sh - source_crop_size),
            size: source_crop_size,
        };

        let target_crop = CropWindow {
            x: target_offset(source_crop.x, source.original.width, target.original.width),
            y: target_offset(source_crop.y, source.original.height, target.original.height),
            size: target_crop_size,
        };

        if !target_crop.fits_in(target_canvas.size()) {
            log::debug!(
                "target crop {:?} leaves the {} canvas, filling the uncovered area",
                target_crop,
                target_canvas.size()
            );
        }

        let transform = CorrespondenceTransform {
            angle: angle.unwrap_or(0.0),
            flip,
            scale,
            canvas_scale,
            source_crop,
            target_crop,
            source_canvas: source_canvas.size(),
            target_canvas: target_canvas.size(),
        };

        log::debug!("{transform:?}");

        let source = self.finish(&source_canvas, source_crop, None)?;
        let target = self.finish(&target_canvas, target_crop, Some(target.fill))?;

        Ok(AugmentedPair {
            source,
            target,
            transform,
        })
    }

    /// Crop a window out of a canvas and resize it to the output size.
    ///
    /// With a `fill`, the window may extend past the canvas.
    fn finish(
        &self,
        canvas: &Image<u8, 3>,
        window: CropWindow,
        fill: Option<FillColor>,
    ) -> Result<Image<u8, 3>, AugmentError> {
        let crop_size = ImageSize {
            width: window.size,
            height: window.size,
        };
        let mut cropped = Image::from_size_val(crop_size, 0u8)?;
        match fill {
            Some(fill) => crop_image_fill(canvas, &mut cropped, window.x, window.y, fill)?,
            None => crop_image(canvas, &mut cropped, window.x, window.y)?,
        }

        let output_size = ImageSize {
            width: self.params.output_size,
            height: self.params.output_size,
        };
        let mut output = Image::from_size_val(output_size, 0u8)?;
        resize_fast(&cropped, &mut output, InterpolationMode::Bicubic)?;

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn identity_params(output_size: usize) -> AugmentationParams {
        AugmentationParams {
            output_size,
            flip: false,
            rotation_range: 0.0,
            min_scale: 1.0,
            max_scale: 1.0,
            source_fill: FillPolicy::White,
            target_fill: FillPolicy::White,
            expand_to_long_side: false,
        }
    }

    fn gradient(size: ImageSize) -> Result<Image<u8, 3>, AugmentError> {
        let data = (0..size.area())
            .flat_map(|i| {
                let (x, y) = (i % size.width, i / size.width);
                [(x * 7 % 256) as u8, (y * 5 % 256) as u8, ((x + y) % 256) as u8]
            })
            .collect();
        Ok(Image::new(size, data)?)
    }

    #[test]
    fn expand_to_square_centers_image() -> Result<(), AugmentError> {
        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 3,
                height: 6,
            },
            0,
        )?;
        let square = expand_to_square(&image, [9, 9, 9])?;
        assert_eq!(
            square.size(),
            ImageSize {
                width: 6,
                height: 6
            }
        );
        // offset (6 - 3) / 2 = 1
        assert_eq!(square.pixel(0, 0)?, [9, 9, 9]);
        assert_eq!(square.pixel(1, 0)?, [0, 0, 0]);
        assert_eq!(square.pixel(3, 5)?, [0, 0, 0]);
        assert_eq!(square.pixel(4, 5)?, [9, 9, 9]);
        Ok(())
    }

    #[test]
    fn identity_draw_returns_square_crop() -> Result<(), AugmentError> {
        let image = gradient(ImageSize {
            width: 48,
            height: 32,
        })?;
        let augmenter = PairAugmenter::new(identity_params(32))?;
        let mut rng = StdRng::seed_from_u64(7);

        let pair = augmenter.augment_pair(&image, &image, &mut rng)?;
        let window = pair.transform.source_crop;
        assert_eq!(window.size, 32);
        assert_eq!(window.y, 0);

        let mut expected = Image::<u8, 3>::from_size_val(pair.source.size(), 0)?;
        crop_image(&image, &mut expected, window.x, window.y)?;

        assert_eq!(pair.source, expected);
        assert_eq!(pair.target, expected);
        assert_eq!(pair.transform.target_crop, window);
        Ok(())
    }

    #[test]
    fn zoom_out_grows_canvas() -> Result<(), AugmentError> {
        let image = gradient(ImageSize {
            width: 40,
            height: 20,
        })?;
        let augmenter = PairAugmenter::new(AugmentationParams {
            min_scale: 0.5,
            max_scale: 0.5,
            ..identity_params(16)
        })?;
        let mut rng = StdRng::seed_from_u64(1);

        let pair = augmenter.augment_pair(&image, &image, &mut rng)?;
        let t = pair.transform;
        approx::assert_relative_eq!(t.canvas_scale, 2.0);
        assert_eq!(
            t.source_canvas,
            ImageSize {
                width: 80,
                height: 40
            }
        );
        // twice the short side of the canvas before growing
        assert_eq!(t.source_crop.size, 40);
        Ok(())
    }

    #[test]
    fn zoom_in_shrinks_crop() -> Result<(), AugmentError> {
        let image = gradient(ImageSize {
            width: 40,
            height: 20,
        })?;
        let augmenter = PairAugmenter::new(AugmentationParams {
            min_scale: 2.0,
            max_scale: 2.0,
            ..identity_params(16)
        })?;
        let mut rng = StdRng::seed_from_u64(1);

        let pair = augmenter.augment_pair(&image, &image, &mut rng)?;
        assert_eq!(pair.transform.source_canvas, image.size());
        assert_eq!(pair.transform.source_crop.size, 10);
        assert!(pair.transform.source_crop.fits_in(image.size()));
        Ok(())
    }

    #[test]
    fn flip_is_shared() -> Result<(), AugmentError> {
        let image = gradient(ImageSize {
            width: 16,
            height: 16,
        })?;
        let augmenter = PairAugmenter::new(AugmentationParams {
            flip: true,
            ..identity_params(16)
        })?;
        let mut rng = StdRng::seed_from_u64(3);

        let pairs = augmenter.augment(&image, &image, 16, &mut rng)?;
        let mut flipped = Image::<u8, 3>::from_size_val(image.size(), 0)?;
        horizontal_flip(&image, &mut flipped)?;

        for pair in &pairs {
            assert_eq!(pair.source, pair.target);
            let expected = if pair.transform.flip { &flipped } else { &image };
            assert_eq!(&pair.source, expected);
        }
        // 16 fair coin flips all landing the same way would be a broken draw
        assert!(pairs.iter().any(|p| p.transform.flip));
        assert!(pairs.iter().any(|p| !p.transform.flip));
        Ok(())
    }

    #[test]
    fn same_seed_same_draws() -> Result<(), AugmentError> {
        let source = gradient(ImageSize {
            width: 30,
            height: 20,
        })?;
        let target = gradient(ImageSize {
            width: 60,
            height: 40,
        })?;
        let augmenter = PairAugmenter::new(AugmentationParams {
            rotation_range: 30.0,
            min_scale: 0.7,
            max_scale: 1.3,
            ..identity_params(24)
        })?;

        let a = augmenter.augment(&source, &target, 4, &mut StdRng::seed_from_u64(11))?;
        let b = augmenter.augment(&source, &target, 4, &mut StdRng::seed_from_u64(11))?;
        for (a, b) in a.iter().zip(b.iter()) {
            assert_eq!(a.transform, b.transform);
            assert_eq!(a.source, b.source);
            assert_eq!(a.target, b.target);
        }
        Ok(())
    }

    #[test]
    fn empty_inputs_fail() -> Result<(), AugmentError> {
        let image = gradient(ImageSize {
            width: 8,
            height: 8,
        })?;
        let empty = Image::<u8, 3>::new(
            ImageSize {
                width: 0,
                height: 8,
            },
            vec![],
        )?;
        let augmenter = PairAugmenter::new(identity_params(8))?;
        let mut rng = StdRng::seed_from_u64(0);

        assert!(matches!(
            augmenter.augment_pair(&empty, &image, &mut rng),
            Err(AugmentError::EmptyImage("source", _))
        ));
        assert!(matches!(
            augmenter.augment_pair(&image, &empty, &mut rng),
            Err(AugmentError::EmptyImage("target", _))
        ));
        Ok(())
    }

    #[test]
    fn tiny_crop_fails() -> Result<(), AugmentError> {
        let image = gradient(ImageSize {
            width: 3,
            height: 1,
        })?;
        let augmenter = PairAugmenter::new(AugmentationParams {
            min_scale: 4.0,
            max_scale: 4.0,
            ..identity_params(8)
        })?;
        let mut rng = StdRng::seed_from_u64(0);

        assert!(matches!(
            augmenter.augment_pair(&image, &image, &mut rng),
            Err(AugmentError::ZeroCropSize("source", _, _))
        ));
        Ok(())
    }

    #[test]
    fn oversized_canvas_fails() -> Result<(), AugmentError> {
        let image = gradient(ImageSize {
            width: 64,
            height: 48,
        })?;
        let augmenter = PairAugmenter::new(AugmentationParams {
            min_scale: 1.0 / 1024.0,
            max_scale: 1.0 / 1024.0,
            ..identity_params(8)
        })?;
        let mut rng = StdRng::seed_from_u64(0);

        match augmenter.augment_pair(&image, &image, &mut rng) {
            Err(AugmentError::CanvasTooLarge("source", size)) => {
                assert_eq!(
                    size,
                    ImageSize {
                        width: 65_536,
                        height: 49_152
                    }
                );
            }
            other => panic!("expected an oversized canvas, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn overflowing_canvas_fails() -> Result<(), AugmentError> {
        let image = gradient(ImageSize {
            width: 4,
            height: 4,
        })?;
        let augmenter = PairAugmenter::new(AugmentationParams {
            min_scale: 1e-300,
            max_scale: 1e-300,
            ..identity_params(8)
        })?;
        let mut rng = StdRng::seed_from_u64(0);

        assert!(matches!(
            augmenter.augment_pair(&image, &image, &mut rng),
            Err(AugmentError::CanvasTooLarge("source", _))
        ));
        Ok(())
    }
}
