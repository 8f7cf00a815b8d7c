use pairaug_augment::{
    target_offset, AugmentError, AugmentationParams, FillPolicy, PairAugmenter,
};
use pairaug_image::{Image, ImageSize};
use pairaug_imgproc::{interpolation::InterpolationMode, resize::resize_fast};
use rand::{rngs::StdRng, SeedableRng};

fn no_op_params(output_size: usize) -> AugmentationParams {
    AugmentationParams {
        output_size,
        flip: false,
        rotation_range: 0.0,
        min_scale: 1.0,
        max_scale: 1.0,
        source_fill: FillPolicy::AverageColor,
        target_fill: FillPolicy::White,
        expand_to_long_side: false,
    }
}

/// An image whose pixel at `(x, y)` encodes its coordinates.
fn coordinates(size: ImageSize) -> Result<Image<u8, 3>, AugmentError> {
    let data = (0..size.area())
        .flat_map(|i| {
            let (x, y) = (i % size.width, i / size.width);
            [(x % 256) as u8, (y % 256) as u8, 128]
        })
        .collect();
    Ok(Image::new(size, data)?)
}

#[test]
fn no_op_returns_square_crop() -> Result<(), AugmentError> {
    let size = ImageSize {
        width: 120,
        height: 80,
    };
    let source = coordinates(size)?;
    let target = coordinates(size)?;

    let augmenter = PairAugmenter::new(no_op_params(80))?;
    let pairs = augmenter.augment(&source, &target, 5, &mut StdRng::seed_from_u64(5))?;

    assert_eq!(pairs.len(), 5);
    for pair in pairs {
        let window = pair.transform.source_crop;
        assert_eq!(window.size, 80);
        assert_eq!(window.y, 0);
        assert!(window.x <= 40);

        // the first channel holds the column index
        assert_eq!(pair.source.pixel(0, 0)?[0] as usize, window.x);
        assert_eq!(pair.source.pixel(79, 79)?[1], 79);
        assert_eq!(pair.source, pair.target);
    }
    Ok(())
}

#[test]
fn target_window_follows_resolution_ratio() -> Result<(), AugmentError> {
    let source = coordinates(ImageSize {
        width: 96,
        height: 64,
    })?;
    let target = coordinates(ImageSize {
        width: 192,
        height: 128,
    })?;

    let augmenter = PairAugmenter::new(AugmentationParams {
        min_scale: 1.5,
        max_scale: 2.5,
        ..no_op_params(32)
    })?;
    let pairs = augmenter.augment(&source, &target, 8, &mut StdRng::seed_from_u64(9))?;

    for pair in pairs {
        let t = pair.transform;
        assert_eq!(t.target_crop.x, target_offset(t.source_crop.x, 96, 192));
        assert_eq!(t.target_crop.y, target_offset(t.source_crop.y, 64, 128));
        assert_eq!(t.target_crop.x, 2 * t.source_crop.x);
        assert_eq!(t.target_crop.y, 2 * t.source_crop.y);

        // the target crop shows the same region at twice the resolution
        let (sx, sy) = t.source_crop.relative_offset(t.source_canvas);
        let (tx, ty) = t.target_crop.relative_offset(t.target_canvas);
        approx::assert_relative_eq!(sx, tx);
        approx::assert_relative_eq!(sy, ty);
    }
    Ok(())
}

#[test]
fn outputs_have_requested_shape() -> Result<(), AugmentError> {
    let source = coordinates(ImageSize {
        width: 70,
        height: 50,
    })?;
    let target = coordinates(ImageSize {
        width: 140,
        height: 100,
    })?;

    let augmenter = PairAugmenter::new(AugmentationParams {
        flip: true,
        rotation_range: 45.0,
        min_scale: 0.6,
        max_scale: 1.4,
        source_fill: FillPolicy::EdgeMode { edge_width: 4 },
        ..no_op_params(40)
    })?;
    let pairs = augmenter.augment(&source, &target, 6, &mut StdRng::seed_from_u64(21))?;

    let expected = ImageSize {
        width: 40,
        height: 40,
    };
    for pair in pairs {
        assert_eq!(pair.source.size(), expected);
        assert_eq!(pair.target.size(), expected);
        assert!(pair.transform.angle.abs() <= 45.0);
        assert!((0.6..=1.4).contains(&pair.transform.scale));
    }
    Ok(())
}

#[test]
fn expansion_to_long_side() -> Result<(), AugmentError> {
    let size = ImageSize {
        width: 800,
        height: 400,
    };
    let image = Image::<u8, 3>::from_size_pixel(size, [0, 0, 0])?;

    let augmenter = PairAugmenter::new(AugmentationParams {
        expand_to_long_side: true,
        target_fill: FillPolicy::White,
        source_fill: FillPolicy::White,
        ..no_op_params(512)
    })?;
    let pair = augmenter.augment_pair(&image, &image, &mut StdRng::seed_from_u64(0))?;

    let square = ImageSize {
        width: 800,
        height: 800,
    };
    assert_eq!(pair.transform.source_canvas, square);
    assert_eq!(pair.transform.target_canvas, square);
    assert_eq!(pair.transform.source_crop.size, 800);
    assert_eq!(pair.source.size().width, 512);

    // white bars above and below, the image in the middle
    assert_eq!(pair.source.pixel(256, 10)?, [255, 255, 255]);
    assert_eq!(pair.source.pixel(256, 256)?, [0, 0, 0]);
    assert_eq!(pair.source.pixel(256, 500)?, [255, 255, 255]);
    Ok(())
}

#[test]
fn aspect_mismatch_is_filled_not_rejected() -> Result<(), AugmentError> {
    let source = coordinates(ImageSize {
        width: 64,
        height: 32,
    })?;
    let target = Image::<u8, 3>::from_size_pixel(
        ImageSize {
            width: 40,
            height: 40,
        },
        [0, 0, 0],
    )?;

    // outputs the size of the target crop, so the target is not resampled
    let augmenter = PairAugmenter::new(no_op_params(40))?;
    let pairs = augmenter.augment(&source, &target, 10, &mut StdRng::seed_from_u64(2))?;

    let mut past_edge = 0;
    for pair in &pairs {
        let t = &pair.transform;
        assert_eq!(t.source_crop.size, 32);
        assert_eq!(t.source_crop.y, 0);
        assert_eq!(t.target_crop.x, target_offset(t.source_crop.x, 64, 40));
        assert_eq!(t.target_crop.y, target_offset(t.source_crop.y, 32, 40));
        assert_eq!(t.target_crop.size, 40);
        assert_eq!(pair.target.size().width, 40);

        // columns past the 40px target canvas take the white target fill
        let x = t.target_crop.x;
        if x > 0 {
            past_edge += 1;
            assert_eq!(pair.target.pixel(39 - x, 20)?, [0, 0, 0]);
            assert_eq!(pair.target.pixel(40 - x, 20)?, [255, 255, 255]);
            assert_eq!(pair.target.pixel(39, 39)?, [255, 255, 255]);
        } else {
            assert_eq!(pair.target, target);
        }
    }
    assert!(past_edge > 0);
    Ok(())
}

#[test]
fn aspect_mismatch_keeps_offset_formula_under_rotation_and_zoom() -> Result<(), AugmentError> {
    let source = coordinates(ImageSize {
        width: 64,
        height: 32,
    })?;
    let target = Image::<u8, 3>::from_size_pixel(
        ImageSize {
            width: 40,
            height: 40,
        },
        [0, 0, 0],
    )?;

    let augmenter = PairAugmenter::new(AugmentationParams {
        flip: true,
        rotation_range: 15.0,
        min_scale: 0.8,
        max_scale: 1.2,
        ..no_op_params(16)
    })?;
    let pairs = augmenter.augment(&source, &target, 20, &mut StdRng::seed_from_u64(5))?;

    let mut past_edge = 0;
    for pair in &pairs {
        let t = &pair.transform;
        assert_eq!(t.target_crop.x, target_offset(t.source_crop.x, 64, 40));
        assert_eq!(t.target_crop.y, target_offset(t.source_crop.y, 32, 40));
        assert!(t.source_crop.fits_in(t.source_canvas));
        if !t.target_crop.fits_in(t.target_canvas) {
            past_edge += 1;
        }

        let output = ImageSize {
            width: 16,
            height: 16,
        };
        assert_eq!(pair.source.size(), output);
        assert_eq!(pair.target.size(), output);
    }
    assert!(past_edge > 0);
    Ok(())
}

#[test]
fn seeded_runs_are_reproducible() -> Result<(), AugmentError> {
    let source = coordinates(ImageSize {
        width: 50,
        height: 40,
    })?;
    let target = coordinates(ImageSize {
        width: 100,
        height: 80,
    })?;

    let augmenter = PairAugmenter::new(AugmentationParams {
        flip: true,
        rotation_range: 20.0,
        min_scale: 0.5,
        max_scale: 2.0,
        ..no_op_params(24)
    })?;

    let first = augmenter.augment(&source, &target, 3, &mut StdRng::seed_from_u64(77))?;
    let second = augmenter.augment(&source, &target, 3, &mut StdRng::seed_from_u64(77))?;

    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.transform, b.transform);
        assert_eq!(a.source, b.source);
        assert_eq!(a.target, b.target);
    }
    Ok(())
}

#[test]
fn downsampled_crop_matches_resize() -> Result<(), AugmentError> {
    let image = coordinates(ImageSize {
        width: 64,
        height: 64,
    })?;

    let augmenter = PairAugmenter::new(no_op_params(16))?;
    let pair = augmenter.augment_pair(&image, &image, &mut StdRng::seed_from_u64(4))?;

    let mut expected = Image::<u8, 3>::from_size_val(
        ImageSize {
            width: 16,
            height: 16,
        },
        0,
    )?;
    resize_fast(&image, &mut expected, InterpolationMode::Bicubic)?;

    assert_eq!(pair.source, expected);
    assert_eq!(pair.target, expected);
    Ok(())
}

#[test]
fn empty_input_is_rejected() -> Result<(), AugmentError> {
    let image = coordinates(ImageSize {
        width: 8,
        height: 8,
    })?;
    let empty = Image::<u8, 3>::new(
        ImageSize {
            width: 0,
            height: 0,
        },
        vec![],
    )?;

    let augmenter = PairAugmenter::new(no_op_params(8))?;
    let result = augmenter.augment(&image, &empty, 1, &mut StdRng::seed_from_u64(0));
    assert!(matches!(result, Err(AugmentError::EmptyImage("target", _))));
    Ok(())
}

#[test]
fn zero_copies_is_empty() -> Result<(), AugmentError> {
    let image = coordinates(ImageSize {
        width: 8,
        height: 8,
    })?;
    let augmenter = PairAugmenter::new(no_op_params(8))?;
    let pairs = augmenter.augment(&image, &image, 0, &mut StdRng::seed_from_u64(0))?;
    assert!(pairs.is_empty());
    Ok(())
}
