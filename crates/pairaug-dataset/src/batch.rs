use std::path::{Path, PathBuf};

use pairaug_augment::{AugmentedPair, PairAugmenter};
use pairaug_io::functional::{encode_image_rgb8, read_image_any_rgb8, write_image_rgb8};
use pairaug_sketch::{SketchFilter, SketchParams};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{config::DatasetConfig, error::DatasetError, listing::list_images};

/// Subdirectory of the output directory receiving the augmented source images.
pub const AUG_SOURCE_DIR: &str = "aug_source";

/// Subdirectory of the output directory receiving the augmented target images.
pub const AUG_TARGET_DIR: &str = "aug_target";

/// Outcome of a batch run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchReport {
    /// Number of input items visited.
    pub processed: usize,
    /// Number of image files written.
    pub written: usize,
    /// Items that were skipped, with the reason.
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    /// Whether every visited item succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, path: &Path, result: Result<usize, DatasetError>) {
        self.processed += 1;
        match result {
            Ok(written) => self.written += written,
            Err(e) => {
                log::warn!("skipping {}: {e}", path.display());
                self.failed.push((path.to_path_buf(), e.to_string()));
            }
        }
    }
}

/// Name of the `index`-th augmented copy of `path`: `{stem}_{index}.{ext}`.
fn copy_name(path: &Path, index: usize) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    match path.extension() {
        Some(ext) => format!("{stem}_{index}.{}", ext.to_string_lossy()).into(),
        None => format!("{stem}_{index}").into(),
    }
}

fn augment_item<R: Rng>(
    augmenter: &PairAugmenter,
    source_path: &Path,
    target_dir: &Path,
    output_dir: &Path,
    num_copies: usize,
    rng: &mut R,
) -> Result<usize, DatasetError> {
    let file_name = source_path
        .file_name()
        .ok_or_else(|| DatasetError::MissingTarget(source_path.to_path_buf()))?;
    let target_path = target_dir.join(file_name);
    if !target_path.is_file() {
        return Err(DatasetError::MissingTarget(source_path.to_path_buf()));
    }

    let source = read_image_any_rgb8(source_path)?;
    let target = read_image_any_rgb8(&target_path)?;

    let pairs = augmenter.augment(&source, &target, num_copies, rng)?;

    // every copy is encoded before the first file is written
    let source_out = output_dir.join(AUG_SOURCE_DIR);
    let target_out = output_dir.join(AUG_TARGET_DIR);
    let mut files = Vec::with_capacity(2 * pairs.len());
    for (index, AugmentedPair { source, target, .. }) in pairs.iter().enumerate() {
        let source_file = source_out.join(copy_name(source_path, index));
        let target_file = target_out.join(copy_name(&target_path, index));
        files.push((encode_image_rgb8(&source_file, source)?, source_file));
        files.push((encode_image_rgb8(&target_file, target)?, target_file));
    }

    write_all(&files)
}

/// Write encoded files, removing the ones already written if any write fails.
fn write_all(files: &[(Vec<u8>, PathBuf)]) -> Result<usize, DatasetError> {
    for (written, (bytes, path)) in files.iter().enumerate() {
        if let Err(e) = std::fs::write(path, bytes) {
            for (_, done) in &files[..written] {
                if let Err(e) = std::fs::remove_file(done) {
                    log::warn!("failed to remove {}: {e}", done.display());
                }
            }
            return Err(e.into());
        }
    }
    Ok(files.len())
}

/// Augment every image pair of two folders.
///
/// For each image in `source_dir` the file of the same name in `target_dir` is its target.
/// `config.num_copies` augmented pairs are written to `output_dir/aug_source` and
/// `output_dir/aug_target` as `{stem}_{index}.{ext}`, with the index starting at 0.
///
/// Items that fail to decode, have no target or cannot be augmented are skipped, logged and
/// listed in the report; the remaining items are still processed.
///
/// # Errors
///
/// Returns an error before processing anything if the configuration is invalid, the source
/// directory cannot be listed or the output directories cannot be created.
pub fn augment_folders(
    source_dir: impl AsRef<Path>,
    target_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    config: &DatasetConfig,
) -> Result<BatchReport, DatasetError> {
    let (source_dir, target_dir, output_dir) =
        (source_dir.as_ref(), target_dir.as_ref(), output_dir.as_ref());

    config.validate()?;
    let augmenter = PairAugmenter::new(config.augment)?;

    if !target_dir.is_dir() {
        return Err(DatasetError::NotADirectory(target_dir.to_path_buf()));
    }
    let source_paths = list_images(source_dir)?;

    std::fs::create_dir_all(output_dir.join(AUG_SOURCE_DIR))?;
    std::fs::create_dir_all(output_dir.join(AUG_TARGET_DIR))?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    log::info!(
        "augmenting {} pairs from {} and {} into {}",
        source_paths.len(),
        source_dir.display(),
        target_dir.display(),
        output_dir.display()
    );

    let mut report = BatchReport::default();
    for (i, source_path) in source_paths.iter().enumerate() {
        log::info!(
            "[{}/{}] {}",
            i + 1,
            source_paths.len(),
            source_path.display()
        );
        let result = augment_item(
            &augmenter,
            source_path,
            target_dir,
            output_dir,
            config.num_copies,
            &mut rng,
        );
        report.record(source_path, result);
    }

    Ok(report)
}

fn sketch_item(filter: &SketchFilter, path: &Path, output_dir: &Path) -> Result<usize, DatasetError> {
    let image = read_image_any_rgb8(path)?;
    let sketch = filter.apply(&image)?;

    // listed entries always carry a file name
    let file_name = path.file_name().unwrap_or_default();
    write_image_rgb8(output_dir.join(file_name), &sketch)?;

    Ok(1)
}

/// Convert every image of a folder into a sketch.
///
/// Each sketch is written to `output_dir` under the file name of its input. Failing items are
/// skipped, logged and listed in the report.
///
/// # Errors
///
/// Returns an error before processing anything if the parameters are invalid, the input
/// directory cannot be listed or the output directory cannot be created.
pub fn sketch_folder(
    input_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    params: &SketchParams,
) -> Result<BatchReport, DatasetError> {
    let (input_dir, output_dir) = (input_dir.as_ref(), output_dir.as_ref());

    let filter = SketchFilter::new(*params)?;
    let paths = list_images(input_dir)?;
    std::fs::create_dir_all(output_dir)?;

    log::info!(
        "sketching {} images from {} into {}",
        paths.len(),
        input_dir.display(),
        output_dir.display()
    );

    let mut report = BatchReport::default();
    for (i, path) in paths.iter().enumerate() {
        log::info!("[{}/{}] {}", i + 1, paths.len(), path.display());
        report.record(path, sketch_item(&filter, path, output_dir));
    }

    Ok(report)
}
