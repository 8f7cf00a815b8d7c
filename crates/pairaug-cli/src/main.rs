use std::path::PathBuf;

use argh::FromArgs;

use pairaug::augment::FillPolicy;
use pairaug::dataset::{self, BatchReport, DatasetConfig};

#[derive(FromArgs, Debug)]
/// Prepare paired image datasets: registered augmentation and sketch conversion.
struct Args {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Command {
    Augment(AugmentArgs),
    Sketch(SketchArgs),
}

#[derive(FromArgs, Debug)]
/// Write augmented copies of every source/target pair.
#[argh(subcommand, name = "augment")]
struct AugmentArgs {
    /// directory with the source images
    #[argh(positional)]
    source_dir: PathBuf,

    /// directory with the target images, matched by file name
    #[argh(positional)]
    target_dir: PathBuf,

    /// directory receiving aug_source/ and aug_target/
    #[argh(positional)]
    output_dir: PathBuf,

    /// json configuration file, overridden by the flags below
    #[argh(option)]
    config: Option<PathBuf>,

    /// side length of the square outputs
    #[argh(option, short = 's')]
    size: Option<usize>,

    /// augmented copies per pair
    #[argh(option, short = 'n')]
    copies: Option<usize>,

    /// enable random horizontal flips (true or false)
    #[argh(option)]
    flip: Option<bool>,

    /// maximum rotation in degrees, in both directions
    #[argh(option, short = 'r')]
    rotation: Option<f32>,

    /// lower bound of the zoom scale
    #[argh(option)]
    min_scale: Option<f64>,

    /// upper bound of the zoom scale
    #[argh(option)]
    max_scale: Option<f64>,

    /// fill of the source image: white, average or edge-mode
    #[argh(option)]
    source_fill: Option<FillPolicy>,

    /// fill of the target image: white, average or edge-mode
    #[argh(option)]
    target_fill: Option<FillPolicy>,

    /// border width in pixels sampled by the edge-mode fill
    #[argh(option)]
    edge_width: Option<usize>,

    /// center both images on a square canvas of their long side first
    #[argh(switch)]
    expand_to_long_side: bool,

    /// seed of the random generator
    #[argh(option)]
    seed: Option<u64>,
}

#[derive(FromArgs, Debug)]
/// Convert every image of a folder into a sketch.
#[argh(subcommand, name = "sketch")]
struct SketchArgs {
    /// directory with the input images
    #[argh(positional)]
    input_dir: PathBuf,

    /// directory receiving the sketches
    #[argh(positional)]
    output_dir: PathBuf,

    /// json configuration file, overridden by the flags below
    #[argh(option)]
    config: Option<PathBuf>,

    /// shorter side of the working image
    #[argh(option)]
    resolution: Option<usize>,

    /// edge threshold, lower values draw more lines
    #[argh(option)]
    threshold: Option<u8>,
}

fn load_config(path: Option<&PathBuf>) -> Result<DatasetConfig, dataset::DatasetError> {
    match path {
        Some(path) => {
            log::info!("reading configuration from {}", path.display());
            DatasetConfig::from_json_file(path)
        }
        None => Ok(DatasetConfig::default()),
    }
}

fn with_edge_width(policy: FillPolicy, edge_width: Option<usize>) -> FillPolicy {
    match (policy, edge_width) {
        (FillPolicy::EdgeMode { .. }, Some(edge_width)) => FillPolicy::EdgeMode { edge_width },
        (policy, _) => policy,
    }
}

fn run_augment(args: AugmentArgs) -> Result<BatchReport, Box<dyn std::error::Error>> {
    let mut config = load_config(args.config.as_ref())?;

    let params = &mut config.augment;
    if let Some(size) = args.size {
        params.output_size = size;
    }
    if let Some(flip) = args.flip {
        params.flip = flip;
    }
    if let Some(rotation) = args.rotation {
        params.rotation_range = rotation;
    }
    if let Some(min_scale) = args.min_scale {
        params.min_scale = min_scale;
    }
    if let Some(max_scale) = args.max_scale {
        params.max_scale = max_scale;
    }
    if let Some(fill) = args.source_fill {
        params.source_fill = fill;
    }
    if let Some(fill) = args.target_fill {
        params.target_fill = fill;
    }
    params.source_fill = with_edge_width(params.source_fill, args.edge_width);
    params.target_fill = with_edge_width(params.target_fill, args.edge_width);
    params.expand_to_long_side |= args.expand_to_long_side;

    if let Some(copies) = args.copies {
        config.num_copies = copies;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    log::debug!("{config:?}");

    Ok(dataset::augment_folders(
        &args.source_dir,
        &args.target_dir,
        &args.output_dir,
        &config,
    )?)
}

fn run_sketch(args: SketchArgs) -> Result<BatchReport, Box<dyn std::error::Error>> {
    let mut config = load_config(args.config.as_ref())?;

    if let Some(resolution) = args.resolution {
        config.sketch.resolution = resolution;
    }
    if let Some(threshold) = args.threshold {
        config.sketch.threshold = threshold;
    }

    Ok(dataset::sketch_folder(
        &args.input_dir,
        &args.output_dir,
        &config.sketch,
    )?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let report = match args.command {
        Command::Augment(args) => run_augment(args)?,
        Command::Sketch(args) => run_sketch(args)?,
    };

    log::info!(
        "done: {} items, {} files written, {} failed",
        report.processed,
        report.written,
        report.failed.len()
    );

    if !report.is_success() {
        for (path, reason) in &report.failed {
            log::error!("{}: {reason}", path.display());
        }
        return Err(format!("{} of {} items failed", report.failed.len(), report.processed).into());
    }

    Ok(())
}
