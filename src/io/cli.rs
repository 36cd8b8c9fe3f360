//! Command-line interface for the mosaic build steps

use crate::enhance::Adjustments;
use crate::io::batch::load_batch;
use crate::io::configuration::{
    DEFAULT_EFFECT, DEFAULT_FACTOR, DEFAULT_LEDGER_FILE, DEFAULT_PALETTE,
    DEFAULT_PREVIEW_PALETTES, DEFAULT_TARGET_DIMENSION, SOURCE_EXTENSIONS,
};
use crate::io::error::{ErrorContext, MosaicError, Result, WithContext, invalid_parameter};
use crate::io::image::{default_brick, load_image, load_quantized, save_image, save_quantized};
use crate::io::preview::{preview_path, render_preview_sheet};
use crate::io::progress::ProgressManager;
use crate::ledger::{FileLedgerStore, ReplaceOutcome};
use crate::palette::{MERGED_PALETTE, PaletteRegistry};
use crate::pipeline::config::parse_replacements;
use crate::pipeline::stages::{legofy, legofy_output_path};
use crate::pipeline::{
    OutputPaths, PipelineConfig, ReplaceMode, apply_replacement, finalize, preprocess,
};
use clap::{Args, Parser, Subcommand};
use image::RgbImage;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "brickify")]
#[command(
    author,
    version,
    about = "Turn images into brick mosaics with assembly instructions"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Step to run
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output and informational logs
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Build steps
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Enhance, downscale and quantize raw images
    Preprocess(PreprocessArgs),
    /// Preprocess every image listed in a batch table
    Batch(BatchArgs),
    /// Replace colors in processed images
    Replace(ReplaceArgs),
    /// Write instructions, mosaic previews, brick counts and update the ledger
    Finalize(FinalizeArgs),
    /// Render preset preview sheets for several palettes
    Preview(PreviewArgs),
    /// Render a brick mosaic of any image in one step
    Mosaic(MosaicArgs),
}

/// Enhancement settings shared by preprocessing commands
#[derive(Args, Debug, Clone)]
pub struct EnhanceArgs {
    /// Preset effect index, used when every delta is zero
    #[arg(short, long, default_value_t = DEFAULT_EFFECT)]
    pub effect: usize,

    /// Preset strength
    #[arg(short, long, default_value_t = DEFAULT_FACTOR)]
    pub factor: f32,

    /// Saturation delta (factor 1 + delta)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub color: f32,

    /// Brightness delta
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub brightness: f32,

    /// Contrast delta
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub contrast: f32,

    /// Sharpness delta
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub sharpness: f32,
}

impl EnhanceArgs {
    /// Custom adjustment deltas
    pub const fn adjustments(&self) -> Adjustments {
        Adjustments {
            color: self.color,
            brightness: self.brightness,
            contrast: self.contrast,
            sharpness: self.sharpness,
        }
    }
}

/// Arguments of `preprocess`
#[derive(Args, Debug, Clone)]
pub struct PreprocessArgs {
    /// Raw image or directory of raw images
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Directory for processed images
    #[arg(short, long, default_value = "processed_files")]
    pub output: PathBuf,

    /// Largest side of the quantized image
    #[arg(short, long, default_value_t = DEFAULT_TARGET_DIMENSION)]
    pub size: u32,

    /// Palette name
    #[arg(short, long, default_value = DEFAULT_PALETTE)]
    pub palette: String,

    /// Use error diffusion while quantizing
    #[arg(short, long)]
    pub dither: bool,

    /// Substitute rare colors right after quantizing
    #[arg(long)]
    pub auto_replace: bool,

    /// Enhancement settings
    #[command(flatten)]
    pub enhance: EnhanceArgs,
}

/// Arguments of `batch`
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Batch table listing source files and their settings
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,

    /// Directory holding the raw images named in the table
    #[arg(short, long, default_value = "raw_files")]
    pub raw: PathBuf,

    /// Directory for processed images
    #[arg(short, long, default_value = "processed_files")]
    pub output: PathBuf,

    /// Use error diffusion while quantizing
    #[arg(short, long)]
    pub dither: bool,
}

/// Arguments of `replace`
#[derive(Args, Debug, Clone)]
pub struct ReplaceArgs {
    /// Processed image or directory of processed images
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Palette the images were quantized with
    #[arg(short, long, default_value = MERGED_PALETTE)]
    pub palette: String,

    /// Substitute rare colors from the fixed table
    #[arg(short, long, conflicts_with = "map")]
    pub auto: bool,

    /// Explicit replacements, e.g. `H=L,A=B`
    #[arg(short, long)]
    pub map: Option<String>,
}

impl ReplaceArgs {
    /// Replacement policy selected by the flags
    ///
    /// # Errors
    ///
    /// Returns an error if neither flag is given or the `--map` value is malformed
    pub fn mode(&self) -> Result<ReplaceMode> {
        match &self.map {
            Some(map) => Ok(ReplaceMode::Manual(parse_replacements(map)?)),
            None if self.auto => Ok(ReplaceMode::Automatic),
            None => Err(invalid_parameter(
                "replace",
                &"",
                &"pass --auto or --map OLD=NEW",
            )),
        }
    }
}

/// Arguments of `finalize`
#[derive(Args, Debug, Clone)]
pub struct FinalizeArgs {
    /// Processed image or directory of processed images
    #[arg(value_name = "PROCESSED", default_value = "processed_files")]
    pub target: PathBuf,

    /// Root directory for instructions
    #[arg(short, long, default_value = "instructions")]
    pub instructions: PathBuf,

    /// Palette the images were quantized with
    #[arg(short, long, default_value = MERGED_PALETTE)]
    pub palette: String,

    /// Brick sprite; a built-in sprite is drawn when omitted
    #[arg(short, long)]
    pub brick: Option<PathBuf>,

    /// Ledger file accumulating brick quantities
    #[arg(short, long, default_value = DEFAULT_LEDGER_FILE)]
    pub ledger: PathBuf,
}

/// Arguments of `preview`
#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    /// Raw image or directory of raw images
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Root directory for preview sheets
    #[arg(short, long, default_value = "previews")]
    pub output: PathBuf,

    /// Largest side of each quantized variant
    #[arg(short, long, default_value_t = DEFAULT_TARGET_DIMENSION)]
    pub size: u32,

    /// Palettes to preview, comma separated
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_values = DEFAULT_PREVIEW_PALETTES
    )]
    pub palettes: Vec<String>,

    /// Preset strength
    #[arg(short, long, default_value_t = DEFAULT_FACTOR)]
    pub factor: f32,
}

/// Arguments of `mosaic`
#[derive(Args, Debug, Clone)]
pub struct MosaicArgs {
    /// Image or directory of images
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Output file; only valid for a single image
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Brick sprite; a built-in sprite is drawn when omitted
    #[arg(short, long)]
    pub brick: Option<PathBuf>,

    /// Number of bricks along the longest side
    #[arg(short, long)]
    pub size: Option<u32>,

    /// Quantize to this palette before assembling
    #[arg(short, long)]
    pub palette: Option<String>,

    /// Use error diffusion while quantizing
    #[arg(short, long, requires = "palette")]
    pub dither: bool,
}

/// One image to process and the settings to process it with
#[derive(Debug, Clone)]
pub struct Job {
    /// Source file
    pub source: PathBuf,
    /// Settings for this file
    pub config: PipelineConfig,
}

/// Counts of a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Images processed successfully
    pub processed: usize,
    /// Images skipped after an error
    pub skipped: usize,
}

/// Orchestrates processing of image files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    registry: PaletteRegistry,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            registry: PaletteRegistry::new(),
            progress_manager,
        }
    }

    /// Process every file selected by the command
    ///
    /// Errors tied to one image are logged and the image is skipped; errors
    /// for which [`MosaicError::aborts_run`] holds stop the run.
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be listed or a run-aborting error occurs
    pub fn process(&mut self) -> Result<RunSummary> {
        let jobs = self.collect_jobs()?;
        let mut summary = RunSummary::default();
        if jobs.is_empty() {
            tracing::warn!("No images to process");
            return Ok(summary);
        }

        let mut session = self.open_session()?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(jobs.len());
        }

        let stages = self.stage_count();
        for (index, job) in jobs.iter().enumerate() {
            if let Some(ref mut pm) = self.progress_manager {
                pm.start_file(index, &job.source, stages);
            }

            match self.process_job(job, index, &mut session) {
                Ok(()) => {
                    summary.processed += 1;
                    if let Some(ref mut pm) = self.progress_manager {
                        pm.complete_file(index);
                    }
                }
                Err(error) if error.aborts_run() => {
                    if let Some(ref pm) = self.progress_manager {
                        pm.finish();
                    }
                    return Err(error);
                }
                Err(error) => {
                    tracing::warn!(
                        file = %job.source.display(),
                        %error,
                        "Skipping image"
                    );
                    summary.skipped += 1;
                    if let Some(ref mut pm) = self.progress_manager {
                        pm.fail_file(index);
                    }
                }
            }
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }
        tracing::info!(
            processed = summary.processed,
            skipped = summary.skipped,
            "Run finished"
        );
        Ok(summary)
    }

    /// Images selected by the command, each with its settings
    ///
    /// # Errors
    ///
    /// Returns an error if the target is missing or cannot be listed, or the
    /// batch table cannot be read
    pub fn collect_jobs(&self) -> Result<Vec<Job>> {
        let base = PipelineConfig::default();
        let jobs = match &self.cli.command {
            Command::Preprocess(args) => {
                let config = PipelineConfig {
                    target_dimension: args.size,
                    palette: args.palette.clone(),
                    dither: args.dither,
                    adjustments: args.enhance.adjustments(),
                    effect: args.enhance.effect,
                    factor: args.enhance.factor,
                    replace: if args.auto_replace {
                        ReplaceMode::Automatic
                    } else {
                        ReplaceMode::Off
                    },
                };
                with_config(collect_files(&args.target, &SOURCE_EXTENSIONS)?, &config)
            }
            Command::Batch(args) => {
                let base = PipelineConfig {
                    dither: args.dither,
                    ..base
                };
                load_batch(&args.table)?
                    .iter()
                    .map(|entry| Job {
                        source: args.raw.join(&entry.file_name),
                        config: entry.to_config(&base),
                    })
                    .collect()
            }
            Command::Replace(args) => {
                let config = PipelineConfig {
                    palette: args.palette.clone(),
                    replace: args.mode()?,
                    ..base
                };
                with_config(collect_files(&args.target, &["png"])?, &config)
            }
            Command::Finalize(args) => {
                let config = PipelineConfig {
                    palette: args.palette.clone(),
                    ..base
                };
                with_config(collect_files(&args.target, &["png"])?, &config)
            }
            Command::Preview(args) => {
                let config = PipelineConfig {
                    target_dimension: args.size,
                    factor: args.factor,
                    ..base
                };
                with_config(collect_files(&args.target, &SOURCE_EXTENSIONS)?, &config)
            }
            Command::Mosaic(args) => {
                let config = PipelineConfig {
                    palette: args.palette.clone().unwrap_or_default(),
                    dither: args.dither,
                    ..base
                };
                let files = collect_files(&args.target, &SOURCE_EXTENSIONS)?;
                if args.output.is_some() && files.len() > 1 {
                    return Err(invalid_parameter(
                        "output",
                        &args.target.display(),
                        &"an explicit output needs a single input image",
                    ));
                }
                with_config(files, &config)
            }
        };
        Ok(jobs)
    }

    fn stage_count(&self) -> usize {
        match &self.cli.command {
            Command::Preprocess(_) | Command::Batch(_) | Command::Replace(_) => 3,
            Command::Finalize(_) => 2,
            Command::Preview(args) => args.palettes.len() + 1,
            Command::Mosaic(_) => 3,
        }
    }

    fn advance(&mut self, index: usize) {
        if let Some(ref mut pm) = self.progress_manager {
            pm.advance(index);
        }
    }

    /// Resources shared by every image of the run
    fn open_session(&self) -> Result<Session> {
        let (brick, ledger) = match &self.cli.command {
            Command::Finalize(args) => {
                self.registry.get(&args.palette)?;
                let codes = self.registry.merged()?.codes().collect::<Vec<_>>();
                (
                    Some(load_brick(args.brick.as_deref())?),
                    Some(FileLedgerStore::new(&args.ledger, codes)),
                )
            }
            Command::Mosaic(args) => (Some(load_brick(args.brick.as_deref())?), None),
            _ => (None, None),
        };
        Ok(Session { brick, ledger })
    }

    fn process_job(&mut self, job: &Job, index: usize, session: &mut Session) -> Result<()> {
        match &self.cli.command {
            Command::Preprocess(PreprocessArgs { output, .. })
            | Command::Batch(BatchArgs { output, .. }) => {
                let output = output.clone();
                self.preprocess_file(job, index, &output)
            }
            Command::Replace(_) => self.replace_file(job, index),
            Command::Finalize(args) => {
                let instructions = args.instructions.clone();
                self.finalize_file(job, index, &instructions, session)
            }
            Command::Preview(args) => {
                let args = args.clone();
                self.preview_file(job, index, &args)
            }
            Command::Mosaic(args) => {
                let args = args.clone();
                self.mosaic_file(job, index, &args, session)
            }
        }
    }

    fn preprocess_file(&mut self, job: &Job, index: usize, output: &Path) -> Result<()> {
        tracing::info!(file = %job.source.display(), "Processing file");
        let image = load_image(&job.source, "Source image")?;
        self.advance(index);

        let mut quantized = preprocess(&image, &job.config, &self.registry)?;
        apply_replacement(&mut quantized, &job.config.replace, &self.registry)?;
        self.advance(index);

        save_quantized(&quantized, &processed_path(output, &job.source))?;
        self.advance(index);
        Ok(())
    }

    fn replace_file(&mut self, job: &Job, index: usize) -> Result<()> {
        tracing::info!(file = %job.source.display(), "Replacing colors");
        let palette = self.registry.get(&job.config.palette)?;
        let mut quantized = load_quantized(&job.source, palette)?;
        self.advance(index);

        let outcome = apply_replacement(&mut quantized, &job.config.replace, &self.registry)?;
        self.advance(index);

        match outcome {
            ReplaceOutcome::Applied { ref substitutions } => {
                tracing::debug!(?substitutions, "Substitutions applied");
                save_quantized(&quantized, &job.source)?;
            }
            ReplaceOutcome::Skipped { ref singletons } => {
                tracing::debug!(?singletons, "Left unchanged");
            }
            ReplaceOutcome::Unchanged => {}
        }
        self.advance(index);
        Ok(())
    }

    fn finalize_file(
        &mut self,
        job: &Job,
        index: usize,
        instructions: &Path,
        session: &mut Session,
    ) -> Result<()> {
        let palette = self.registry.get(&job.config.palette)?;
        let quantized = load_quantized(&job.source, palette)?;
        self.advance(index);

        let (Some(brick), Some(ledger)) = (&session.brick, &mut session.ledger) else {
            return Ok(());
        };
        let paths = OutputPaths::new(instructions, &file_stem(&job.source));
        finalize(&quantized, brick, ledger, &paths)?;
        self.advance(index);
        Ok(())
    }

    fn preview_file(&mut self, job: &Job, index: usize, args: &PreviewArgs) -> Result<()> {
        tracing::info!(file = %job.source.display(), "Creating the previews");
        let image = load_image(&job.source, "Source image")?;
        self.advance(index);

        let stem = file_stem(&job.source);
        let directory = args.output.join(&stem);
        for palette in &args.palettes {
            let sheet = render_preview_sheet(
                &image,
                job.config.target_dimension,
                palette,
                job.config.factor,
                &self.registry,
            )?;
            save_image(&sheet, &preview_path(&directory, palette, &stem))?;
            self.advance(index);
        }
        Ok(())
    }

    fn mosaic_file(
        &mut self,
        job: &Job,
        index: usize,
        args: &MosaicArgs,
        session: &Session,
    ) -> Result<()> {
        let image = load_image(&job.source, "Source image")?;
        self.advance(index);

        let Some(brick) = &session.brick else {
            return Ok(());
        };
        let palette = match &args.palette {
            Some(name) => Some(self.registry.get(name)?),
            None => None,
        };
        let mosaic = legofy(&image, brick, args.size, palette, job.config.dither)?;
        self.advance(index);

        let destination = args
            .output
            .clone()
            .unwrap_or_else(|| legofy_output_path(&job.source));
        tracing::info!(file = %destination.display(), "Saving mosaic");
        save_image(&mosaic, &destination)?;
        self.advance(index);
        Ok(())
    }
}

struct Session {
    brick: Option<RgbImage>,
    ledger: Option<FileLedgerStore>,
}

fn load_brick(path: Option<&Path>) -> Result<RgbImage> {
    path.map_or_else(|| Ok(default_brick()), |path| load_image(path, "Brick sprite"))
}

fn with_config(files: Vec<PathBuf>, config: &PipelineConfig) -> Vec<Job> {
    files
        .into_iter()
        .map(|source| Job {
            source,
            config: config.clone(),
        })
        .collect()
}

/// Files of `target` with one of `extensions`, sorted; a single file is checked directly
///
/// # Errors
///
/// Returns [`MosaicError::MissingAsset`] if the target does not exist, or an
/// error if a single-file target has the wrong extension or the directory
/// cannot be read
pub fn collect_files(target: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    if target.is_file() {
        if has_extension(target, extensions) {
            Ok(vec![target.to_path_buf()])
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &format!("expected one of: {}", extensions.join(", ")),
            ))
        }
    } else if target.is_dir() {
        let context = || ErrorContext {
            file: Some(target.to_path_buf()),
            operation: Some("list directory"),
        };
        let mut files = Vec::new();
        for entry in std::fs::read_dir(target).with_context(context())? {
            let path = entry.with_context(context())?.path();
            if path.is_file() && has_extension(&path, extensions) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    } else {
        Err(MosaicError::MissingAsset {
            kind: "Target",
            path: target.to_path_buf(),
        })
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// `<output>/<stem>.png` for a source image
pub fn processed_path(output: &Path, source: &Path) -> PathBuf {
    output.join(format!("{}.png", file_stem(source)))
}
