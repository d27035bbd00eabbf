//! Command-line interface for corpus synthesis and single-pixel inspection

use crate::algorithm::executor::{CorpusSynthesizer, ExtractionMode, SynthesisConfig};
use crate::analysis::extraction::Intensity;
use crate::analysis::fitting::{FitConfig, FitReport, NormalityRule};
use crate::io::configuration::{
    DEFAULT_HEIGHT, DEFAULT_OUTPUT_FILE, DEFAULT_PIXEL_DRAWS, DEFAULT_SEED, DEFAULT_SIGNIFICANCE,
    DEFAULT_SPREAD_SHRINKAGE, DEFAULT_WIDTH,
};
use crate::io::error::Result;
use crate::io::image::export_synthetic_as_png;
use crate::io::progress::ProgressManager;
use crate::spatial::{Coordinate, Dimensions};
use clap::{ArgAction, Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Command-line spelling of [`NormalityRule`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RuleArg {
    /// Normal model when p < significance (historical behaviour)
    Inverted,
    /// Normal model when p >= significance
    Standard,
}

impl From<RuleArg> for NormalityRule {
    fn from(arg: RuleArg) -> Self {
        match arg {
            RuleArg::Inverted => Self::Inverted,
            RuleArg::Standard => Self::Standard,
        }
    }
}

/// Parse an `X,Y` pixel coordinate
///
/// # Errors
///
/// Returns a message if the text is not two comma-separated non-negative integers
pub fn parse_coordinate(text: &str) -> std::result::Result<Coordinate, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{text}'"))?;
    let x = x
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid x '{x}': {e}"))?;
    let y = y
        .trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid y '{y}': {e}"))?;
    Ok(Coordinate::new(x, y))
}

#[derive(Parser)]
#[command(name = "pixelstat")]
#[command(
    author,
    version,
    about = "Synthesize greyscale images from per-pixel statistics of an image corpus"
)]
/// Command-line arguments for the synthesis tool
pub struct Cli {
    /// Directory containing the source images
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Output PNG path for the synthesized image
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Random seed for reproducible synthesis
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Width every image is resized to
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Height every image is resized to
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Rescan the corpus for each pixel instead of holding every image in memory
    #[arg(short, long)]
    pub low_memory: bool,

    /// Which side of the significance level selects the Normal model
    #[arg(long, value_enum, default_value_t = RuleArg::Inverted)]
    pub normality_rule: RuleArg,

    /// Shapiro-Wilk p-value threshold between Normal and Uniform models
    #[arg(long, default_value_t = DEFAULT_SIGNIFICANCE)]
    pub significance: f64,

    /// Factor applied to the standard deviation of Normal models
    #[arg(long, default_value_t = DEFAULT_SPREAD_SHRINKAGE)]
    pub shrinkage: f64,

    /// Only fit the pixel at X,Y and report its model
    #[arg(short, long, value_name = "X,Y", value_parser = parse_coordinate)]
    pub pixel: Option<Coordinate>,

    /// Number of draws reported in single-pixel mode
    #[arg(short = 'n', long, default_value_t = DEFAULT_PIXEL_DRAWS)]
    pub draws: usize,

    /// Suppress progress output and non-error logs
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Default log filter directive when `RUST_LOG` is unset
    pub const fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Extraction strategy requested on the command line
    pub const fn extraction_mode(&self) -> ExtractionMode {
        if self.low_memory {
            ExtractionMode::PerPixel
        } else {
            ExtractionMode::Bulk
        }
    }

    /// Assemble the run configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the dimensions or fit parameters are invalid
    pub fn synthesis_config(&self) -> Result<SynthesisConfig> {
        let fit = FitConfig {
            significance: self.significance,
            rule: self.normality_rule.into(),
            spread_shrinkage: self.shrinkage,
        };
        fit.validate()?;

        Ok(SynthesisConfig {
            dimensions: Dimensions::new(self.width, self.height)?,
            mode: self.extraction_mode(),
            fit,
            seed: self.seed,
        })
    }
}

/// Render the single-pixel report printed by `--pixel`
pub fn pixel_report(coordinate: Coordinate, report: &FitReport, draws: &[Intensity]) -> String {
    let rendered: Vec<String> = draws.iter().map(ToString::to_string).collect();
    format!(
        "pixel {coordinate}: {}\nsamples: {}, Shapiro-Wilk W = {:.4}, p = {:.4e}\ndraws: {}",
        report.model,
        report.sample_size,
        report.normality.statistic,
        report.normality.p_value,
        rendered.join(" ")
    )
}

/// Runs the tool according to parsed command-line arguments
pub struct CorpusProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl CorpusProcessor {
    /// Create a processor for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Synthesize an image, or inspect one pixel when `--pixel` is given
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, fitting, synthesis or export fails
    pub fn process(&mut self) -> Result<()> {
        let synthesizer = CorpusSynthesizer::new(&self.cli.corpus, self.cli.synthesis_config()?)?;

        match self.cli.pixel {
            Some(coordinate) => self.inspect_pixel(&synthesizer, coordinate),
            None => self.synthesize_image(&synthesizer),
        }
    }

    // Allow print for the report requested on the command line
    #[allow(clippy::print_stdout)]
    fn inspect_pixel(&self, synthesizer: &CorpusSynthesizer, coordinate: Coordinate) -> Result<()> {
        let (model, report) = synthesizer.fit_pixel(coordinate)?;

        let mut rng = StdRng::seed_from_u64(self.cli.seed);
        let draws = (0..self.cli.draws)
            .map(|_| model.sample(&mut rng))
            .collect::<Result<Vec<_>>>()?;

        println!("{}", pixel_report(coordinate, &report, &draws));
        Ok(())
    }

    fn synthesize_image(&mut self, synthesizer: &CorpusSynthesizer) -> Result<()> {
        let start_time = Instant::now();

        let (image, summary) = synthesizer.synthesize(self.progress_manager.as_mut())?;
        export_synthetic_as_png(&image, &self.cli.output)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        info!(
            "Wrote {} ({} Normal, {} Uniform pixels) in {:.2?}",
            self.cli.output.display(),
            summary.normal,
            summary.uniform,
            start_time.elapsed()
        );
        Ok(())
    }
}
