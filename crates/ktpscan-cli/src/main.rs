mod display;
mod verify;

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use ktpscan_ai::{Extractor, ReplayExtractor};
use ktpscan_core::{
    Clock, CoreError, FieldValidator, FixedClock, FusionPolicy, IdentityNumber, ImageMetrics,
    QualityIssue, ScoreFuser, SystemClock,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ktpscan", version, about = "Validate and score transcribed Indonesian identity cards")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a captured extractor response and print the verdict.
    Verify(VerifyArgs),
    /// Print the segments encoded in a 16-digit identity number.
    Decode {
        nik: String,
        #[command(flatten)]
        clock: ClockArgs,
    },
}

#[derive(Args)]
struct ClockArgs {
    /// Judge dates as of this day (YYYY-MM-DD) instead of today.
    #[arg(long, env = "KTPSCAN_TODAY")]
    today: Option<NaiveDate>,
}

impl ClockArgs {
    fn clock(&self) -> Box<dyn Clock> {
        match self.today {
            Some(date) => Box::new(FixedClock(date)),
            None => Box::new(SystemClock),
        }
    }
}

#[derive(Args)]
struct VerifyArgs {
    /// Captured extractor response (JSON, optionally inside a Markdown fence).
    #[arg(long)]
    response: PathBuf,

    /// The card image the response was produced from.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Image width in pixels, as measured by the image pipeline.
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Image height in pixels, as measured by the image pipeline.
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Mean grey level (0-255), as measured by the image pipeline.
    #[arg(long, requires = "width")]
    brightness: Option<f64>,

    /// Additional quality issue reported by the image pipeline (repeatable).
    #[arg(long = "quality-issue")]
    quality_issues: Vec<String>,

    #[command(flatten)]
    clock: ClockArgs,

    /// More defects than this force the verdict to invalid.
    #[arg(long, env = "KTPSCAN_MAX_DEFECTS", default_value_t = FusionPolicy::default().max_defects)]
    max_defects: usize,

    /// Confidence penalty per defect.
    #[arg(long, env = "KTPSCAN_DEFECT_PENALTY", default_value_t = FusionPolicy::default().penalty_per_defect)]
    defect_penalty: f64,

    /// Upper bound on the total defect penalty.
    #[arg(long, env = "KTPSCAN_MAX_PENALTY", default_value_t = FusionPolicy::default().max_penalty)]
    max_penalty: f64,

    /// Print the result as JSON instead of a card.
    #[arg(long)]
    json: bool,
}

impl VerifyArgs {
    fn quality_issues(&self) -> Vec<QualityIssue> {
        let mut issues = match (self.width, self.height) {
            (Some(width), Some(height)) => QualityIssue::assess(&ImageMetrics {
                width,
                height,
                mean_brightness: self.brightness,
            }),
            _ => Vec::new(),
        };
        issues.extend(
            self.quality_issues
                .iter()
                .map(|note| QualityIssue::Other { note: note.clone() }),
        );
        issues
    }

    fn policy(&self) -> FusionPolicy {
        FusionPolicy {
            penalty_per_defect: self.defect_penalty,
            max_penalty: self.max_penalty,
            max_defects: self.max_defects,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("ktpscan v{}", env!("CARGO_PKG_VERSION"));

    match Cli::parse().command {
        Command::Verify(args) => run_verify(&args),
        Command::Decode { nik, clock } => {
            let nik = IdentityNumber::parse(nik.trim()).map_err(CoreError::from)?;
            display::print_identity_number(&nik, clock.clock().as_ref());
            Ok(())
        }
    }
}

fn run_verify(args: &VerifyArgs) -> anyhow::Result<()> {
    let extractor = ReplayExtractor::from_path(&args.response)
        .with_context(|| format!("reading {}", args.response.display()))?;
    let image = match &args.image {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => Vec::new(),
    };
    tracing::info!(image_bytes = image.len(), "starting verification");

    let validator = FieldValidator::new(args.clock.clock());
    let fuser = ScoreFuser::new(args.policy());
    let verification = verify::verify(
        extractor.extract(&image),
        args.quality_issues(),
        &validator,
        &fuser,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&verification)?);
    } else {
        display::print_verification(&verification);
    }
    Ok(())
}
