use crate::reports;
use clap::{Args, ValueEnum};
use kinescore::api;
use kinescore::config::ScoringParams;
use kinescore::error::KsResult;
use kinescore::scorer::{Scorer, TracingObserver};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub params: ScoringParams,

    /// Pose track of the reference performance.
    #[arg(short, long)]
    pub reference: PathBuf,

    /// Pose track of the student performance.
    #[arg(short, long)]
    pub student: PathBuf,

    /// Seconds the student recording started after the reference (negative: before).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub delay: f64,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Also write the per-frame timeline to this CSV file.
    #[arg(long)]
    pub timeline_csv: Option<PathBuf>,
}

pub fn run(args: ScoreArgs, scorer: &Scorer) -> KsResult<()> {
    let result = api::score_files(
        scorer,
        &args.reference,
        &args.student,
        args.delay,
        &TracingObserver,
    )?;

    if let Some(path) = &args.timeline_csv {
        api::write_timeline_csv(&result, path)?;
        info!("Timeline written to {}", path.display());
    }

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Table => {
            reports::print_summary(&result);
            reports::print_joint_report(&scorer.joints, &result);
            reports::print_timeline(&result, &scorer.params);
            reports::print_feedback(&result);
        }
    }

    Ok(())
}
