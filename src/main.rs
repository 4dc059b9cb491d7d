use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use kinescore::config::ScoringParams;
use kinescore::joints::JointTable;
use kinescore::scorer::Scorer;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with scoring parameters. Explicit flags still override it.
    #[arg(global = true, long)]
    params: Option<String>,

    /// JSON file with the joint definition table.
    #[arg(global = true, short = 'j', long)]
    joints: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a student pose track against a reference pose track.
    Score(cmd::score::ScoreArgs),
    /// Print the active joint definition table.
    Joints,
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let joints = match &cli.joints {
        Some(path) => {
            info!("Loading joint table: {}", path);
            JointTable::load_from_file(path).unwrap_or_else(|e| {
                error!("Failed to load joint table '{}': {}", path, e);
                process::exit(1);
            })
        }
        None => JointTable::default(),
    };

    let args = match cli.command {
        Commands::Joints => {
            reports::print_joint_table(&joints);
            return;
        }
        Commands::Score(args) => args,
    };

    let params = match &cli.params {
        Some(path) => {
            info!("Loading scoring parameters: {}", path);
            let mut file_params = ScoringParams::load_from_file(path).unwrap_or_else(|e| {
                error!("Failed to load parameters '{}': {}", path, e);
                process::exit(1);
            });
            if let Some(sub_matches) = matches.subcommand_matches("score") {
                file_params.merge_from_cli(&args.params, sub_matches);
            }
            file_params
        }
        None => {
            info!("No parameter file given. Using defaults and command-line flags.");
            args.params.clone()
        }
    };

    let scorer = Scorer::new(params, joints).unwrap_or_else(|e| {
        error!("Invalid scorer configuration: {}", e);
        process::exit(1);
    });

    if let Err(e) = cmd::score::run(args, &scorer) {
        error!("Scoring failed: {}", e);
        process::exit(1);
    }
}
