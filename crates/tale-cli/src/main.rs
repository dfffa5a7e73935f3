//! CLI frontend for the Tale narrative engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "tale",
    about = "Tale - branching educational stories",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an activity and print it as JSON
    Generate {
        /// Activity title
        title: String,

        /// Short description
        #[arg(long, default_value = "")]
        description: String,

        /// Subject: physics, chemistry, biology, mathematics, or any other name
        #[arg(short, long, default_value = "physics")]
        subject: String,

        /// Grade level
        #[arg(short, long, default_value = "")]
        grade: String,

        /// Difficulty: easy, medium, hard
        #[arg(long, default_value = "medium")]
        difficulty: String,

        /// Learning objective (repeatable, one scene each)
        #[arg(long = "objective")]
        objectives: Vec<String>,

        /// Estimated duration in minutes
        #[arg(long, default_value = "15")]
        duration: u32,

        /// Story theme for the opening
        #[arg(long)]
        theme: Option<String>,

        /// Attach multimedia resources to educational content
        #[arg(long)]
        multimedia: bool,

        /// Builder configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate an activity's scene graph
    Check {
        /// Activity JSON file
        file: PathBuf,
    },

    /// List the scenes of an activity
    Show {
        /// Activity JSON file
        file: PathBuf,
    },

    /// Play an activity
    Play {
        /// Activity JSON file
        file: PathBuf,

        /// Comma-separated choice numbers or ids instead of reading stdin
        #[arg(short, long)]
        choices: Option<String>,

        /// Resume from a saved snapshot
        #[arg(long)]
        resume: Option<PathBuf>,

        /// Write a snapshot when play stops
        #[arg(long)]
        save: Option<PathBuf>,

        /// Engine scoring configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("TALE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            title,
            description,
            subject,
            grade,
            difficulty,
            objectives,
            duration,
            theme,
            multimedia,
            config,
            output,
        } => commands::generate::run(&commands::generate::GenerateArgs {
            title,
            description,
            subject,
            grade,
            difficulty,
            objectives,
            duration,
            theme,
            multimedia,
            config,
            output,
        }),
        Commands::Check { file } => commands::check::run(&file),
        Commands::Show { file } => commands::show::run(&file),
        Commands::Play {
            file,
            choices,
            resume,
            save,
            config,
        } => commands::play::run(
            &file,
            choices.as_deref(),
            resume.as_deref(),
            save.as_deref(),
            config.as_deref(),
        ),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
