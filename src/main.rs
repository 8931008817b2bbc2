use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

mod logging;

use funrun::app::App;
use funrun::check::{check_draft, load_draft};
use funrun::config::Config;
use funrun::registration::Step;

#[derive(Parser)]
#[command(name = "funrun")]
#[command(about = "Fun run registration wizard for the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a saved draft through every step and report the result
    Check {
        /// Draft file (.json or .toml)
        draft: PathBuf,
    },

    /// List the registration steps and their fields
    Steps,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    let is_tui_mode = cli.command.is_none();
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Check { draft }) => cmd_check(&draft)?,
        Some(Commands::Steps) => cmd_steps(),
        None => run_tui(config, logging_handle.log_file_path)?,
    }

    Ok(())
}

fn run_tui(config: Config, log_file_path: Option<PathBuf>) -> Result<()> {
    let mut app = App::new(config)?;
    let result = app.run();

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    result
}

fn cmd_check(path: &Path) -> Result<()> {
    let draft = load_draft(path)?;
    let report = check_draft(draft);

    for (step, outcome) in &report.steps {
        match outcome {
            Ok(()) => println!("✓ {step}"),
            Err(err) => {
                println!("✗ {step}: {}", err.title());
                println!("  {err}");
            }
        }
    }

    match report.submission {
        Some(submission) => {
            println!("{}", "─".repeat(40));
            println!("Reference: {}", submission.reference);
            for (label, value) in submission.summary.rows() {
                println!("  {label}: {value}");
            }
            Ok(())
        }
        None => {
            tracing::debug!(path = %path.display(), "Draft check failed");
            std::process::exit(1);
        }
    }
}

fn cmd_steps() {
    for step in Step::ALL {
        println!("{step}  {}", step.title());
        for field in step.fields() {
            println!("  - {} ({})", field.label(), field.key());
        }
    }
}
