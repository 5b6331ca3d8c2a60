use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use tracing::{error, info, Level};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "recover")]
#[command(about = "Recover a Shamir secret from a JSON file of base-encoded shares", long_about = None)]
struct Cli {
    /// JSON file holding `keys.k` and the shares
    file: PathBuf,

    /// Increase log output on stderr. `-vvv` gives trace level output
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long, action = ArgAction::SetTrue, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else {
            match self.verbose {
                0 => Level::WARN,
                1 => Level::INFO,
                2 => Level::DEBUG,
                _ => Level::TRACE,
            }
        }
    }

    fn execute(&self) -> Result<String> {
        let payload = std::fs::read(&self.file)
            .with_context(|| format!("failed to read file {}", self.file.display()))?;
        if payload.is_empty() {
            bail!("{} is empty", self.file.display());
        }
        info!(file = %self.file.display(), bytes = payload.len(), "loaded shares");

        let secret = tiny_ss_recover::recover(&payload)?;
        Ok(secret.to_string())
    }
}

fn setup_tracing(log_level: Level) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(LevelFilter::from_level(log_level))
        .init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    setup_tracing(cli.log_level());

    match cli.execute() {
        Ok(secret) => {
            println!("{secret}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
