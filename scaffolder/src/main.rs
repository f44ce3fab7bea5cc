//! Propose a folder structure with a language model and create it on disk.
//!
//! Reads `scaffolder.toml` (or `--config`) for generation parameters and the
//! `API_KEY` environment variable for the backend credential, then runs one
//! interactive session.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use scaffolder::io::config::{AppConfig, DEFAULT_CONFIG_PATH};
use scaffolder::io::console::StdConsole;
use scaffolder::io::requester::OpenAiRequester;
use scaffolder::logging;
use scaffolder::session::run_session;

#[derive(Parser)]
#[command(
    name = "scaffolder",
    version,
    about = "Propose a folder structure with a language model and create it on disk"
)]
struct Cli {
    /// TOML file with generation settings. Defaults apply when it is missing.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;
    let requester = OpenAiRequester::new(&config)?;
    let mut console = StdConsole::new();
    let outcome = run_session(&config, &requester, &mut console)?;
    debug!(?outcome, "session finished");
    Ok(())
}
