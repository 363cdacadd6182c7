//! CLI entry point for the bikeshare explorer.
//!
//! Runs one interactive session: pick a city and optional month/day filter,
//! page through raw rows if wanted, then print travel statistics.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use bikeshare_explorer::console::Console;
use bikeshare_explorer::logging;
use bikeshare_explorer::session::Session;
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "bikeshare_explorer")]
#[command(about = "Explore US bikeshare trip data interactively", long_about = None)]
struct Cli {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[arg(short, long, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = logging::init()?;

    let cli = Cli::parse();
    info!(data_dir = %cli.data_dir.display(), "Starting session");

    let console = Console::new(io::stdin().lock(), io::stdout().lock());
    let runs = Session::new(console, cli.data_dir).run()?;

    info!(runs, "Exiting");
    Ok(())
}
