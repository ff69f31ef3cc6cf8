use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rangepick::{cmd, data};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `debug`, `rangepick=trace`).
const LOG_ENV: &str = "RANGEPICK_LOG";

#[derive(Parser)]
#[command(name = "rangepick", about = "terminal calendar and date range picker")]
struct Cli {
    /// Path to the data directory containing config.yaml, palette.yaml and texts.json (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write default config, palette and text files
    Init,
    /// Print the 42-day grid of one month
    Grid {
        /// Year to show (default: current year)
        #[arg(long, allow_negative_numbers = true)]
        year: Option<i32>,
        /// Month to show, 1-12 (default: current month)
        #[arg(long)]
        month: Option<u32>,
        /// First day of the week, 1 = Monday ... 7 = Sunday (default: from config)
        #[arg(long)]
        first_day: Option<u32>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Pick a single date (and time) interactively
    Pick {
        /// Date only, without a time of day
        #[arg(long)]
        no_time: bool,
        /// Start with this moment picked ("YYYY-MM-DD HH:MM:SS" or "YYYY-MM-DD")
        #[arg(long)]
        at: Option<String>,
    },
    /// Pick a start/end range on two calendars interactively
    Range {
        /// Dates only, without times of day
        #[arg(long)]
        no_time: bool,
        /// Preset start ("YYYY-MM-DD HH:MM:SS", or a date meaning 00:00:00)
        #[arg(long)]
        start: Option<String>,
        /// Preset end ("YYYY-MM-DD HH:MM:SS", or a date meaning 23:59:59)
        #[arg(long)]
        end: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    data::persistence::set_data_dir(data_dir.clone());

    // Interactive pickers read palette and texts; seed them on first use.
    let interactive = matches!(cli.command, Commands::Pick { .. } | Commands::Range { .. });
    if interactive && dir_needs_init(&data_dir) {
        eprintln!(
            "Data directory '{}' is missing or empty, running init...",
            data_dir.display()
        );
        cmd::init::run()?;
    }

    match cli.command {
        Commands::Init => cmd::init::run(),
        Commands::Grid {
            year,
            month,
            first_day,
            json,
        } => cmd::grid::run(year, month, first_day, json),
        Commands::Pick { no_time, at } => cmd::pick::run(no_time, at),
        Commands::Range {
            no_time,
            start,
            end,
        } => cmd::range::run(no_time, start, end),
    }
}

/// Logs go to stderr unless a file is given, so the full-screen pickers are
/// not drawn over.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

/// Returns true when `dir` does not exist or exists but contains no files.
fn dir_needs_init(dir: &Path) -> bool {
    if !dir.exists() {
        return true;
    }
    dir.read_dir()
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}
