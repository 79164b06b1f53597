//! # Configuration
//!
//! Command-line options of the `bucketsh` binary.
//! Logging is configured through `RUST_LOG`, which overrides `--verbose`.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Browse object storage buckets as if they were directories.
///
/// Reads commands from standard input: `cd`, `ls`, `pwd`, `type` and `exit`.
#[derive(Parser, Debug)]
#[command(name = "bucketsh", version, about)]
pub struct Cli {
    /// JSON manifest describing the buckets and objects to serve.
    #[arg(short, long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Location to start in, e.g. `/photos/2024/`.
    #[arg(short, long, value_name = "PATH")]
    pub start: Option<String>,

    /// Never draw the progress spinner.
    #[arg(long)]
    pub no_progress: bool,

    /// Log debug output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The log filter: `RUST_LOG` if set, otherwise derived from `--verbose`
    pub fn log_filter(&self) -> EnvFilter {
        let default = match self.verbose {
            true => "bucketsh=debug",
            false => "warn",
        };

        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    }
}
