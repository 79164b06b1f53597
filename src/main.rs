//! An interactive shell for browsing object storage buckets as directories

use anyhow::Context as _;
use bucketsh::cmd::ConsoleOutputter;
use bucketsh::config::Cli;
use bucketsh::context::Context;
use bucketsh::memory::MemoryStore;
use bucketsh::repl::Dispatcher;
use clap::Parser;
use std::io::{self, IsTerminal};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter())
        .with_writer(io::stderr)
        .init();

    let store = match &cli.manifest {
        Some(path) => MemoryStore::from_manifest(path)?,
        None => MemoryStore::new(),
    };

    let interactive = io::stdin().is_terminal();
    let mut dispatcher = Dispatcher::new(store, Context::new())
        .with_prompt(interactive)
        .with_progress(interactive && !cli.no_progress);

    if let Some(start) = &cli.start {
        dispatcher
            .change_dir(start)
            .with_context(|| format!("cannot start in {start}"))?;
    }

    let code = dispatcher.run(io::stdin().lock(), &mut ConsoleOutputter)?;
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
