mod command;
mod config;
mod effects;
mod render;
mod shell;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use roster_core::Category;
use roster_engine::EngineHandle;
use roster_logging::LogDestination;

use crate::effects::EffectRunner;
use crate::shell::Shell;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogTarget {
    File,
    Terminal,
    Both,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CategoryArg {
    Male,
    Female,
}

/// Browse the random user directory from the terminal.
#[derive(Parser, Debug)]
#[command(name = "roster")]
struct Args {
    /// RON config file (defaults to ./roster.ron when present).
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    log: LogTarget,
    #[arg(long, default_value = "roster.log")]
    log_file: PathBuf,
    #[arg(long, value_enum, default_value_t = CategoryArg::Male)]
    category: CategoryArg,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let destination = match args.log {
        LogTarget::File => LogDestination::File,
        LogTarget::Terminal => LogDestination::Terminal,
        LogTarget::Both => LogDestination::Both,
    };
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    roster_logging::initialize(destination, level, &args.log_file);

    let config = config::load_config(args.config.as_deref())?;
    let engine = EngineHandle::new(config.source_settings()).context("starting fetch engine")?;
    let runner = EffectRunner::new(engine, config.response_wait());

    let start = match args.category {
        CategoryArg::Male => Category::Male,
        CategoryArg::Female => Category::Female,
    };
    let stdin = io::stdin();
    let mut shell = Shell::new(config.store_settings(), runner, io::stdout());
    shell.run(stdin.lock(), start)
}
