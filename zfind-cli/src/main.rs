mod logging;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::{num::NonZeroUsize, path::PathBuf};
use tracing::info;
use zfind::{
    config::CliOverrides, enumerate_with, picker::run_picker, AggregatorStrategy,
    EnumerateOptions, Enumeration, FuzzyMatcher, NucleoMatcher, ZfindConfig,
};

use crate::logging::LogSession;

#[derive(Parser)]
#[command(name = "zfind", author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Clone, Default)]
struct CommonArgs {
    /// Root directory to enumerate
    #[arg(short = 'd', long)]
    root: Option<PathBuf>,

    /// Configuration file to load on top of the default locations
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How walker threads hand over paths (channel|lock|auto)
    #[arg(short, long)]
    strategy: Option<String>,

    /// Queue capacity for the channel strategy
    #[arg(long)]
    capacity: Option<usize>,

    /// Number of walker threads
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Do not follow symbolic links
    #[arg(long)]
    no_follow: bool,

    /// Hide files matched by .gitignore rules
    #[arg(long)]
    gitignore: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Args)]
struct ListArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Only print paths matching this fuzzy query, best match first
    #[arg(short, long)]
    query: Option<String>,

    /// Print at most this many paths
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Sort paths alphabetically (ignored with --query)
    #[arg(long)]
    sort: bool,

    /// Print enumeration statistics after the paths
    #[arg(long)]
    stats: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a file interactively and print its path (default)
    Pick(CommonArgs),

    /// Print enumerated paths without the interactive picker
    List(ListArgs),

    /// Print the effective configuration as YAML
    Config(CommonArgs),
}

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Pick(args)) => pick(args),
        Some(Commands::List(args)) => list(args),
        Some(Commands::Config(args)) => {
            print!("{}", load_config(&args)?.to_yaml()?);
            Ok(())
        }
        None => pick(cli.common),
    }
}

fn load_config(args: &CommonArgs) -> Result<ZfindConfig> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let strategy = args
        .strategy
        .as_deref()
        .map(str::parse::<AggregatorStrategy>)
        .transpose()?;

    let config = ZfindConfig::load_from(args.config.as_deref())
        .context("Failed to load configuration")?
        .merge_with_cli(CliOverrides {
            root_path: args.root.clone(),
            strategy,
            channel_capacity: args.capacity,
            thread_count: args.threads,
            no_follow: args.no_follow,
            respect_gitignore: args.gitignore,
            log_level: args.log_level.clone(),
            log_file: args.log_file.clone(),
        });
    config.validate()?;
    Ok(config)
}

fn load_files(config: &ZfindConfig) -> Result<Enumeration> {
    let enumeration =
        enumerate_with(&EnumerateOptions::from_config(config)).context("Error getting files")?;
    info!(
        "Files loaded: {} ({} strategy)",
        enumeration.paths.len(),
        enumeration.strategy
    );
    Ok(enumeration)
}

fn pick(args: CommonArgs) -> Result<()> {
    let config = load_config(&args)?;
    let session = LogSession::open(&config.log_level, config.log_file.as_deref())?;
    info!("Application started");

    let enumeration = load_files(&config)?;

    let mut matcher = NucleoMatcher::new();
    let selected = run_picker(
        enumeration.paths,
        config.list_height,
        &mut matcher,
        !args.no_color,
    )?;

    if let Some(path) = selected {
        println!("{}", path);
    }

    session.close();
    Ok(())
}

fn list(args: ListArgs) -> Result<()> {
    let config = load_config(&args.common)?;
    let session = LogSession::open(&config.log_level, config.log_file.as_deref())?;

    let enumeration = load_files(&config)?;
    let mut paths = match args.query.as_deref() {
        Some(query) => NucleoMatcher::new().rank(query, &enumeration.paths),
        None => enumeration.paths.clone(),
    };
    if args.sort && args.query.is_none() {
        paths.sort();
    }
    if let Some(limit) = args.limit {
        paths.truncate(limit);
    }

    for path in &paths {
        println!("{}", path);
    }

    if args.stats {
        print_stats(&enumeration, paths.len());
    }

    session.close();
    Ok(())
}

fn print_stats(enumeration: &Enumeration, shown: usize) {
    let stats = &enumeration.stats;
    println!(
        "\n{}",
        format!(
            "Found {} files in {:?} using the {} strategy",
            enumeration.paths.len(),
            enumeration.elapsed,
            enumeration.strategy
        )
        .bright_blue()
    );
    println!(
        "Shown: {}, directories: {}, pruned: {}, skipped errors: {}",
        shown, stats.dirs_visited, stats.subtrees_pruned, stats.errors_skipped
    );
}
