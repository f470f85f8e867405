//! # niu
//!
//! ## Name Origin
//!
//! `niu` is simply the CLI's name (no acronym): a single small tool, named
//! to match the minifier it wraps.
//!
//! ## Purpose
//!
//! A command-line front end for the `niu_atelier` minification pipeline.
//! Minifies one or more files in place or into `--out-dir`, or, with
//! `--batch`, a whole glob of files in parallel via `rayon`.

mod commands;
mod config;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "niu")]
#[command(about = "A byte-cost-driven JavaScript/TypeScript minifier", long_about = None)]
#[command(version)]
struct Cli {
    /// Files to minify. Ignored when --batch is given.
    files: Vec<PathBuf>,

    /// Glob pattern to expand into a batch of files, processed in parallel.
    #[arg(long)]
    batch: Option<String>,

    /// Write output files into this directory instead of overwriting
    /// the input in place.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Hoist frequently dot-accessed globals into a `const`.
    #[arg(long)]
    hoist_globals: bool,

    /// Hoist duplicate string/literal occurrences into `const`s.
    #[arg(long)]
    hoist_literals: bool,

    /// Rewrite every `const` declaration to `let` (changes semantics).
    #[arg(long)]
    consts_to_lets: bool,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "niu=warn",
        1 => "niu=info,niu_atelier=info",
        2 => "niu=debug,niu_atelier=debug",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("NIU_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = config::load_config(None);
    let mut options = config.to_minify_options();
    if cli.hoist_globals {
        options.hoist_globals = true;
    }
    if cli.hoist_literals {
        options.hoist_duplicate_literals = true;
    }
    if cli.consts_to_lets {
        options.consts_to_lets = true;
    }

    let exit_code = if let Some(pattern) = cli.batch {
        commands::run_batch(&pattern, cli.out_dir.as_deref(), &options)
    } else {
        commands::run_files(&cli.files, cli.out_dir.as_deref(), &options)
    };

    std::process::exit(exit_code);
}
