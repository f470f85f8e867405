//! The minify command surface: single-file/multi-file mode and
//! `--batch <glob>` mode, the latter compiling in parallel with `rayon`
//! the way vize's `build` command walks and compiles `.vue` files
//! (`commands::build::run`) — same `AtomicUsize` success/failure
//! accounting, same "continue past individual failures, report a
//! summary" shape. Single-file mode with no `--out-dir` prints to stdout
//! rather than overwriting the input in place; `--out-dir`-less multi-file
//! and `--batch` invocations have nowhere sensible to put more than one
//! file's output, so they error instead.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use niu_atelier::pipeline::MinifyOptions;

fn read_and_minify(path: &Path, options: &MinifyOptions) -> Result<niu_atelier::pipeline::MinifyResult, String> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| format!("{}: failed to read: {e}", path.display()))?;
    niu_atelier::minify(&source, options).map_err(|e| format!("{}: {e}", path.display()))
}

fn minify_to_stdout(path: &Path, options: &MinifyOptions) -> Result<(), String> {
    let result = read_and_minify(path, options)?;
    print!("{}", result.code);
    tracing::info!(
        globals = result.stats.globals_hoisted,
        literals = result.stats.literals_hoisted,
        mangled = result.stats.bindings_mangled,
        "{} -> stdout",
        path.display()
    );
    Ok(())
}

fn minify_to_dir(path: &Path, out_dir: &Path, options: &MinifyOptions) -> Result<(), String> {
    let result = read_and_minify(path, options)?;

    let dest = out_dir.join(path.file_name().unwrap_or_default());
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("{}: failed to create output dir: {e}", dest.display()))?;
        }
    }
    std::fs::write(&dest, result.code)
        .map_err(|e| format!("{}: failed to write: {e}", dest.display()))?;

    tracing::info!(
        globals = result.stats.globals_hoisted,
        literals = result.stats.literals_hoisted,
        mangled = result.stats.bindings_mangled,
        "{} -> {}",
        path.display(),
        dest.display()
    );
    Ok(())
}

pub fn run_files(files: &[PathBuf], out_dir: Option<&Path>, options: &MinifyOptions) -> i32 {
    let out_dir = match out_dir {
        Some(dir) => dir,
        None => {
            return match files {
                [only] => match minify_to_stdout(only, options) {
                    Ok(()) => report(1, 0),
                    Err(message) => {
                        eprintln!("\x1b[31merror\x1b[0m: {message}");
                        report(0, 1)
                    }
                },
                _ => {
                    eprintln!(
                        "\x1b[31merror\x1b[0m: --out-dir is required when minifying more than one file"
                    );
                    1
                }
            };
        }
    };

    let success = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    for file in files {
        match minify_to_dir(file, out_dir, options) {
            Ok(()) => {
                success.fetch_add(1, Ordering::Relaxed);
            }
            Err(message) => {
                eprintln!("\x1b[31merror\x1b[0m: {message}");
                failed.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    report(success.into_inner(), failed.into_inner())
}

pub fn run_batch(pattern: &str, out_dir: Option<&Path>, options: &MinifyOptions) -> i32 {
    let out_dir = match out_dir {
        Some(dir) => dir,
        None => {
            eprintln!("\x1b[31merror\x1b[0m: --batch requires --out-dir (a glob can expand to many files, which stdout can't hold)");
            return 1;
        }
    };

    let entries: Vec<PathBuf> = match glob::glob(pattern) {
        Ok(paths) => paths.filter_map(Result::ok).collect(),
        Err(e) => {
            eprintln!("\x1b[31merror\x1b[0m: invalid glob pattern {pattern:?}: {e}");
            return 1;
        }
    };

    let success = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    entries.par_iter().for_each(|path| {
        match minify_to_dir(path, out_dir, options) {
            Ok(()) => {
                success.fetch_add(1, Ordering::Relaxed);
            }
            Err(message) => {
                eprintln!("\x1b[31merror\x1b[0m: {message}");
                failed.fetch_add(1, Ordering::Relaxed);
            }
        }
    });

    report(success.into_inner(), failed.into_inner())
}

fn report(success: usize, failed: usize) -> i32 {
    if failed > 0 {
        eprintln!("niu: {success} succeeded, {failed} failed");
        1
    } else {
        eprintln!("niu: {success} succeeded");
        0
    }
}
