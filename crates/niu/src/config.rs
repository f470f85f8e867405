//! Configuration file loading for niu.
//!
//! Reads `niu.toml` from the current working directory, the same
//! serde-driven `Deserialize` pattern vize reads `vize.config.json` with,
//! swapped to TOML (spec.md has no wire format of its own, and TOML is
//! the plainer fit for a flat pass-toggle config than JSON Schema-backed
//! JSON).

use serde::Deserialize;
use std::path::Path;

use niu_atelier::MinifyOptions;

/// Top-level niu configuration (`niu.toml`).
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NiuConfig {
    /// Lift frequently dot-accessed globals into a hoisted `const`.
    pub hoist_globals: bool,
    /// Hoist duplicate string/literal occurrences into `const`s.
    pub hoist_duplicate_literals: bool,
    /// Rewrite every `const` declaration to `let` (changes semantics).
    pub consts_to_lets: bool,
    /// Glob patterns to include when running in `--batch` mode.
    #[serde(default)]
    pub include: Vec<String>,
    /// Glob patterns to exclude when running in `--batch` mode.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for NiuConfig {
    fn default() -> Self {
        let defaults = MinifyOptions::default();
        Self {
            hoist_globals: defaults.hoist_globals,
            hoist_duplicate_literals: defaults.hoist_duplicate_literals,
            consts_to_lets: defaults.consts_to_lets,
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl NiuConfig {
    pub fn to_minify_options(&self) -> MinifyOptions {
        MinifyOptions {
            hoist_globals: self.hoist_globals,
            hoist_duplicate_literals: self.hoist_duplicate_literals,
            consts_to_lets: self.consts_to_lets,
        }
    }
}

/// Load `niu.toml` from `dir` (or the current working directory), falling
/// back to defaults when absent or unparseable.
pub fn load_config(dir: Option<&Path>) -> NiuConfig {
    let base = dir
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    let config_path = base.join("niu.toml");

    if !config_path.exists() {
        return NiuConfig::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "\x1b[33mWarning:\x1b[0m failed to parse {}: {}",
                    config_path.display(),
                    e
                );
                NiuConfig::default()
            }
        },
        Err(e) => {
            eprintln!(
                "\x1b[33mWarning:\x1b[0m failed to read {}: {}",
                config_path.display(),
                e
            );
            NiuConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(dir.path()));
        assert!(config.hoist_globals);
        assert!(!config.consts_to_lets);
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("niu.toml"),
            "consts_to_lets = true\nhoist_globals = false\n",
        )
        .unwrap();
        let config = load_config(Some(dir.path()));
        assert!(config.consts_to_lets);
        assert!(!config.hoist_globals);
    }
}
