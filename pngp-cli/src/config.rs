//! Load config from file and environment.

use pngp_core::ChecksumMode;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Tool configuration. File: ~/.config/pngp/config.toml or /etc/pngp/config.toml.
/// Env overrides: PNGP_OUTPUT, PNGP_CHECKSUM, PNGP_LOG.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Output path when -o is not given (default output.png).
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Checksum written into the injected chunk (default zero).
    #[serde(default)]
    pub checksum: ChecksumMode,
    /// Log filter when RUST_LOG is unset (default info).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_output() -> PathBuf {
    PathBuf::from("output.png")
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: default_output(),
            checksum: ChecksumMode::default(),
            log_level: default_log_level(),
        }
    }
}

/// A config file that exists but was not used.
#[derive(Debug)]
pub struct Skipped {
    pub path: PathBuf,
    pub reason: String,
}

impl Skipped {
    fn new(path: &Path, reason: impl fmt::Display) -> Self {
        Self {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Load config: merge default, then config file (if present), then env vars.
/// A broken file falls back to defaults; it is returned so the caller can
/// report it once logging is up.
pub fn load() -> (Config, Option<Skipped>) {
    let (c, skipped) = match load_file() {
        Ok(c) => (c.unwrap_or_default(), None),
        Err(s) => (Config::default(), Some(s)),
    };
    (apply_env(c, |k| std::env::var(k).ok()), skipped)
}

/// Apply env overrides. Values that do not parse are ignored.
fn apply_env(mut c: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(s) = var("PNGP_OUTPUT") {
        if !s.is_empty() {
            c.output = PathBuf::from(s);
        }
    }
    if let Some(s) = var("PNGP_CHECKSUM") {
        match s.to_ascii_lowercase().as_str() {
            "zero" => c.checksum = ChecksumMode::Zero,
            "crc32" => c.checksum = ChecksumMode::Crc32,
            _ => {}
        }
    }
    if let Some(s) = var("PNGP_LOG") {
        if !s.is_empty() {
            c.log_level = s;
        }
    }
    c
}

fn config_paths() -> Vec<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let mut out = Vec::new();
    if let Some(h) = home {
        out.push(h.join(".config/pngp/config.toml"));
    }
    out.push(PathBuf::from("/etc/pngp/config.toml"));
    out
}

/// First existing file wins; later paths are not consulted even if it is broken.
fn load_file() -> Result<Option<Config>, Skipped> {
    match config_paths().into_iter().find(|p| p.exists()) {
        Some(p) => {
            let text = std::fs::read_to_string(&p).map_err(|e| Skipped::new(&p, e))?;
            parse_file(&p, &text).map(Some)
        }
        None => Ok(None),
    }
}

fn parse_file(path: &Path, text: &str) -> Result<Config, Skipped> {
    toml::from_str::<Config>(text).map_err(|e| Skipped::new(path, e))
}
