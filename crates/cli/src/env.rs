// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;

// --- Config ---

/// Explicit config file from `H5_CONFIG` (empty values ignored)
pub fn config_path() -> Option<PathBuf> {
    std::env::var("H5_CONFIG")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

/// Default config location: `<config_dir>/h5/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("h5").join("config.toml"))
}

// --- Logging ---

/// Log filter directive from `H5_LOG`, e.g. `debug` or `h5_core=trace`
pub fn log_filter() -> Option<String> {
    std::env::var("H5_LOG").ok().filter(|s| !s.is_empty())
}

// --- Color ---

pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
