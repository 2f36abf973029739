// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic logging to stderr.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `H5_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Build the env filter from `H5_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn filter_from(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Logs go to stderr so stdout stays parseable.
pub fn setup_logging() {
    let filter = filter_from(crate::env::log_filter().as_deref());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
