// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Duration formatting for the dashboard timer.

/// Format seconds as a running clock, `"m:ss"`. Minutes are not capped.
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Millisecond variant of [`format_clock`]; partial seconds are dropped.
pub fn format_clock_ms(ms: u64) -> String {
    format_clock(ms / 1000)
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
