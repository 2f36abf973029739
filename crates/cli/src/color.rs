// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::IsTerminal;

pub mod codes {
    /// Section headers: pastel cyan / steel blue
    pub const HEADER: u8 = 74;
    /// Descriptions and context: medium grey
    pub const CONTEXT: u8 = 245;
    /// Muted / secondary text: darker grey
    pub const MUTED: u8 = 240;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    if crate::env::no_color() {
        return false;
    }
    if crate::env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

const RESET: &str = "\x1b[0m";

/// Apply header color unconditionally (caller decides whether to use this).
pub(crate) fn apply_header(text: &str) -> String {
    format!("{}{}{}", fg256(codes::HEADER), text, RESET)
}

/// Apply context color (medium grey) unconditionally.
pub(crate) fn apply_context(text: &str) -> String {
    format!("{}{}{}", fg256(codes::CONTEXT), text, RESET)
}

/// Apply muted color unconditionally (caller decides whether to use this).
pub(crate) fn apply_muted(text: &str) -> String {
    format!("{}{}{}", fg256(codes::MUTED), text, RESET)
}

/// Colorize a session status string, unconditionally.
///
/// - Green: active
/// - Yellow: paused
/// - Red: stopped
/// - Default (no color): anything else
///
/// Matches on the first word so padded or annotated values
/// (`"paused (暫停)"`) still get colored.
pub(crate) fn apply_status(text: &str) -> String {
    let lower = text.trim_start().to_lowercase();
    let first_word = lower
        .split(|c: char| !c.is_alphabetic())
        .next()
        .unwrap_or("");
    let code = match first_word {
        "active" => "\x1b[32m",
        "paused" => "\x1b[33m",
        "stopped" | "error" => "\x1b[31m",
        _ => return text.to_string(),
    };
    format!("{code}{text}{RESET}")
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
