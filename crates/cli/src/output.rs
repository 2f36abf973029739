// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<T: Serialize + ?Sized>(w: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *w, value)?;
    writeln!(w)?;
    Ok(())
}

/// Format epoch milliseconds as a UTC time of day, `"HH:MM:SS UTC"`.
pub fn format_time_of_day(epoch_ms: u64) -> String {
    let secs = (epoch_ms / 1000) % 86_400;
    format!(
        "{:02}:{:02}:{:02} UTC",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
