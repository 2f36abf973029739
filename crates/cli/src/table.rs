// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Table renderer for session list views.
//!
//! Widths and truncation count characters, not bytes, so CJK session names
//! never split mid-character.

use std::io::Write;

use crate::color;

/// Column text alignment.
pub enum Align {
    Left,
    Right,
}

/// How a cell's text is styled after padding.
pub enum CellStyle {
    /// No color applied.
    Plain,
    /// Apply the muted color.
    Muted,
    /// Apply [`color::apply_status()`] coloring.
    Status,
}

/// A column definition in a [`Table`].
pub struct Column {
    pub name: &'static str,
    pub align: Align,
    pub style: CellStyle,
    /// Minimum width (defaults to header text length).
    pub min_width: Option<usize>,
    /// Maximum width (`None` = unlimited). Values exceeding this are truncated.
    pub max_width: Option<usize>,
}

impl Column {
    fn with_style(name: &'static str, align: Align, style: CellStyle) -> Self {
        Self {
            name,
            align,
            style,
            min_width: None,
            max_width: None,
        }
    }

    /// Left-aligned, plain style.
    pub fn left(name: &'static str) -> Self {
        Self::with_style(name, Align::Left, CellStyle::Plain)
    }

    /// Right-aligned, plain style.
    pub fn right(name: &'static str) -> Self {
        Self::with_style(name, Align::Right, CellStyle::Plain)
    }

    /// Left-aligned, muted style.
    pub fn muted(name: &'static str) -> Self {
        Self::with_style(name, Align::Left, CellStyle::Muted)
    }

    /// Left-aligned, status style.
    pub fn status(name: &'static str) -> Self {
        Self::with_style(name, Align::Left, CellStyle::Status)
    }

    /// Set maximum width (values exceeding this are truncated).
    pub fn with_max(mut self, max: usize) -> Self {
        self.max_width = Some(max);
        self
    }
}

/// A tabular renderer that auto-computes column widths from data.
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    colorize: bool,
}

/// Column separator: double space.
const SEP: &str = "  ";

impl Table {
    /// Create a table with color decided by the caller.
    pub fn styled(columns: Vec<Column>, colorize: bool) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            colorize,
        }
    }

    /// Create a table that never emits color codes.
    pub fn plain(columns: Vec<Column>) -> Self {
        Self::styled(columns, false)
    }

    /// Create a table that always emits color codes.
    #[cfg(test)]
    pub fn colored(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            colorize: true,
        }
    }

    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// Render the full table (header + rows) to the given writer.
    ///
    /// The last column is never padded. Color is applied **after** padding so
    /// ANSI escapes don't corrupt width calculations.
    pub fn render(&self, out: &mut impl Write) -> std::io::Result<()> {
        if self.rows.is_empty() {
            return Ok(());
        }

        let widths = self.compute_widths();
        let last = self.columns.len().saturating_sub(1);

        let header_cells: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let padded = if i == last && matches!(col.align, Align::Left) {
                    col.name.to_string()
                } else {
                    pad(col.name, widths[i], &col.align)
                };
                if self.colorize {
                    color::apply_header(&padded)
                } else {
                    padded
                }
            })
            .collect();
        writeln!(out, "{}", header_cells.join(SEP).trim_end())?;

        for row in &self.rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .enumerate()
                .map(|(i, col)| {
                    let raw = row.get(i).map(|s| s.as_str()).unwrap_or("");
                    let truncated = truncate(raw, col.max_width);
                    let padded = if i == last && matches!(col.align, Align::Left) {
                        truncated.to_string()
                    } else {
                        pad(truncated, widths[i], &col.align)
                    };
                    stylize(&padded, &col.style, self.colorize)
                })
                .collect();
            writeln!(out, "{}", cells.join(SEP))?;
        }
        Ok(())
    }

    /// Compute the display width for each column.
    fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let min = col.min_width.unwrap_or(col.name.chars().count());
                let max_data = self
                    .rows
                    .iter()
                    .map(|row| {
                        let raw = row.get(i).map(|s| s.chars().count()).unwrap_or(0);
                        match col.max_width {
                            Some(mw) => raw.min(mw),
                            None => raw,
                        }
                    })
                    .max()
                    .unwrap_or(0);
                min.max(max_data)
            })
            .collect()
    }
}

/// Pad a string to `width` characters using the given alignment.
fn pad(text: &str, width: usize, align: &Align) -> String {
    match align {
        Align::Left => format!("{:<width$}", text),
        Align::Right => format!("{:>width$}", text),
    }
}

/// Truncate a string to at most `max` characters (if set).
fn truncate(s: &str, max: Option<usize>) -> &str {
    match max {
        Some(m) => h5_core::ShortId::short(s, m),
        None => s,
    }
}

/// Apply a [`CellStyle`] to already-padded text.
fn stylize(text: &str, style: &CellStyle, colorize: bool) -> String {
    if !colorize {
        return text.to_string();
    }
    match style {
        CellStyle::Plain => text.to_string(),
        CellStyle::Muted => color::apply_muted(text),
        CellStyle::Status => color::apply_status(text),
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
