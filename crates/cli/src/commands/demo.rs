// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `h5 demo` - Walk through the two-session example on a fresh registry

use std::io::Write;

use anyhow::Result;
use h5_core::{Clock, IdGen, Session, SessionRegistry};
use serde_json::json;

use super::session::write_session_list;
use crate::color;
use crate::output::{write_json, OutputFormat};

pub const FIRST_NAME: &str = "Game Test #1";
pub const SECOND_NAME: &str = "Game Test #2";

pub fn handle(format: OutputFormat) -> Result<()> {
    let mut registry = SessionRegistry::new();
    let mut out = std::io::stdout().lock();
    run_demo(&mut registry, &mut out, format, color::should_colorize())
}

/// Create two sessions, delete the second, then print what is left.
pub fn run_demo<C: Clock, G: IdGen>(
    registry: &mut SessionRegistry<C, G>,
    out: &mut impl Write,
    format: OutputFormat,
    colorize: bool,
) -> Result<()> {
    let first = registry.create(FIRST_NAME)?;
    let second = registry.create(SECOND_NAME)?;
    registry.delete(second.id.as_str())?;

    if format == OutputFormat::Json {
        let sessions: Vec<&Session> = registry.list().collect();
        return write_json(
            out,
            &json!({
                "created": [first.id, second.id],
                "deleted": second.id,
                "active": registry.active_id(),
                "sessions": sessions,
            }),
        );
    }

    writeln!(out, "Created {} ({})", first.id, first.name)?;
    writeln!(out, "Created {} ({})", second.id, second.name)?;
    writeln!(out, "Deleted {}", second.id)?;
    if let Some(active) = registry.active_id() {
        writeln!(out, "Active:  {}", active)?;
    }
    writeln!(out)?;
    write_session_list(out, registry, format, colorize)
}

#[cfg(test)]
#[path = "demo_tests.rs"]
mod tests;
