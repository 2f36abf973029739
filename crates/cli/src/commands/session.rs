// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `h5 session` - Session inspection commands

use std::io::Write;

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use h5_core::{format_clock_ms, Clock, IdGen, Session, SessionRegistry};

use crate::color;
use crate::output::{format_time_of_day, write_json, OutputFormat};
use crate::table::{Column, Table};

#[derive(Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// List all sessions
    List {},
    /// Show one session (defaults to the active session)
    Show {
        /// Session ID
        id: Option<String>,
    },
    /// Count sessions by status
    Stats {},
}

pub fn handle<C: Clock, G: IdGen>(
    command: SessionCommand,
    registry: &SessionRegistry<C, G>,
    format: OutputFormat,
) -> Result<()> {
    let mut out = std::io::stdout().lock();
    let colorize = color::should_colorize();
    match command {
        SessionCommand::List {} => write_session_list(&mut out, registry, format, colorize),
        SessionCommand::Show { id } => {
            write_session_detail(&mut out, registry, id.as_deref(), format, colorize)
        }
        SessionCommand::Stats {} => write_summary(&mut out, registry, format),
    }
}

/// Session table in insertion order. `*` marks the active session.
pub fn write_session_list<C: Clock, G: IdGen>(
    out: &mut impl Write,
    registry: &SessionRegistry<C, G>,
    format: OutputFormat,
    colorize: bool,
) -> Result<()> {
    if format == OutputFormat::Json {
        let sessions: Vec<&Session> = registry.list().collect();
        return write_json(out, &sessions);
    }

    if registry.is_empty() {
        writeln!(out, "No sessions")?;
        return Ok(());
    }

    let now_ms = registry.clock().epoch_ms();
    let active = registry.active_id();
    let mut table = Table::styled(
        vec![
            Column::left(""),
            Column::left("ID"),
            Column::left("NAME").with_max(32),
            Column::status("STATUS"),
            Column::right("PLAYERS"),
            Column::muted("ELAPSED"),
        ],
        colorize,
    );
    for session in registry.list() {
        let marker = if active == Some(&session.id) { "*" } else { "" };
        table.row(vec![
            marker.to_string(),
            session.id.to_string(),
            session.name.clone(),
            session.status.to_string(),
            session.players.to_string(),
            format_clock_ms(session.elapsed_ms(now_ms)),
        ]);
    }
    table.render(out)?;
    Ok(())
}

/// Detail block for `id`, or for the active session when `id` is `None`.
pub fn write_session_detail<C: Clock, G: IdGen>(
    out: &mut impl Write,
    registry: &SessionRegistry<C, G>,
    id: Option<&str>,
    format: OutputFormat,
    colorize: bool,
) -> Result<()> {
    let session = match id {
        Some(id) => registry
            .get(id)
            .ok_or_else(|| h5_core::RegistryError::NotFound(id.into()))?,
        None => registry.active().ok_or_else(|| anyhow!("no active session"))?,
    };

    if format == OutputFormat::Json {
        return write_json(out, session);
    }

    let now_ms = registry.clock().epoch_ms();
    let is_active = registry.active_id() == Some(&session.id);
    let (label, status) = if colorize {
        (
            color::apply_header("Session:"),
            color::apply_status(session.status.as_str()),
        )
    } else {
        ("Session:".to_string(), session.status.to_string())
    };
    writeln!(out, "{} {}", label, session.id)?;
    writeln!(out, "  Name:     {}", session.name)?;
    writeln!(out, "  Status:   {} ({})", status, session.status.label())?;
    writeln!(out, "  Players:  {}", session.players)?;
    writeln!(
        out,
        "  Elapsed:  {}",
        format_clock_ms(session.elapsed_ms(now_ms))
    )?;
    writeln!(out, "  Started:  {}", format_time_of_day(session.started_at_ms))?;
    if let Some(url) = &session.game_url {
        writeln!(out, "  Game URL: {}", url)?;
    }
    writeln!(out, "  Active:   {}", if is_active { "yes" } else { "no" })?;
    Ok(())
}

pub fn write_summary<C: Clock, G: IdGen>(
    out: &mut impl Write,
    registry: &SessionRegistry<C, G>,
    format: OutputFormat,
) -> Result<()> {
    let summary = registry.summary();
    if format == OutputFormat::Json {
        return write_json(out, &summary);
    }
    writeln!(out, "total:   {}", summary.total)?;
    writeln!(out, "active:  {}", summary.active)?;
    writeln!(out, "paused:  {}", summary.paused)?;
    writeln!(out, "stopped: {}", summary.stopped)?;
    Ok(())
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
