// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `h5 shell` - Drive one registry from a command script
//!
//! Reads one command per line. A failed command is reported on stderr and
//! the shell moves on to the next line; only I/O failures stop it.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use h5_core::{Clock, IdGen, RegistryError, Scheduler, Session, SessionId, SessionRegistry, TaskId};
use serde_json::json;
use thiserror::Error;

use super::session::{write_session_detail, write_session_list, write_summary};
use crate::color;
use crate::exit_error::ExitError;
use crate::output::{write_json, OutputFormat};

/// How long `analyze` runs when no delay is given.
pub const DEFAULT_ANALYSIS_DELAY: Duration = Duration::from_millis(2000);

#[derive(Args)]
pub struct ShellArgs {
    /// Read commands from FILE instead of stdin
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Create(String),
    Delete(String),
    Pause(String),
    Resume(String),
    Duplicate(String),
    Select(String),
    List,
    Show(Option<String>),
    Stats,
    Analyze { id: Option<String>, delay: Duration },
    Wait,
    Help,
    Quit,
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("unknown command: {0} (try `help`)")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("invalid delay: {0}")]
    InvalidDelay(String),
    #[error("no active session")]
    NoActiveSession,
    #[error("analysis already running for {0}")]
    AnalysisRunning(SessionId),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

const COMMANDS: &[(&str, &str)] = &[
    ("create <name...>", "Create a session and make it active"),
    ("delete <id>", "Delete a session"),
    ("pause <id>", "Pause a session"),
    ("resume <id>", "Resume a paused session"),
    ("dup <id>", "Duplicate a session"),
    ("select <id>", "Make a session active"),
    ("list", "List sessions"),
    ("show [id]", "Show a session (defaults to the active one)"),
    ("stats", "Count sessions by status"),
    ("analyze [id [delay-ms]]", "Start an analysis run (default 2000 ms, delay needs an id)"),
    ("wait", "Wait for running analyses to finish"),
    ("help", "Show this help"),
    ("quit", "Stop reading commands"),
];

fn usage(command: &str) -> ShellError {
    let line = COMMANDS
        .iter()
        .map(|(usage, _)| *usage)
        .find(|usage| usage.split(' ').next() == Some(command))
        .unwrap_or("help");
    ShellError::Usage(line)
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, ShellError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let one_id = || match args.as_slice() {
        [id] => Ok(id.to_string()),
        _ => Err(usage(word)),
    };
    let no_args = |command: ShellCommand| {
        if args.is_empty() {
            Ok(command)
        } else {
            Err(usage(word))
        }
    };

    let command = match word {
        // The name is the raw remainder so inner spacing survives.
        "create" => ShellCommand::Create(rest.to_string()),
        "delete" => ShellCommand::Delete(one_id()?),
        "pause" => ShellCommand::Pause(one_id()?),
        "resume" => ShellCommand::Resume(one_id()?),
        "dup" => ShellCommand::Duplicate(one_id()?),
        "select" => ShellCommand::Select(one_id()?),
        "show" => match args.as_slice() {
            [] => ShellCommand::Show(None),
            [id] => ShellCommand::Show(Some(id.to_string())),
            _ => return Err(usage(word)),
        },
        "analyze" => match args.as_slice() {
            [] => ShellCommand::Analyze {
                id: None,
                delay: DEFAULT_ANALYSIS_DELAY,
            },
            [id] => ShellCommand::Analyze {
                id: Some(id.to_string()),
                delay: DEFAULT_ANALYSIS_DELAY,
            },
            [id, ms] => ShellCommand::Analyze {
                id: Some(id.to_string()),
                delay: parse_delay(ms)?,
            },
            _ => return Err(usage(word)),
        },
        "list" => no_args(ShellCommand::List)?,
        "stats" => no_args(ShellCommand::Stats)?,
        "wait" => no_args(ShellCommand::Wait)?,
        "help" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(ShellError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_delay(ms: &str) -> Result<Duration, ShellError> {
    ms.parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ShellError::InvalidDelay(ms.to_string()))
}

enum Flow {
    Continue,
    Quit,
}

/// Owns a registry plus the analysis runs started against it.
pub struct Shell<C: Clock, G: IdGen> {
    registry: SessionRegistry<C, G>,
    analyses: Scheduler<SessionId>,
    format: OutputFormat,
    colorize: bool,
    sleep: Box<dyn FnMut(Duration)>,
    failures: usize,
}

impl<C: Clock, G: IdGen> Shell<C, G> {
    pub fn new(registry: SessionRegistry<C, G>, format: OutputFormat) -> Self {
        Self {
            registry,
            analyses: Scheduler::new(),
            format,
            colorize: false,
            sleep: Box::new(std::thread::sleep),
            failures: 0,
        }
    }

    pub fn with_color(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }

    /// Replace how `wait` blocks until the next analysis deadline.
    pub fn with_sleeper(mut self, sleep: impl FnMut(Duration) + 'static) -> Self {
        self.sleep = Box::new(sleep);
        self
    }

    pub fn registry(&self) -> &SessionRegistry<C, G> {
        &self.registry
    }

    pub fn pending_analyses(&self) -> usize {
        self.analyses.len()
    }

    /// Run every line of `input`. Returns how many commands failed.
    pub fn run(
        &mut self,
        input: impl BufRead,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> Result<usize> {
        for line in input.lines() {
            let line = line?;
            self.poll(out)?;

            let result = parse_line(&line)
                .map_err(anyhow::Error::from)
                .and_then(|command| match command {
                    Some(command) => self.execute(command, out),
                    None => Ok(Flow::Continue),
                });
            match result {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) if e.downcast_ref::<std::io::Error>().is_some() => return Err(e),
                Err(e) => {
                    self.failures += 1;
                    tracing::debug!(line = %line.trim(), error = %e, "shell command failed");
                    writeln!(err, "error: {:#}", e)?;
                }
            }
        }

        self.poll(out)?;
        if !self.analyses.is_empty() {
            tracing::debug!(
                pending = self.analyses.len(),
                "input ended with analyses still running"
            );
        }
        Ok(self.failures)
    }

    fn execute(&mut self, command: ShellCommand, out: &mut impl Write) -> Result<Flow> {
        match command {
            ShellCommand::Create(name) => {
                let session = self.registry.create(&name)?;
                let text = format!("Created {} ({})", session.id, session.name);
                self.report(out, &session, text)?;
            }
            ShellCommand::Delete(id) => {
                self.registry.delete(&id)?;
                let cancelled = self.analyses.cancel_session(&id);
                if cancelled > 0 {
                    tracing::info!(session_id = %id, cancelled, "analysis cancelled");
                }
                match self.format {
                    OutputFormat::Json => write_json(
                        out,
                        &json!({ "deleted": id, "active": self.registry.active_id() }),
                    )?,
                    OutputFormat::Text => writeln!(out, "Deleted {}", id)?,
                }
            }
            ShellCommand::Pause(id) => {
                let session = self.registry.set_paused(&id, true)?;
                let text = format!("{} is {}", session.id, session.status);
                self.report(out, &session, text)?;
            }
            ShellCommand::Resume(id) => {
                let session = self.registry.set_paused(&id, false)?;
                let text = format!("{} is {}", session.id, session.status);
                self.report(out, &session, text)?;
            }
            ShellCommand::Duplicate(id) => {
                let copy = self.registry.duplicate(&id)?;
                let text = format!("Duplicated {} as {} ({})", id, copy.id, copy.name);
                self.report(out, &copy, text)?;
            }
            ShellCommand::Select(id) => {
                self.registry.set_active(&id)?;
                match self.format {
                    OutputFormat::Json => write_json(out, &json!({ "active": id }))?,
                    OutputFormat::Text => writeln!(out, "Selected {}", id)?,
                }
            }
            ShellCommand::List => {
                write_session_list(out, &self.registry, self.format, self.colorize)?
            }
            ShellCommand::Show(id) => {
                write_session_detail(out, &self.registry, id.as_deref(), self.format, self.colorize)?
            }
            ShellCommand::Stats => write_summary(out, &self.registry, self.format)?,
            ShellCommand::Analyze { id, delay } => self.start_analysis(out, id, delay)?,
            ShellCommand::Wait => self.wait(out)?,
            ShellCommand::Help => {
                for (usage, description) in COMMANDS {
                    let description = if self.colorize {
                        color::apply_context(description)
                    } else {
                        description.to_string()
                    };
                    writeln!(out, "  {:<26}{}", usage, description)?;
                }
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn report(&self, out: &mut impl Write, session: &Session, text: impl Display) -> Result<()> {
        match self.format {
            OutputFormat::Json => write_json(out, session),
            OutputFormat::Text => {
                writeln!(out, "{}", text)?;
                Ok(())
            }
        }
    }

    fn start_analysis(
        &mut self,
        out: &mut impl Write,
        id: Option<String>,
        delay: Duration,
    ) -> Result<()> {
        let session_id = match id {
            Some(id) => self
                .registry
                .get(&id)
                .map(|s| s.id.clone())
                .ok_or_else(|| ShellError::from(RegistryError::NotFound(SessionId::new(id))))?,
            None => self
                .registry
                .active_id()
                .cloned()
                .ok_or(ShellError::NoActiveSession)?,
        };

        let task = TaskId::analysis(session_id.as_str());
        if self.analyses.is_pending(task.as_str()) {
            return Err(ShellError::AnalysisRunning(session_id).into());
        }
        self.analyses
            .schedule(task, delay, self.registry.clock().now(), session_id.clone());
        tracing::info!(session_id = %session_id, delay_ms = delay.as_millis() as u64, "analysis started");

        match self.format {
            OutputFormat::Json => write_json(
                out,
                &json!({ "analyzing": session_id, "delay_ms": delay.as_millis() as u64 }),
            ),
            OutputFormat::Text => {
                writeln!(out, "Analyzing {} ({} ms)", session_id, delay.as_millis())?;
                Ok(())
            }
        }
    }

    /// Report every analysis whose deadline has passed.
    fn poll(&mut self, out: &mut impl Write) -> Result<()> {
        let now = self.registry.clock().now();
        for (_, session_id) in self.analyses.fire_due(now) {
            tracing::info!(session_id = %session_id, "analysis complete");
            match self.format {
                OutputFormat::Json => write_json(
                    out,
                    &json!({ "event": "analysis_complete", "id": session_id }),
                )?,
                OutputFormat::Text => writeln!(out, "Analysis complete: {}", session_id)?,
            }
        }
        Ok(())
    }

    /// Block until no analysis is pending.
    fn wait(&mut self, out: &mut impl Write) -> Result<()> {
        if self.analyses.is_empty() && self.format == OutputFormat::Text {
            writeln!(out, "No running analyses")?;
        }
        while let Some(deadline) = self.analyses.next_deadline() {
            let now = self.registry.clock().now();
            if deadline > now {
                (self.sleep)(deadline - now);
            }
            self.poll(out)?;
        }
        Ok(())
    }
}

pub fn handle<C: Clock, G: IdGen>(
    args: ShellArgs,
    registry: SessionRegistry<C, G>,
    format: OutputFormat,
) -> Result<()> {
    let mut shell = Shell::new(registry, format).with_color(color::should_colorize());
    let mut out = std::io::stdout().lock();
    let mut err = std::io::stderr().lock();

    let failures = match args.script {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            shell.run(BufReader::new(file), &mut out, &mut err)?
        }
        None => shell.run(std::io::stdin().lock(), &mut out, &mut err)?,
    };

    if failures > 0 {
        // Each failure was already printed as it happened.
        return Err(ExitError::new(1, "").into());
    }
    Ok(())
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
