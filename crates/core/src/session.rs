// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session record and lifecycle status.
//!
//! A session is one isolated game-analysis run shown on the dashboard. Only
//! `status` ever changes after creation; everything else is fixed when the
//! record is built.

use serde::{Deserialize, Serialize};
use std::fmt;

crate::define_id! {
    /// Unique identifier for a session, stable for the life of the record.
    pub struct SessionId;
}

/// Status of a session in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Session is running
    #[default]
    Active,
    /// Session is paused by the user
    Paused,
    /// Session has stopped. No registry operation produces this status;
    /// it only enters a registry through [`crate::SessionRegistry::insert`].
    Stopped,
}

impl SessionStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        }
    }

    /// Translated label shown on the dashboard's session cards.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "進行中",
            Self::Paused => "暫停",
            Self::Stopped => "已停止",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One game-analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub name: String,
    pub status: SessionStatus,
    /// Informational player count
    pub players: u32,
    /// Epoch milliseconds at creation
    pub started_at_ms: u64,
    #[serde(default)]
    pub game_url: Option<String>,
}

impl Session {
    /// Build a fresh `active` session with no players.
    pub fn new(id: SessionId, name: impl Into<String>, started_at_ms: u64) -> Self {
        Self {
            id,
            name: name.into(),
            status: SessionStatus::Active,
            players: 0,
            started_at_ms,
            game_url: None,
        }
    }

    pub fn with_status(mut self, status: SessionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_players(mut self, players: u32) -> Self {
        self.players = players;
        self
    }

    pub fn with_game_url(mut self, game_url: Option<String>) -> Self {
        self.game_url = game_url;
        self
    }

    /// Milliseconds since the session started, clamped at zero.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_at_ms)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
