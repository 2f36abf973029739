// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry configuration.
//!
//! A TOML file may name a default game URL, seed sessions, and pick which
//! seed starts active:
//!
//! ```toml
//! game_url = "https://h5.stg.g123.jp/game/example"
//! active = "slime"
//!
//! [[sessions]]
//! id = "slime"
//! name = "Game Analysis"
//! status = "active"
//! players = 2
//! started_secs_ago = 300
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::clock::Clock;
use crate::error::ConfigError;
use crate::id::IdGen;
use crate::registry::SessionRegistry;
use crate::session::{Session, SessionId, SessionStatus};

/// Top-level registry configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Game URL stamped on newly created sessions
    #[serde(default)]
    pub game_url: Option<String>,
    /// Id of the seed to make active (defaults to the first seed)
    #[serde(default)]
    pub active: Option<String>,
    #[serde(default)]
    pub sessions: Vec<SessionSeed>,
}

/// A session present when the registry starts
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSeed {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: SessionStatus,
    #[serde(default)]
    pub players: u32,
    /// How long before startup the session began
    #[serde(default)]
    pub started_secs_ago: u64,
    #[serde(default)]
    pub game_url: Option<String>,
}

impl RegistryConfig {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            path = %path.display(),
            seeds = config.sessions.len(),
            "registry config loaded"
        );
        Ok(config)
    }
}

impl SessionSeed {
    fn to_session(&self, now_ms: u64) -> Session {
        let started_at_ms = now_ms.saturating_sub(self.started_secs_ago.saturating_mul(1000));
        Session::new(SessionId::new(self.id.trim()), self.name.trim(), started_at_ms)
            .with_status(self.status)
            .with_players(self.players)
            .with_game_url(self.game_url.clone())
    }
}

impl<C: Clock, G: IdGen> SessionRegistry<C, G> {
    /// Build a registry seeded from `config`. Seeds keep file order.
    ///
    /// A seed the registry rejects, or an `active` id naming no seed, is
    /// reported as [`ConfigError::Registry`].
    pub fn from_config(config: &RegistryConfig, clock: C, id_gen: G) -> Result<Self, ConfigError> {
        let now_ms = clock.epoch_ms();
        let mut registry =
            Self::with_parts(clock, id_gen).with_default_game_url(config.game_url.clone());

        for seed in &config.sessions {
            registry.insert(seed.to_session(now_ms))?;
        }
        if let Some(active) = &config.active {
            registry.set_active(active)?;
        }

        tracing::info!(
            sessions = registry.len(),
            active = ?registry.active_id().map(SessionId::as_str),
            "registry seeded"
        );
        Ok(registry)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
