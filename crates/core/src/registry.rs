// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory session registry.
//!
//! Holds every live [`Session`] in insertion order together with the id of
//! the active session. Invariants kept by every operation:
//!
//! - the active id references a live session, and is unset only when the
//!   registry is empty
//! - no two live sessions share an id
//! - a failed operation leaves the registry untouched

use indexmap::IndexMap;
use serde::Serialize;

use crate::clock::{Clock, SystemClock};
use crate::error::RegistryError;
use crate::id::{IdGen, ShortId, UuidIdGen};
use crate::session::{Session, SessionId, SessionStatus};

/// Suffix appended to the name of a duplicated session.
pub const COPY_SUFFIX: &str = " (copy)";

const ID_PREFIX: &str = "session-";
const ID_TOKEN_LEN: usize = 8;

/// Session counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistrySummary {
    pub total: usize,
    pub active: usize,
    pub paused: usize,
    pub stopped: usize,
}

/// Owns the sessions and the active-session pointer.
#[derive(Debug)]
pub struct SessionRegistry<C = SystemClock, G = UuidIdGen> {
    sessions: IndexMap<SessionId, Session>,
    active: Option<SessionId>,
    default_game_url: Option<String>,
    clock: C,
    id_gen: G,
}

impl SessionRegistry {
    /// Empty registry on the system clock with UUID-based ids.
    pub fn new() -> Self {
        Self::with_parts(SystemClock, UuidIdGen)
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, G: IdGen> SessionRegistry<C, G> {
    pub fn with_parts(clock: C, id_gen: G) -> Self {
        Self {
            sessions: IndexMap::new(),
            active: None,
            default_game_url: None,
            clock,
            id_gen,
        }
    }

    /// Game URL stamped on sessions made by [`Self::create`].
    pub fn with_default_game_url(mut self, game_url: Option<String>) -> Self {
        self.default_game_url = game_url;
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Create a session named `name` (trimmed) and make it active.
    pub fn create(&mut self, name: &str) -> Result<Session, RegistryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegistryError::Validation(
                "session name must not be empty".to_string(),
            ));
        }

        let session = Session::new(self.fresh_id(), name, self.clock.epoch_ms())
            .with_game_url(self.default_game_url.clone());
        self.sessions.insert(session.id.clone(), session.clone());
        self.active = Some(session.id.clone());

        tracing::info!(session_id = %session.id, name = %session.name, "session created");
        Ok(session)
    }

    /// Remove a session. If it was active, the first remaining session in
    /// insertion order becomes active.
    pub fn delete(&mut self, id: &str) -> Result<(), RegistryError> {
        let removed = self.sessions.shift_remove(id).ok_or_else(|| not_found(id))?;

        if self.active.as_ref() == Some(&removed.id) {
            self.active = self.sessions.keys().next().cloned();
            tracing::info!(
                session_id = %removed.id,
                active = ?self.active.as_ref().map(SessionId::as_str),
                "active session deleted, reassigned"
            );
        } else {
            tracing::info!(session_id = %removed.id, "session deleted");
        }
        Ok(())
    }

    /// Pause or resume a session. A stopped session is returned unchanged.
    pub fn set_paused(&mut self, id: &str, paused: bool) -> Result<Session, RegistryError> {
        let session = self.sessions.get_mut(id).ok_or_else(|| not_found(id))?;

        if session.status == SessionStatus::Stopped {
            tracing::debug!(session_id = %session.id, "stopped session has no pause transition");
            return Ok(session.clone());
        }

        let status = if paused {
            SessionStatus::Paused
        } else {
            SessionStatus::Active
        };
        if session.status != status {
            session.status = status;
            tracing::info!(session_id = %session.id, %status, "session status changed");
        }
        Ok(session.clone())
    }

    /// Copy a session under a fresh id. The source and the active id are unchanged.
    pub fn duplicate(&mut self, id: &str) -> Result<Session, RegistryError> {
        let source = self.sessions.get(id).ok_or_else(|| not_found(id))?;
        let name = format!("{}{}", source.name, COPY_SUFFIX);
        let game_url = source.game_url.clone();

        let copy = Session::new(self.fresh_id(), name, self.clock.epoch_ms()).with_game_url(game_url);
        self.sessions.insert(copy.id.clone(), copy.clone());

        tracing::info!(source = %id, session_id = %copy.id, "session duplicated");
        Ok(copy)
    }

    pub fn set_active(&mut self, id: &str) -> Result<(), RegistryError> {
        let session = self.sessions.get(id).ok_or_else(|| not_found(id))?;
        self.active = Some(session.id.clone());
        tracing::debug!(session_id = %id, "active session selected");
        Ok(())
    }

    /// Insert a pre-built session, e.g. a seed from config.
    ///
    /// Keeps the session's id and status as given. It becomes active only if
    /// no session is active yet.
    pub fn insert(&mut self, session: Session) -> Result<Session, RegistryError> {
        if session.id.as_str().is_empty() {
            return Err(RegistryError::Validation(
                "session id must not be empty".to_string(),
            ));
        }
        if session.id.as_str().contains(char::is_whitespace) {
            return Err(RegistryError::Validation(format!(
                "session id must not contain whitespace: {:?}",
                session.id.as_str()
            )));
        }
        if session.name.trim().is_empty() {
            return Err(RegistryError::Validation(format!(
                "session {} has an empty name",
                session.id
            )));
        }
        if self.sessions.contains_key(session.id.as_str()) {
            return Err(RegistryError::Validation(format!(
                "duplicate session id: {}",
                session.id
            )));
        }

        if self.active.is_none() {
            self.active = Some(session.id.clone());
        }
        self.sessions.insert(session.id.clone(), session.clone());
        tracing::debug!(session_id = %session.id, status = %session.status, "session inserted");
        Ok(session)
    }

    /// Sessions in insertion order.
    pub fn list(&self) -> impl ExactSizeIterator<Item = &Session> + '_ {
        self.sessions.values()
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn active_id(&self) -> Option<&SessionId> {
        self.active.as_ref()
    }

    pub fn active(&self) -> Option<&Session> {
        self.active
            .as_ref()
            .and_then(|id| self.sessions.get(id.as_str()))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn summary(&self) -> RegistrySummary {
        self.sessions
            .values()
            .fold(RegistrySummary::default(), |mut acc, s| {
                acc.total += 1;
                match s.status {
                    SessionStatus::Active => acc.active += 1,
                    SessionStatus::Paused => acc.paused += 1,
                    SessionStatus::Stopped => acc.stopped += 1,
                }
                acc
            })
    }

    /// Next id not held by a live session. Generator collisions get a
    /// numeric suffix.
    fn fresh_id(&self) -> SessionId {
        let token = self.id_gen.next();
        let base = format!("{}{}", ID_PREFIX, token.short(ID_TOKEN_LEN));
        if !self.sessions.contains_key(base.as_str()) {
            return SessionId::new(base);
        }

        let mut n = 2usize;
        loop {
            let candidate = format!("{base}-{n}");
            if !self.sessions.contains_key(candidate.as_str()) {
                tracing::debug!(%base, id = %candidate, "id collision resolved");
                return SessionId::new(candidate);
            }
            n += 1;
        }
    }
}

fn not_found(id: &str) -> RegistryError {
    RegistryError::NotFound(SessionId::new(id))
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
