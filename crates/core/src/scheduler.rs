// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delayed task scheduling.
//!
//! Tasks are polled, not driven: the owner asks for the tasks that are due at
//! a given instant and runs them on its own thread. A task fires at most once
//! and never after it has been cancelled.

use std::collections::HashMap;
use std::time::{Duration, Instant};

crate::define_id! {
    /// Name of a scheduled task, e.g. `analysis:session-1a2b3c4d`.
    pub struct TaskId;
}

impl TaskId {
    /// Task id for the simulated analysis run of a session.
    pub fn analysis(session_id: &str) -> Self {
        Self::new(format!("analysis:{}", session_id))
    }

    /// Returns the session part of a `kind:session` task id.
    pub fn session_id_str(&self) -> Option<&str> {
        self.0.split_once(':').map(|(_, rest)| rest)
    }
}

#[derive(Debug)]
struct Task<T> {
    fires_at: Instant,
    seq: u64,
    payload: T,
}

/// Pending delayed tasks keyed by [`TaskId`].
#[derive(Debug)]
pub struct Scheduler<T> {
    tasks: HashMap<TaskId, Task<T>>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            tasks: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` to fire `delay` after `now`. Replaces a pending task with the same id.
    pub fn schedule(&mut self, id: TaskId, delay: Duration, now: Instant, payload: T) {
        let fires_at = now + delay;
        let seq = self.next_seq;
        self.next_seq += 1;
        if self
            .tasks
            .insert(id.clone(), Task { fires_at, seq, payload })
            .is_some()
        {
            tracing::debug!(task = %id, "pending task replaced");
        }
        tracing::debug!(task = %id, delay_ms = delay.as_millis() as u64, "task scheduled");
    }

    /// Cancel a task, returning its payload if it was still pending.
    pub fn cancel(&mut self, id: &str) -> Option<T> {
        let task = self.tasks.remove(id)?;
        tracing::debug!(task = %id, "task cancelled");
        Some(task.payload)
    }

    /// Cancel every task that belongs to `session_id`. Returns how many were cancelled.
    pub fn cancel_session(&mut self, session_id: &str) -> usize {
        let before = self.tasks.len();
        self.tasks
            .retain(|id, _| id.session_id_str() != Some(session_id));
        let cancelled = before - self.tasks.len();
        if cancelled > 0 {
            tracing::debug!(session_id, cancelled, "session tasks cancelled");
        }
        cancelled
    }

    /// Remove and return every task due at `now`, earliest deadline first.
    /// Tasks with equal deadlines come out in scheduling order.
    pub fn fire_due(&mut self, now: Instant) -> Vec<(TaskId, T)> {
        let due: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.fires_at <= now)
            .map(|(id, _)| id.clone())
            .collect();

        let mut fired: Vec<(TaskId, Task<T>)> = due
            .into_iter()
            .filter_map(|id| self.tasks.remove(id.as_str()).map(|task| (id, task)))
            .collect();
        fired.sort_by_key(|(_, task)| (task.fires_at, task.seq));

        fired
            .into_iter()
            .map(|(id, task)| (id, task.payload))
            .collect()
    }

    /// Get the next task deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.values().map(|t| t.fires_at).min()
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
