// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time sources.
//!
//! Session start times are wall-clock epoch milliseconds; scheduler deadlines
//! are monotonic [`Instant`]s. Both come from one [`Clock`] so tests can drive
//! them together with [`FakeClock`].

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Source of the current time.
pub trait Clock {
    /// Monotonic now, for deadlines.
    fn now(&self) -> Instant;

    /// Wall-clock now as milliseconds since the Unix epoch.
    fn epoch_ms(&self) -> u64;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn epoch_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

#[derive(Debug)]
struct FakeTime {
    instant: Instant,
    epoch_ms: u64,
}

/// Manually advanced clock for tests. Clones share the same time.
#[derive(Debug, Clone)]
pub struct FakeClock {
    inner: Arc<Mutex<FakeTime>>,
}

/// Epoch milliseconds a fresh [`FakeClock`] starts at (2026-01-01T00:00:00Z).
pub const FAKE_EPOCH_START_MS: u64 = 1_767_225_600_000;

impl FakeClock {
    pub fn new() -> Self {
        Self::at_epoch_ms(FAKE_EPOCH_START_MS)
    }

    pub fn at_epoch_ms(epoch_ms: u64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeTime {
                instant: Instant::now(),
                epoch_ms,
            })),
        }
    }

    /// Move both the monotonic and the wall-clock time forward.
    pub fn advance(&self, by: Duration) {
        let mut time = self.inner.lock();
        time.instant += by;
        time.epoch_ms += by.as_millis() as u64;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.inner.lock().instant
    }

    fn epoch_ms(&self) -> u64 {
        self.inner.lock().epoch_ms
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
