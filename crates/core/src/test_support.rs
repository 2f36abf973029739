// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

#![allow(clippy::panic)]

use crate::clock::FakeClock;
use crate::id::SequentialIdGen;
use crate::registry::SessionRegistry;
use crate::session::{Session, SessionId, SessionStatus};

/// Registry type used in tests: fake time and predictable ids (`session-t-1`, ...).
pub type TestRegistry = SessionRegistry<FakeClock, SequentialIdGen>;

pub fn test_registry() -> TestRegistry {
    SessionRegistry::with_parts(FakeClock::new(), SequentialIdGen::new("t"))
}

/// Build a session that started `secs_ago` before `clock`'s current time.
pub fn session_started_ago(
    clock: &FakeClock,
    id: &str,
    name: &str,
    status: SessionStatus,
    secs_ago: u64,
) -> Session {
    use crate::clock::Clock;
    Session::new(
        SessionId::new(id),
        name,
        clock.epoch_ms().saturating_sub(secs_ago * 1000),
    )
    .with_status(status)
}

/// The three sessions the dashboard starts with.
pub fn dashboard_registry() -> TestRegistry {
    let mut registry = test_registry();
    let clock = registry.clock().clone();
    let seeds = [
        ("slime", "遊戲分析", SessionStatus::Active, 2, 300),
        ("resource", "資源分析", SessionStatus::Active, 1, 600),
        ("kumo", "蜘蛛測試", SessionStatus::Paused, 3, 180),
    ];
    for (id, name, status, players, secs_ago) in seeds {
        let session = session_started_ago(&clock, id, name, status, secs_ago).with_players(players);
        if let Err(e) = registry.insert(session) {
            panic!("seed {id} rejected: {e}");
        }
    }
    registry
}
