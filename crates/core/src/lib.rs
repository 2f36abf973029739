// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! h5-core: session registry for the H5 Helper game-session dashboard

pub mod clock;
pub mod config;
pub mod error;
pub mod id;
pub mod registry;
pub mod scheduler;
pub mod session;
pub mod time_fmt;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{RegistryConfig, SessionSeed};
pub use error::{ConfigError, RegistryError};
pub use id::{IdGen, SequentialIdGen, ShortId, UuidIdGen};
pub use registry::{RegistrySummary, SessionRegistry, COPY_SUFFIX};
pub use scheduler::{Scheduler, TaskId};
pub use session::{Session, SessionId, SessionStatus};
pub use time_fmt::{format_clock, format_clock_ms};
