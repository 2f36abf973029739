// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the session registry and its configuration

use crate::SessionId;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by registry operations. A failed operation never changes state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("invalid session: {0}")]
    Validation(String),
    #[error("session not found: {0}")]
    NotFound(SessionId),
}

/// Errors while loading a registry configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Registry(#[from] RegistryError),
}
