// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry construction from the resolved config file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use h5_core::{RegistryConfig, SessionRegistry, SystemClock, UuidIdGen};

/// The registry the binary drives.
pub type AppRegistry = SessionRegistry<SystemClock, UuidIdGen>;

/// Where the config came from, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Flag(PathBuf),
    Env(PathBuf),
    Default(PathBuf),
}

impl ConfigSource {
    pub fn path(&self) -> &Path {
        match self {
            Self::Flag(p) | Self::Env(p) | Self::Default(p) => p,
        }
    }
}

/// Resolve the config file: `--config` > `H5_CONFIG` > default location if it exists.
pub fn resolve_config(
    flag: Option<&Path>,
    env: Option<PathBuf>,
    default: Option<PathBuf>,
) -> Option<ConfigSource> {
    if let Some(path) = flag {
        return Some(ConfigSource::Flag(path.to_path_buf()));
    }
    if let Some(path) = env {
        return Some(ConfigSource::Env(path));
    }
    default
        .filter(|path| path.is_file())
        .map(ConfigSource::Default)
}

/// Build the registry, seeded from the resolved config if there is one.
pub fn load_registry(flag: Option<&Path>) -> Result<AppRegistry> {
    let source = resolve_config(
        flag,
        crate::env::config_path(),
        crate::env::default_config_path(),
    );

    let Some(source) = source else {
        tracing::debug!("no config file, starting with an empty registry");
        return Ok(SessionRegistry::new());
    };

    tracing::debug!(source = ?source, "loading config");
    let config = RegistryConfig::load(source.path())?;
    let registry = SessionRegistry::from_config(&config, SystemClock, UuidIdGen)
        .with_context(|| format!("invalid sessions in {}", source.path().display()))?;
    Ok(registry)
}

#[cfg(test)]
#[path = "setup_tests.rs"]
mod tests;
