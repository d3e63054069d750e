// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failure of a single capability call.
///
/// Checks never hand these to their caller: every variant is folded into a
/// negative result, and the message survives only as a diagnostic.
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} produced no line within {timeout:?}")]
    Timeout { program: String, timeout: Duration },

    #[error("platform service failure: {0}")]
    Service(String),

    #[error("{0} is not available on this platform")]
    Unsupported(&'static str),
}

impl CapabilityError {
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        CapabilityError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while loading a [`DetectorConfig`](crate::DetectorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
