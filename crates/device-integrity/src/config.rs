// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Runtime knobs for the detector.
//!
//! Only the operational side is configurable. The signature lists in
//! [`crate::signatures`] are fixed so that detection stays identical across
//! hosts.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_WHICH_PROGRAM: &str = "/system/xbin/which";
pub const DEFAULT_WHICH_TIMEOUT_MS: u64 = 2_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectorConfig {
    /// Locate helper used to look for an `su` binary on `PATH`.
    pub which_program: String,
    /// Upper bound on how long the locate helper may take to print a line.
    pub which_timeout_ms: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            which_program: DEFAULT_WHICH_PROGRAM.to_string(),
            which_timeout_ms: DEFAULT_WHICH_TIMEOUT_MS,
        }
    }
}

impl DetectorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn which_timeout(&self) -> Duration {
        Duration::from_millis(self.which_timeout_ms)
    }
}
