// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! The individual integrity checks.
//!
//! Every check is a free function over the capabilities it needs and always
//! produces a [`Verdict`]. Capability failures become negative sub-results.

use serde::{Deserialize, Serialize};

use crate::error::CapabilityError;

pub mod debug;
pub mod emulator;
pub mod instrumentation;
pub mod lock_screen;
pub mod root;

/// Outcome of one check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub value: bool,
    /// Sub-checks that fired, in evaluation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signals: Vec<String>,
    /// Why a capability could not answer, when it could not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl Verdict {
    pub fn new(value: bool) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    /// Positive exactly when at least one signal fired.
    pub fn from_signals(signals: Vec<String>) -> Self {
        Self {
            value: !signals.is_empty(),
            signals,
            diagnostic: None,
        }
    }

    /// Negative verdict standing in for a capability that failed.
    pub fn degraded(error: &CapabilityError) -> Self {
        Self {
            value: false,
            signals: Vec::new(),
            diagnostic: Some(error.to_string()),
        }
    }
}
