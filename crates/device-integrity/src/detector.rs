// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::checks::{debug as debug_check, emulator, instrumentation, lock_screen, root, Verdict};
use crate::config::DetectorConfig;
use crate::platform::Platform;

/// Every verdict the detector can produce, evaluated in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    pub rooted: Verdict,
    pub emulator: Verdict,
    pub debug_build: Verdict,
    pub debugger_attached: Verdict,
    pub instrumented: Verdict,
    pub secure_lock_screen: Verdict,
}

/// Answers the device-integrity questions against a [`Platform`].
///
/// None of the methods fail: unavailable capabilities count as "not
/// detected" for the sub-check that needed them.
#[derive(Debug)]
pub struct DeviceIntegrityDetector<P> {
    platform: P,
    config: DetectorConfig,
}

impl<P: Platform> DeviceIntegrityDetector<P> {
    pub fn new(platform: P) -> Self {
        Self::with_config(platform, DetectorConfig::default())
    }

    pub fn with_config(platform: P, config: DetectorConfig) -> Self {
        Self { platform, config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn into_platform(self) -> P {
        self.platform
    }

    pub fn is_device_rooted(&self) -> bool {
        self.root_verdict().value
    }

    pub fn is_running_on_emulator(&self) -> bool {
        self.emulator_verdict().value
    }

    pub fn is_debug_build(&self) -> bool {
        self.debug_build_verdict().value
    }

    pub fn is_debugger_attached(&self) -> bool {
        self.debugger_verdict().value
    }

    /// Hook or instrumentation toolkit present. Not part of the root verdict.
    pub fn is_instrumented(&self) -> bool {
        self.instrumentation_verdict().value
    }

    pub fn has_secure_lock_screen(&self) -> bool {
        self.lock_screen_verdict().value
    }

    pub fn root_verdict(&self) -> Verdict {
        logged("root", root::evaluate(&self.platform, &self.config))
    }

    pub fn emulator_verdict(&self) -> Verdict {
        logged("emulator", emulator::evaluate(&self.platform))
    }

    pub fn debug_build_verdict(&self) -> Verdict {
        logged("debug build", debug_check::evaluate(&self.platform))
    }

    pub fn debugger_verdict(&self) -> Verdict {
        logged("debugger", debug_check::debugger_attached(&self.platform))
    }

    pub fn instrumentation_verdict(&self) -> Verdict {
        logged("instrumentation", instrumentation::evaluate(&self.platform))
    }

    pub fn lock_screen_verdict(&self) -> Verdict {
        logged("secure lock screen", lock_screen::evaluate(&self.platform))
    }

    pub fn report(&self) -> IntegrityReport {
        IntegrityReport {
            rooted: self.root_verdict(),
            emulator: self.emulator_verdict(),
            debug_build: self.debug_build_verdict(),
            debugger_attached: self.debugger_verdict(),
            instrumented: self.instrumentation_verdict(),
            secure_lock_screen: self.lock_screen_verdict(),
        }
    }
}

fn logged(check: &str, verdict: Verdict) -> Verdict {
    if verdict.signals.is_empty() {
        debug!("{} check: {}", check, verdict.value);
    } else {
        info!("{} check: {} ({})", check, verdict.value, verdict.signals.join("; "));
    }
    verdict
}
