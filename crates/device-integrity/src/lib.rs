// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Device Integrity Detector
//!
//! Heuristic checks for rooted devices, emulators, debuggable builds and the
//! presence of a secure lock screen. Each check is a set of independent
//! sub-checks combined by logical OR.
//!
//! The checks only see the device through the traits in [`platform`], so the
//! same logic runs on Android (through the JNI bridge), on a plain Linux host
//! via [`OsPlatform`], and against fakes in tests.

pub mod checks;
pub mod config;
pub mod detector;
pub mod error;
pub mod platform;
pub mod signatures;

pub use checks::Verdict;
pub use config::DetectorConfig;
pub use detector::{DeviceIntegrityDetector, IntegrityReport};
pub use error::{CapabilityError, ConfigError};
pub use platform::{
    Environment, FileSystem, LockScreenService, OsPlatform, PackageInspector, Platform,
    ProcessRunner, PropertySource,
};
