// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Capabilities the checks need from the device.
//!
//! Each check is written against the narrowest set of these traits so it can
//! be exercised with fakes instead of real OS state.

use std::time::Duration;

use crate::error::CapabilityError;

mod os;
mod process;

pub use os::OsPlatform;
pub use process::run_first_line;

#[cfg_attr(test, mockall::automock)]
pub trait FileSystem {
    fn exists(&self, path: &str) -> bool;

    fn read_to_string(&self, path: &str) -> Result<String, CapabilityError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait PropertySource {
    /// Value of a system property, `None` when it is not set.
    fn property(&self, name: &str) -> Option<String>;
}

#[cfg_attr(test, mockall::automock)]
pub trait Environment {
    /// Value of an environment variable of the current process.
    fn var(&self, name: &str) -> Option<String>;
}

pub trait ProcessRunner {
    /// Run `program` and return the first line it prints on stdout.
    ///
    /// `Ok(None)` means the process closed stdout without printing anything.
    /// The process must not outlive the call.
    fn first_line(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Option<String>, CapabilityError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait PackageInspector {
    /// Whether the host application's package is flagged debuggable.
    fn is_debuggable(&self) -> Result<bool, CapabilityError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait LockScreenService {
    /// Whether a PIN, pattern, password or biometric unlock is configured.
    fn is_device_secure(&self) -> Result<bool, CapabilityError>;
}

/// Everything the detector talks to.
pub trait Platform:
    FileSystem + PropertySource + Environment + ProcessRunner + PackageInspector + LockScreenService
{
}

impl<T> Platform for T where
    T: FileSystem
        + PropertySource
        + Environment
        + ProcessRunner
        + PackageInspector
        + LockScreenService
{
}
