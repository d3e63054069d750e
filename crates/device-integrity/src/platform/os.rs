// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;

use super::{
    process, Environment, FileSystem, LockScreenService, PackageInspector, ProcessRunner,
    PropertySource,
};
use crate::error::CapabilityError;

/// Property files consulted when the property service has no answer.
const BUILD_PROP_FILES: &[&str] = &["/system/build.prop", "/vendor/build.prop", "/default.prop"];

/// Capabilities backed directly by the running OS.
///
/// Package metadata and the lock screen need an application context and are
/// reported as unsupported here; the JNI bridge supplies them on Android.
#[derive(Debug, Clone)]
pub struct OsPlatform {
    property_files: Vec<PathBuf>,
}

impl Default for OsPlatform {
    fn default() -> Self {
        Self::with_property_files(BUILD_PROP_FILES.iter().copied())
    }
}

impl OsPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read fallback properties from `files` instead of the system build.prop set.
    pub fn with_property_files<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            property_files: files.into_iter().map(Into::into).collect(),
        }
    }
}

impl FileSystem for OsPlatform {
    fn exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }

    fn read_to_string(&self, path: &str) -> Result<String, CapabilityError> {
        fs::read_to_string(path).map_err(|source| CapabilityError::io(path, source))
    }
}

impl PropertySource for OsPlatform {
    fn property(&self, name: &str) -> Option<String> {
        #[cfg(target_os = "android")]
        if let Some(value) = system_property(name) {
            return Some(value);
        }

        self.property_files
            .iter()
            .find_map(|file| property_from_file(file, name))
    }
}

impl Environment for OsPlatform {
    fn var(&self, name: &str) -> Option<String> {
        env::var_os(name).map(|value| value.to_string_lossy().into_owned())
    }
}

impl ProcessRunner for OsPlatform {
    fn first_line(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Option<String>, CapabilityError> {
        process::run_first_line(program, args, timeout)
    }
}

impl PackageInspector for OsPlatform {
    fn is_debuggable(&self) -> Result<bool, CapabilityError> {
        Err(CapabilityError::Unsupported("package metadata"))
    }
}

impl LockScreenService for OsPlatform {
    fn is_device_secure(&self) -> Result<bool, CapabilityError> {
        Err(CapabilityError::Unsupported("lock screen service"))
    }
}

fn property_from_file(file: &Path, name: &str) -> Option<String> {
    match fs::read_to_string(file) {
        Ok(content) => parse_property(&content, name),
        Err(e) => {
            debug!("property file {} unreadable: {}", file.display(), e);
            None
        }
    }
}

/// Find `name` in build.prop style `key=value` content. First definition wins.
fn parse_property(content: &str, name: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().to_string())
}

#[cfg(target_os = "android")]
fn system_property(name: &str) -> Option<String> {
    use std::ffi::{CStr, CString};

    // bionic's PROP_VALUE_MAX, terminator included
    const PROP_VALUE_MAX: usize = 92;

    let name = CString::new(name).ok()?;
    let mut value = [0 as libc::c_char; PROP_VALUE_MAX];
    // SAFETY: `name` is NUL-terminated and `value` holds PROP_VALUE_MAX bytes.
    let len = unsafe { libc::__system_property_get(name.as_ptr(), value.as_mut_ptr()) };
    if len <= 0 {
        return None;
    }
    // SAFETY: bionic always NUL-terminates the value it wrote.
    let value = unsafe { CStr::from_ptr(value.as_ptr()) };
    Some(value.to_string_lossy().into_owned())
}
