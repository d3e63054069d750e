// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::io;
use std::time::Duration;

use device_integrity::signatures::OTA_CERTS_PATH;
use device_integrity::{
    CapabilityError, Environment, FileSystem, LockScreenService, PackageInspector, ProcessRunner,
    PropertySource,
};

/// What the locate helper does when asked for `su`.
#[derive(Debug, Clone)]
pub enum Which {
    Found(String),
    Silent,
    SpawnFails,
    Hangs,
}

/// In-memory device. Starts out as a stock release device with a PIN set.
#[derive(Debug)]
pub struct FakeDevice {
    files: HashSet<String>,
    contents: HashMap<String, String>,
    properties: HashMap<String, Vec<String>>,
    property_reads: RefCell<HashMap<String, usize>>,
    env: HashMap<String, String>,
    which: Which,
    which_calls: Cell<usize>,
    debuggable: Result<bool, String>,
    lock_secure: Result<bool, String>,
}

impl FakeDevice {
    pub fn stock() -> Self {
        Self {
            files: HashSet::from([OTA_CERTS_PATH.to_string()]),
            contents: HashMap::new(),
            properties: HashMap::new(),
            property_reads: RefCell::new(HashMap::new()),
            env: HashMap::new(),
            which: Which::Silent,
            which_calls: Cell::new(0),
            debuggable: Ok(false),
            lock_secure: Ok(true),
        }
        .with_property("ro.build.tags", "release-keys")
    }

    pub fn with_file(mut self, path: &str) -> Self {
        self.files.insert(path.to_string());
        self
    }

    pub fn without_file(mut self, path: &str) -> Self {
        self.files.remove(path);
        self
    }

    pub fn with_content(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string());
        self.contents.insert(path.to_string(), content.to_string());
        self
    }

    pub fn with_property(self, name: &str, value: &str) -> Self {
        self.with_property_reads(name, &[value])
    }

    /// Successive reads of `name` return `values` in order, then the last one.
    pub fn with_property_reads(mut self, name: &str, values: &[&str]) -> Self {
        self.properties.insert(
            name.to_string(),
            values.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    pub fn with_env(mut self, name: &str, value: &str) -> Self {
        self.env.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_which(mut self, which: Which) -> Self {
        self.which = which;
        self
    }

    pub fn with_debuggable(mut self, debuggable: Result<bool, &str>) -> Self {
        self.debuggable = debuggable.map_err(str::to_string);
        self
    }

    pub fn with_lock_screen(mut self, secure: Result<bool, &str>) -> Self {
        self.lock_secure = secure.map_err(str::to_string);
        self
    }

    pub fn which_calls(&self) -> usize {
        self.which_calls.get()
    }
}

impl FileSystem for FakeDevice {
    fn exists(&self, path: &str) -> bool {
        self.files.contains(path)
    }

    fn read_to_string(&self, path: &str) -> Result<String, CapabilityError> {
        self.contents.get(path).cloned().ok_or_else(|| {
            CapabilityError::io(path, io::Error::new(io::ErrorKind::NotFound, "no such file"))
        })
    }
}

impl PropertySource for FakeDevice {
    fn property(&self, name: &str) -> Option<String> {
        let values = self.properties.get(name)?;
        let mut reads = self.property_reads.borrow_mut();
        let read = reads.entry(name.to_string()).or_insert(0);
        let value = values.get(*read).or_else(|| values.last()).cloned();
        *read += 1;
        value
    }
}

impl Environment for FakeDevice {
    fn var(&self, name: &str) -> Option<String> {
        self.env.get(name).cloned()
    }
}

impl ProcessRunner for FakeDevice {
    fn first_line(
        &self,
        program: &str,
        _args: &[&str],
        timeout: Duration,
    ) -> Result<Option<String>, CapabilityError> {
        self.which_calls.set(self.which_calls.get() + 1);
        match &self.which {
            Which::Found(line) => Ok(Some(line.clone())),
            Which::Silent => Ok(None),
            Which::SpawnFails => Err(CapabilityError::Spawn {
                program: program.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "not found"),
            }),
            Which::Hangs => Err(CapabilityError::Timeout {
                program: program.to_string(),
                timeout,
            }),
        }
    }
}

impl PackageInspector for FakeDevice {
    fn is_debuggable(&self) -> Result<bool, CapabilityError> {
        self.debuggable.clone().map_err(CapabilityError::Service)
    }
}

impl LockScreenService for FakeDevice {
    fn is_device_secure(&self) -> Result<bool, CapabilityError> {
        self.lock_secure.clone().map_err(CapabilityError::Service)
    }
}
