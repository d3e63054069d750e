// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Emulator detection.

use log::debug;

use super::Verdict;
use crate::platform::{FileSystem, PropertySource};
use crate::signatures::{
    EMULATOR_FILES, EMULATOR_PROPERTIES, KERNEL_DRIVER_INFO_PATH, KERNEL_DRIVER_MARKERS,
    QUORUM_PROPERTIES, QUORUM_THRESHOLD,
};

/// Emulator if any of: a conclusive property, a QEMU file, a QEMU kernel
/// driver, or the generic-image property quorum.
pub fn evaluate<P>(platform: &P) -> Verdict
where
    P: FileSystem + PropertySource + ?Sized,
{
    let mut signals = Vec::new();

    signals.extend(check_properties(platform));
    signals.extend(check_emulator_files(platform));
    signals.extend(check_kernel_driver(platform));
    signals.extend(check_property_quorum(platform));

    Verdict::from_signals(signals)
}

/// Number of exact matches among the quorum properties.
pub fn quorum_matches<P: PropertySource + ?Sized>(props: &P) -> usize {
    QUORUM_PROPERTIES
        .iter()
        .filter(|(name, expected)| props.property(name).as_deref() == Some(*expected))
        .count()
}

fn check_properties<P: PropertySource + ?Sized>(props: &P) -> Vec<String> {
    EMULATOR_PROPERTIES
        .iter()
        .filter(|(name, expected)| props.property(name).as_deref() == Some(*expected))
        .map(|(name, expected)| format!("Emulator property: {}={}", name, expected))
        .collect()
}

fn check_emulator_files<F: FileSystem + ?Sized>(fs: &F) -> Vec<String> {
    EMULATOR_FILES
        .iter()
        .filter(|path| fs.exists(path))
        .map(|path| format!("Emulator file detected: {}", path))
        .collect()
}

fn check_kernel_driver<F: FileSystem + ?Sized>(fs: &F) -> Option<String> {
    let content = match fs.read_to_string(KERNEL_DRIVER_INFO_PATH) {
        Ok(content) => content,
        Err(e) => {
            debug!("kernel driver check skipped: {}", e);
            return None;
        }
    };

    let first_line = content.lines().next()?;
    KERNEL_DRIVER_MARKERS
        .iter()
        .find(|marker| first_line.contains(*marker))
        .map(|marker| format!("Kernel driver marker '{}' in {}", marker, KERNEL_DRIVER_INFO_PATH))
}

fn check_property_quorum<P: PropertySource + ?Sized>(props: &P) -> Option<String> {
    let matches = quorum_matches(props);
    if matches >= QUORUM_THRESHOLD {
        Some(format!(
            "Generic image properties matched ({}/{})",
            matches,
            QUORUM_PROPERTIES.len()
        ))
    } else {
        None
    }
}
