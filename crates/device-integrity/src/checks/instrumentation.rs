// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Hook and instrumentation toolkit detection (Frida, Substrate, Xposed).

use log::debug;

use super::Verdict;
use crate::platform::{Environment, FileSystem};
use crate::signatures::{
    FRIDA_PATHS, INSTRUMENTATION_ENV_VARS, INSTRUMENTATION_LIBRARY_MARKERS, PROC_SELF_MAPS,
};

/// Instrumented if any of: an injection library mapped into this process,
/// a Frida launcher variable in the environment, or a Frida server on disk.
pub fn evaluate<P>(platform: &P) -> Verdict
where
    P: FileSystem + Environment + ?Sized,
{
    let mut signals = Vec::new();

    signals.extend(check_mapped_libraries(platform));
    signals.extend(check_environment(platform));
    signals.extend(check_frida_paths(platform));

    Verdict::from_signals(signals)
}

/// Markers found in a `/proc/<pid>/maps` document, each reported once with
/// the first path it appeared in.
pub fn mapped_markers(maps: &str) -> Vec<(&'static str, String)> {
    let mut found: Vec<(&'static str, String)> = Vec::new();

    for line in maps.lines() {
        // pathname is the sixth column; anonymous mappings have none
        let Some(path) = line.split_whitespace().nth(5) else {
            continue;
        };
        let path_lower = path.to_lowercase();
        for marker in INSTRUMENTATION_LIBRARY_MARKERS {
            if path_lower.contains(marker) && !found.iter().any(|(seen, _)| seen == marker) {
                found.push((*marker, path.to_string()));
            }
        }
    }

    found
}

fn check_mapped_libraries<F: FileSystem + ?Sized>(fs: &F) -> Vec<String> {
    match fs.read_to_string(PROC_SELF_MAPS) {
        Ok(maps) => mapped_markers(&maps)
            .into_iter()
            .map(|(marker, path)| format!("Injected library '{}' mapped: {}", marker, path))
            .collect(),
        Err(e) => {
            debug!("memory map check skipped: {}", e);
            Vec::new()
        }
    }
}

fn check_environment<E: Environment + ?Sized>(env: &E) -> Vec<String> {
    INSTRUMENTATION_ENV_VARS
        .iter()
        .filter(|name| env.var(name).is_some())
        .map(|name| format!("Frida environment variable set: {}", name))
        .collect()
}

fn check_frida_paths<F: FileSystem + ?Sized>(fs: &F) -> Vec<String> {
    FRIDA_PATHS
        .iter()
        .filter(|path| fs.exists(path))
        .map(|path| format!("Frida server detected: {}", path))
        .collect()
}
