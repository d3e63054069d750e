// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Debug build and debugger detection.

use log::{debug, warn};

use super::Verdict;
use crate::platform::{FileSystem, PackageInspector};
use crate::signatures::PROC_SELF_STATUS;

/// Whether the host package carries the debuggable flag.
pub fn evaluate<P: PackageInspector + ?Sized>(package: &P) -> Verdict {
    match package.is_debuggable() {
        Ok(true) => Verdict::from_signals(vec!["Package is flagged debuggable".to_string()]),
        Ok(false) => Verdict::new(false),
        Err(e) => {
            warn!("package metadata unavailable: {}", e);
            Verdict::degraded(&e)
        }
    }
}

/// Whether another process is tracing this one.
/// A non-zero TracerPid indicates a debugger is attached
pub fn debugger_attached<F: FileSystem + ?Sized>(fs: &F) -> Verdict {
    match fs.read_to_string(PROC_SELF_STATUS) {
        Ok(status) => match tracer_pid(&status) {
            Some(pid) if pid != 0 => {
                Verdict::from_signals(vec![format!("TracerPid detected: {}", pid)])
            }
            _ => Verdict::new(false),
        },
        Err(e) => {
            debug!("tracer check skipped: {}", e);
            Verdict::degraded(&e)
        }
    }
}

/// `TracerPid:` field of a `/proc/<pid>/status` document.
pub fn tracer_pid(status: &str) -> Option<u32> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("TracerPid:"))
        .and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CapabilityError;
    use crate::platform::{MockFileSystem, MockPackageInspector};

    const STATUS: &str = "Name:\tapp_process64\nState:\tS (sleeping)\nTracerPid:\t4242\nUid:\t10123\n";

    #[test]
    fn debuggable_package_fires() {
        let mut package = MockPackageInspector::new();
        package.expect_is_debuggable().returning(|| Ok(true));
        assert!(evaluate(&package).value);
    }

    #[test]
    fn release_package_is_clean() {
        let mut package = MockPackageInspector::new();
        package.expect_is_debuggable().returning(|| Ok(false));
        assert_eq!(evaluate(&package), Verdict::new(false));
    }

    #[test]
    fn metadata_failure_degrades_with_reason() {
        let mut package = MockPackageInspector::new();
        package
            .expect_is_debuggable()
            .returning(|| Err(CapabilityError::Service("NameNotFoundException".to_string())));

        let verdict = evaluate(&package);
        assert!(!verdict.value);
        assert!(verdict.diagnostic.unwrap().contains("NameNotFoundException"));
    }

    #[test]
    fn parses_tracer_pid() {
        assert_eq!(tracer_pid(STATUS), Some(4242));
        assert_eq!(tracer_pid("TracerPid:\t0\n"), Some(0));
        assert_eq!(tracer_pid("TracerPid:\tnone\n"), None);
        assert_eq!(tracer_pid("Name:\tinit\n"), None);
    }

    #[test]
    fn traced_process_is_reported() {
        let mut fs = MockFileSystem::new();
        fs.expect_read_to_string()
            .withf(|path| path == "/proc/self/status")
            .returning(|_| Ok(STATUS.to_string()));

        let verdict = debugger_attached(&fs);
        assert_eq!(verdict.signals, vec!["TracerPid detected: 4242"]);
    }

    #[test]
    fn untraced_process_is_clean() {
        let mut fs = MockFileSystem::new();
        fs.expect_read_to_string()
            .returning(|_| Ok("TracerPid:\t0\n".to_string()));
        assert!(!debugger_attached(&fs).value);
    }
}
