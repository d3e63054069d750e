// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Root detection.

use log::debug;

use super::Verdict;
use crate::config::DetectorConfig;
use crate::platform::{FileSystem, ProcessRunner, PropertySource};
use crate::signatures::{
    BUILD_TAGS_PROPERTY, OTA_CERTS_PATH, ROOT_PATHS, SUSPICIOUS_BUILD_TAGS, SU_BINARY,
};

/// Rooted if any of: suspicious build tag, root binary on disk, `su` found by
/// the locate helper, or missing OTA certificates.
pub fn evaluate<P>(platform: &P, config: &DetectorConfig) -> Verdict
where
    P: FileSystem + PropertySource + ProcessRunner + ?Sized,
{
    let mut signals = Vec::new();

    signals.extend(check_build_tags(platform));
    signals.extend(check_root_paths(platform));
    signals.extend(check_su_on_path(platform, config));
    signals.extend(check_ota_certs(platform));

    Verdict::from_signals(signals)
}

/// First marker contained in `tags`. Case-sensitive.
pub fn suspicious_tag(tags: &str) -> Option<&'static str> {
    SUSPICIOUS_BUILD_TAGS
        .iter()
        .copied()
        .find(|marker| tags.contains(marker))
}

fn check_build_tags<P: PropertySource + ?Sized>(props: &P) -> Option<String> {
    let tags = props.property(BUILD_TAGS_PROPERTY)?;
    suspicious_tag(&tags).map(|marker| format!("Build tags contain '{}'", marker))
}

fn check_root_paths<F: FileSystem + ?Sized>(fs: &F) -> Vec<String> {
    ROOT_PATHS
        .iter()
        .filter(|path| fs.exists(path))
        .map(|path| format!("Root binary found: {}", path))
        .collect()
}

fn check_su_on_path<R: ProcessRunner + ?Sized>(
    runner: &R,
    config: &DetectorConfig,
) -> Option<String> {
    match runner.first_line(&config.which_program, &[SU_BINARY], config.which_timeout()) {
        Ok(Some(line)) if !line.trim().is_empty() => {
            Some(format!("su located by {}: {}", config.which_program, line.trim()))
        }
        Ok(_) => None,
        Err(e) => {
            debug!("su lookup treated as not found: {}", e);
            None
        }
    }
}

fn check_ota_certs<F: FileSystem + ?Sized>(fs: &F) -> Option<String> {
    if fs.exists(OTA_CERTS_PATH) {
        None
    } else {
        Some(format!("OTA certificates missing: {}", OTA_CERTS_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CapabilityError;
    use crate::platform::{MockFileSystem, MockPropertySource};
    use rstest::rstest;
    use std::time::Duration;

    struct ScriptedRunner(fn() -> Result<Option<String>, CapabilityError>);

    impl ProcessRunner for ScriptedRunner {
        fn first_line(
            &self,
            program: &str,
            args: &[&str],
            _timeout: Duration,
        ) -> Result<Option<String>, CapabilityError> {
            assert_eq!(program, "/system/xbin/which");
            assert_eq!(args, ["su"]);
            (self.0)()
        }
    }

    #[rstest]
    #[case("test-keys", "test-keys")]
    #[case("dev-keys", "dev-keys")]
    #[case("userdebug", "userdebug")]
    #[case("engineering", "engineering")]
    #[case("release-keys-debug", "release-keys-debug")]
    #[case("custom", "custom")]
    #[case("rooted", "rooted")]
    #[case("supersu", "supersu")]
    #[case("magisk", "magisk")]
    #[case("lineage", "lineage")]
    #[case("unofficial", "unofficial")]
    #[case("release-keys,lineage-21", "lineage")]
    fn marker_tags_are_suspicious(#[case] tags: &str, #[case] marker: &str) {
        assert_eq!(suspicious_tag(tags), Some(marker));
    }

    #[rstest]
    #[case("release-keys")]
    #[case("TEST-KEYS")]
    #[case("Magisk")]
    #[case("")]
    fn clean_tags_pass(#[case] tags: &str) {
        assert_eq!(suspicious_tag(tags), None);
    }

    #[test]
    fn missing_build_tags_are_not_a_signal() {
        let mut props = MockPropertySource::new();
        props
            .expect_property()
            .withf(|name| name == "ro.build.tags")
            .return_const(None::<String>);
        assert_eq!(check_build_tags(&props), None);
    }

    #[test]
    fn every_root_path_is_reported() {
        let mut fs = MockFileSystem::new();
        fs.expect_exists()
            .withf(|path| path == "/sbin/su" || path == "/su/bin/su")
            .return_const(true);
        fs.expect_exists().return_const(false);

        assert_eq!(
            check_root_paths(&fs),
            vec!["Root binary found: /sbin/su", "Root binary found: /su/bin/su"]
        );
    }

    #[test]
    fn su_on_path_fires() {
        let runner = ScriptedRunner(|| Ok(Some("/system/xbin/su".to_string())));
        let signal = check_su_on_path(&runner, &DetectorConfig::default()).unwrap();
        assert!(signal.ends_with("/system/xbin/su"));
    }

    #[rstest]
    #[case::no_output(ScriptedRunner(|| Ok(None)))]
    #[case::blank_line(ScriptedRunner(|| Ok(Some("  ".to_string()))))]
    #[case::not_installed(ScriptedRunner(|| Err(CapabilityError::Unsupported("which"))))]
    #[case::hung(ScriptedRunner(|| Err(CapabilityError::Timeout {
        program: "which".to_string(),
        timeout: Duration::from_secs(2),
    })))]
    fn su_lookup_failures_are_negative(#[case] runner: ScriptedRunner) {
        assert_eq!(check_su_on_path(&runner, &DetectorConfig::default()), None);
    }

    #[test]
    fn absent_ota_certs_fire() {
        let mut fs = MockFileSystem::new();
        fs.expect_exists()
            .withf(|path| path == OTA_CERTS_PATH)
            .return_const(false);
        assert!(check_ota_certs(&fs).is_some());
    }
}
