// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Fixed detection signatures.
//!
//! These values are matched verbatim; changing any of them changes which
//! devices are reported.

/// Property holding the OS image build tags (`Build.TAGS`).
pub const BUILD_TAGS_PROPERTY: &str = "ro.build.tags";

/// Substrings of the build tag that indicate a custom or rooted build
pub const SUSPICIOUS_BUILD_TAGS: &[&str] = &[
    "test-keys",
    "dev-keys",
    "userdebug",
    "engineering",
    "release-keys-debug",
    "custom",
    "rooted",
    "supersu",
    "magisk",
    "lineage",
    "unofficial",
];

/// Root binaries and root-manager packages
pub const ROOT_PATHS: &[&str] = &[
    "/system/app/Superuser.apk",
    "/sbin/su",
    "/system/bin/su",
    "/system/xbin/su",
    "/data/local/xbin/su",
    "/data/local/bin/su",
    "/system/sd/xbin/su",
    "/system/bin/failsafe/su",
    "/data/local/su",
    "/su/bin/su",
];

/// OTA root-certificate bundle. Its absence counts as a root signal.
pub const OTA_CERTS_PATH: &str = "/etc/security/otacerts.zip";

/// Binary name handed to the locate helper.
pub const SU_BINARY: &str = "su";

/// Emulator: QEMU-specific files
pub const EMULATOR_FILES: &[&str] = &[
    "/dev/socket/qemud",
    "/dev/qemu_pipe",
    "/system/lib/libc_malloc_debug_qemu.so",
    "/sys/qemu_trace",
    "/system/bin/qemu-props",
];

pub const KERNEL_DRIVER_INFO_PATH: &str = "/proc/tty/driver";

pub const KERNEL_DRIVER_MARKERS: &[&str] = &["goldfish", "qemu"];

/// Emulator: properties where a single exact match is conclusive
pub const EMULATOR_PROPERTIES: &[(&str, &str)] = &[
    ("ro.kernel.qemu", "1"),
    ("ro.boot.qemu", "1"),
    ("ro.build.characteristics", "emulator"),
    ("init.svc.qemud", "running"),
    ("init.svc.qemu-props", "stopped"),
];

/// Emulator: generic-image fingerprint, counted against [`QUORUM_THRESHOLD`]
pub const QUORUM_PROPERTIES: &[(&str, &str)] = &[
    ("ro.product.device", "qemu"),
    ("ro.product.brand", "generic"),
    ("ro.product.manufacturer", "unknown"),
    ("ro.product.model", "sdk"),
    ("ro.hardware", "goldfish"),
    ("ro.hardware", "ranchu"),
];

/// Minimum number of [`QUORUM_PROPERTIES`] matches.
///
/// Equal to the list length, and `ro.hardware` is listed with two different
/// values, so a device whose properties read back consistently never reaches
/// it. Kept as-is for parity with deployed detection.
pub const QUORUM_THRESHOLD: usize = 6;

/// Memory map of the current process, one mapped object per line.
pub const PROC_SELF_MAPS: &str = "/proc/self/maps";

/// Lowercase substrings of mapped library paths left by injection toolkits
pub const INSTRUMENTATION_LIBRARY_MARKERS: &[&str] = &[
    "frida",
    "libinjector",
    "substrate",
    "libxposed",
    "libedxposed",
    "liblspd",
];

/// Environment variables set by Frida launchers
pub const INSTRUMENTATION_ENV_VARS: &[&str] = &["FRIDA", "FRIDA_SERVER"];

/// Frida server paths
pub const FRIDA_PATHS: &[&str] = &[
    "/data/local/tmp/frida-server",
    "/data/local/tmp/re.frida.server",
    "/system/bin/frida-server",
    "/system/xbin/frida-server",
];

/// Where the kernel exposes the tracer of the current process.
pub const PROC_SELF_STATUS: &str = "/proc/self/status";
