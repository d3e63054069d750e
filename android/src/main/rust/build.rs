// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

// Build script for the device integrity JNI bridge
// Ensures proper linking on Android

fn main() {
    // Build scripts run on the host, so ask Cargo for the target OS
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("android") {
        println!("cargo:rustc-link-lib=log");
    }
}
