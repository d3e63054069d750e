// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Device Integrity - JNI bridge
//!
//! Native side of the `DeviceIntegrity` plugin. Each entry point builds a
//! detector over the caller's `Context`, runs one check and returns the
//! plugin result as a JSON string (`{"value": true}`).

use device_integrity::{DeviceIntegrityDetector, Verdict};
use jni::objects::{JClass, JObject};
use jni::sys::jstring;
use jni::JNIEnv;
use log::error;
use serde::{Deserialize, Serialize};

#[cfg(target_os = "android")]
use android_logger::Config;
#[cfg(target_os = "android")]
use log::LevelFilter;

pub mod platform;

use platform::AndroidPlatform;

/// Result object handed back to the plugin layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginResult {
    pub value: bool,
    /// Reason a platform service could not answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

impl From<Verdict> for PluginResult {
    fn from(verdict: Verdict) -> Self {
        Self {
            value: verdict.value,
            diagnostic: verdict.diagnostic,
        }
    }
}

const FALLBACK_RESULT: &str = r#"{"value":false}"#;
/// Every report field, negative. Handed back if the report cannot be serialized.
const FALLBACK_REPORT: &str = concat!(
    r#"{"rooted":{"value":false},"#,
    r#""emulator":{"value":false},"#,
    r#""debug_build":{"value":false},"#,
    r#""debugger_attached":{"value":false},"#,
    r#""instrumented":{"value":false},"#,
    r#""secure_lock_screen":{"value":false}}"#,
);

/// Run `check` against the caller's device and serialize its outcome.
fn respond<'local, T, F>(env: JNIEnv<'local>, context: JObject<'local>, fallback: &str, check: F) -> jstring
where
    T: Serialize,
    F: FnOnce(&DeviceIntegrityDetector<AndroidPlatform<'local>>) -> T,
{
    let detector = DeviceIntegrityDetector::new(AndroidPlatform::new(env, context));
    let outcome = check(&detector);
    let env = detector.into_platform().into_env();

    let json = to_json(&outcome, fallback);
    match env.new_string(&json) {
        Ok(jstr) => jstr.into_raw(),
        Err(e) => {
            error!("failed to create result string: {}", e);
            std::ptr::null_mut()
        }
    }
}

fn to_json<T: Serialize>(outcome: &T, fallback: &str) -> String {
    serde_json::to_string(outcome).unwrap_or_else(|e| {
        error!("failed to serialize result: {}", e);
        fallback.to_string()
    })
}

// ============================================================================
// JNI Bindings
// ============================================================================

/// Initialize logging for Android
#[cfg(target_os = "android")]
#[no_mangle]
pub extern "C" fn Java_com_deviceintegrity_plugin_DeviceIntegrityNative_nativeInit(
    _env: JNIEnv,
    _class: JClass,
) {
    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Info)
            .with_tag("DeviceIntegrity"),
    );
}

#[cfg(not(target_os = "android"))]
#[no_mangle]
pub extern "C" fn Java_com_deviceintegrity_plugin_DeviceIntegrityNative_nativeInit(
    _env: JNIEnv,
    _class: JClass,
) {
    // No-op for non-Android platforms
}

/// Rooted device check - `isJailBreakOrRooted`
#[no_mangle]
pub extern "C" fn Java_com_deviceintegrity_plugin_DeviceIntegrityNative_nativeIsJailBreakOrRooted<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
    context: JObject<'local>,
) -> jstring {
    respond(env, context, FALLBACK_RESULT, |detector| {
        PluginResult::from(detector.root_verdict())
    })
}

/// Emulator check - `isSimulator`
#[no_mangle]
pub extern "C" fn Java_com_deviceintegrity_plugin_DeviceIntegrityNative_nativeIsSimulator<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
    context: JObject<'local>,
) -> jstring {
    respond(env, context, FALLBACK_RESULT, |detector| {
        PluginResult::from(detector.emulator_verdict())
    })
}

/// Debuggable package check - `isDebuggedMode`
#[no_mangle]
pub extern "C" fn Java_com_deviceintegrity_plugin_DeviceIntegrityNative_nativeIsDebuggedMode<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
    context: JObject<'local>,
) -> jstring {
    respond(env, context, FALLBACK_RESULT, |detector| {
        PluginResult::from(detector.debug_build_verdict())
    })
}

/// Secure lock screen check - `pinCheck`
///
/// A failing keyguard service yields `{"value":false,"diagnostic":...}`,
/// never a rejected call.
#[no_mangle]
pub extern "C" fn Java_com_deviceintegrity_plugin_DeviceIntegrityNative_nativePinCheck<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
    context: JObject<'local>,
) -> jstring {
    respond(env, context, FALLBACK_RESULT, |detector| {
        PluginResult::from(detector.lock_screen_verdict())
    })
}

/// Hook and instrumentation toolkit check
#[no_mangle]
pub extern "C" fn Java_com_deviceintegrity_plugin_DeviceIntegrityNative_nativeIsInstrumented<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
    context: JObject<'local>,
) -> jstring {
    respond(env, context, FALLBACK_RESULT, |detector| {
        PluginResult::from(detector.instrumentation_verdict())
    })
}

/// Every check at once, including the signals that fired
#[no_mangle]
pub extern "C" fn Java_com_deviceintegrity_plugin_DeviceIntegrityNative_nativeReport<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
    context: JObject<'local>,
) -> jstring {
    respond(env, context, FALLBACK_REPORT, |detector| detector.report())
}
