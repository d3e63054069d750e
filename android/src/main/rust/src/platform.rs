// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Android capabilities reached through the application `Context`.

use std::cell::RefCell;
use std::time::Duration;

use device_integrity::{
    CapabilityError, Environment, FileSystem, LockScreenService, OsPlatform, PackageInspector,
    ProcessRunner, PropertySource,
};
use jni::objects::{JObject, JValue};
use jni::JNIEnv;
use log::warn;

/// `ApplicationInfo.FLAG_DEBUGGABLE`
const FLAG_DEBUGGABLE: i32 = 0x2;

/// `Context.KEYGUARD_SERVICE`
const KEYGUARD_SERVICE: &str = "keyguard";

/// Platform for one JNI call: OS capabilities plus the caller's `Context`.
pub struct AndroidPlatform<'local> {
    env: RefCell<JNIEnv<'local>>,
    context: JObject<'local>,
    os: OsPlatform,
}

impl<'local> AndroidPlatform<'local> {
    pub fn new(env: JNIEnv<'local>, context: JObject<'local>) -> Self {
        Self {
            env: RefCell::new(env),
            context,
            os: OsPlatform::new(),
        }
    }

    /// Hand the environment back once probing is done.
    pub fn into_env(self) -> JNIEnv<'local> {
        self.env.into_inner()
    }

    fn context(&self) -> Result<&JObject<'local>, CapabilityError> {
        if self.context.is_null() {
            Err(CapabilityError::Service("no application context".to_string()))
        } else {
            Ok(&self.context)
        }
    }

    /// Run a JNI sequence, turning any error or pending Java exception into
    /// a [`CapabilityError::Service`].
    fn with_env<T>(
        &self,
        f: impl FnOnce(&mut JNIEnv<'local>) -> jni::errors::Result<T>,
    ) -> Result<T, CapabilityError> {
        let mut env = self.env.borrow_mut();
        f(&mut env).map_err(|e| {
            if env.exception_check().unwrap_or(false) {
                let _ = env.exception_describe();
                let _ = env.exception_clear();
            }
            CapabilityError::Service(e.to_string())
        })
    }
}

impl FileSystem for AndroidPlatform<'_> {
    fn exists(&self, path: &str) -> bool {
        self.os.exists(path)
    }

    fn read_to_string(&self, path: &str) -> Result<String, CapabilityError> {
        self.os.read_to_string(path)
    }
}

impl PropertySource for AndroidPlatform<'_> {
    fn property(&self, name: &str) -> Option<String> {
        self.os.property(name)
    }
}

impl Environment for AndroidPlatform<'_> {
    fn var(&self, name: &str) -> Option<String> {
        self.os.var(name)
    }
}

impl ProcessRunner for AndroidPlatform<'_> {
    fn first_line(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Option<String>, CapabilityError> {
        self.os.first_line(program, args, timeout)
    }
}

impl PackageInspector for AndroidPlatform<'_> {
    fn is_debuggable(&self) -> Result<bool, CapabilityError> {
        let context = self.context()?;
        self.with_env(|env| {
            let info = env
                .call_method(
                    context,
                    "getApplicationInfo",
                    "()Landroid/content/pm/ApplicationInfo;",
                    &[],
                )?
                .l()?;
            let flags = env.get_field(&info, "flags", "I")?.i()?;
            env.delete_local_ref(info)?;
            Ok(flags & FLAG_DEBUGGABLE != 0)
        })
    }
}

impl LockScreenService for AndroidPlatform<'_> {
    fn is_device_secure(&self) -> Result<bool, CapabilityError> {
        let context = self.context()?;
        let keyguard = self.with_env(|env| {
            let name = env.new_string(KEYGUARD_SERVICE)?;
            let service = env
                .call_method(
                    context,
                    "getSystemService",
                    "(Ljava/lang/String;)Ljava/lang/Object;",
                    &[JValue::Object(&name)],
                )?
                .l()?;
            env.delete_local_ref(name)?;
            Ok(service)
        })?;

        if keyguard.is_null() {
            warn!("keyguard service lookup returned null");
            return Err(CapabilityError::Service("keyguard service unavailable".to_string()));
        }

        self.with_env(|env| {
            let secure = env.call_method(&keyguard, "isKeyguardSecure", "()Z", &[])?.z()?;
            env.delete_local_ref(keyguard)?;
            Ok(secure)
        })
    }
}
