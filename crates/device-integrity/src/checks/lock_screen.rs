// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Connectias

//! Secure lock screen check.
//!
//! A failing lock-screen service is never surfaced as an error: the verdict
//! is `false` and the failure text is carried in [`Verdict::diagnostic`].

use log::warn;

use super::Verdict;
use crate::platform::LockScreenService;

pub fn evaluate<S: LockScreenService + ?Sized>(service: &S) -> Verdict {
    match service.is_device_secure() {
        Ok(secure) => Verdict::new(secure),
        Err(e) => {
            warn!("Error checking lock screen security: {}", e);
            Verdict::degraded(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CapabilityError;
    use crate::platform::MockLockScreenService;

    #[test]
    fn relays_service_answer() {
        for secure in [true, false] {
            let mut service = MockLockScreenService::new();
            service.expect_is_device_secure().returning(move || Ok(secure));
            assert_eq!(evaluate(&service), Verdict::new(secure));
        }
    }

    #[test]
    fn service_failure_is_false_with_diagnostic() {
        let mut service = MockLockScreenService::new();
        service
            .expect_is_device_secure()
            .returning(|| {
                Err(CapabilityError::Service(
                    "keyguard service unavailable".to_string(),
                ))
            });

        let verdict = evaluate(&service);
        assert!(!verdict.value);
        assert_eq!(
            verdict.diagnostic.as_deref(),
            Some("platform service failure: keyguard service unavailable")
        );
    }
}
