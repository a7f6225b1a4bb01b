use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::config::MAX_AUTHENTICATION_ATTEMPTS;

/// Verification state for one credential-provider invocation.
///
/// Created with the manager and discarded with it. Single writer: the
/// atomics only give `&self` access, they do not order concurrent ceremonies.
#[derive(Debug, Default)]
pub struct VerificationSession {
    user_verified: AtomicBool,
    authentication_attempts: AtomicU32,
}

impl VerificationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_user_verified(&self) -> bool {
        self.user_verified.load(Ordering::Relaxed)
    }

    pub fn set_user_verified(&self, verified: bool) {
        self.user_verified.store(verified, Ordering::Relaxed);
    }

    pub fn authentication_attempts(&self) -> u32 {
        self.authentication_attempts.load(Ordering::Relaxed)
    }

    /// Count a failed verification attempt; returns the new total.
    pub fn record_authentication_attempt(&self) -> u32 {
        let previous = self
            .authentication_attempts
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| Some(n.saturating_add(1)))
            .unwrap_or(u32::MAX);
        let attempts = previous.saturating_add(1);
        tracing::debug!(
            attempts,
            max = MAX_AUTHENTICATION_ATTEMPTS,
            "Authentication attempt recorded"
        );
        attempts
    }

    pub fn has_authentication_attempts_remaining(&self) -> bool {
        self.authentication_attempts() < MAX_AUTHENTICATION_ATTEMPTS
    }
}
