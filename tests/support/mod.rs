#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use jobline_client::auth::{AuthTokens, SessionExpiredHook};

pub fn tokens(access: &str, refresh: &str) -> AuthTokens {
    AuthTokens::new(access, refresh)
}

/// Counts session-expired hook invocations.
#[derive(Default)]
pub struct ExpiryCounter {
    fired: Arc<AtomicUsize>,
}

impl ExpiryCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hook(&self) -> SessionExpiredHook {
        let fired = Arc::clone(&self.fired);
        Arc::new(move || {
            fired.fetch_add(1, Ordering::SeqCst);
        })
    }

    pub fn count(&self) -> usize {
        self.fired.load(Ordering::SeqCst)
    }
}
