use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::error::AuthError;
use super::store::TokenStore;
use super::token::AuthTokens;

/// Callback fired (with no payload) when credentials are gone and the host
/// should send the user to its login entry point.
pub type SessionExpiredHook = Arc<dyn Fn() + Send + Sync>;

/// Drives the refresh exchange after an access token is rejected.
///
/// The exchange call is a bare `POST` to the refresh endpoint: it carries no
/// bearer header and can never recurse into another refresh. On any terminal
/// failure the store is cleared and the session-expired hook fires once.
pub struct RefreshCoordinator {
    client: reqwest::Client,
    refresh_url: String,
    store: Arc<dyn TokenStore>,
    on_session_expired: Option<SessionExpiredHook>,
    coalesce: bool,
    gate: Mutex<RefreshGate>,
}

/// State shared by everyone waiting on the coalescing gate.
///
/// A successful exchange is shared through the store itself; a terminal
/// failure is shared here, keyed by the access token whose refresh failed,
/// so waiters carrying the same stale token receive the failure instead of
/// re-running the exchange (and re-firing the hook).
#[derive(Default)]
struct RefreshGate {
    last_failure: Option<(Option<String>, AuthError)>,
}

impl RefreshGate {
    fn shared_failure(&self, stale_access: Option<&str>) -> Option<AuthError> {
        let (key, err) = self.last_failure.as_ref()?;
        (key.as_deref() == stale_access).then(|| err.clone())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
    refresh_token: Option<String>,
}

impl RefreshCoordinator {
    pub(crate) fn new(
        client: reqwest::Client,
        refresh_url: String,
        store: Arc<dyn TokenStore>,
        on_session_expired: Option<SessionExpiredHook>,
        coalesce: bool,
    ) -> Self {
        Self {
            client,
            refresh_url,
            store,
            on_session_expired,
            coalesce,
            gate: Mutex::new(RefreshGate::default()),
        }
    }

    /// Obtain a fresh token pair to retry with.
    ///
    /// `stale_access` is the bearer value the rejected request carried. When
    /// coalescing, callers arriving after another task already resolved the
    /// same stale token share that outcome: a rotation is reused without a
    /// second exchange, and a terminal failure is returned without clearing
    /// the store or firing the hook again.
    pub(crate) async fn refresh(
        &self,
        stale_access: Option<&str>,
    ) -> Result<AuthTokens, AuthError> {
        if !self.coalesce {
            return self.exchange().await.map_err(|err| {
                self.fail_terminally(&err);
                err
            });
        }
        let mut gate = self.gate.lock().await;
        if let Some(fresh) = self.already_rotated(stale_access) {
            return Ok(fresh);
        }
        if let Some(err) = gate.shared_failure(stale_access) {
            return Err(err);
        }
        match self.exchange().await {
            Ok(tokens) => {
                gate.last_failure = None;
                Ok(tokens)
            }
            Err(err) => {
                // Terminal side effects happen while the gate is held, so a
                // waiter can never observe the stale pair mid-teardown.
                self.fail_terminally(&err);
                gate.last_failure = Some((stale_access.map(str::to_string), err.clone()));
                Err(err)
            }
        }
    }

    /// A concurrent refresh already replaced the rejected access token.
    fn already_rotated(&self, stale_access: Option<&str>) -> Option<AuthTokens> {
        let stale = stale_access?;
        match self.store.load() {
            Ok(Some(tokens)) if tokens.access_token != stale => Some(tokens),
            _ => None,
        }
    }

    async fn exchange(&self) -> Result<AuthTokens, AuthError> {
        let current = self.store.load()?.ok_or(AuthError::NoStoredCredentials)?;
        if current.refresh_token.is_empty() {
            return Err(AuthError::NoRefreshToken);
        }
        tracing::debug!("access token rejected; exchanging refresh token");
        let resp = self
            .client
            .post(&self.refresh_url)
            .json(&RefreshRequest {
                refresh_token: &current.refresh_token,
            })
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AuthError::RefreshRejected {
                status: status.as_u16(),
                message,
            });
        }
        let payload: RefreshResponse = resp.json().await?;
        if payload.access_token.is_empty() {
            return Err(AuthError::InvalidResponse(
                "refresh response missing access token".to_string(),
            ));
        }
        // The server may not rotate the refresh token; keep the old one then.
        let rotated = AuthTokens {
            access_token: payload.access_token,
            refresh_token: payload.refresh_token.unwrap_or(current.refresh_token),
        };
        self.store.save(&rotated)?;
        Ok(rotated)
    }

    fn fail_terminally(&self, err: &AuthError) {
        tracing::warn!(error = %err, "refresh failed; clearing credentials");
        if let Err(clear_err) = self.store.clear() {
            tracing::warn!(error = %clear_err, "failed to clear token store");
        }
        if let Some(hook) = &self.on_session_expired {
            hook();
        }
    }
}
