//! The `ApiClient` facade: verb methods, bearer attachment, and the
//! refresh-and-retry-once lifecycle.

pub mod interceptor;
pub mod request;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::auth::refresh::{RefreshCoordinator, SessionExpiredHook};
use crate::auth::{AuthTokens, FileTokenStore, TokenStore};
use crate::config::{ClientConfig, DEFAULT_TIMEOUT};
use crate::error::ClientError;
use interceptor::attach_authorization;
use request::OutgoingRequest;

const REFRESH_PATH: &str = "/auth/refresh";

/// Deserialized success response.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: u16,
}

/// Authenticated HTTP client for the platform APIs.
///
/// Explicitly constructed and dependency-injected: each instance owns its
/// token store, transport, and session-expired hook, so tests build isolated
/// clients instead of sharing process-wide state.
///
/// # Example
/// ```no_run
/// use jobline_client::client::ApiClient;
///
/// # async fn example() -> jobline_client::error::Result<()> {
/// let client = ApiClient::builder("https://api.jobline.example").build()?;
/// let jobs: jobline_client::client::ApiResponse<serde_json::Value> =
///     client.get("/jobs", None).await?;
/// println!("{} (status {})", jobs.data, jobs.status);
/// # Ok(())
/// # }
/// ```
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    coordinator: RefreshCoordinator,
}

impl ApiClient {
    pub fn builder(base_url: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder::new(base_url)
    }

    /// The store this client reads credentials from.
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<&[(&str, &str)]>,
    ) -> Result<ApiResponse<T>, ClientError> {
        self.request(OutgoingRequest::new(Method::GET, path).with_params(params))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<&[(&str, &str)]>,
    ) -> Result<ApiResponse<T>, ClientError> {
        self.request(OutgoingRequest::new(Method::DELETE, path).with_params(params))
            .await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        params: Option<&[(&str, &str)]>,
    ) -> Result<ApiResponse<T>, ClientError> {
        self.request(
            OutgoingRequest::new(Method::POST, path)
                .with_body(to_body(body)?)
                .with_params(params),
        )
        .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        params: Option<&[(&str, &str)]>,
    ) -> Result<ApiResponse<T>, ClientError> {
        self.request(
            OutgoingRequest::new(Method::PUT, path)
                .with_body(to_body(body)?)
                .with_params(params),
        )
        .await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        params: Option<&[(&str, &str)]>,
    ) -> Result<ApiResponse<T>, ClientError> {
        self.request(
            OutgoingRequest::new(Method::PATCH, path)
                .with_body(to_body(body)?)
                .with_params(params),
        )
        .await
    }

    /// Single funnel for all verbs: send, detect auth expiry, refresh and
    /// retry at most once, normalize the outcome.
    async fn request<T: DeserializeOwned>(
        &self,
        req: OutgoingRequest,
    ) -> Result<ApiResponse<T>, ClientError> {
        let snapshot = self.load_tokens();
        let response = attach_authorization(
            req.build(&self.http, &self.base_url),
            snapshot.as_ref(),
        )
        .send()
        .await?;

        if response.status() == StatusCode::UNAUTHORIZED && !req.retried {
            tracing::warn!(path = %req.path, "request unauthorized; refreshing and retrying once");
            let stale = snapshot.map(|t| t.access_token);
            let fresh = self.coordinator.refresh(stale.as_deref()).await?;
            let retried = req.mark_retried();
            let response = attach_authorization(
                retried.build(&self.http, &self.base_url),
                Some(&fresh),
            )
            .send()
            .await?;
            // Verbatim outcome of the single retry, success or failure.
            return normalize(response).await;
        }

        normalize(response).await
    }

    /// Store reads degrade to "no credentials" so a broken store never fails
    /// an outgoing call on its own.
    fn load_tokens(&self) -> Option<AuthTokens> {
        match self.store.load() {
            Ok(tokens) => tokens,
            Err(err) => {
                tracing::debug!(error = %err, "token store read failed; sending unauthenticated");
                None
            }
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
    base_url: String,
    token_store: Option<Arc<dyn TokenStore>>,
    on_session_expired: Option<SessionExpiredHook>,
    coalesce_refresh: bool,
    timeout: Duration,
}

impl ApiClientBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token_store: None,
            on_session_expired: None,
            coalesce_refresh: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Hook fired when credentials are gone and the host should navigate to
    /// its login entry point.
    pub fn on_session_expired(mut self, hook: SessionExpiredHook) -> Self {
        self.on_session_expired = Some(hook);
        self
    }

    /// When `false`, concurrent 401 handlers each run their own refresh
    /// exchange instead of sharing a single in-flight one. Only useful for
    /// compatibility testing against the legacy behavior.
    pub fn coalesce_refresh(mut self, coalesce: bool) -> Self {
        self.coalesce_refresh = coalesce;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| ClientError::Configuration(err.to_string()))?;
        let store = self
            .token_store
            .unwrap_or_else(|| Arc::new(FileTokenStore::new_default()));
        let coordinator = RefreshCoordinator::new(
            http.clone(),
            format!("{base_url}{REFRESH_PATH}"),
            Arc::clone(&store),
            self.on_session_expired,
            self.coalesce_refresh,
        );
        Ok(ApiClient {
            http,
            base_url,
            store,
            coordinator,
        })
    }
}

impl From<ClientConfig> for ApiClientBuilder {
    fn from(config: ClientConfig) -> Self {
        let mut builder = ApiClientBuilder::new(config.base_url).timeout(config.timeout);
        if let Some(dir) = config.token_dir {
            builder = builder.token_store(Arc::new(FileTokenStore::new(
                crate::auth::TokenStoreConfig::new(dir),
            )));
        }
        builder
    }
}

fn to_body<B: Serialize>(body: &B) -> Result<serde_json::Value, ClientError> {
    serde_json::to_value(body).map_err(|err| ClientError::Serialization(err.to_string()))
}

/// Map a response into the normalized success/failure shape.
async fn normalize<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<ApiResponse<T>, ClientError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    if status.is_success() {
        let raw: &[u8] = if bytes.is_empty() { b"null" } else { bytes.as_ref() };
        let data = serde_json::from_slice(raw)
            .map_err(|err| ClientError::Serialization(err.to_string()))?;
        return Ok(ApiResponse {
            data,
            status: status.as_u16(),
        });
    }
    Err(normalize_failure(status.as_u16(), &bytes))
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    errors: Option<serde_json::Value>,
}

fn normalize_failure(status: u16, bytes: &[u8]) -> ClientError {
    let body: ErrorBody = serde_json::from_slice(bytes).unwrap_or_default();
    ClientError::Api {
        status,
        message: body
            .message
            .unwrap_or_else(|| "An error occurred".to_string()),
        errors: body.errors,
    }
}
