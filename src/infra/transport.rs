//! Request execution against the real backend or the in-memory mock.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::error::ApiError;
use super::mock::MockApi;
use super::session::Session;

const USER_AGENT: &str = concat!("rental-desk/", env!("CARGO_PKG_VERSION"));
pub const REFRESH_PATH: &str = "auth/token/refresh/";

#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API root, e.g. `orders/42/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PATCH, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Clone)]
pub enum Transport {
    Http(HttpTransport),
    Mock(MockTransport),
}

impl Transport {
    pub async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        match self {
            Transport::Http(http) => http.execute(request).await,
            Transport::Mock(mock) => Ok(mock.execute(request).await),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Transport::Http(_) => "http",
            Transport::Mock(_) => "mock",
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenRefreshDto {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

/// reqwest-backed transport. Attaches the session's bearer token and, on a 401, trades
/// the refresh token for a new access token once before giving up.
#[derive(Clone)]
pub struct HttpTransport {
    http: Client,
    base_url: Url,
    session: Session,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration, session: Session) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let response = self.send(request).await?;
        if response.status != StatusCode::UNAUTHORIZED.as_u16() {
            return Ok(response);
        }

        info!(path = %request.path, "access token rejected; attempting refresh");
        let refreshed = match self.refresh_access_token().await {
            Ok(refreshed) => refreshed,
            Err(err) => {
                warn!(%err, "token refresh failed");
                false
            }
        };
        if !refreshed {
            self.session.clear().await;
            return Err(ApiError::Unauthorized);
        }

        let retried = self.send(request).await?;
        if retried.status == StatusCode::UNAUTHORIZED.as_u16() {
            warn!(path = %request.path, "request still unauthorised after token refresh");
            self.session.clear().await;
            return Err(ApiError::Unauthorized);
        }
        Ok(retried)
    }

    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url(&request.path)?;
        debug!(method = %request.method, %url, "sending request");

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .query(&request.query);
        if let Some(token) = self.session.access_token().await {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let body = if bytes.is_empty() {
            None
        } else {
            match serde_json::from_slice::<Value>(&bytes) {
                Ok(value) => Some(value),
                Err(err) if status.is_success() => return Err(ApiError::Decode(err.to_string())),
                Err(_) => Some(Value::String(String::from_utf8_lossy(&bytes).into_owned())),
            }
        };

        Ok(ApiResponse::new(status.as_u16(), body))
    }

    async fn refresh_access_token(&self) -> Result<bool, ApiError> {
        let Some(refresh_token) = self.session.refresh_token().await else {
            debug!("no refresh token in session");
            return Ok(false);
        };

        let url = self.url(REFRESH_PATH)?;
        let response = self
            .http
            .post(url)
            .json(&json!({ "refresh": refresh_token }))
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "token refresh rejected");
            return Ok(false);
        }

        let tokens: TokenRefreshDto = response
            .json()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        self.session
            .set_tokens(Some(tokens.access), tokens.refresh.or(Some(refresh_token)))
            .await;
        info!("access token refreshed");
        Ok(true)
    }

    fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path.trim_start_matches('/'))
    }
}

/// Routes requests into an in-process [`MockApi`].
#[derive(Clone)]
pub struct MockTransport {
    api: Arc<Mutex<MockApi>>,
}

impl MockTransport {
    pub fn new(api: MockApi) -> Self {
        Self {
            api: Arc::new(Mutex::new(api)),
        }
    }

    pub fn seeded() -> Self {
        Self::new(MockApi::seeded())
    }

    pub async fn execute(&self, request: &ApiRequest) -> ApiResponse {
        debug!(method = %request.method, path = %request.path, "mock request");
        self.api.lock().await.handle(request)
    }
}
