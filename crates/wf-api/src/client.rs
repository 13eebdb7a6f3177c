use crate::auth::TokenStore;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;
use wf_core::get_wf_setting;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response. Displays exactly the server `detail` or `HTTP <status>`.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Per-request options. Headers given here win over the defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, ApiError> {
        let name = HeaderName::from_bytes(name.trim().as_bytes())
            .map_err(|_| ApiError::InvalidHeader(name.to_string()))?;
        let value = HeaderValue::from_str(value.trim())
            .map_err(|_| ApiError::InvalidHeader(format!("{name}: {value}")))?;
        self.headers.append(name, value);
        Ok(self)
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_json<T: Serialize>(self, payload: &T) -> Result<Self, ApiError> {
        Ok(self.with_body(serde_json::to_string(payload)?))
    }
}

/// Thin wrapper over `reqwest` that knows where the API lives and how to
/// authenticate against it. One attempt per call: no retries, no timeout.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            tokens,
        }
    }

    /// Client pointed at `WF_API_BASE_URL`
    pub fn from_settings(tokens: Arc<dyn TokenStore>) -> Self {
        Self::new(get_wf_setting!(WF_API_BASE_URL), tokens)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Resolve `path` against the base URL. Absolute URLs pass through.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        let raw = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        };
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))
    }

    /// JSON content type, bearer token when one is stored, then caller overrides
    pub fn headers(&self, overrides: &HeaderMap) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.tokens.access_token().filter(|t| !t.is_empty()) {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => log::warn!("Stored access token is not a valid header value, skipping"),
            }
        }

        for name in overrides.keys() {
            headers.remove(name);
        }
        for (name, value) in overrides.iter() {
            headers.append(name.clone(), value.clone());
        }
        headers
    }

    /// Send a request and hand back the raw response, whatever its status
    pub async fn fetch(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.url(path)?;
        let headers = self.headers(&options.headers);
        log::debug!("{} {}", options.method, url);

        let mut request = self.http.request(options.method, url).headers(headers);
        if let Some(body) = options.body {
            request = request.body(body);
        }
        Ok(request.send().await?)
    }

    /// Send a request and decode the JSON response as `T`.
    ///
    /// An unreadable body decodes as an empty object. Non-2xx responses fail
    /// with the server's `detail` message, or `HTTP <status>` without one.
    pub async fn json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let response = self.fetch(path, options).await?;
        let status = response.status();
        let data = match response.bytes().await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|_| empty_object()),
            Err(e) => {
                log::debug!("Failed to read response body: {}", e);
                empty_object()
            }
        };

        if !status.is_success() {
            let err = error_from_body(status, &data);
            log::debug!("Request failed with {}: {}", status.as_u16(), err);
            return Err(err);
        }
        Ok(serde_json::from_value(data)?)
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

pub(crate) fn error_from_body(status: StatusCode, data: &Value) -> ApiError {
    let message = match data.get("detail") {
        Some(Value::String(detail)) => detail.clone(),
        Some(Value::Null) | None => format!("HTTP {}", status.as_u16()),
        // validation errors carry structured detail
        Some(other) => other.to_string(),
    };
    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}
