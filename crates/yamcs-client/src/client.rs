// crates/yamcs-client/src/client.rs
// ============================================================================
// Module: HTTP Client Core
// Description: Authenticated HTTP transport for the Yamcs API.
// Purpose: Issue requests, attach credentials, and classify failures.
// Dependencies: reqwest, serde, serde_json, url
// ============================================================================

//! ## Overview
//! [`YamcsClient`] owns the reqwest client, the normalized base URL, and the
//! optional bearer token obtained from the Yamcs token endpoint. Connecting
//! performs a server info round trip so that a successfully built client is
//! known to be reachable. Higher-level endpoint wrappers live in
//! [`crate::api`]; this module only provides request plumbing and the
//! status-to-error classification.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use reqwest::RequestBuilder;
use reqwest::Response;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::YamcsError;
use crate::types::ApiError;
use crate::types::ServerInfo;
use crate::types::TokenResponse;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Connection settings for the Yamcs HTTP API.
///
/// # Invariants
/// - `username` and `password` are either both set or both absent.
/// - `timeout` applies to the full request lifecycle, including connect.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Yamcs base URL, e.g. `http://localhost:8090`.
    pub url: String,
    /// Default instance used when callers do not name one.
    pub instance: String,
    /// Username for the password grant, when Yamcs requires login.
    pub username: Option<String>,
    /// Password for the password grant.
    pub password: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Authenticated Yamcs HTTP client.
///
/// # Invariants
/// - `base_url` carries no trailing slash.
/// - A constructed client has completed one successful server info request.
#[derive(Debug)]
pub struct YamcsClient {
    /// Normalized base URL without a trailing slash.
    base_url: String,
    /// Default instance for callers that do not name one.
    instance: String,
    /// Underlying HTTP client with configured timeouts.
    http: Client,
    /// Bearer token from the token endpoint, when credentials are configured.
    bearer_token: Option<String>,
    /// Server identity captured during connect.
    server_info: ServerInfo,
}

impl YamcsClient {
    /// Connects to Yamcs: builds the HTTP client, performs the password
    /// grant when credentials are configured, and verifies reachability with
    /// a server info request.
    ///
    /// # Errors
    ///
    /// Returns [`YamcsError::Validation`] for unusable configuration,
    /// [`YamcsError::Authentication`] when Yamcs rejects the credentials, and
    /// [`YamcsError::Connection`] when the server is unreachable.
    pub async fn connect(config: &ClientConfig) -> Result<Self, YamcsError> {
        let base_url = normalize_base_url(&config.url)?;
        let http = Client::builder()
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|err| YamcsError::Connection(format!("http client build failed: {err}")))?;
        let bearer_token = match (&config.username, &config.password) {
            (Some(username), Some(password)) => {
                Some(fetch_token(&http, &base_url, username, password).await?)
            }
            (None, None) => None,
            _ => {
                return Err(YamcsError::Validation(
                    "username and password must be configured together".to_string(),
                ));
            }
        };
        let mut client = Self {
            base_url,
            instance: config.instance.clone(),
            http,
            bearer_token,
            server_info: ServerInfo::default(),
        };
        client.server_info = client.get_json("/api", &[]).await?;
        Ok(client)
    }

    /// Returns the configured default instance.
    #[must_use]
    pub fn instance(&self) -> &str {
        &self.instance
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the server identity captured during connect.
    #[must_use]
    pub const fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }
}

// ============================================================================
// SECTION: Request Plumbing
// ============================================================================

impl YamcsClient {
    /// Builds a request with the bearer token attached when present.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url);
        let builder = self.http.request(method, url);
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a GET request and decodes the JSON response.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, YamcsError> {
        let response = self
            .request(Method::GET, path)
            .query(query)
            .send()
            .await
            .map_err(connection_error)?;
        decode_json(check_status(response).await?).await
    }

    /// Sends a POST request with an optional JSON body and decodes the
    /// response, substituting the default value when the body is empty.
    pub(crate) async fn post_json<T: DeserializeOwned + Default>(
        &self,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, YamcsError> {
        let mut builder = self.request(Method::POST, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder.send().await.map_err(connection_error)?;
        let response = check_status(response).await?;
        let text = response.text().await.map_err(connection_error)?;
        if text.trim().is_empty() {
            return Ok(T::default());
        }
        serde_json::from_str(&text).map_err(|err| YamcsError::Decode(err.to_string()))
    }

    /// Sends a POST request and discards the response body.
    pub(crate) async fn post_empty(&self, path: &str) -> Result<(), YamcsError> {
        let response = self.request(Method::POST, path).send().await.map_err(connection_error)?;
        check_status(response).await.map(|_| ())
    }

    /// Sends a PATCH request with a JSON body and discards the response.
    pub(crate) async fn patch_empty(&self, path: &str, body: &Value) -> Result<(), YamcsError> {
        let response =
            self.request(Method::PATCH, path).json(body).send().await.map_err(connection_error)?;
        check_status(response).await.map(|_| ())
    }

    /// Sends a DELETE request and discards the response body.
    pub(crate) async fn delete_empty(&self, path: &str) -> Result<(), YamcsError> {
        let response = self.request(Method::DELETE, path).send().await.map_err(connection_error)?;
        check_status(response).await.map(|_| ())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates the base URL and strips any trailing slash.
fn normalize_base_url(raw: &str) -> Result<String, YamcsError> {
    let parsed =
        Url::parse(raw).map_err(|_| YamcsError::Validation(format!("invalid yamcs url: {raw}")))?;
    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(YamcsError::Validation(format!(
                "yamcs url must use http or https, got {scheme}"
            )));
        }
    }
    if !parsed.username().is_empty() || parsed.password().is_some() {
        return Err(YamcsError::Validation(
            "credentials belong in the username/password settings, not the url".to_string(),
        ));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

/// Performs the password grant against the token endpoint.
async fn fetch_token(
    http: &Client,
    base_url: &str,
    username: &str,
    password: &str,
) -> Result<String, YamcsError> {
    let response = http
        .post(format!("{base_url}/auth/token"))
        .form(&[("grant_type", "password"), ("username", username), ("password", password)])
        .send()
        .await
        .map_err(connection_error)?;
    let response = check_status(response).await?;
    let token: TokenResponse = decode_json(response).await?;
    Ok(token.access_token)
}

/// Maps HTTP status codes onto the stable error classification.
async fn check_status(response: Response) -> Result<Response, YamcsError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let parsed: ApiError = serde_json::from_str(&body).unwrap_or_default();
    let message = parsed.msg.unwrap_or_else(|| format!("yamcs returned status {status}"));
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(YamcsError::Authentication(message))
        }
        StatusCode::NOT_FOUND => Err(YamcsError::NotFound(message)),
        StatusCode::BAD_REQUEST => Err(YamcsError::Validation(message)),
        status => Err(YamcsError::Operation {
            status: status.as_u16(),
            message,
            yamcs_type: parsed.exception_type,
        }),
    }
}

/// Decodes a JSON response body.
async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, YamcsError> {
    response.json::<T>().await.map_err(|err| YamcsError::Decode(err.to_string()))
}

/// Classifies transport-level failures as connection errors.
fn connection_error(err: reqwest::Error) -> YamcsError {
    if err.is_timeout() {
        return YamcsError::Connection("request timed out".to_string());
    }
    YamcsError::Connection(err.to_string())
}

#[cfg(test)]
mod tests;
