// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the remote's REST API.

use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, ProtocolError, Result};
use crate::protocol::endpoint::{configuration_url, resolve_endpoint};
use crate::response::ErrorBody;

/// Username the remote expects for PIN based Basic authentication.
pub const AUTH_USERNAME: &str = "web-configurator";

/// Name given to API keys created by this library unless configured otherwise.
pub const DEFAULT_API_KEY_NAME: &str = "ucremote_lib";

// ============================================================================
// HttpConfig
// ============================================================================

/// Configuration for talking to a remote over HTTP.
///
/// # Examples
///
/// ```
/// use ucremote_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.20:8080")
///     .with_pin("1234")
///     .with_query_timeout(Duration::from_secs(2));
///
/// assert_eq!(config.endpoint(), "http://192.168.1.20:8080/api/");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    endpoint: String,
    api_key: Option<String>,
    pin: Option<String>,
    api_key_name: String,
    query_timeout: Duration,
    command_timeout: Duration,
}

impl HttpConfig {
    /// Deadline for read-only calls such as battery or system information.
    pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);
    /// Deadline for calls that make the remote do something.
    pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the given host or URL.
    ///
    /// The address is normalized with [`resolve_endpoint`].
    #[must_use]
    pub fn new(address: impl AsRef<str>) -> Self {
        Self {
            endpoint: resolve_endpoint(address.as_ref()),
            api_key: None,
            pin: None,
            api_key_name: DEFAULT_API_KEY_NAME.to_string(),
            query_timeout: Self::DEFAULT_QUERY_TIMEOUT,
            command_timeout: Self::DEFAULT_COMMAND_TIMEOUT,
        }
    }

    /// Sets the API key used as bearer token.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the PIN used for Basic authentication.
    #[must_use]
    pub fn with_pin(mut self, pin: impl Into<String>) -> Self {
        self.pin = Some(pin.into());
        self
    }

    /// Sets the name under which API keys are created.
    #[must_use]
    pub fn with_api_key_name(mut self, name: impl Into<String>) -> Self {
        self.api_key_name = name.into();
        self
    }

    /// Sets the deadline for read-only calls.
    #[must_use]
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Sets the deadline for command calls.
    #[must_use]
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Returns the normalized API endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the API key name.
    #[must_use]
    pub fn api_key_name(&self) -> &str {
        &self.api_key_name
    }

    /// Returns the query timeout.
    #[must_use]
    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Returns the command timeout.
    #[must_use]
    pub fn command_timeout(&self) -> Duration {
        self.command_timeout
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client(self) -> std::result::Result<HttpClient, ProtocolError> {
        let client = Client::builder().build().map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            endpoint: self.endpoint,
            client,
            credentials: Credentials {
                api_key: self.api_key,
                pin: self.pin,
            },
            api_key_name: self.api_key_name,
            query_timeout: self.query_timeout,
            command_timeout: self.command_timeout,
        })
    }
}

// ============================================================================
// Credentials
// ============================================================================

/// Credential currently used to authenticate requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential<'a> {
    /// Bearer API key.
    ApiKey(&'a str),
    /// Basic authentication PIN.
    Pin(&'a str),
}

/// Credentials known for a remote.
///
/// Both may be known at once, but only one is active: the API key wins as
/// soon as there is one.
#[derive(Debug, Clone, Default)]
struct Credentials {
    api_key: Option<String>,
    pin: Option<String>,
}

impl Credentials {
    fn active(&self) -> Option<Credential<'_>> {
        match (&self.api_key, &self.pin) {
            (Some(key), _) => Some(Credential::ApiKey(key.as_str())),
            (None, Some(pin)) => Some(Credential::Pin(pin.as_str())),
            (None, None) => None,
        }
    }
}

/// Selects which deadline applies to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// Read-only call.
    Query,
    /// Call that changes something on the remote.
    Command,
}

// ============================================================================
// HttpClient
// ============================================================================

/// HTTP client bound to a single remote.
///
/// Every call is independent: no retries, no caching. Non-2xx responses are
/// turned into [`Error::Http`], or [`Error::MalformedResponse`] when the body
/// is not the `{code, message}` object the remote normally sends.
#[derive(Debug, Clone)]
pub struct HttpClient {
    endpoint: String,
    client: Client,
    credentials: Credentials,
    api_key_name: String,
    query_timeout: Duration,
    command_timeout: Duration,
}

impl HttpClient {
    /// Creates an unauthenticated client with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(address: impl AsRef<str>) -> std::result::Result<Self, ProtocolError> {
        HttpConfig::new(address).into_client()
    }

    /// Returns the base API URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the web configurator URL of the remote.
    #[must_use]
    pub fn configuration_url(&self) -> String {
        configuration_url(&self.endpoint)
    }

    /// Joins a resource path onto the endpoint.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path.trim_start_matches('/'))
    }

    /// Returns the credential requests are currently sent with.
    #[must_use]
    pub fn active_credential(&self) -> Option<Credential<'_>> {
        self.credentials.active()
    }

    /// Returns the API key, if one is known.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.credentials.api_key.as_deref()
    }

    /// Returns the PIN, if one is known.
    #[must_use]
    pub fn pin(&self) -> Option<&str> {
        self.credentials.pin.as_deref()
    }

    /// Returns the name under which API keys are created.
    #[must_use]
    pub fn api_key_name(&self) -> &str {
        &self.api_key_name
    }

    /// Stores an API key, making it the active credential.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.credentials.api_key = Some(api_key.into());
    }

    fn timeout(&self, kind: RequestKind) -> Duration {
        match kind {
            RequestKind::Query => self.query_timeout,
            RequestKind::Command => self.command_timeout,
        }
    }

    /// Builds a request authenticated with the active credential.
    pub(crate) fn request(&self, method: Method, path: &str, kind: RequestKind) -> RequestBuilder {
        let request = self.unauthenticated(method, path, kind);
        match self.credentials.active() {
            Some(Credential::ApiKey(key)) => request.bearer_auth(key),
            Some(Credential::Pin(pin)) => request.basic_auth(AUTH_USERNAME, Some(pin)),
            None => request,
        }
    }

    /// Builds a request authenticated with the PIN, whatever the active
    /// credential is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if no PIN is configured.
    pub(crate) fn pin_request(
        &self,
        method: Method,
        path: &str,
        kind: RequestKind,
    ) -> Result<RequestBuilder> {
        let pin = self
            .credentials
            .pin
            .as_deref()
            .ok_or_else(|| Error::Authentication("a PIN is required for this call".to_string()))?;

        Ok(self
            .unauthenticated(method, path, kind)
            .basic_auth(AUTH_USERNAME, Some(pin)))
    }

    fn unauthenticated(&self, method: Method, path: &str, kind: RequestKind) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header(ACCEPT, "application/json")
            .timeout(self.timeout(kind))
    }

    /// Sends a request and returns the raw body of a successful response.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-2xx status.
    pub(crate) async fn execute(&self, request: RequestBuilder) -> Result<String> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await?;

        tracing::debug!(url = %url, status = status.as_u16(), body = %body, "Received HTTP response");

        if status.is_success() {
            Ok(body)
        } else {
            Err(error_from_body(status, &body))
        }
    }

    /// Sends a request and decodes the body as JSON.
    ///
    /// An empty body decodes to [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or invalid JSON.
    pub(crate) async fn execute_value(&self, request: RequestBuilder) -> Result<Value> {
        let body = self.execute(request).await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Issues an authenticated `GET` and decodes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or invalid JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!(path, "Sending HTTP GET");
        let body = self
            .execute(self.request(Method::GET, path, RequestKind::Query))
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Issues an authenticated command with an optional JSON body.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status or invalid JSON.
    pub async fn send_command<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value> {
        tracing::debug!(%method, path, "Sending HTTP command");
        let mut request = self.request(method, path, RequestKind::Command);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute_value(request).await
    }

    /// Issues an authenticated `HEAD` and returns the status code.
    ///
    /// Only transport failures are errors; any status is returned as is.
    ///
    /// # Errors
    ///
    /// Returns error if no response was received.
    pub async fn head(&self, path: &str) -> std::result::Result<StatusCode, ProtocolError> {
        tracing::debug!(path, "Sending HTTP HEAD");
        let response = self
            .request(Method::HEAD, path, RequestKind::Query)
            .send()
            .await?;
        Ok(response.status())
    }
}

/// Maps the body of a non-2xx response to an error.
fn error_from_body(status: StatusCode, body: &str) -> Error {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(error) => Error::Http {
            status: status.as_u16(),
            code: error.code,
            message: error.message,
        },
        Err(_) => Error::MalformedResponse {
            status: status.as_u16(),
            body: body.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::AUTHORIZATION;

    use super::*;

    fn authorization(client: &HttpClient) -> Option<String> {
        let request = client
            .request(Method::GET, "system", RequestKind::Query)
            .build()
            .unwrap();
        request
            .headers()
            .get(AUTHORIZATION)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[test]
    fn http_config_default_values() {
        let config = HttpConfig::new("192.168.1.20");
        assert_eq!(config.endpoint(), "http://192.168.1.20/api/");
        assert_eq!(config.api_key_name(), DEFAULT_API_KEY_NAME);
        assert_eq!(config.query_timeout(), Duration::from_secs(5));
        assert_eq!(config.command_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn http_config_builder_chain() {
        let config = HttpConfig::new("http://remote:8080/api")
            .with_api_key_name("home")
            .with_query_timeout(Duration::from_secs(2))
            .with_command_timeout(Duration::from_secs(20));

        assert_eq!(config.endpoint(), "http://remote:8080/api/");
        assert_eq!(config.api_key_name(), "home");
        assert_eq!(config.query_timeout(), Duration::from_secs(2));
        assert_eq!(config.command_timeout(), Duration::from_secs(20));
    }

    #[test]
    fn url_joins_relative_paths() {
        let client = HttpClient::new("remote").unwrap();
        assert_eq!(client.url("system"), "http://remote/api/system");
        assert_eq!(client.url("/activities"), "http://remote/api/activities");
        assert_eq!(client.configuration_url(), "http://remote/configurator/");
    }

    #[test]
    fn unauthenticated_client_sends_no_authorization() {
        let client = HttpClient::new("remote").unwrap();
        assert_eq!(client.active_credential(), None);
        assert_eq!(authorization(&client), None);
    }

    #[test]
    fn pin_uses_basic_auth() {
        let client = HttpConfig::new("remote").with_pin("1234").into_client().unwrap();
        assert_eq!(client.active_credential(), Some(Credential::Pin("1234")));
        assert_eq!(
            authorization(&client).as_deref(),
            Some("Basic d2ViLWNvbmZpZ3VyYXRvcjoxMjM0")
        );
    }

    #[test]
    fn api_key_is_preferred_over_pin() {
        let client = HttpConfig::new("remote")
            .with_pin("1234")
            .with_api_key("secret")
            .into_client()
            .unwrap();
        assert_eq!(client.active_credential(), Some(Credential::ApiKey("secret")));
        assert_eq!(authorization(&client).as_deref(), Some("Bearer secret"));
    }

    #[test]
    fn set_api_key_switches_active_credential() {
        let mut client = HttpConfig::new("remote").with_pin("1234").into_client().unwrap();
        client.set_api_key("fresh");
        assert_eq!(client.active_credential(), Some(Credential::ApiKey("fresh")));
        assert_eq!(client.pin(), Some("1234"));
    }

    #[test]
    fn pin_request_requires_pin() {
        let client = HttpConfig::new("remote").with_api_key("secret").into_client().unwrap();
        let result = client.pin_request(Method::POST, "auth/api_keys", RequestKind::Command);
        assert!(matches!(result, Err(Error::Authentication(_))));
    }

    #[test]
    fn request_kind_selects_timeout() {
        let client = HttpConfig::new("remote")
            .with_query_timeout(Duration::from_secs(1))
            .with_command_timeout(Duration::from_secs(7))
            .into_client()
            .unwrap();

        let query = client
            .request(Method::GET, "system", RequestKind::Query)
            .build()
            .unwrap();
        let command = client
            .request(Method::PUT, "entities/x/command", RequestKind::Command)
            .build()
            .unwrap();

        assert_eq!(query.timeout(), Some(&Duration::from_secs(1)));
        assert_eq!(command.timeout(), Some(&Duration::from_secs(7)));
    }

    #[test]
    fn error_body_with_code_and_message() {
        let err = error_from_body(
            StatusCode::NOT_FOUND,
            r#"{"code": "NOT_FOUND", "message": "No such entity"}"#,
        );
        assert!(matches!(
            err,
            Error::Http { status: 404, ref code, ref message }
                if code == "NOT_FOUND" && message == "No such entity"
        ));
    }

    #[test]
    fn error_body_not_json_is_malformed() {
        let err = error_from_body(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert!(matches!(err, Error::MalformedResponse { status: 502, .. }));
    }

    #[test]
    fn error_body_with_other_shape_is_malformed() {
        let err = error_from_body(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error": "boom"}"#);
        assert!(matches!(err, Error::MalformedResponse { status: 500, .. }));
    }
}
