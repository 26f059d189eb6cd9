// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authenticated HTTP requests against the Alula API.

use std::sync::Arc;

use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Method, Response, StatusCode};
use serde_json::Value;

use crate::auth::Authenticator;
use crate::config::ClientConfig;
use crate::error::{ApiError, AuthError, ConnectionError, Result};

/// HTTP client for authenticated API calls.
///
/// Every call goes through the same sequence:
///
/// 1. obtain a valid access token (refreshing it if it is about to expire)
/// 2. send the request with `Authorization: Bearer <token>`
/// 3. on `401 Unauthorized`, refresh once and resend the same request;
///    a second 401 is an [`AuthError::RejectedAfterRefresh`]
///
/// Any other non-success status becomes an [`ApiError::Http`]; transport
/// failures become a [`ConnectionError`] naming the method and path.
#[derive(Debug)]
pub struct HttpClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    auth: Authenticator,
}

impl HttpClient {
    /// Creates a client that builds its own `reqwest::Client` from `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = config.build_http_client()?;
        Ok(Self::with_http_client(http, config))
    }

    /// Creates a client on top of an existing `reqwest::Client`.
    ///
    /// The caller keeps control of the client's lifecycle, pooling and
    /// timeouts.
    #[must_use]
    pub fn with_http_client(http: reqwest::Client, config: ClientConfig) -> Self {
        let config = Arc::new(config);
        let auth = Authenticator::new(http.clone(), Arc::clone(&config));
        Self { http, config, auth }
    }

    /// Returns the authenticator owning this client's tokens.
    #[must_use]
    pub fn authenticator(&self) -> &Authenticator {
        &self.auth
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends an authenticated request and decodes the JSON response.
    ///
    /// An empty success body decodes to [`Value::Null`].
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `path` - API path starting with `/`, e.g. `/api/v1/devices`
    /// * `body` - optional JSON body
    /// * `query` - query string pairs, already in API form (`page[size]`, ...)
    ///
    /// # Errors
    ///
    /// - [`AuthError`] if no valid token can be obtained, or the request is
    ///   still unauthorized after a refresh
    /// - [`ApiError::Http`] for any other non-success status
    /// - [`ConnectionError`] for transport failures
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &[(&str, String)],
    ) -> Result<Value> {
        let token = self.auth.ensure_valid_token().await?;
        let response = self.send(&method, path, body, query, &token).await?;

        let response = if response.status() == StatusCode::UNAUTHORIZED {
            tracing::debug!(%method, path, "Got 401, refreshing token and retrying");
            let info = self.auth.refresh(None).await?;
            let retry = self
                .send(&method, path, body, query, &info.access_token)
                .await?;
            if retry.status() == StatusCode::UNAUTHORIZED {
                return Err(AuthError::RejectedAfterRefresh.into());
            }
            retry
        } else {
            response
        };

        Self::read_json(response, &method, path).await
    }

    /// Sends a `GET` request.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        self.request(Method::GET, path, None, query).await
    }

    /// Sends a `POST` request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`request`](Self::request).
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.request(Method::POST, path, Some(body), &[]).await
    }

    /// Issues one HTTP attempt.
    async fn send(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Value>,
        query: &[(&str, String)],
        token: &str,
    ) -> Result<Response> {
        let mut request = self
            .http
            .request(method.clone(), self.config.url(path))
            .bearer_auth(token)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, self.config.user_agent());

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ConnectionError::new(format!("{method} {path}"), e))?;

        tracing::trace!(%method, path, status = response.status().as_u16(), "Received HTTP response");
        Ok(response)
    }

    /// Checks the status and decodes the body.
    async fn read_json(response: Response, method: &Method, path: &str) -> Result<Value> {
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ConnectionError::new(format!("{method} {path}"), e))?;

        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            }
            .into());
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| ApiError::InvalidResponse(e).into())
    }
}
