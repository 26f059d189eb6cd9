// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client configuration.

use std::time::Duration;

use reqwest::Client;

use crate::error::ConnectionError;

/// Connection and identity settings for an [`AlulaClient`](crate::AlulaClient).
///
/// The OAuth2 client identity defaults to the Cove Connect mobile app, which
/// works for Cove and other Alula-powered accounts. These are app-level
/// credentials, not user secrets.
///
/// # Examples
///
/// ```
/// use alula_lib::ClientConfig;
/// use std::time::Duration;
///
/// // Defaults
/// let config = ClientConfig::new();
/// assert_eq!(config.base_url(), "https://api.alula.net");
///
/// // With all options
/// let config = ClientConfig::new()
///     .with_base_url("https://api.example.net/")
///     .with_client_credentials("my-client-id", "my-client-secret")
///     .with_timeout(Duration::from_secs(5))
///     .with_user_agent("my-app/1.0");
/// assert_eq!(config.token_url(), "https://api.example.net/oauth/token");
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    base_url: String,
    client_id: String,
    client_secret: String,
    timeout: Duration,
    user_agent: String,
}

impl ClientConfig {
    /// Default API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.alula.net";
    /// OAuth2 client id of the Cove Connect app.
    pub const DEFAULT_CLIENT_ID: &'static str = "30d6c020-8b9d-11ed-a23f-9d00c9041c6e";
    /// OAuth2 client secret of the Cove Connect app.
    pub const DEFAULT_CLIENT_SECRET: &'static str =
        "a867fb60cbe5803a54bc2bd03b30031c30bc8088d11de59daa36669661d7b2bb";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a configuration with the default identity and base URL.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            client_id: Self::DEFAULT_CLIENT_ID.to_string(),
            client_secret: Self::DEFAULT_CLIENT_SECRET.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            user_agent: concat!("alula_lib/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Sets the API base URL. A trailing `/` is dropped.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Sets the OAuth2 client identity.
    #[must_use]
    pub fn with_client_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = client_id.into();
        self.client_secret = client_secret.into();
        self
    }

    /// Sets the request timeout used when the client builds its own HTTP client.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` sent with every request.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the OAuth2 client id.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Returns the OAuth2 client secret.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the `User-Agent` value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the OAuth2 token endpoint URL.
    #[must_use]
    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.base_url)
    }

    /// Returns the absolute URL for an API path such as `/api/v1/self`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Builds a `reqwest` client honoring the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the TLS backend cannot be initialized.
    pub(crate) fn build_http_client(&self) -> Result<Client, ConnectionError> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ConnectionError::new("building HTTP client", e))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = ClientConfig::new();
        assert_eq!(config.base_url(), "https://api.alula.net");
        assert_eq!(config.client_id(), ClientConfig::DEFAULT_CLIENT_ID);
        assert_eq!(config.client_secret(), ClientConfig::DEFAULT_CLIENT_SECRET);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent().starts_with("alula_lib/"));
    }

    #[test]
    fn config_trims_trailing_slash() {
        let config = ClientConfig::new().with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
        assert_eq!(config.url("/rpc/v1"), "http://127.0.0.1:8080/rpc/v1");
    }

    #[test]
    fn config_token_url() {
        let config = ClientConfig::new();
        assert_eq!(config.token_url(), "https://api.alula.net/oauth/token");
    }

    #[test]
    fn config_with_client_credentials() {
        let config = ClientConfig::new().with_client_credentials("id", "secret");
        assert_eq!(config.client_id(), "id");
        assert_eq!(config.client_secret(), "secret");
    }

    #[test]
    fn config_debug_redacts_secret() {
        let config = ClientConfig::new().with_client_credentials("id", "hunter2");
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
