// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OAuth2 authentication and token lifecycle.
//!
//! The [`Authenticator`] owns the current [`TokenState`] and performs the
//! two grant exchanges the platform supports:
//!
//! - `password`: username plus account password or panel PIN
//! - `refresh_token`: trade the refresh token for a new token pair
//!
//! All exchanges run under a single async mutex, so when many requests
//! notice an expired token at once only the first one refreshes it; the
//! others wait and then find a valid token.

mod token;

pub use token::{TokenInfo, TokenState};

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, USER_AGENT};
use tokio::sync::Mutex;

use crate::config::ClientConfig;
use crate::error::{ApiError, AuthError, ConnectionError, Result};

/// Context of transport errors raised by the token endpoint.
const TOKEN_CONTEXT: &str = "POST /oauth/token";

/// Performs token exchanges and hands out valid access tokens.
///
/// Reads of the token state are cheap and synchronous. Every write happens
/// while the exchange lock is held, and replaces the whole state at once.
pub struct Authenticator {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    exchange_lock: Mutex<()>,
    state: RwLock<TokenState>,
}

impl Authenticator {
    /// Creates an authenticator with no tokens.
    pub(crate) fn new(http: reqwest::Client, config: Arc<ClientConfig>) -> Self {
        Self {
            http,
            config,
            exchange_lock: Mutex::new(()),
            state: RwLock::new(TokenState::default()),
        }
    }

    /// Returns a snapshot of the current token state.
    #[must_use]
    pub fn token_state(&self) -> TokenState {
        self.state.read().clone()
    }

    /// Returns `true` if the current access token is present and not about to expire.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_valid()
    }

    /// Returns the current access token.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.state.read().access_token().map(str::to_owned)
    }

    /// Returns the current refresh token. Persist this to re-authenticate
    /// without the password.
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.state.read().refresh_token().map(str::to_owned)
    }

    /// Returns when the current access token expires.
    #[must_use]
    pub fn token_expiry(&self) -> DateTime<Utc> {
        self.state.read().expires_at()
    }

    /// Authenticates with a username and password (or panel PIN).
    ///
    /// # Errors
    ///
    /// - [`AuthError::Rejected`] if the credentials are refused
    /// - [`ConnectionError`] if the token endpoint cannot be reached
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenInfo> {
        let _guard = self.exchange_lock.lock().await;
        self.exchange(&[
            ("grant_type", "password"),
            ("username", username),
            ("password", password),
        ])
        .await
    }

    /// Trades a refresh token for a new token pair.
    ///
    /// Uses `refresh_token` when given, otherwise the stored refresh token.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NoRefreshToken`] if neither is available; no request is made
    /// - [`AuthError::Rejected`] if the refresh token is invalid or expired
    pub async fn refresh(&self, refresh_token: Option<&str>) -> Result<TokenInfo> {
        let _guard = self.exchange_lock.lock().await;
        let token = match refresh_token.filter(|t| !t.is_empty()) {
            Some(token) => token.to_owned(),
            None => self.refresh_token().ok_or(AuthError::NoRefreshToken)?,
        };
        self.exchange_refresh(&token).await
    }

    /// Installs tokens from caller storage without contacting the server.
    ///
    /// At most [`TokenState::RESTORE_MAX_LIFETIME`] seconds of remaining
    /// lifetime are assumed, whatever `expires_in` says. Waits for any
    /// exchange in flight, so a finishing refresh cannot overwrite the
    /// restored tokens.
    pub async fn restore_tokens(&self, access_token: &str, refresh_token: &str, expires_in: u64) {
        let _guard = self.exchange_lock.lock().await;
        let restored = TokenState::restored(access_token, refresh_token, expires_in, Utc::now());
        tracing::debug!(expires_at = %restored.expires_at(), "Restored tokens");
        *self.state.write() = restored;
    }

    /// Returns a usable access token, refreshing first if needed.
    ///
    /// Runs entirely under the exchange lock.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NotLoggedIn`] if the token is unusable and there is no refresh token
    /// - any error from the refresh exchange
    pub async fn ensure_valid_token(&self) -> Result<String> {
        let _guard = self.exchange_lock.lock().await;
        let snapshot = self.token_state();

        if snapshot.is_valid()
            && let Some(token) = snapshot.access_token()
        {
            return Ok(token.to_owned());
        }

        let Some(refresh_token) = snapshot.refresh_token() else {
            return Err(AuthError::NotLoggedIn.into());
        };

        tracing::debug!("Access token expired, refreshing");
        let info = self.exchange_refresh(refresh_token).await?;
        Ok(info.access_token)
    }

    /// Refresh exchange; caller must hold the exchange lock.
    async fn exchange_refresh(&self, refresh_token: &str) -> Result<TokenInfo> {
        self.exchange(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    /// Posts a grant to the token endpoint and stores the result.
    ///
    /// Caller must hold the exchange lock.
    async fn exchange(&self, grant: &[(&str, &str)]) -> Result<TokenInfo> {
        let mut form = vec![
            ("client_id", self.config.client_id()),
            ("client_secret", self.config.client_secret()),
        ];
        form.extend_from_slice(grant);

        let grant_type = grant
            .iter()
            .find(|(key, _)| *key == "grant_type")
            .map_or("unknown", |(_, value)| *value);

        tracing::debug!(grant_type, "Requesting token");

        let response = self
            .http
            .post(self.config.token_url())
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, self.config.user_agent())
            .form(&form)
            .send()
            .await
            .map_err(|e| ConnectionError::new(TOKEN_CONTEXT, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ConnectionError::new(TOKEN_CONTEXT, e))?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::BAD_REQUEST {
            return Err(AuthError::Rejected(rejection_message(status, &body)).into());
        }

        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let info: TokenInfo = serde_json::from_str(&body).map_err(ApiError::from)?;
        *self.state.write() = TokenState::from_exchange(&info, Utc::now());

        tracing::debug!(grant_type, expires_in = info.expires_in, "Token acquired");
        Ok(info)
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

/// Picks the message for a 400/401 answer from the token endpoint.
fn rejection_message(status: StatusCode, body: &str) -> String {
    let description = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error_description")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        });

    match description {
        Some(description) => description,
        None if status == StatusCode::UNAUTHORIZED => "Invalid credentials".to_string(),
        None => format!("Auth error: {body}"),
    }
}
