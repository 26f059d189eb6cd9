// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OAuth2 token state.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Token payload returned by the OAuth2 token endpoint.
///
/// # Examples
///
/// ```
/// use alula_lib::auth::TokenInfo;
///
/// let json = r#"{"access_token": "abc", "refresh_token": "def"}"#;
/// let info: TokenInfo = serde_json::from_str(json).unwrap();
/// assert_eq!(info.expires_in, 900);
/// assert_eq!(info.token_type, "bearer");
/// assert_eq!(info.scope, "");
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Bearer token for API calls.
    pub access_token: String,
    /// Token used to obtain a new access token.
    pub refresh_token: String,
    /// Lifetime of the access token in seconds.
    #[serde(default = "TokenInfo::default_expires_in")]
    pub expires_in: u64,
    /// Token type, normally `bearer`.
    #[serde(default = "TokenInfo::default_token_type")]
    pub token_type: String,
    /// Granted scope.
    #[serde(default)]
    pub scope: String,
}

impl TokenInfo {
    /// Access token lifetime assumed when the server does not send one (15 minutes).
    pub const DEFAULT_EXPIRES_IN: u64 = 900;

    fn default_expires_in() -> u64 {
        Self::DEFAULT_EXPIRES_IN
    }

    fn default_token_type() -> String {
        "bearer".to_string()
    }
}

impl fmt::Debug for TokenInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenInfo")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .finish()
    }
}

/// The current access token, refresh token and access token expiry.
///
/// The state is replaced as a whole on every login, refresh or restore;
/// it is never patched field by field. When an access token is present,
/// `expires_at` is its real expiry.
///
/// Serializable so callers can persist it between runs.
///
/// # Examples
///
/// ```
/// use alula_lib::auth::TokenState;
/// use chrono::{TimeDelta, Utc};
///
/// let empty = TokenState::default();
/// assert!(!empty.is_valid());
///
/// let fresh = TokenState::new("access", "refresh", Utc::now() + TimeDelta::minutes(15));
/// assert!(fresh.is_valid());
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenState {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: DateTime<Utc>,
}

impl TokenState {
    /// A token this close to its expiry is treated as already expired.
    pub const REFRESH_BUFFER: TimeDelta = TimeDelta::seconds(180);

    /// Upper bound on the lifetime assumed for restored tokens.
    pub const RESTORE_MAX_LIFETIME: u64 = 300;

    /// Creates a state holding both tokens with an explicit expiry.
    #[must_use]
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: Some(access_token.into()),
            refresh_token: Some(refresh_token.into()),
            expires_at,
        }
    }

    /// Builds the state produced by a successful token exchange at `now`.
    #[must_use]
    pub fn from_exchange(info: &TokenInfo, now: DateTime<Utc>) -> Self {
        Self::new(
            info.access_token.clone(),
            info.refresh_token.clone(),
            expiry_after(now, info.expires_in),
        )
    }

    /// Builds the state for tokens restored from caller storage at `now`.
    ///
    /// The remaining lifetime of a persisted access token is unknown, so at
    /// most [`RESTORE_MAX_LIFETIME`](Self::RESTORE_MAX_LIFETIME) seconds are
    /// assumed regardless of `expires_in`.
    #[must_use]
    pub fn restored(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_in: u64,
        now: DateTime<Utc>,
    ) -> Self {
        let lifetime = expires_in.min(Self::RESTORE_MAX_LIFETIME);
        Self::new(access_token, refresh_token, expiry_after(now, lifetime))
    }

    /// Returns the access token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Returns the refresh token, if any.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Returns when the access token expires.
    ///
    /// For an empty state this is the Unix epoch.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns `true` if the access token is usable right now.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Returns `true` if an access token exists and `now` is before its
    /// expiry minus [`REFRESH_BUFFER`](Self::REFRESH_BUFFER).
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.access_token.is_some()
            && self
                .expires_at
                .checked_sub_signed(Self::REFRESH_BUFFER)
                .is_some_and(|deadline| now < deadline)
    }
}

impl Default for TokenState {
    fn default() -> Self {
        Self {
            access_token: None,
            refresh_token: None,
            expires_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

impl fmt::Debug for TokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print token material
        f.debug_struct("TokenState")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

fn expiry_after(now: DateTime<Utc>, seconds: u64) -> DateTime<Utc> {
    i64::try_from(seconds)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .and_then(|delta| now.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
