// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Alula client.
//!
//! Every failure surfaced by this library falls into one of three kinds:
//! authentication problems, API-level rejections, and transport failures.
//! Raw `reqwest` errors never escape on their own; they are always wrapped
//! in a [`ConnectionError`] that names the operation that failed.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Authentication failed or no usable token is available.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The API answered, but rejected the request.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The API could not be reached.
    #[error("connection error: {0}")]
    Connection(#[from] ConnectionError),
}

impl Error {
    /// Returns the HTTP status or RPC error code carried by an API error.
    ///
    /// Authentication and connection errors carry no code.
    #[must_use]
    pub fn status_code(&self) -> Option<i64> {
        match self {
            Self::Api(err) => err.status_code(),
            Self::Auth(_) | Self::Connection(_) => None,
        }
    }

    /// Returns `true` if this is an authentication error.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

/// Errors related to obtaining or using OAuth2 tokens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The token endpoint rejected the grant (HTTP 400 or 401).
    ///
    /// The message is the server's `error_description` when present.
    #[error("{0}")]
    Rejected(String),

    /// A refresh was requested but no refresh token is known.
    #[error("No refresh token available")]
    NoRefreshToken,

    /// The access token is missing or expired and cannot be refreshed.
    #[error("Access token expired and no refresh token available. Call login() first.")]
    NotLoggedIn,

    /// The API still answered 401 after a fresh token was obtained.
    #[error("Authentication failed after refresh")]
    RejectedAfterRefresh,
}

/// Errors returned by the API for an authenticated request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// A JSON-RPC call returned an `error` object.
    #[error("RPC error ({method}): {message}")]
    Rpc {
        /// The RPC method that failed.
        method: String,
        /// The RPC error code, if the server sent one.
        code: Option<i64>,
        /// The RPC error message.
        message: String,
    },

    /// An arm/disarm command was refused because the panel does not allow
    /// remote interactive commands.
    #[error(
        "Arm/disarm command denied: interactiveEnabled is off on device {device_id}. \
         Contact your alarm provider (e.g., Cove support) and ask them to enable \
         interactive services on your device."
    )]
    InteractiveServicesDisabled {
        /// The panel that refused the command.
        device_id: String,
    },

    /// A successful response did not have the expected JSON shape.
    #[error("invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl ApiError {
    /// RPC error code meaning "interactive services disabled" on the panel.
    pub const INTERACTIVE_DISABLED_CODE: i64 = 6;

    /// Returns the HTTP status or RPC error code for this error.
    #[must_use]
    pub fn status_code(&self) -> Option<i64> {
        match self {
            Self::Http { status, .. } => Some(i64::from(*status)),
            Self::Rpc { code, .. } => *code,
            Self::InteractiveServicesDisabled { .. } => Some(Self::INTERACTIVE_DISABLED_CODE),
            Self::InvalidResponse(_) => None,
        }
    }
}

/// A transport-level failure: DNS, TCP, TLS, timeout, or an unreadable body.
#[derive(Debug, Error)]
#[error("{context}: {source}")]
pub struct ConnectionError {
    context: String,
    #[source]
    source: reqwest::Error,
}

impl ConnectionError {
    /// Wraps a transport error with a description of what was being attempted.
    pub(crate) fn new(context: impl Into<String>, source: reqwest::Error) -> Self {
        Self {
            context: context.into(),
            source,
        }
    }

    /// Returns the operation that failed, e.g. `GET /api/v1/devices`.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Returns `true` if the underlying failure was a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.source.is_timeout()
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_error_messages() {
        assert_eq!(
            AuthError::NoRefreshToken.to_string(),
            "No refresh token available"
        );
        assert_eq!(
            AuthError::RejectedAfterRefresh.to_string(),
            "Authentication failed after refresh"
        );
        assert_eq!(
            AuthError::Rejected("Invalid username or password".to_string()).to_string(),
            "Invalid username or password"
        );
    }

    #[test]
    fn error_from_auth_error() {
        let err: Error = AuthError::NoRefreshToken.into();
        assert!(err.is_auth());
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn api_error_http_status_code() {
        let err = ApiError::Http {
            status: 403,
            body: "forbidden".to_string(),
        };
        assert_eq!(err.status_code(), Some(403));
        assert_eq!(err.to_string(), "HTTP 403: forbidden");
    }

    #[test]
    fn api_error_rpc_without_code() {
        let err = ApiError::Rpc {
            method: "helix.command".to_string(),
            code: None,
            message: "boom".to_string(),
        };
        assert_eq!(err.status_code(), None);
        assert_eq!(err.to_string(), "RPC error (helix.command): boom");
    }

    #[test]
    fn interactive_disabled_keeps_code_six() {
        let err: Error = ApiError::InteractiveServicesDisabled {
            device_id: "dev-1".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), Some(6));
        assert!(err.to_string().contains("interactive services"));
        assert!(err.to_string().contains("dev-1"));
    }
}
