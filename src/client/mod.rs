// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level client for the Alula API.
//!
//! [`AlulaClient`] is the caller-facing surface: authentication, resource
//! reads, notification renewal and arm/disarm commands. Zone discovery and
//! subscription reconciliation live in [`discovery`](crate::discovery) and
//! [`subscription`](crate::subscription) as further inherent methods.
//!
//! Nothing fetched is cached; each call returns fresh records.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::auth::{TokenInfo, TokenState};
use crate::command::{ArmAction, HelixCommand, RenewNotifications};
use crate::config::ClientConfig;
use crate::error::{ApiError, Error, Result};
use crate::model::{Device, EventLogEntry, User, Zone, data_items};
use crate::protocol::HttpClient;
use crate::subscription::ZONE_SUBSCRIPTIONS_PATH;

/// Async client for the Alula security platform.
///
/// # Examples
///
/// ```no_run
/// use alula_lib::AlulaClient;
///
/// # async fn example() -> alula_lib::Result<()> {
/// let client = AlulaClient::new()?;
/// client.login("c445792", "17327").await?;
///
/// for device in client.get_panels().await? {
///     println!("{}: {}", device.name, device.arming_state);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AlulaClient {
    http: HttpClient,
}

impl AlulaClient {
    /// Page size for device and zone listings.
    pub const DEFAULT_PAGE_SIZE: u32 = 200;
    /// Number of event log entries fetched by default.
    pub const DEFAULT_EVENT_LOG_LIMIT: u32 = 10;

    /// Creates a client with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::new())
    }

    /// Creates a client with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Creates a client sharing an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http_client(http: reqwest::Client, config: ClientConfig) -> Self {
        Self {
            http: HttpClient::with_http_client(http, config),
        }
    }

    /// Returns the underlying authenticated HTTP client, for endpoints this
    /// crate does not wrap.
    #[must_use]
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    // ── Authentication ────────────────────────────────────────────────

    /// Returns `true` if a valid, non-expiring access token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.http.authenticator().is_authenticated()
    }

    /// Returns the current access token.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.http.authenticator().access_token()
    }

    /// Returns the current refresh token. Persist it to skip the password next time.
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.http.authenticator().refresh_token()
    }

    /// Returns when the current access token expires.
    #[must_use]
    pub fn token_expiry(&self) -> DateTime<Utc> {
        self.http.authenticator().token_expiry()
    }

    /// Returns a snapshot of the token state, suitable for persisting.
    #[must_use]
    pub fn token_state(&self) -> TokenState {
        self.http.authenticator().token_state()
    }

    /// Logs in with a username and password or panel PIN.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`](crate::AuthError::Rejected) for bad
    /// credentials and a connection error if the API is unreachable.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenInfo> {
        self.http.authenticator().login(username, password).await
    }

    /// Refreshes the access token with `refresh_token` or the stored one.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NoRefreshToken`](crate::AuthError::NoRefreshToken)
    /// without contacting the API when no refresh token is known.
    pub async fn refresh(&self, refresh_token: Option<&str>) -> Result<TokenInfo> {
        self.http.authenticator().refresh(refresh_token).await
    }

    /// Restores tokens saved by the caller. No request is made.
    ///
    /// At most five minutes of validity are assumed for the access token.
    /// A token exchange already in flight finishes first.
    pub async fn restore_tokens(&self, access_token: &str, refresh_token: &str, expires_in: u64) {
        self.http
            .authenticator()
            .restore_tokens(access_token, refresh_token, expires_in)
            .await;
    }

    // ── Resources ─────────────────────────────────────────────────────

    /// Returns the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be decoded.
    pub async fn get_user(&self) -> Result<User> {
        let response = self
            .http
            .get("/api/v1/self", &[omit_relationships()])
            .await?;
        let data = response.get("data").unwrap_or(&Value::Null);
        Ok(User::from_api(data).map_err(ApiError::from)?)
    }

    /// Returns all devices (panels and cameras) on the account.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be decoded.
    pub async fn get_devices(&self) -> Result<Vec<Device>> {
        let response = self
            .http
            .get(
                "/api/v1/devices",
                &[
                    omit_relationships(),
                    ("page[size]", Self::DEFAULT_PAGE_SIZE.to_string()),
                ],
            )
            .await?;
        decode_list(&response, Device::from_api)
    }

    /// Returns only the alarm panels.
    ///
    /// # Errors
    ///
    /// See [`get_devices`](Self::get_devices).
    pub async fn get_panels(&self) -> Result<Vec<Device>> {
        let mut devices = self.get_devices().await?;
        devices.retain(Device::is_panel);
        Ok(devices)
    }

    /// Returns only the cameras.
    ///
    /// # Errors
    ///
    /// See [`get_devices`](Self::get_devices).
    pub async fn get_cameras(&self) -> Result<Vec<Device>> {
        let mut devices = self.get_devices().await?;
        devices.retain(Device::is_camera);
        Ok(devices)
    }

    /// Returns the account's zone notification subscriptions.
    ///
    /// Only zones with a subscription are listed. Call
    /// [`discover_zones`](Self::discover_zones) and
    /// [`ensure_zone_subscriptions`](Self::ensure_zone_subscriptions) first
    /// to subscribe every zone.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be decoded.
    pub async fn get_zones(&self) -> Result<Vec<Zone>> {
        let response = self
            .http
            .get(
                ZONE_SUBSCRIPTIONS_PATH,
                &[
                    ("page[size]", Self::DEFAULT_PAGE_SIZE.to_string()),
                    ("sort", "id".to_string()),
                ],
            )
            .await?;
        decode_list(&response, |data| Zone::from_api(data, None))
    }

    /// Returns recent event log entries for a device, newest first.
    ///
    /// # Arguments
    ///
    /// * `device_id` - The device UUID
    /// * `limit` - Maximum number of entries
    /// * `since` - Only entries recorded after this ISO 8601 timestamp
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be decoded.
    pub async fn get_event_log(
        &self,
        device_id: &str,
        limit: u32,
        since: Option<&str>,
    ) -> Result<Vec<EventLogEntry>> {
        let mut query = vec![
            omit_relationships(),
            ("page[size]", limit.to_string()),
            ("sort", "-dateEntered".to_string()),
        ];
        if let Some(since) = since {
            query.push(("filter[dateEntered][$gt]", since.to_string()));
        }

        let path = format!(
            "/api/v1/devices/{}/eventlog",
            urlencoding::encode(device_id)
        );
        let response = self.http.get(&path, &query).await?;
        decode_list(&response, EventLogEntry::from_api)
    }

    // ── Notifications ─────────────────────────────────────────────────

    /// Renews push notification subscriptions for `ttl`.
    ///
    /// Returns the `success` flag of the RPC result.
    ///
    /// # Errors
    ///
    /// Returns error if the RPC call fails.
    pub async fn renew_notifications(&self, ttl: Duration) -> Result<bool> {
        let result = self
            .http
            .send_command(&RenewNotifications::new(ttl))
            .await?;
        Ok(result
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false))
    }

    // ── Arm / Disarm ──────────────────────────────────────────────────

    /// Arms the panel in Stay mode.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InteractiveServicesDisabled`] when the panel does
    /// not accept remote commands, or any other RPC error unchanged.
    pub async fn arm_stay(&self, device_id: &str) -> Result<Value> {
        self.send_arm_action(device_id, ArmAction::ArmStay).await
    }

    /// Arms the panel in Away mode.
    ///
    /// # Errors
    ///
    /// See [`arm_stay`](Self::arm_stay).
    pub async fn arm_away(&self, device_id: &str) -> Result<Value> {
        self.send_arm_action(device_id, ArmAction::ArmAway).await
    }

    /// Arms the panel in Night mode.
    ///
    /// # Errors
    ///
    /// See [`arm_stay`](Self::arm_stay).
    pub async fn arm_night(&self, device_id: &str) -> Result<Value> {
        self.send_arm_action(device_id, ArmAction::ArmNight).await
    }

    /// Disarms the panel.
    ///
    /// # Errors
    ///
    /// See [`arm_stay`](Self::arm_stay).
    pub async fn disarm(&self, device_id: &str) -> Result<Value> {
        self.send_arm_action(device_id, ArmAction::Disarm).await
    }

    /// Sends a `helix.command` and returns the RPC result.
    ///
    /// RPC error code 6 means the dealer has not enabled interactive
    /// services on the panel; it is reported as
    /// [`ApiError::InteractiveServicesDisabled`] (still code 6).
    ///
    /// # Errors
    ///
    /// See [`arm_stay`](Self::arm_stay).
    pub async fn send_arm_action(&self, device_id: &str, action: ArmAction) -> Result<Value> {
        let command = HelixCommand::new(device_id, action);
        match self.http.send_command(&command).await {
            Err(Error::Api(ApiError::Rpc {
                code: Some(code), ..
            })) if code == ApiError::INTERACTIVE_DISABLED_CODE => {
                tracing::debug!(device_id, %action, "Panel refused command: interactive services disabled");
                Err(ApiError::InteractiveServicesDisabled {
                    device_id: device_id.to_owned(),
                }
                .into())
            }
            other => other,
        }
    }
}

fn omit_relationships() -> (&'static str, String) {
    ("customOptions[omitRelationships]", "true".to_string())
}

/// Decodes every element of a response's `data` array.
fn decode_list<T>(
    response: &Value,
    decode: impl Fn(&Value) -> std::result::Result<T, serde_json::Error>,
) -> Result<Vec<T>> {
    data_items(response)
        .iter()
        .map(decode)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| ApiError::from(e).into())
}
