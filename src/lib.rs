// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `alula_lib` - An async client for the Alula security alarm platform.
//!
//! This library talks to the Alula cloud API (`api.alula.net`) used by
//! Alula, Cove and other dealer-branded alarm panels.
//!
//! # Supported Features
//!
//! - **Authentication**: OAuth2 password login, refresh tokens, token restore
//! - **Resources**: user, devices (panels and cameras), zones, event log
//! - **Arm/Disarm**: Stay, Away, Night and disarm via JSON-RPC
//! - **Push notifications**: zone discovery, subscription reconciliation, renewal
//!
//! # Quick Start
//!
//! ```no_run
//! use alula_lib::AlulaClient;
//!
//! #[tokio::main]
//! async fn main() -> alula_lib::Result<()> {
//!     let client = AlulaClient::new()?;
//!     client.login("user@example.com", "password").await?;
//!
//!     for panel in client.get_panels().await? {
//!         println!("{} is {}", panel.name, panel.arming_state);
//!         if !panel.is_armed() {
//!             client.arm_stay(&panel.id).await?;
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Token Persistence
//!
//! The client keeps tokens in memory only. Save the refresh token and
//! restore it on the next run to skip the password login:
//!
//! ```no_run
//! use alula_lib::AlulaClient;
//!
//! # async fn example(saved_access: &str, saved_refresh: &str) -> alula_lib::Result<()> {
//! let client = AlulaClient::new()?;
//! client.restore_tokens(saved_access, saved_refresh, 900).await;
//!
//! // An expired access token is refreshed transparently.
//! let user = client.get_user().await?;
//! println!("logged in as {}", user.id);
//!
//! let refresh_token = client.refresh_token();
//! # let _ = refresh_token;
//! # Ok(())
//! # }
//! ```
//!
//! # Other Brands
//!
//! The default OAuth client credentials are the Cove app's. Other dealer
//! apps use their own:
//!
//! ```
//! use alula_lib::{AlulaClient, ClientConfig};
//!
//! let config = ClientConfig::new().with_client_credentials("client-id", "client-secret");
//! let client = AlulaClient::with_config(config).unwrap();
//! assert!(!client.is_authenticated());
//! ```
//!
//! # Errors
//!
//! Every fallible call returns [`Error`], which is one of [`AuthError`],
//! [`ApiError`] or [`ConnectionError`]. A `401` response triggers a single
//! token refresh and retry; nothing else is retried.

pub mod auth;
mod client;
pub mod command;
pub mod config;
pub mod discovery;
pub mod error;
pub mod model;
pub mod protocol;
pub mod subscription;
pub mod types;

pub use auth::{TokenInfo, TokenState};
pub use client::AlulaClient;
pub use command::{ArmAction, HelixCommand, RenewNotifications, RpcCommand};
pub use config::ClientConfig;
pub use discovery::DiscoveredZone;
pub use error::{ApiError, AuthError, ConnectionError, Error, Result};
pub use model::{Device, EventLogEntry, TroubleFlags, User, Zone, ZoneStatus};
pub use protocol::HttpClient;
pub use subscription::ZoneSubscriptionKey;
pub use types::{ArmingState, DeviceType};
