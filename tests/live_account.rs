// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests against a real Alula account.
//!
//! These tests talk to the production API and are ignored by default.
//! They only read state; nothing is armed or disarmed.
//! Run with: `cargo test --test live_account -- --ignored --test-threads=1`
//!
//! # Environment Variables
//!
//! - `ALULA_USERNAME` - Account username
//! - `ALULA_PASSWORD` - Account password or panel PIN
//! - `ALULA_BASE_URL` - API base URL (default: `https://api.alula.net`)
//!
//! # Example
//!
//! ```bash
//! export ALULA_USERNAME=c445792
//! export ALULA_PASSWORD=17327
//! cargo test --test live_account -- --ignored --test-threads=1
//! ```

use std::env;

use alula_lib::{AlulaClient, ClientConfig};

// =============================================================================
// Test Configuration from Environment Variables
// =============================================================================

struct AccountConfig {
    username: String,
    password: String,
    base_url: String,
}

impl AccountConfig {
    fn from_env() -> Self {
        Self {
            username: env::var("ALULA_USERNAME").expect("ALULA_USERNAME not set"),
            password: env::var("ALULA_PASSWORD").expect("ALULA_PASSWORD not set"),
            base_url: env::var("ALULA_BASE_URL")
                .unwrap_or_else(|_| ClientConfig::DEFAULT_BASE_URL.to_string()),
        }
    }
}

async fn logged_in_client() -> AlulaClient {
    let account = AccountConfig::from_env();
    let client =
        AlulaClient::with_config(ClientConfig::new().with_base_url(account.base_url)).unwrap();
    client
        .login(&account.username, &account.password)
        .await
        .expect("login failed");
    client
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
#[ignore = "requires a real Alula account"]
async fn login_and_refresh() {
    let client = logged_in_client().await;
    assert!(client.is_authenticated());

    let first = client.access_token();
    client.refresh(None).await.unwrap();
    assert!(client.is_authenticated());
    assert_ne!(client.access_token(), first);
}

#[tokio::test]
#[ignore = "requires a real Alula account"]
async fn restored_tokens_work() {
    let client = logged_in_client().await;
    let access = client.access_token().unwrap();
    let refresh = client.refresh_token().unwrap();

    let restored = AlulaClient::with_config(
        ClientConfig::new().with_base_url(AccountConfig::from_env().base_url),
    )
    .unwrap();
    restored.restore_tokens(&access, &refresh, 900).await;

    let user = restored.get_user().await.unwrap();
    assert!(!user.id.is_empty());
}

// =============================================================================
// Resources
// =============================================================================

#[tokio::test]
#[ignore = "requires a real Alula account"]
async fn read_account() {
    let client = logged_in_client().await;

    let user = client.get_user().await.unwrap();
    println!("user {} ({})", user.id, user.user_type);

    let panels = client.get_panels().await.unwrap();
    assert!(!panels.is_empty(), "account has no panels");
    for panel in &panels {
        println!(
            "panel {} '{}' online={} state={}",
            panel.id, panel.name, panel.online, panel.arming_state
        );
    }

    let entries = client
        .get_event_log(&panels[0].id, AlulaClient::DEFAULT_EVENT_LOG_LIMIT, None)
        .await
        .unwrap();
    assert!(entries.len() <= AlulaClient::DEFAULT_EVENT_LOG_LIMIT as usize);

    let zones = client.get_zones().await.unwrap();
    println!("{} zone subscriptions", zones.len());
}

#[tokio::test]
#[ignore = "requires a real Alula account"]
async fn discover_zones() {
    let client = logged_in_client().await;
    let panels = client.get_panels().await.unwrap();
    let panel = panels.first().expect("account has no panels");

    let zones = client.discover_zones(&panel.id).await.unwrap();
    for (index, zone) in &zones {
        assert_eq!(*index, zone.zone_index);
        assert_ne!(*index, 0);
        println!("zone {index}: {:?} ({})", zone.zone_name, zone.zone_type);
    }
}
