// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Push notification commands.

use std::time::Duration;

use serde_json::{Value, json};

use crate::command::RpcCommand;

/// Renews the account's push notification subscriptions.
///
/// # Examples
///
/// ```
/// use alula_lib::command::{RenewNotifications, RpcCommand};
/// use std::time::Duration;
///
/// let cmd = RenewNotifications::default();
/// assert_eq!(cmd.params(), serde_json::json!({"ttl": 2_419_200}));
///
/// let cmd = RenewNotifications::new(Duration::from_secs(3600));
/// assert_eq!(cmd.params(), serde_json::json!({"ttl": 3600}));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenewNotifications {
    ttl: Duration,
}

impl RenewNotifications {
    /// Default time-to-live: 28 days.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(2_419_200);

    /// Creates a renewal with the given time-to-live (whole seconds are sent).
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// Returns the time-to-live.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl Default for RenewNotifications {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

impl RpcCommand for RenewNotifications {
    fn method(&self) -> &'static str {
        "events.notifications.renew"
    }

    fn params(&self) -> Value {
        json!({ "ttl": self.ttl.as_secs() })
    }
}
