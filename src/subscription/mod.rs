// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone notification subscriptions.
//!
//! Every physical zone needs two push subscriptions: one for the zone
//! opening (`on = true`) and one for it closing (`on = false`). The API
//! enforces uniqueness of `(deviceId, zoneIndex, on)` and answers a
//! duplicate create with `403 Forbidden`.
//!
//! [`AlulaClient::ensure_zone_subscriptions`] reconciles the requested
//! zones against the existing subscriptions and creates only the missing
//! ones. It is safe to call repeatedly, and from several clients at once:
//! a create that fails on the API side is logged and skipped, since the
//! subscription then exists either way.

use std::collections::HashSet;

use serde_json::{Value, json};

use crate::client::AlulaClient;
use crate::error::{Error, Result};
use crate::model::Zone;

/// Endpoint listing and creating zone subscriptions.
pub const ZONE_SUBSCRIPTIONS_PATH: &str = "/api/v1/events/notifications/zones";

/// Resource type of a zone subscription.
const RESOURCE_TYPE: &str = "events-notifications-zones";

/// Identity of a zone subscription.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZoneSubscriptionKey {
    /// Panel id.
    pub device_id: String,
    /// Zone number on the panel.
    pub zone_index: u32,
    /// `true` for "opened", `false` for "closed".
    pub status_on: bool,
}

impl ZoneSubscriptionKey {
    /// Creates a key.
    #[must_use]
    pub fn new(device_id: impl Into<String>, zone_index: u32, status_on: bool) -> Self {
        Self {
            device_id: device_id.into(),
            zone_index,
            status_on,
        }
    }

    /// Returns the key of an existing subscription.
    #[must_use]
    pub fn of(zone: &Zone) -> Self {
        Self::new(zone.device_id.clone(), zone.zone_index, zone.status.is_active)
    }

    /// Builds the create request body for this subscription.
    ///
    /// The API requires the status both as a `zoneStatus` object and as
    /// the flat `zoneStatusName`/`zoneStatusOn` fields. Notification text is
    /// rendered server-side from the zone configuration placeholders.
    #[must_use]
    pub fn payload(&self) -> Value {
        let index = self.zone_index;
        json!({
            "data": {
                "type": RESOURCE_TYPE,
                "attributes": {
                    "deviceId": self.device_id,
                    "zoneIndex": index,
                    "zoneStatus": {"name": "open", "on": self.status_on},
                    "zoneStatusName": "open",
                    "zoneStatusOn": self.status_on,
                    "pushEnabled": true,
                    "pushOptions": {
                        "titleKey": "APP_NAME",
                        "bodyKey": if self.status_on { "OPEN_ACTIVE" } else { "OPEN_INACTIVE" },
                        "bodyArgs": [format!("{{zoneConfiguration.{index}.zoneName:}}")],
                        "data": {
                            "deviceId": self.device_id,
                            "zoneIndex": index,
                            "deviceType": format!("{{zoneConfiguration.{index}.deviceType}}"),
                        },
                    },
                },
            }
        })
    }
}

/// Returns the subscriptions `zone_indices` still need, in request order.
///
/// For each zone the "opened" key comes before the "closed" key. Keys
/// present in `existing`, or already planned, are left out.
#[must_use]
pub fn missing_subscriptions(
    existing: &[Zone],
    device_id: &str,
    zone_indices: &[u32],
) -> Vec<ZoneSubscriptionKey> {
    let mut known: HashSet<ZoneSubscriptionKey> =
        existing.iter().map(ZoneSubscriptionKey::of).collect();

    let mut missing = Vec::new();
    for &zone_index in zone_indices {
        for status_on in [true, false] {
            let key = ZoneSubscriptionKey::new(device_id, zone_index, status_on);
            if known.insert(key.clone()) {
                missing.push(key);
            }
        }
    }
    missing
}

impl AlulaClient {
    /// Creates the open and close subscriptions each zone is missing.
    ///
    /// Returns how many subscriptions this call created. A create rejected
    /// by the API (typically `403` because another client created it first)
    /// is logged at debug level and not counted.
    ///
    /// # Errors
    ///
    /// Returns error if the existing subscriptions cannot be listed, or if a
    /// create fails on authentication or transport.
    pub async fn ensure_zone_subscriptions(
        &self,
        device_id: &str,
        zone_indices: &[u32],
    ) -> Result<usize> {
        let existing = self.get_zones().await?;
        let missing = missing_subscriptions(&existing, device_id, zone_indices);

        let mut created = 0;
        for key in missing {
            match self.http().post(ZONE_SUBSCRIPTIONS_PATH, &key.payload()).await {
                Ok(_) => {
                    created += 1;
                    tracing::debug!(
                        device_id,
                        zone_index = key.zone_index,
                        on = key.status_on,
                        "Created zone subscription"
                    );
                }
                Err(Error::Api(e)) => {
                    tracing::debug!(
                        device_id,
                        zone_index = key.zone_index,
                        on = key.status_on,
                        error = %e,
                        "Zone subscription skipped"
                    );
                }
                Err(e) => return Err(e),
            }
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscription(device_id: &str, zone_index: u32, on: bool) -> Zone {
        let data = json!({
            "id": format!("sub-{zone_index}-{on}"),
            "attributes": {
                "deviceId": device_id,
                "zoneIndex": zone_index,
                "zoneStatus": {"name": "open", "on": on}
            }
        });
        Zone::from_api(&data, None).unwrap()
    }

    #[test]
    fn payload_open() {
        let payload = ZoneSubscriptionKey::new("dev-1", 3, true).payload();
        let attrs = &payload["data"]["attributes"];
        assert_eq!(payload["data"]["type"], "events-notifications-zones");
        assert_eq!(attrs["deviceId"], "dev-1");
        assert_eq!(attrs["zoneIndex"], 3);
        assert_eq!(attrs["zoneStatus"], json!({"name": "open", "on": true}));
        assert_eq!(attrs["zoneStatusName"], "open");
        assert_eq!(attrs["zoneStatusOn"], true);
        assert_eq!(attrs["pushEnabled"], true);
        assert_eq!(attrs["pushOptions"]["titleKey"], "APP_NAME");
        assert_eq!(attrs["pushOptions"]["bodyKey"], "OPEN_ACTIVE");
        assert_eq!(
            attrs["pushOptions"]["bodyArgs"],
            json!(["{zoneConfiguration.3.zoneName:}"])
        );
        assert_eq!(
            attrs["pushOptions"]["data"],
            json!({
                "deviceId": "dev-1",
                "zoneIndex": 3,
                "deviceType": "{zoneConfiguration.3.deviceType}"
            })
        );
    }

    #[test]
    fn payload_closed() {
        let payload = ZoneSubscriptionKey::new("dev-1", 12, false).payload();
        let attrs = &payload["data"]["attributes"];
        assert_eq!(attrs["zoneStatus"]["on"], false);
        assert_eq!(attrs["zoneStatusOn"], false);
        assert_eq!(attrs["pushOptions"]["bodyKey"], "OPEN_INACTIVE");
    }

    #[test]
    fn missing_with_no_existing() {
        let missing = missing_subscriptions(&[], "dev-1", &[3]);
        assert_eq!(
            missing,
            vec![
                ZoneSubscriptionKey::new("dev-1", 3, true),
                ZoneSubscriptionKey::new("dev-1", 3, false),
            ]
        );
    }

    #[test]
    fn missing_skips_existing() {
        let existing = vec![
            subscription("dev-1", 3, true),
            subscription("dev-1", 3, false),
            subscription("dev-1", 4, true),
        ];
        let missing = missing_subscriptions(&existing, "dev-1", &[3, 4]);
        assert_eq!(missing, vec![ZoneSubscriptionKey::new("dev-1", 4, false)]);
    }

    #[test]
    fn missing_ignores_other_devices() {
        let existing = vec![subscription("dev-2", 3, true), subscription("dev-2", 3, false)];
        assert_eq!(missing_subscriptions(&existing, "dev-1", &[3]).len(), 2);
    }

    #[test]
    fn missing_dedups_requested_zones() {
        assert_eq!(missing_subscriptions(&[], "dev-1", &[5, 5]).len(), 2);
    }
}
