// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone discovery from the device event log.
//!
//! The Alula API has no endpoint listing a panel's zones. The zones
//! endpoint only returns zones that already have a notification
//! subscription, so a fresh account looks empty. Every sensor event in the
//! event log, however, carries the zone number in `signalUserZone`.
//! Scanning a large page of recent history therefore finds every zone that
//! has fired at least once.
//!
//! # Examples
//!
//! ```no_run
//! use alula_lib::AlulaClient;
//!
//! # async fn example() -> alula_lib::Result<()> {
//! let client = AlulaClient::new()?;
//! client.login("user", "pass").await?;
//!
//! let zones = client.discover_zones("device-uuid").await?;
//! for (index, zone) in &zones {
//!     println!("zone {index}: {:?}", zone.zone_name);
//! }
//!
//! let indices: Vec<u32> = zones.keys().copied().collect();
//! client.ensure_zone_subscriptions("device-uuid", &indices).await?;
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;

use crate::client::AlulaClient;
use crate::error::Result;
use crate::model::EventLogEntry;

/// Number of event log entries scanned for zones.
pub const DISCOVERY_PAGE_SIZE: u32 = 500;

/// A zone found in the event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredZone {
    /// Zone number on the panel (never 0).
    pub zone_index: u32,
    /// Zone name, if the panel reported one.
    pub zone_name: Option<String>,
    /// Kind reported in `signalUserZoneType`.
    pub zone_type: String,
}

impl DiscoveredZone {
    fn from_entry(zone_index: u32, entry: &EventLogEntry) -> Self {
        Self {
            zone_index,
            zone_name: entry.user_zone_alias.clone(),
            zone_type: entry.user_zone_type.clone(),
        }
    }
}

/// Collects the distinct zones referenced by `entries`.
///
/// Entries whose `user_zone` is empty, not all ASCII digits, or zero are
/// skipped. For a zone seen more than once, the first entry wins; with the
/// log sorted newest first that is the most recent one.
#[must_use]
pub fn zones_from_event_log(entries: &[EventLogEntry]) -> BTreeMap<u32, DiscoveredZone> {
    let mut zones = BTreeMap::new();
    for entry in entries {
        let Some(zone_index) = parse_zone_index(&entry.user_zone) else {
            continue;
        };
        zones
            .entry(zone_index)
            .or_insert_with(|| DiscoveredZone::from_entry(zone_index, entry));
    }
    zones
}

fn parse_zone_index(user_zone: &str) -> Option<u32> {
    if user_zone.is_empty() || !user_zone.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    user_zone.parse().ok().filter(|&index| index != 0)
}

impl AlulaClient {
    /// Discovers a panel's zones from its recent event log.
    ///
    /// Fetches the newest [`DISCOVERY_PAGE_SIZE`] entries and returns the
    /// zones they reference, keyed by zone index.
    ///
    /// # Errors
    ///
    /// Returns error if the event log cannot be fetched.
    pub async fn discover_zones(&self, device_id: &str) -> Result<BTreeMap<u32, DiscoveredZone>> {
        let entries = self
            .get_event_log(device_id, DISCOVERY_PAGE_SIZE, None)
            .await?;
        let zones = zones_from_event_log(&entries);
        tracing::debug!(
            device_id,
            entries = entries.len(),
            zones = zones.len(),
            "Discovered zones from event log"
        );
        Ok(zones)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn entry(user_zone: &str, alias: Option<&str>, zone_type: &str) -> EventLogEntry {
        let data = json!({
            "id": format!("evt-{user_zone}"),
            "attributes": {
                "signalUserZone": user_zone,
                "signalUserZoneAlias": alias,
                "signalUserZoneType": zone_type,
            }
        });
        EventLogEntry::from_api(&data).unwrap()
    }

    #[test]
    fn zones_first_seen_wins() {
        let entries = vec![
            entry("3", Some("Front Door"), "door"),
            entry("3", Some("Old Name"), "door"),
            entry("0", None, "user"),
            entry("5", None, "motion"),
            entry("", None, ""),
        ];
        let zones = zones_from_event_log(&entries);

        assert_eq!(zones.len(), 2);
        assert_eq!(zones[&3].zone_name.as_deref(), Some("Front Door"));
        assert_eq!(zones[&3].zone_type, "door");
        assert_eq!(zones[&5].zone_index, 5);
        assert!(zones[&5].zone_name.is_none());
    }

    #[test]
    fn zones_skip_non_numeric() {
        let entries = vec![entry("A1", None, ""), entry("-2", None, ""), entry("2 ", None, "")];
        assert!(zones_from_event_log(&entries).is_empty());
    }

    #[test]
    fn zones_accept_padded_numbers() {
        let zones = zones_from_event_log(&[entry("007", Some("Garage"), "door")]);
        assert_eq!(zones[&7].zone_name.as_deref(), Some("Garage"));
    }

    #[test]
    fn parse_zone_index_edges() {
        assert_eq!(parse_zone_index("12"), Some(12));
        assert_eq!(parse_zone_index("000"), None);
        assert_eq!(parse_zone_index("99999999999"), None);
        assert_eq!(parse_zone_index("+1"), None);
    }
}
