// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device event log entries.

use serde::Deserialize;
use serde_json::Value;

use super::{decode_resource, string_or_number};

/// Contact ID event codes for open/close (arm/disarm) events.
const ARMING_EVENT_CODES: [&str; 4] = ["400", "401", "403", "441"];

/// One entry of a device's event log.
///
/// Signal fields are kept as the strings the panel reported (`"001"`).
#[derive(Debug, Clone, PartialEq)]
pub struct EventLogEntry {
    /// Entry id.
    pub id: String,
    /// Device that reported the event.
    pub device_id: String,
    /// When the event was recorded (`dateEntered`).
    pub timestamp: String,
    /// Contact ID event code, e.g. `401`.
    pub event_code: String,
    /// Event qualifier (new event / restore).
    pub event_qualifier: String,
    /// Human-readable description.
    pub description: String,
    /// Partition number.
    pub partition: String,
    /// User number or zone number, depending on the event.
    pub user_zone: String,
    /// Whether `user_zone` is a user or a zone, and the zone kind.
    pub user_zone_type: String,
    /// Name of the user or zone, if the panel knows one.
    pub user_zone_alias: Option<String>,
    /// The resource as received.
    pub raw: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct EventLogAttributes {
    device_id: Option<String>,
    date_entered: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    signal_event_code: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    signal_event_qualifier: Option<String>,
    signal_event_description: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    signal_partition: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    signal_user_zone: Option<String>,
    signal_user_zone_type: Option<String>,
    signal_user_zone_alias: Option<String>,
}

impl EventLogEntry {
    /// Decodes an event log resource.
    ///
    /// # Errors
    ///
    /// Returns error if an attribute has the wrong JSON type.
    pub fn from_api(data: &Value) -> Result<Self, serde_json::Error> {
        let (id, attrs): (String, EventLogAttributes) = decode_resource(data)?;
        Ok(Self {
            id,
            device_id: attrs.device_id.unwrap_or_default(),
            timestamp: attrs.date_entered.unwrap_or_default(),
            event_code: attrs.signal_event_code.unwrap_or_default(),
            event_qualifier: attrs.signal_event_qualifier.unwrap_or_default(),
            description: attrs.signal_event_description.unwrap_or_default(),
            partition: attrs.signal_partition.unwrap_or_default(),
            user_zone: attrs.signal_user_zone.unwrap_or_default(),
            user_zone_type: attrs.signal_user_zone_type.unwrap_or_default(),
            user_zone_alias: attrs.signal_user_zone_alias,
            raw: data.clone(),
        })
    }

    /// Returns `true` if this is an arm or disarm event.
    #[must_use]
    pub fn is_arming_event(&self) -> bool {
        ARMING_EVENT_CODES.contains(&self.event_code.as_str())
    }
}
