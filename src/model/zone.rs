// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Zone notification subscriptions.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::decode_resource;

/// Status half of a zone subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneStatus {
    /// Status name, e.g. `open`; `unknown` when not set.
    pub name: String,
    /// `true` for the "opened/triggered" direction.
    pub is_active: bool,
}

impl Default for ZoneStatus {
    fn default() -> Self {
        Self {
            name: "unknown".to_string(),
            is_active: false,
        }
    }
}

/// A zone sensor, as seen through its notification subscription.
///
/// The `/api/v1/events/notifications/zones` endpoint only lists zones that
/// have a push subscription, and embeds zone names in the notification
/// template rather than as attributes. Use
/// [`AlulaClient::discover_zones`](crate::AlulaClient::discover_zones) and
/// [`AlulaClient::ensure_zone_subscriptions`](crate::AlulaClient::ensure_zone_subscriptions)
/// to make every zone appear here.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    /// Subscription id.
    pub id: String,
    /// Panel the zone belongs to.
    pub device_id: String,
    /// Zone number on the panel; 0 when not reported.
    pub zone_index: u32,
    /// Subscribed status.
    pub status: ZoneStatus,
    /// Whether push delivery is enabled.
    pub push_enabled: bool,
    /// Zone name, when known (never a `{template}` placeholder).
    pub zone_name: Option<String>,
    /// Sensor kind hint such as `door` (never a `{template}` placeholder).
    pub device_type_hint: Option<String>,
    /// The resource as received.
    pub raw: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ZoneAttributes {
    device_id: Option<String>,
    zone_index: Option<u32>,
    zone_status: Option<ZoneStatusAttributes>,
    push_enabled: Option<bool>,
    zone_name: Option<String>,
    friendly_name: Option<String>,
    zone_type: Option<String>,
    device_type: Option<String>,
    push_options: Option<PushOptions>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ZoneStatusAttributes {
    name: Option<String>,
    on: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PushOptions {
    body_args: Option<Vec<Value>>,
    data: Option<Map<String, Value>>,
}

impl Zone {
    /// Decodes a zone resource.
    ///
    /// The zone name comes from `zoneName`, then `friendlyName`, then the
    /// first notification body argument. The type hint comes from
    /// `zoneType`, then `deviceType`, then the notification data.
    /// `fallback_device_id` is used when the resource has no `deviceId`.
    ///
    /// # Errors
    ///
    /// Returns error if an attribute has the wrong JSON type.
    pub fn from_api(data: &Value, fallback_device_id: Option<&str>) -> Result<Self, serde_json::Error> {
        let (id, attrs): (String, ZoneAttributes) = decode_resource(data)?;
        let push_options = attrs.push_options.unwrap_or_default();

        let zone_name = non_empty(attrs.zone_name)
            .or_else(|| non_empty(attrs.friendly_name))
            .or_else(|| {
                push_options
                    .body_args
                    .as_deref()
                    .and_then(<[_]>::first)
                    .and_then(Value::as_str)
                    .map(str::to_owned)
                    .filter(|name| !name.is_empty() && !is_template(name))
            });

        let device_type_hint = non_empty(attrs.zone_type)
            .or_else(|| non_empty(attrs.device_type))
            .or_else(|| {
                push_options
                    .data
                    .as_ref()
                    .and_then(|d| d.get("deviceType"))
                    .and_then(Value::as_str)
                    .map(str::to_owned)
            })
            .filter(|hint| !is_template(hint));

        let status = attrs.zone_status.map_or_else(ZoneStatus::default, |s| ZoneStatus {
            name: s.name.unwrap_or_else(|| "unknown".to_string()),
            is_active: s.on.unwrap_or(false),
        });

        Ok(Self {
            id,
            device_id: non_empty(attrs.device_id)
                .or_else(|| fallback_device_id.map(str::to_owned))
                .unwrap_or_default(),
            zone_index: attrs.zone_index.unwrap_or(0),
            status,
            push_enabled: attrs.push_enabled.unwrap_or(false),
            zone_name,
            device_type_hint,
            raw: data.clone(),
        })
    }

    /// Returns `true` if the zone is open / triggered.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status.is_active
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Notification templates carry placeholders like `{zoneConfiguration.3.zoneName:}`.
fn is_template(value: &str) -> bool {
    value.starts_with('{')
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn zone_from_api() {
        let data = json!({
            "id": "zone-1",
            "attributes": {
                "deviceId": "dev-1",
                "zoneIndex": 3,
                "zoneStatus": {"name": "open", "on": true},
                "pushEnabled": true,
                "pushOptions": {
                    "bodyArgs": ["Front Door"],
                    "data": {"deviceType": "door"}
                }
            }
        });
        let zone = Zone::from_api(&data, None).unwrap();
        assert_eq!(zone.id, "zone-1");
        assert_eq!(zone.device_id, "dev-1");
        assert_eq!(zone.zone_index, 3);
        assert!(zone.is_open());
        assert!(zone.push_enabled);
        assert_eq!(zone.zone_name.as_deref(), Some("Front Door"));
        assert_eq!(zone.device_type_hint.as_deref(), Some("door"));
    }

    #[test]
    fn zone_template_strings_filtered() {
        let data = json!({
            "id": "zone-2",
            "attributes": {
                "deviceId": "dev-1",
                "zoneIndex": 1,
                "zoneStatus": {},
                "pushOptions": {
                    "bodyArgs": ["{zoneName}"],
                    "data": {"deviceType": "{deviceType}"}
                }
            }
        });
        let zone = Zone::from_api(&data, None).unwrap();
        assert!(zone.zone_name.is_none());
        assert!(zone.device_type_hint.is_none());
        assert_eq!(zone.status.name, "unknown");
        assert!(!zone.is_open());
    }

    #[test]
    fn zone_direct_attributes_win() {
        let data = json!({
            "id": "zone-3",
            "attributes": {
                "zoneName": "Garage",
                "zoneType": "motion",
                "pushOptions": {"bodyArgs": ["Other"], "data": {"deviceType": "door"}}
            }
        });
        let zone = Zone::from_api(&data, Some("dev-9")).unwrap();
        assert_eq!(zone.zone_name.as_deref(), Some("Garage"));
        assert_eq!(zone.device_type_hint.as_deref(), Some("motion"));
        assert_eq!(zone.device_id, "dev-9");
    }

    #[test]
    fn zone_null_push_options_fields() {
        let data = json!({
            "id": "zone-4",
            "attributes": {
                "deviceId": "dev-1",
                "zoneIndex": 3,
                "zoneStatus": {"name": "open", "on": false},
                "pushOptions": {"bodyArgs": null, "data": null}
            }
        });
        let zone = Zone::from_api(&data, None).unwrap();
        assert_eq!(zone.zone_index, 3);
        assert!(zone.zone_name.is_none());
        assert!(zone.device_type_hint.is_none());
    }

    #[test]
    fn zone_defaults() {
        let zone = Zone::from_api(&json!({}), None).unwrap();
        assert_eq!(zone.zone_index, 0);
        assert_eq!(zone.device_id, "");
        assert_eq!(zone.status, ZoneStatus::default());
        assert!(!zone.push_enabled);
    }
}
