// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panels and cameras.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::decode_resource;
use crate::types::{ArmingState, DeviceType};

/// An Alula device (panel or camera), from `GET /api/v1/devices`.
///
/// # Examples
///
/// ```
/// use alula_lib::model::Device;
/// use alula_lib::types::{ArmingState, DeviceType};
///
/// let data = serde_json::json!({
///     "id": "dev-1",
///     "attributes": {"isPanel": true, "armingLevel": "armstay"}
/// });
/// let device = Device::from_api(&data).unwrap();
/// assert_eq!(device.device_type, DeviceType::Panel);
/// assert_eq!(device.arming_state, ArmingState::ArmedStay);
/// assert!(device.is_armed());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    /// Device id (UUID).
    pub id: String,
    /// Friendly name; `Unknown Device` when not set.
    pub name: String,
    /// Serial number.
    pub serial_number: String,
    /// MAC address, if reported.
    pub mac_address: Option<String>,
    /// Panel, camera, or unknown.
    pub device_type: DeviceType,
    /// Model of the panel this communicator is attached to.
    pub connected_panel_type: Option<String>,
    /// IANA time zone; `UTC` when not set.
    pub timezone: String,
    /// Whether the device is currently connected.
    pub online: bool,
    /// When the online status last changed.
    pub online_timestamp: Option<String>,
    /// Arming level (panels only).
    pub arming_state: ArmingState,
    /// When the panel was last armed.
    pub last_armed_at: Option<String>,
    /// When the panel was last disarmed.
    pub last_disarmed_at: Option<String>,
    /// Trouble conditions.
    pub trouble: TroubleFlags,
    /// Enabled account features (`featuresSelected`); non-boolean entries are skipped.
    pub features: BTreeMap<String, bool>,
    /// The resource as received.
    pub raw: Value,
}

/// Trouble conditions reported for a device. All default to `false`.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TroubleFlags {
    /// Any trouble condition is active.
    pub any: bool,
    /// Mains power lost.
    pub ac_failure: bool,
    /// Panel battery low.
    pub low_battery: bool,
    /// Communication with the Alula servers failed.
    pub server_comm_fail: bool,
    /// Communication with the central station failed.
    pub cs_comm_fail: bool,
    /// At least one zone has a low battery.
    pub low_battery_zones: bool,
    /// At least one zone is tampered.
    pub tamper_zones: bool,
    /// At least one zone is in alarm.
    pub alarm_zones: bool,
    /// At least one zone reports trouble.
    pub trouble_zones: bool,
    /// Fire circuit trouble.
    pub fire_trouble: bool,
    /// The last arming attempt was refused.
    pub arming_protest: bool,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DeviceAttributes {
    friendly_name: Option<String>,
    sn: Option<String>,
    mac: Option<String>,
    is_panel: Option<bool>,
    is_camera: Option<bool>,
    connected_panel: Option<String>,
    timezone: Option<String>,
    online_status: Option<bool>,
    online_status_timestamp: Option<String>,
    arming_level: Option<String>,
    last_armed_at: Option<String>,
    last_disarmed_at: Option<String>,
    any_trouble: Option<bool>,
    ac_failure: Option<bool>,
    low_battery: Option<bool>,
    server_comm_fail: Option<bool>,
    cs_comm_fail: Option<bool>,
    low_battery_zones: Option<bool>,
    tamper_zones: Option<bool>,
    alarm_zones: Option<bool>,
    trouble_zones: Option<bool>,
    fire_trouble: Option<bool>,
    arming_protest: Option<bool>,
    features_selected: Option<Map<String, Value>>,
}

impl Device {
    /// Decodes a device resource.
    ///
    /// An unrecognized `armingLevel` yields [`ArmingState::Unknown`].
    ///
    /// # Errors
    ///
    /// Returns error if an attribute has the wrong JSON type.
    pub fn from_api(data: &Value) -> Result<Self, serde_json::Error> {
        let (id, attrs): (String, DeviceAttributes) = decode_resource(data)?;

        let device_type = DeviceType::from_flags(
            attrs.is_panel.unwrap_or(false),
            attrs.is_camera.unwrap_or(false),
        );
        let arming_state = attrs
            .arming_level
            .as_deref()
            .map_or(ArmingState::Unknown, ArmingState::from);

        let features = attrs
            .features_selected
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(name, value)| value.as_bool().map(|enabled| (name, enabled)))
            .collect();

        Ok(Self {
            id,
            name: attrs
                .friendly_name
                .unwrap_or_else(|| "Unknown Device".to_string()),
            serial_number: attrs.sn.unwrap_or_default(),
            mac_address: attrs.mac,
            device_type,
            connected_panel_type: attrs.connected_panel,
            timezone: attrs.timezone.unwrap_or_else(|| "UTC".to_string()),
            online: attrs.online_status.unwrap_or(false),
            online_timestamp: attrs.online_status_timestamp,
            arming_state,
            last_armed_at: attrs.last_armed_at,
            last_disarmed_at: attrs.last_disarmed_at,
            trouble: TroubleFlags {
                any: attrs.any_trouble.unwrap_or(false),
                ac_failure: attrs.ac_failure.unwrap_or(false),
                low_battery: attrs.low_battery.unwrap_or(false),
                server_comm_fail: attrs.server_comm_fail.unwrap_or(false),
                cs_comm_fail: attrs.cs_comm_fail.unwrap_or(false),
                low_battery_zones: attrs.low_battery_zones.unwrap_or(false),
                tamper_zones: attrs.tamper_zones.unwrap_or(false),
                alarm_zones: attrs.alarm_zones.unwrap_or(false),
                trouble_zones: attrs.trouble_zones.unwrap_or(false),
                fire_trouble: attrs.fire_trouble.unwrap_or(false),
                arming_protest: attrs.arming_protest.unwrap_or(false),
            },
            features,
            raw: data.clone(),
        })
    }

    /// Returns `true` if this device is an alarm panel.
    #[must_use]
    pub fn is_panel(&self) -> bool {
        self.device_type == DeviceType::Panel
    }

    /// Returns `true` if this device is a camera.
    #[must_use]
    pub fn is_camera(&self) -> bool {
        self.device_type == DeviceType::Camera
    }

    /// Returns `true` if the panel is armed in any mode.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.arming_state.is_armed()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn device_from_api_panel() {
        let data = json!({
            "id": "dev-1",
            "attributes": {
                "friendlyName": "Front Panel",
                "sn": "SN123",
                "mac": "AA:BB:CC",
                "isPanel": true,
                "timezone": "America/Denver",
                "onlineStatus": true,
                "armingLevel": "disarm",
                "anyTrouble": false,
                "lowBattery": true,
                "featuresSelected": {"video": true, "tier": "gold"}
            }
        });
        let device = Device::from_api(&data).unwrap();
        assert_eq!(device.id, "dev-1");
        assert_eq!(device.name, "Front Panel");
        assert_eq!(device.serial_number, "SN123");
        assert_eq!(device.mac_address.as_deref(), Some("AA:BB:CC"));
        assert_eq!(device.device_type, DeviceType::Panel);
        assert!(device.is_panel());
        assert!(!device.is_camera());
        assert!(device.online);
        assert_eq!(device.timezone, "America/Denver");
        assert_eq!(device.arming_state, ArmingState::Disarmed);
        assert!(!device.is_armed());
        assert!(device.trouble.low_battery);
        assert!(!device.trouble.any);
        assert_eq!(device.features.get("video"), Some(&true));
        assert!(!device.features.contains_key("tier"));
    }

    #[test]
    fn device_from_api_camera() {
        let data = json!({"id": "cam-1", "attributes": {"isCamera": true, "onlineStatus": false}});
        let device = Device::from_api(&data).unwrap();
        assert_eq!(device.device_type, DeviceType::Camera);
        assert!(device.is_camera());
        assert!(!device.is_panel());
    }

    #[test]
    fn device_defaults() {
        let device = Device::from_api(&json!({"id": "x"})).unwrap();
        assert_eq!(device.name, "Unknown Device");
        assert_eq!(device.timezone, "UTC");
        assert_eq!(device.device_type, DeviceType::Unknown);
        assert_eq!(device.arming_state, ArmingState::Unknown);
        assert_eq!(device.trouble, TroubleFlags::default());
        assert!(device.features.is_empty());
    }

    #[test]
    fn device_arming_states() {
        for (level, armed) in [
            ("armstay", true),
            ("armaway", true),
            ("armnight", true),
            ("disarm", false),
        ] {
            let data = json!({"id": "dev-1", "attributes": {"isPanel": true, "armingLevel": level}});
            let device = Device::from_api(&data).unwrap();
            assert_eq!(device.is_armed(), armed, "failed for {level}");
        }
    }

    #[test]
    fn device_unknown_arming_state() {
        let data = json!({"id": "dev-1", "attributes": {"isPanel": true, "armingLevel": "bogus_value"}});
        let device = Device::from_api(&data).unwrap();
        assert_eq!(device.arming_state, ArmingState::Unknown);
    }

    #[test]
    fn device_null_attributes_are_defaults() {
        let data = json!({"id": "dev-1", "attributes": {"onlineStatus": null, "mac": null}});
        let device = Device::from_api(&data).unwrap();
        assert!(!device.online);
        assert!(device.mac_address.is_none());
    }
}
