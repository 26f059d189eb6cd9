// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Panel arming states.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Arming level of an alarm panel, as reported in `armingLevel`.
///
/// Values the library does not know map to [`ArmingState::Unknown`]
/// instead of failing, so new firmware levels never break decoding.
///
/// # Examples
///
/// ```
/// use alula_lib::types::ArmingState;
///
/// assert_eq!(ArmingState::from("armstay"), ArmingState::ArmedStay);
/// assert_eq!(ArmingState::from("bogus_value"), ArmingState::Unknown);
/// assert!(ArmingState::ArmedNight.is_armed());
/// assert_eq!(ArmingState::Disarmed.as_str(), "disarm");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum ArmingState {
    /// Panel is disarmed.
    Disarmed,
    /// Armed in Stay mode (perimeter only).
    ArmedStay,
    /// Armed in Away mode (perimeter and interior).
    ArmedAway,
    /// Armed in Night mode.
    ArmedNight,
    /// Not reported, or a value this library does not recognize.
    #[default]
    Unknown,
}

impl ArmingState {
    /// Returns the API string for this state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Disarmed => "disarm",
            Self::ArmedStay => "armstay",
            Self::ArmedAway => "armaway",
            Self::ArmedNight => "armnight",
            Self::Unknown => "unknown",
        }
    }

    /// Returns `true` for any armed mode.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        matches!(self, Self::ArmedStay | Self::ArmedAway | Self::ArmedNight)
    }
}

impl fmt::Display for ArmingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for ArmingState {
    fn from(value: &str) -> Self {
        match value {
            "disarm" => Self::Disarmed,
            "armstay" => Self::ArmedStay,
            "armaway" => Self::ArmedAway,
            "armnight" => Self::ArmedNight,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for ArmingState {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<ArmingState> for &'static str {
    fn from(value: ArmingState) -> Self {
        value.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arming_state_from_api_strings() {
        assert_eq!(ArmingState::from("disarm"), ArmingState::Disarmed);
        assert_eq!(ArmingState::from("armstay"), ArmingState::ArmedStay);
        assert_eq!(ArmingState::from("armaway"), ArmingState::ArmedAway);
        assert_eq!(ArmingState::from("armnight"), ArmingState::ArmedNight);
    }

    #[test]
    fn arming_state_unknown_values() {
        assert_eq!(ArmingState::from(""), ArmingState::Unknown);
        assert_eq!(ArmingState::from("ARMSTAY"), ArmingState::Unknown);
        assert_eq!(ArmingState::from("bogus_value"), ArmingState::Unknown);
    }

    #[test]
    fn arming_state_is_armed() {
        assert!(ArmingState::ArmedStay.is_armed());
        assert!(ArmingState::ArmedAway.is_armed());
        assert!(ArmingState::ArmedNight.is_armed());
        assert!(!ArmingState::Disarmed.is_armed());
        assert!(!ArmingState::Unknown.is_armed());
    }

    #[test]
    fn arming_state_display() {
        assert_eq!(ArmingState::ArmedAway.to_string(), "armaway");
    }

    #[test]
    fn arming_state_serde() {
        let state: ArmingState = serde_json::from_str(r#""armnight""#).unwrap();
        assert_eq!(state, ArmingState::ArmedNight);
        let state: ArmingState = serde_json::from_str(r#""later""#).unwrap();
        assert_eq!(state, ArmingState::Unknown);
        assert_eq!(serde_json::to_string(&ArmingState::Disarmed).unwrap(), r#""disarm""#);
    }
}
