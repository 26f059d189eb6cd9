// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arm/disarm commands.
//!
//! Panels only accept these when the dealer has turned on interactive
//! services (`interactiveEnabled`) for the device.

use std::fmt;

use serde_json::{Value, json};

use crate::command::RpcCommand;

/// Arming action carried by a `helix.command` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArmAction {
    /// Arm in Stay mode.
    ArmStay,
    /// Arm in Away mode.
    ArmAway,
    /// Arm in Night mode.
    ArmNight,
    /// Disarm.
    Disarm,
}

impl ArmAction {
    /// Returns the command string sent in `data`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ArmStay => "armStay",
            Self::ArmAway => "armAway",
            Self::ArmNight => "armNight",
            Self::Disarm => "disarm",
        }
    }
}

impl fmt::Display for ArmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A `helix.command` call targeting one panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelixCommand {
    device_id: String,
    action: ArmAction,
}

impl HelixCommand {
    /// Creates a command for the given panel.
    #[must_use]
    pub fn new(device_id: impl Into<String>, action: ArmAction) -> Self {
        Self {
            device_id: device_id.into(),
            action,
        }
    }

    /// Returns the target panel id.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns the action.
    #[must_use]
    pub fn action(&self) -> ArmAction {
        self.action
    }
}

impl RpcCommand for HelixCommand {
    fn method(&self) -> &'static str {
        "helix.command"
    }

    fn params(&self) -> Value {
        json!({
            "deviceId": self.device_id,
            "data": self.action.as_str(),
        })
    }
}
