// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device kinds.

use std::fmt;

/// Kind of device on an Alula account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceType {
    /// Alarm panel.
    Panel,
    /// Video camera.
    Camera,
    /// Neither flag was set.
    #[default]
    Unknown,
}

impl DeviceType {
    /// Derives the kind from the `isPanel` / `isCamera` flags.
    ///
    /// `isPanel` wins when both are set.
    #[must_use]
    pub const fn from_flags(is_panel: bool, is_camera: bool) -> Self {
        if is_panel {
            Self::Panel
        } else if is_camera {
            Self::Camera
        } else {
            Self::Unknown
        }
    }

    /// Returns the lower-case name of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Panel => "panel",
            Self::Camera => "camera",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
