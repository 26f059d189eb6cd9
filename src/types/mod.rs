// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the API records.
//!
//! # Types
//!
//! - [`ArmingState`] - Panel arming level as reported by the API
//! - [`DeviceType`] - Panel, camera or unknown device

mod arming;
mod device_type;

pub use arming::ArmingState;
pub use device_type::DeviceType;
