// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed JSON-RPC commands.
//!
//! # Available Commands
//!
//! | Command Type | RPC method | Purpose |
//! |-------------|------------|---------|
//! | [`HelixCommand`] | `helix.command` | Arm or disarm a panel |
//! | [`RenewNotifications`] | `events.notifications.renew` | Extend push subscriptions |
//!
//! # Examples
//!
//! ```
//! use alula_lib::command::{ArmAction, HelixCommand, RpcCommand};
//!
//! let cmd = HelixCommand::new("dev-1", ArmAction::ArmStay);
//! assert_eq!(cmd.method(), "helix.command");
//! assert_eq!(
//!     cmd.params(),
//!     serde_json::json!({"deviceId": "dev-1", "data": "armStay"})
//! );
//! ```

mod helix;
mod notifications;

pub use helix::{ArmAction, HelixCommand};
pub use notifications::RenewNotifications;

use serde_json::Value;

/// A command sent through the JSON-RPC endpoint.
pub trait RpcCommand {
    /// Returns the RPC method name.
    fn method(&self) -> &'static str;

    /// Returns the `params` object for the call.
    fn params(&self) -> Value;
}
