// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport layer for the Alula API.
//!
//! - [`HttpClient`]: authenticated REST calls with token refresh and a
//!   single retry on `401 Unauthorized`
//! - [`RpcRequest`] / [`HttpClient::rpc`]: JSON-RPC envelope on `/rpc/v1`

mod http;
mod rpc;

pub use http::HttpClient;
pub use rpc::{RPC_PATH, RpcRequest};
