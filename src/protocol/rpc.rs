// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON-RPC calls over the authenticated HTTP client.

use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::command::RpcCommand;
use crate::error::{ApiError, Result};
use crate::protocol::HttpClient;

/// Path of the JSON-RPC endpoint.
pub const RPC_PATH: &str = "/rpc/v1";

/// A JSON-RPC request envelope.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    /// Correlation id, a fresh upper-case UUID per call.
    pub id: String,
    /// RPC method name, e.g. `helix.command`.
    pub method: String,
    /// Method parameters; an empty object when there are none.
    pub params: Value,
}

impl RpcRequest {
    /// Builds an envelope with a new correlation id.
    #[must_use]
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            id: Uuid::new_v4().to_string().to_uppercase(),
            method: method.into(),
            params: params.unwrap_or_else(|| Value::Object(Map::new())),
        }
    }
}

impl HttpClient {
    /// Calls a JSON-RPC method and returns its `result`.
    ///
    /// A missing `result` yields an empty object.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Rpc`] if the response carries an `error` object; its
    ///   `code` becomes the error's status code
    /// - any error from [`request`](Self::request)
    pub async fn rpc(&self, method: &str, params: Option<Value>) -> Result<Value> {
        let envelope = RpcRequest::new(method, params);
        tracing::debug!(method, id = %envelope.id, "Sending RPC call");

        let body = serde_json::to_value(&envelope).map_err(ApiError::from)?;
        let response = self.post(RPC_PATH, &body).await?;
        unwrap_rpc_response(method, response)
    }

    /// Sends a typed RPC command.
    ///
    /// # Errors
    ///
    /// See [`rpc`](Self::rpc).
    pub async fn send_command<C: RpcCommand + Sync>(&self, command: &C) -> Result<Value> {
        self.rpc(command.method(), Some(command.params())).await
    }
}

/// Extracts `result` from a decoded RPC response, or turns `error` into an [`ApiError`].
fn unwrap_rpc_response(method: &str, mut response: Value) -> Result<Value> {
    if let Some(error) = response.get("error").filter(|e| !e.is_null()) {
        let code = error.get("code").and_then(Value::as_i64);
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| error.to_string(), str::to_owned);
        return Err(ApiError::Rpc {
            method: method.to_owned(),
            code,
            message,
        }
        .into());
    }

    Ok(match response.get_mut("result").map(Value::take) {
        Some(Value::Null) | None => Value::Object(Map::new()),
        Some(result) => result,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::Error;

    #[test]
    fn envelope_has_upper_case_uuid_id() {
        let request = RpcRequest::new("events.notifications.renew", None);
        assert_eq!(request.id.len(), 36);
        assert_eq!(request.id, request.id.to_uppercase());
        assert_eq!(request.params, json!({}));
    }

    #[test]
    fn envelope_ids_differ() {
        let a = RpcRequest::new("m", None);
        let b = RpcRequest::new("m", None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn unwrap_returns_result() {
        let result = unwrap_rpc_response("m", json!({"result": {"success": true}})).unwrap();
        assert_eq!(result, json!({"success": true}));
    }

    #[test]
    fn unwrap_defaults_to_empty_object() {
        let result = unwrap_rpc_response("m", json!({"id": "X"})).unwrap();
        assert_eq!(result, json!({}));
    }

    #[test]
    fn unwrap_maps_error_code() {
        let err = unwrap_rpc_response(
            "helix.command",
            json!({"error": {"code": 6, "message": "Permission Denied"}}),
        )
        .unwrap_err();
        assert_eq!(err.status_code(), Some(6));
        match err {
            Error::Api(ApiError::Rpc { method, message, .. }) => {
                assert_eq!(method, "helix.command");
                assert_eq!(message, "Permission Denied");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unwrap_error_without_message_uses_raw_json() {
        let err = unwrap_rpc_response("m", json!({"error": {"code": 3}})).unwrap_err();
        assert!(err.to_string().contains(r#"{"code":3}"#));
    }
}
