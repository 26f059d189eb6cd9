// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Records decoded from Alula API resources.
//!
//! The REST endpoints answer with JSON:API-style envelopes:
//!
//! ```json
//! { "data": [ { "id": "...", "attributes": { ... } } ] }
//! ```
//!
//! Each record type offers a `from_api` constructor taking one element of
//! `data`. Missing attributes fall back to documented defaults; only a
//! value of the wrong JSON type is an error. Every record also keeps the
//! resource it was built from in a `raw` field, for attributes this
//! library does not model.

mod device;
mod event_log;
mod user;
mod zone;

pub use device::{Device, TroubleFlags};
pub use event_log::EventLogEntry;
pub use user::User;
pub use zone::{Zone, ZoneStatus};

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Returns the elements of a response's `data` array, or nothing.
pub(crate) fn data_items(response: &Value) -> &[Value] {
    response
        .get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Splits a resource into its id and typed attributes.
///
/// A missing or `null` `attributes` object decodes to `A::default()`.
pub(crate) fn decode_resource<A>(data: &Value) -> Result<(String, A), serde_json::Error>
where
    A: DeserializeOwned + Default,
{
    let id = match data.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => String::new(),
    };
    let attributes = match data.get("attributes") {
        Some(attributes) if !attributes.is_null() => A::deserialize(attributes)?,
        _ => A::default(),
    };
    Ok((id, attributes))
}

/// Accepts a string or a number and yields it as a string.
///
/// Signal fields in the event log are numeric strings (`"001"`), but a
/// bare number is accepted too.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Default, Deserialize)]
    struct Attrs {
        #[serde(default)]
        name: Option<String>,
    }

    #[test]
    fn data_items_missing_data() {
        assert!(data_items(&json!({})).is_empty());
        assert!(data_items(&json!({"data": null})).is_empty());
    }

    #[test]
    fn data_items_returns_array() {
        let response = json!({"data": [{"id": "a"}, {"id": "b"}]});
        assert_eq!(data_items(&response).len(), 2);
    }

    #[test]
    fn decode_resource_defaults() {
        let (id, attrs): (String, Attrs) = decode_resource(&json!({})).unwrap();
        assert_eq!(id, "");
        assert!(attrs.name.is_none());
    }

    #[test]
    fn decode_resource_reads_attributes() {
        let (id, attrs): (String, Attrs) =
            decode_resource(&json!({"id": "x", "attributes": {"name": "n"}})).unwrap();
        assert_eq!(id, "x");
        assert_eq!(attrs.name.as_deref(), Some("n"));
    }

    #[test]
    fn decode_resource_rejects_wrong_types() {
        let result: Result<(String, Attrs), _> =
            decode_resource(&json!({"attributes": {"name": 5}}));
        assert!(result.is_err());
    }
}
