// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The authenticated user.

use serde::Deserialize;
use serde_json::Value;

use super::decode_resource;

/// An Alula user account, from `GET /api/v1/self`.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// User id.
    pub id: String,
    /// Id of the dealer managing the account.
    pub dealer_id: String,
    /// Account type, e.g. `customer`.
    pub user_type: String,
    /// Preferred language; `en` when not reported.
    pub language: String,
    /// The resource as received.
    pub raw: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct UserAttributes {
    dealer_id: Option<String>,
    user_type: Option<String>,
    language: Option<String>,
}

impl User {
    /// Decodes a user resource.
    ///
    /// # Errors
    ///
    /// Returns error if an attribute has the wrong JSON type.
    pub fn from_api(data: &Value) -> Result<Self, serde_json::Error> {
        let (id, attrs): (String, UserAttributes) = decode_resource(data)?;
        Ok(Self {
            id,
            dealer_id: attrs.dealer_id.unwrap_or_default(),
            user_type: attrs.user_type.unwrap_or_default(),
            language: attrs.language.unwrap_or_else(|| "en".to_string()),
            raw: data.clone(),
        })
    }
}
