// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! API key responses.

use serde::Deserialize;

/// One entry of `GET auth/api_keys`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeyInfo {
    /// Key identifier used to revoke it.
    pub key_id: String,
    /// Name the key was created with.
    pub name: String,
    /// Granted scopes.
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// Body of a successful `POST auth/api_keys`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedApiKey {
    /// The secret key. Only returned once.
    pub api_key: String,
}
