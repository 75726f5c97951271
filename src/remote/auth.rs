// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! API key management.

use reqwest::Method;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::protocol::RequestKind;
use crate::remote::Remote;
use crate::response::{ApiKeyInfo, CreatedApiKey};

const API_KEYS_PATH: &str = "auth/api_keys";

/// Scope requested for new API keys.
const ADMIN_SCOPE: &str = "admin";

#[derive(Serialize)]
struct NewApiKey<'a> {
    name: &'a str,
    scopes: [&'a str; 1],
}

impl Remote {
    /// Lists the API keys registered on the remote.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn api_keys(&self) -> Result<Vec<ApiKeyInfo>> {
        self.client.get_json(API_KEYS_PATH).await
    }

    /// Creates an admin API key and makes it the active credential.
    ///
    /// The call is authenticated with the PIN. The key is created under the
    /// name set with [`HttpConfig::with_api_key_name`](crate::HttpConfig::with_api_key_name).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if no PIN is configured, or error if
    /// the request fails.
    pub async fn create_api_key(&mut self) -> Result<String> {
        let body = NewApiKey {
            name: self.client.api_key_name(),
            scopes: [ADMIN_SCOPE],
        };
        let request = self
            .client
            .pin_request(Method::POST, API_KEYS_PATH, RequestKind::Command)?
            .json(&body);

        let raw = self.client.execute(request).await?;
        let created: CreatedApiKey = serde_json::from_str(&raw)?;

        tracing::debug!(name = body.name, "Created API key");

        self.client.set_api_key(created.api_key.clone());
        Ok(created.api_key)
    }

    /// Revokes the API key with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ApiKeyNotFound`] if no key has this exact name, or
    /// error if a request fails.
    pub async fn revoke_api_key(&self, name: &str) -> Result<()> {
        let key = self
            .api_keys()
            .await?
            .into_iter()
            .find(|key| key.name == name)
            .ok_or_else(|| Error::ApiKeyNotFound {
                name: name.to_string(),
            })?;

        let path = format!("{API_KEYS_PATH}/{}", urlencoding::encode(&key.key_id));
        self.client
            .send_command::<()>(Method::DELETE, &path, None)
            .await?;
        Ok(())
    }
}
