// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IR remote, codeset and emitter responses.

use serde::Deserialize;

use crate::response::LocalizedText;

/// One entry of `GET remotes`.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteEntity {
    /// Entity identifier.
    pub entity_id: String,
    /// Localized name.
    #[serde(default)]
    pub name: LocalizedText,
    /// Whether the IR remote is enabled.
    #[serde(default)]
    pub enabled: bool,
}

/// Body of `GET remotes/{id}/ir`.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCodesetResponse {
    /// Codeset identifier.
    pub id: String,
}

/// One entry of `GET ir/codes/custom`.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomCodesetEntry {
    /// Target device name.
    pub device: String,
    /// Codeset identifier.
    pub device_id: String,
}

/// One entry of `GET ir/emitters`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmitterEntry {
    /// Emitter identifier.
    pub device_id: String,
    /// Emitter name.
    #[serde(default)]
    pub name: String,
    /// Whether the emitter is active.
    #[serde(default)]
    pub active: bool,
}
