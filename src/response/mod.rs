// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for the remote's JSON API.
//!
//! Each type mirrors the body of one REST resource. Only the fields the
//! library reads are declared; everything else is ignored.

mod activity;
mod auth;
mod ir;
mod system;
mod update;

pub use activity::{ActivityAttributes, ActivityEntity, LocalizedText};
pub use auth::{ApiKeyInfo, CreatedApiKey};
pub use ir::{CustomCodesetEntry, EmitterEntry, RemoteCodesetResponse, RemoteEntity};
pub use system::{
    AmbientLightResponse, BatteryResponse, ConfigurationResponse, DeviceConfiguration,
    FilesystemStats, LoadAverage, MemoryStats, StatsResponse, SystemInfoResponse, UserDataStats,
};
pub use update::{AvailableUpdate, UpdateResponse};

use serde::Deserialize;

/// Body the remote sends along with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    /// Machine readable error code.
    pub code: String,
    /// Human readable description.
    pub message: String,
}
