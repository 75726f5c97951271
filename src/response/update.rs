// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Firmware update responses.

use std::cmp::Ordering;

use semver::Version;
use serde::Deserialize;

/// Release channels considered when looking for the latest firmware.
const RELEASE_CHANNELS: [&str; 2] = ["STABLE", "TESTING"];

/// Body of `GET system/update` and `PUT system/update`.
///
/// # Examples
///
/// ```
/// use ucremote_lib::response::UpdateResponse;
///
/// let json = r#"{
///     "update_in_progress": false,
///     "next_check_date": "2024-03-01T10:00:00Z",
///     "installed_version": "1.6.9",
///     "update_check_enabled": true,
///     "available": [
///         {"channel": "STABLE", "version": "1.7.2", "release_notes_url": "https://example.invalid/1.7.2"}
///     ]
/// }"#;
/// let update: UpdateResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(update.latest_release().unwrap().version.as_deref(), Some("1.7.2"));
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateResponse {
    /// Whether an update is being installed.
    pub update_in_progress: bool,
    /// Date of the next automatic update check.
    #[serde(default)]
    pub next_check_date: Option<String>,
    /// Installed firmware version.
    pub installed_version: String,
    /// Whether automatic update checks are enabled.
    pub update_check_enabled: bool,
    /// Updates the remote knows about.
    #[serde(default)]
    pub available: Option<Vec<AvailableUpdate>>,
}

/// An update offered by the remote.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AvailableUpdate {
    /// Release channel, e.g. `STABLE`.
    #[serde(default)]
    pub channel: Option<String>,
    /// Firmware version.
    #[serde(default)]
    pub version: Option<String>,
    /// Link to the release notes.
    #[serde(default)]
    pub release_notes_url: Option<String>,
}

impl UpdateResponse {
    /// Returns the newest update on a release channel, if any.
    #[must_use]
    pub fn latest_release(&self) -> Option<&AvailableUpdate> {
        self.available
            .iter()
            .flatten()
            .filter(|update| {
                update
                    .channel
                    .as_deref()
                    .is_some_and(|channel| RELEASE_CHANNELS.contains(&channel))
            })
            .filter(|update| update.version.is_some())
            .max_by(|a, b| {
                compare_versions(
                    a.version.as_deref().unwrap_or_default(),
                    b.version.as_deref().unwrap_or_default(),
                )
            })
    }

    /// Returns the newest version, or the installed one when no release is
    /// available.
    #[must_use]
    pub fn latest_version(&self) -> &str {
        self.latest_release()
            .and_then(|update| update.version.as_deref())
            .unwrap_or(&self.installed_version)
    }
}

/// Orders firmware versions by semantic versioning, so `1.10.0` is newer
/// than `1.9.3` and a pre-release such as `2.0.0-beta.1` is older than
/// `2.0.0`.
///
/// Falls back to plain text comparison when either side is not a valid
/// semantic version.
fn compare_versions(a: &str, b: &str) -> Ordering {
    match (Version::parse(a), Version::parse(b)) {
        (Ok(left), Ok(right)) => left.cmp(&right),
        _ => a.cmp(b),
    }
}
