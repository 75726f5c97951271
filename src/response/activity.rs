// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Activity entity parsing.

use serde::Deserialize;

use crate::types::ActivityState;

/// A text the remote provides in several languages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocalizedText {
    /// English variant.
    #[serde(default)]
    pub en: Option<String>,
}

/// One entry of `GET activities`.
///
/// # Examples
///
/// ```
/// use ucremote_lib::response::ActivityEntity;
/// use ucremote_lib::types::ActivityState;
///
/// let json = r#"{
///     "entity_id": "uc.main.watch-tv",
///     "name": {"en": "Watch TV"},
///     "attributes": {"state": "ON"}
/// }"#;
/// let activity: ActivityEntity = serde_json::from_str(json).unwrap();
/// assert_eq!(activity.display_name(), "Watch TV");
/// assert_eq!(activity.state(), ActivityState::On);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityEntity {
    /// Entity identifier.
    pub entity_id: String,
    /// Localized activity name.
    #[serde(default)]
    pub name: LocalizedText,
    /// Entity attributes.
    #[serde(default)]
    pub attributes: ActivityAttributes,
}

/// Attributes of an activity entity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityAttributes {
    /// Raw state string, `ON` when the activity runs.
    #[serde(default)]
    pub state: Option<String>,
}

impl ActivityEntity {
    /// Returns the English name, or the entity id when there is none.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.en.as_deref().unwrap_or(&self.entity_id)
    }

    /// Returns the activity state.
    #[must_use]
    pub fn state(&self) -> ActivityState {
        ActivityState::from_remote(self.attributes.state.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_activity_without_attributes() {
        let json = r#"{"entity_id": "uc.main.music", "name": {"en": "Music"}}"#;
        let activity: ActivityEntity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.state(), ActivityState::Off);
    }

    #[test]
    fn name_falls_back_to_entity_id() {
        let json = r#"{"entity_id": "uc.main.music", "name": {"de": "Musik"}}"#;
        let activity: ActivityEntity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.display_name(), "uc.main.music");
    }
}
