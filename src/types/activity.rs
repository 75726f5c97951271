// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Activity state.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Represents whether an activity is running.
///
/// # Examples
///
/// ```
/// use ucremote_lib::types::ActivityState;
///
/// assert_eq!(ActivityState::On.as_str(), "ON");
/// assert_eq!("off".parse::<ActivityState>().unwrap(), ActivityState::Off);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActivityState {
    /// The activity is not running.
    #[default]
    Off,
    /// The activity is running.
    On,
}

impl ActivityState {
    /// Returns the string the remote uses for this state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "OFF",
            Self::On => "ON",
        }
    }

    /// Command id that puts an activity into this state.
    #[must_use]
    pub const fn command_id(&self) -> &'static str {
        match self {
            Self::Off => "activity.off",
            Self::On => "activity.on",
        }
    }

    /// Maps a state reported by the remote.
    ///
    /// Only `ON` means running. Transitional, unknown or missing states are
    /// treated as off.
    #[must_use]
    pub fn from_remote(state: Option<&str>) -> Self {
        match state.map(str::parse::<Self>) {
            Some(Ok(parsed)) => parsed,
            Some(Err(err)) => {
                tracing::trace!(%err, "Treating activity state as off");
                Self::Off
            }
            None => Self::Off,
        }
    }
}

impl fmt::Display for ActivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ON" => Ok(Self::On),
            "OFF" => Ok(Self::Off),
            _ => Err(ValueError::InvalidActivityState(s.to_string())),
        }
    }
}
