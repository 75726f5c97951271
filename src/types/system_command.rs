// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! System commands.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// A power or restart command accepted by `POST system?cmd=`.
///
/// # Examples
///
/// ```
/// use ucremote_lib::types::SystemCommand;
///
/// let cmd: SystemCommand = "RESTART_UI".parse().unwrap();
/// assert_eq!(cmd, SystemCommand::RestartUi);
/// assert!("BOGUS".parse::<SystemCommand>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemCommand {
    /// Enter standby.
    Standby,
    /// Reboot the remote.
    Reboot,
    /// Power the remote off.
    PowerOff,
    /// Restart all services.
    Restart,
    /// Restart the user interface.
    RestartUi,
    /// Restart the core service.
    RestartCore,
}

impl SystemCommand {
    /// Every supported command.
    pub const ALL: [Self; 6] = [
        Self::Standby,
        Self::Reboot,
        Self::PowerOff,
        Self::Restart,
        Self::RestartUi,
        Self::RestartCore,
    ];

    /// Returns the wire name of the command.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standby => "STANDBY",
            Self::Reboot => "REBOOT",
            Self::PowerOff => "POWER_OFF",
            Self::Restart => "RESTART",
            Self::RestartUi => "RESTART_UI",
            Self::RestartCore => "RESTART_CORE",
        }
    }
}

impl fmt::Display for SystemCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SystemCommand {
    type Err = ValueError;

    // Exact match: the remote rejects lowercase names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.as_str() == s)
            .ok_or_else(|| ValueError::UnknownSystemCommand(s.to_string()))
    }
}
