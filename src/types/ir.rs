// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Infrared command description.

/// An infrared code to send through a dock.
///
/// A command is either a predefined code, given as target device name and
/// command id, or a raw code with its format (`HEX`, `PRONTO`). When both are
/// given the predefined code wins. Validation happens when the command is
/// sent, see [`Remote::send_ir_command`](crate::Remote::send_ir_command).
///
/// # Examples
///
/// ```
/// use ucremote_lib::types::IrCommand;
///
/// // Predefined code, repeated twice, through a named dock
/// let cmd = IrCommand::new()
///     .device("Living Room TV")
///     .command("POWER_TOGGLE")
///     .repeat(2)
///     .dock("Living Room Dock");
///
/// // Raw HEX code on the first known dock, external port 1
/// let raw = IrCommand::new()
///     .code("0x20DF10EF")
///     .format("HEX")
///     .port("1");
/// # let _ = (cmd, raw);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IrCommand {
    device: Option<String>,
    command: Option<String>,
    code: Option<String>,
    format: Option<String>,
    repeat: u32,
    dock: Option<String>,
    port: Option<String>,
}

impl IrCommand {
    /// Creates an empty command.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target device whose codeset holds the command.
    #[must_use]
    pub fn device(mut self, device: impl Into<String>) -> Self {
        self.device = Some(device.into());
        self
    }

    /// Sets the command id inside the codeset.
    #[must_use]
    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Sets a raw IR code.
    #[must_use]
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the format of the raw IR code.
    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets how many times the code is repeated. Zero sends it once.
    #[must_use]
    pub fn repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }

    /// Selects the dock by name.
    #[must_use]
    pub fn dock(mut self, dock: impl Into<String>) -> Self {
        self.dock = Some(dock.into());
        self
    }

    /// Selects the output port of the dock.
    #[must_use]
    pub fn port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    /// Returns the device name and command id, when both are set.
    #[must_use]
    pub fn predefined(&self) -> Option<(&str, &str)> {
        match (&self.device, &self.command) {
            (Some(device), Some(command)) if !device.is_empty() && !command.is_empty() => {
                Some((device.as_str(), command.as_str()))
            }
            _ => None,
        }
    }

    /// Returns the raw code and its format, when both are set.
    #[must_use]
    pub fn raw(&self) -> Option<(&str, &str)> {
        match (&self.code, &self.format) {
            (Some(code), Some(format)) => Some((code.as_str(), format.as_str())),
            _ => None,
        }
    }

    /// Returns the repeat count.
    #[must_use]
    pub fn repeat_count(&self) -> u32 {
        self.repeat
    }

    /// Returns the dock name, if set.
    #[must_use]
    pub fn dock_name(&self) -> Option<&str> {
        self.dock.as_deref()
    }

    /// Returns the port, if set.
    #[must_use]
    pub fn port_id(&self) -> Option<&str> {
        self.port.as_deref()
    }
}
