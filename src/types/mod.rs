// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for remote control.
//!
//! # Types
//!
//! - [`ActivityState`] - On/Off state of an activity
//! - [`SystemCommand`] - Power and restart commands accepted by the remote
//! - [`IrCommand`] - Description of an infrared code to send through a dock

mod activity;
mod ir;
mod system_command;

pub use activity::ActivityState;
pub use ir::IrCommand;
pub use system_command::SystemCommand;
