// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `ucremote_lib` - A Rust library to talk to Unfolded Circle remotes.
//!
//! This library provides an async client for the local REST API of the
//! Remote Two and finds remotes on the network over mDNS.
//!
//! # Supported Features
//!
//! - **Telemetry**: Battery, ambient light, memory, storage and CPU load
//! - **Firmware**: Installed and latest versions, update checks and installs
//! - **Activities**: List, start and stop activities
//! - **Infrared**: Send predefined or raw IR codes through a dock
//! - **System**: Standby, reboot, power off and service restarts
//! - **API keys**: Create, list and revoke keys with the web configurator PIN
//! - **Discovery**: Find remotes announced as `_uc-remote._tcp.local.`
//!
//! # Quick Start
//!
//! ## Connect with an API key
//!
//! ```no_run
//! use ucremote_lib::Remote;
//!
//! #[tokio::main]
//! async fn main() -> ucremote_lib::Result<()> {
//!     // Build and fill the session in one go
//!     let mut remote = Remote::http("192.168.1.20")
//!         .with_api_key("my-api-key")
//!         .build()
//!         .await?;
//!
//!     println!("{} runs {}", remote.name(), remote.sw_version());
//!
//!     for mut activity in remote.activity_handles() {
//!         if activity.is_on() {
//!             activity.turn_off().await?;
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Create an API key from the PIN
//!
//! ```no_run
//! use ucremote_lib::Remote;
//!
//! #[tokio::main]
//! async fn main() -> ucremote_lib::Result<()> {
//!     let mut remote = Remote::http("192.168.1.20")
//!         .with_pin("1234")
//!         .build_without_probe()?;
//!
//!     let key = remote.create_api_key().await?;
//!     println!("Store this key: {key}");
//!     Ok(())
//! }
//! ```
//!
//! ## Discover remotes
//!
//! ```no_run
//! # #[cfg(feature = "discovery")]
//! # async fn example() -> ucremote_lib::Result<()> {
//! use ucremote_lib::discovery::discover_devices;
//!
//! let remotes = discover_devices(None).await?;
//! for remote in &remotes {
//!     println!("Found {}", remote.endpoint());
//! }
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "discovery")]
pub mod discovery;
pub mod error;
pub mod protocol;
mod remote;
pub mod response;
pub mod types;

pub use error::{DiscoveryError, Error, ParseError, ProtocolError, Result, ValueError};
pub use protocol::{Credential, HttpClient, HttpConfig, RequestKind};
pub use remote::{
    Activity, ActivityHandle, Codeset, Dock, IrRemote, Remote, RemoteBuilder, RemoteGroup,
};
pub use types::{ActivityState, IrCommand, SystemCommand};
