// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! mDNS discovery of remotes on the local network.
//!
//! Remotes announce themselves as `_uc-remote._tcp.local.`. Discovery browses
//! for that service type during a fixed window and turns every resolved
//! announcement into an unauthenticated [`Remote`] pointing at
//! `http://<ipv4>:<port>/api/`.
//!
//! The same remote may announce itself more than once during the window.
//! Announcements are not deduplicated, so it then shows up several times in
//! the returned [`RemoteGroup`].
//!
//! # Examples
//!
//! ```no_run
//! use ucremote_lib::discovery::{discover_devices, DiscoveryOptions};
//! use std::time::Duration;
//!
//! # async fn example() -> ucremote_lib::Result<()> {
//! let options = DiscoveryOptions::new().with_timeout(Duration::from_secs(5));
//! let remotes = discover_devices(Some(options)).await?;
//!
//! for remote in &remotes {
//!     println!("Found remote at {}", remote.endpoint());
//! }
//! # Ok(())
//! # }
//! ```

use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use mdns_sd::{ServiceDaemon, ServiceEvent};

use crate::error::{DiscoveryError, Error};
use crate::protocol::HttpClient;
use crate::remote::{Remote, RemoteGroup};

/// Service type remotes announce.
pub const SERVICE_TYPE: &str = "_uc-remote._tcp.local.";

/// Default discovery window.
const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_secs(3);

/// Options for mDNS discovery.
///
/// # Examples
///
/// ```
/// use ucremote_lib::discovery::DiscoveryOptions;
/// use std::time::Duration;
///
/// let options = DiscoveryOptions::new().with_timeout(Duration::from_secs(10));
/// assert_eq!(options.timeout(), Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    /// How long to listen for announcements.
    timeout: Option<Duration>,
    /// Service type to browse for.
    service_type: Option<String>,
}

impl DiscoveryOptions {
    /// Creates options with default settings.
    ///
    /// Default timeout is 3 seconds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how long to listen for announcements.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Overrides the service type to browse for.
    #[must_use]
    pub fn with_service_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = Some(service_type.into());
        self
    }

    /// Returns the discovery timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_DISCOVERY_TIMEOUT)
    }

    /// Returns the service type.
    #[must_use]
    pub fn service_type(&self) -> &str {
        self.service_type.as_deref().unwrap_or(SERVICE_TYPE)
    }
}

/// Discovers remotes on the local network.
///
/// Blocks the calling task for the whole discovery window. The browse itself
/// runs on a blocking thread.
///
/// # Errors
///
/// Returns error if the mDNS daemon cannot be started or a client cannot be
/// created for a discovered remote.
pub async fn discover_devices(options: Option<DiscoveryOptions>) -> Result<RemoteGroup, Error> {
    let options = options.unwrap_or_default();
    let timeout = options.timeout();
    let service_type = options.service_type().to_string();

    tracing::info!(
        service_type = %service_type,
        timeout_secs = timeout.as_secs(),
        "Starting mDNS discovery"
    );

    let endpoints = tokio::task::spawn_blocking(move || browse(&service_type, timeout))
        .await
        .map_err(|e| DiscoveryError::Task(e.to_string()))??;

    let remotes = endpoints
        .into_iter()
        .map(|endpoint| HttpClient::new(endpoint).map(Remote::from_client))
        .collect::<Result<RemoteGroup, _>>()?;

    tracing::info!(discovered = remotes.len(), "mDNS discovery completed");

    Ok(remotes)
}

/// Browses for `service_type` until `timeout` elapses and returns one API
/// endpoint per resolved announcement.
fn browse(service_type: &str, timeout: Duration) -> Result<Vec<String>, DiscoveryError> {
    let daemon = ServiceDaemon::new()?;
    let receiver = daemon.browse(service_type)?;
    let deadline = Instant::now() + timeout;
    let mut endpoints = Vec::new();

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }

        match receiver.recv_timeout(remaining) {
            Ok(ServiceEvent::ServiceResolved(info)) => {
                let addresses = info.get_addresses().iter().map(ToString::to_string);
                match first_ipv4(addresses) {
                    Some(ip) => {
                        tracing::debug!(name = %info.get_fullname(), %ip, "Resolved remote");
                        endpoints.push(endpoint_for(ip, info.get_port()));
                    }
                    None => {
                        tracing::warn!(
                            name = %info.get_fullname(),
                            "Announcement without IPv4 address, skipping"
                        );
                    }
                }
            }
            Ok(ServiceEvent::SearchStopped(_)) => break,
            Ok(_) => {}
            // Window elapsed or daemon gone
            Err(_) => break,
        }
    }

    if let Err(e) = daemon.stop_browse(service_type) {
        tracing::debug!(error = %e, "Failed to stop mDNS browse");
    }
    if let Err(e) = daemon.shutdown() {
        tracing::debug!(error = %e, "Failed to shut down mDNS daemon");
    }

    Ok(endpoints)
}

/// Picks the IPv4 address to use from the advertised addresses.
///
/// Addresses come without a meaningful order, so the lowest one is taken to
/// keep the choice stable.
fn first_ipv4<I>(addresses: I) -> Option<Ipv4Addr>
where
    I: IntoIterator<Item = String>,
{
    addresses
        .into_iter()
        .filter_map(|addr| addr.parse::<Ipv4Addr>().ok())
        .min()
}

/// Builds the API endpoint of a discovered remote.
fn endpoint_for(ip: Ipv4Addr, port: u16) -> String {
    format!("http://{ip}:{port}/api/")
}
