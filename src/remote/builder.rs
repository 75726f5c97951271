// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Remote session builder.

use std::time::Duration;

use crate::error::Error;
use crate::protocol::HttpConfig;
use crate::remote::Remote;

/// Builder for creating a [`Remote`] session.
///
/// Created with `Remote::http("host")` or
/// `Remote::http_config(HttpConfig::new("host"))`.
///
/// # Examples
///
/// ```no_run
/// use ucremote_lib::Remote;
///
/// # async fn example() -> ucremote_lib::Result<()> {
/// // Fetches all telemetry before returning
/// let remote = Remote::http("192.168.1.20")
///     .with_api_key("my-api-key")
///     .build()
///     .await?;
///
/// // No network access; the session starts empty
/// let mut setup = Remote::http("192.168.1.20")
///     .with_pin("1234")
///     .build_without_probe()?;
/// let key = setup.create_api_key().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RemoteBuilder {
    config: HttpConfig,
}

impl RemoteBuilder {
    pub(crate) fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Authenticates with an API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config = self.config.with_api_key(api_key);
        self
    }

    /// Authenticates with the PIN shown on the remote.
    #[must_use]
    pub fn with_pin(mut self, pin: impl Into<String>) -> Self {
        self.config = self.config.with_pin(pin);
        self
    }

    /// Sets the name under which API keys are created.
    #[must_use]
    pub fn with_api_key_name(mut self, name: impl Into<String>) -> Self {
        self.config = self.config.with_api_key_name(name);
        self
    }

    /// Sets the deadline for read-only calls.
    #[must_use]
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_query_timeout(timeout);
        self
    }

    /// Sets the deadline for command calls.
    #[must_use]
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_command_timeout(timeout);
        self
    }

    /// Returns the configuration built so far.
    #[must_use]
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Builds the session and refreshes it with [`Remote::refresh_all`].
    ///
    /// # Errors
    ///
    /// Returns error if the client cannot be created or any refresh fails.
    pub async fn build(self) -> Result<Remote, Error> {
        let mut remote = self.build_without_probe()?;
        remote.refresh_all().await?;
        Ok(remote)
    }

    /// Builds an empty session without contacting the remote.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn build_without_probe(self) -> Result<Remote, Error> {
        let client = self.config.into_client().map_err(Error::Protocol)?;
        Ok(Remote::from_client(client))
    }
}
