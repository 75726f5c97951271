// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session with a single remote.
//!
//! A [`Remote`] mirrors the state of one device. It starts empty, is filled
//! by the `fetch_*` calls (or all at once by [`Remote::refresh_all`]) and
//! issues commands on behalf of the caller.
//!
//! # Single writer
//!
//! A session is meant to be driven by one caller at a time. Calls that update
//! the local mirror take `&mut self`, so the compiler rejects concurrent
//! commands on the same session; share it behind your own lock if needed.
//!
//! ```no_run
//! use ucremote_lib::Remote;
//!
//! # async fn example() -> ucremote_lib::Result<()> {
//! let mut remote = Remote::http("192.168.1.20:8080")
//!     .with_api_key("my-api-key")
//!     .build()
//!     .await?;
//!
//! println!("{} at {}%", remote.name(), remote.battery_level());
//!
//! if let Some(mut activity) = remote.activity_mut("uc.main.watch-tv") {
//!     activity.turn_on().await?;
//! }
//! # Ok(())
//! # }
//! ```

mod activity;
mod auth;
mod builder;
mod group;
mod ir;

pub use activity::{Activity, ActivityHandle};
pub use builder::RemoteBuilder;
pub use group::RemoteGroup;
pub use ir::{Codeset, Dock, IrRemote};

use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::protocol::{HttpClient, HttpConfig, RequestKind};
use crate::response::{
    ActivityEntity, AmbientLightResponse, AvailableUpdate, BatteryResponse, ConfigurationResponse,
    LoadAverage, StatsResponse, SystemInfoResponse, UpdateResponse,
};
use crate::types::{ActivityState, SystemCommand};

pub(crate) const ACTIVITIES_PATH: &str = "activities";
const SYSTEM_PATH: &str = "system";
const BATTERY_PATH: &str = "system/power/battery";
const AMBIENT_LIGHT_PATH: &str = "system/sensors/ambient_light";
const UPDATE_PATH: &str = "system/update";
const LATEST_UPDATE_PATH: &str = "system/update/latest";
const CONFIGURATION_PATH: &str = "cfg";
const STATS_PATH: &str = "pub/status";

const DEFAULT_NAME: &str = "Unfolded Circle Remote Two";
const DEFAULT_MODEL_NAME: &str = "Remote Two";
const MANUFACTURER: &str = "Unfolded Circle";
const NOT_AVAILABLE: &str = "N/A";

/// A session with one remote.
#[derive(Debug, Clone)]
pub struct Remote {
    client: HttpClient,

    name: Option<String>,
    model_name: Option<String>,
    model_number: Option<String>,
    serial_number: Option<String>,
    hw_revision: Option<String>,

    battery_level: u8,
    battery_status: String,
    is_charging: bool,
    ambient_light_intensity: u32,

    update_in_progress: bool,
    next_update_check_date: Option<String>,
    sw_version: Option<String>,
    automatic_updates: bool,
    available_updates: Vec<AvailableUpdate>,
    latest_sw_version: Option<String>,
    release_notes_url: Option<String>,

    memory_total: f64,
    memory_available: f64,
    storage_total: f64,
    storage_available: f64,
    cpu_load: LoadAverage,

    activities: Vec<Activity>,
    ir_remotes: Vec<IrRemote>,
    codesets: Vec<Codeset>,
    custom_codesets: Vec<Codeset>,
    docks: Vec<Dock>,
}

impl Remote {
    /// Starts building a session for the given host or URL.
    #[must_use]
    pub fn http(address: impl AsRef<str>) -> RemoteBuilder {
        RemoteBuilder::new(HttpConfig::new(address))
    }

    /// Starts building a session from a complete configuration.
    #[must_use]
    pub fn http_config(config: HttpConfig) -> RemoteBuilder {
        RemoteBuilder::new(config)
    }

    /// Creates an empty session around an existing client.
    #[must_use]
    pub fn from_client(client: HttpClient) -> Self {
        Self {
            client,
            name: None,
            model_name: None,
            model_number: None,
            serial_number: None,
            hw_revision: None,
            battery_level: 0,
            battery_status: String::new(),
            is_charging: false,
            ambient_light_intensity: 0,
            update_in_progress: false,
            next_update_check_date: None,
            sw_version: None,
            automatic_updates: false,
            available_updates: Vec::new(),
            latest_sw_version: None,
            release_notes_url: None,
            memory_total: 0.0,
            memory_available: 0.0,
            storage_total: 0.0,
            storage_available: 0.0,
            cpu_load: LoadAverage::default(),
            activities: Vec::new(),
            ir_remotes: Vec::new(),
            codesets: Vec::new(),
            custom_codesets: Vec::new(),
            docks: Vec::new(),
        }
    }

    // ========== Accessors ==========

    /// Returns the HTTP client of this session.
    #[must_use]
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Returns the base API URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    /// Returns the web configurator URL.
    #[must_use]
    pub fn configuration_url(&self) -> String {
        self.client.configuration_url()
    }

    /// User supplied name of the remote.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_NAME)
    }

    /// Model name.
    #[must_use]
    pub fn model_name(&self) -> &str {
        self.model_name.as_deref().unwrap_or(DEFAULT_MODEL_NAME)
    }

    /// Model number.
    #[must_use]
    pub fn model_number(&self) -> &str {
        self.model_number.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Serial number.
    #[must_use]
    pub fn serial_number(&self) -> &str {
        self.serial_number.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Hardware revision, spelled out for known revisions.
    #[must_use]
    pub fn hw_revision(&self) -> &str {
        match self.hw_revision.as_deref() {
            Some("rev2") => "Revision 2",
            Some(revision) => revision,
            None => NOT_AVAILABLE,
        }
    }

    /// Manufacturer.
    #[must_use]
    pub fn manufacturer(&self) -> &'static str {
        MANUFACTURER
    }

    /// Battery level in percent.
    #[must_use]
    pub fn battery_level(&self) -> u8 {
        self.battery_level
    }

    /// Battery status as reported, e.g. `CHARGING`.
    #[must_use]
    pub fn battery_status(&self) -> &str {
        &self.battery_status
    }

    /// Whether the remote is on external power.
    #[must_use]
    pub fn is_charging(&self) -> bool {
        self.is_charging
    }

    /// Ambient light in lux.
    #[must_use]
    pub fn ambient_light_intensity(&self) -> u32 {
        self.ambient_light_intensity
    }

    /// Whether a firmware update is being installed.
    #[must_use]
    pub fn update_in_progress(&self) -> bool {
        self.update_in_progress
    }

    /// Date of the next automatic update check.
    #[must_use]
    pub fn next_update_check_date(&self) -> Option<&str> {
        self.next_update_check_date.as_deref()
    }

    /// Installed firmware version.
    #[must_use]
    pub fn sw_version(&self) -> &str {
        self.sw_version.as_deref().unwrap_or(NOT_AVAILABLE)
    }

    /// Whether automatic update checks are enabled.
    #[must_use]
    pub fn automatic_updates(&self) -> bool {
        self.automatic_updates
    }

    /// Updates the remote offers.
    #[must_use]
    pub fn available_updates(&self) -> &[AvailableUpdate] {
        &self.available_updates
    }

    /// Newest firmware version on a release channel, or the installed one.
    #[must_use]
    pub fn latest_sw_version(&self) -> &str {
        self.latest_sw_version
            .as_deref()
            .unwrap_or_else(|| self.sw_version())
    }

    /// Release notes of [`latest_sw_version`](Self::latest_sw_version).
    #[must_use]
    pub fn release_notes_url(&self) -> Option<&str> {
        self.release_notes_url.as_deref()
    }

    /// Total memory in MiB.
    #[must_use]
    pub fn memory_total(&self) -> f64 {
        self.memory_total
    }

    /// Available memory in MiB.
    #[must_use]
    pub fn memory_available(&self) -> f64 {
        self.memory_available
    }

    /// Size of the user data partition in MiB.
    #[must_use]
    pub fn storage_total(&self) -> f64 {
        self.storage_total
    }

    /// Free space on the user data partition in MiB.
    #[must_use]
    pub fn storage_available(&self) -> f64 {
        self.storage_available
    }

    /// CPU load averages.
    #[must_use]
    pub fn cpu_load(&self) -> LoadAverage {
        self.cpu_load
    }

    /// One minute CPU load average.
    #[must_use]
    pub fn cpu_load_one(&self) -> f64 {
        self.cpu_load.one
    }

    // ========== Connectivity ==========

    /// Checks that the remote accepts the configured credentials.
    ///
    /// Returns `Ok(false)` for any non-200 answer.
    ///
    /// # Errors
    ///
    /// Returns error only if the remote could not be reached.
    pub async fn can_connect(&self) -> Result<bool> {
        let status = self.client.head(ACTIVITIES_PATH).await?;
        Ok(status == StatusCode::OK)
    }

    // ========== Refresh ==========

    /// Refreshes model, serial number and hardware revision.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn fetch_system_info(&mut self) -> Result<SystemInfoResponse> {
        let info = self.client.get_json(SYSTEM_PATH).await?;
        self.apply_system_info(&info);
        Ok(info)
    }

    /// Refreshes battery level, status and charging flag.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn fetch_battery(&mut self) -> Result<BatteryResponse> {
        let battery = self.client.get_json(BATTERY_PATH).await?;
        self.apply_battery(&battery);
        Ok(battery)
    }

    /// Refreshes the ambient light level.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn fetch_ambient_light(&mut self) -> Result<AmbientLightResponse> {
        let light = self.client.get_json(AMBIENT_LIGHT_PATH).await?;
        self.apply_ambient_light(&light);
        Ok(light)
    }

    /// Refreshes firmware and update information.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn fetch_update_status(&mut self) -> Result<UpdateResponse> {
        let update = self.client.get_json(UPDATE_PATH).await?;
        self.apply_update(&update);
        Ok(update)
    }

    /// Refreshes memory, storage and CPU statistics.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn fetch_stats(&mut self) -> Result<StatsResponse> {
        let stats = self.client.get_json(STATS_PATH).await?;
        self.apply_stats(&stats);
        Ok(stats)
    }

    /// Refreshes the user supplied remote name.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn fetch_configuration(&mut self) -> Result<ConfigurationResponse> {
        let configuration = self.client.get_json(CONFIGURATION_PATH).await?;
        self.apply_configuration(&configuration);
        Ok(configuration)
    }

    /// Replaces the activity list with the one on the remote.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn fetch_activities(&mut self) -> Result<&[Activity]> {
        let entities: Vec<ActivityEntity> = self.client.get_json(ACTIVITIES_PATH).await?;
        self.apply_activities(&entities);
        Ok(&self.activities)
    }

    /// Refreshes everything at once.
    ///
    /// System information, battery, ambient light, update status, statistics,
    /// configuration and activities are requested concurrently. Every
    /// response that arrives is applied, even when another request fails, so
    /// independent telemetry stays as fresh as possible. If all succeeded,
    /// the state of each activity is then refreshed one after the other.
    ///
    /// A failure does not cut the other requests short: the call reports
    /// only after all of them have settled, so it takes as long as the
    /// slowest one (bounded by the query timeout).
    ///
    /// # Errors
    ///
    /// Returns the first error, in the order listed above, if any request
    /// fails.
    pub async fn refresh_all(&mut self) -> Result<()> {
        let client = &self.client;
        let (system, battery, light, update, stats, configuration, activities) = tokio::join!(
            client.get_json::<SystemInfoResponse>(SYSTEM_PATH),
            client.get_json::<BatteryResponse>(BATTERY_PATH),
            client.get_json::<AmbientLightResponse>(AMBIENT_LIGHT_PATH),
            client.get_json::<UpdateResponse>(UPDATE_PATH),
            client.get_json::<StatsResponse>(STATS_PATH),
            client.get_json::<ConfigurationResponse>(CONFIGURATION_PATH),
            client.get_json::<Vec<ActivityEntity>>(ACTIVITIES_PATH),
        );

        if let Ok(info) = &system {
            self.apply_system_info(info);
        }
        if let Ok(battery) = &battery {
            self.apply_battery(battery);
        }
        if let Ok(light) = &light {
            self.apply_ambient_light(light);
        }
        if let Ok(update) = &update {
            self.apply_update(update);
        }
        if let Ok(stats) = &stats {
            self.apply_stats(stats);
        }
        if let Ok(configuration) = &configuration {
            self.apply_configuration(configuration);
        }
        if let Ok(entities) = &activities {
            self.apply_activities(entities);
        }

        system?;
        battery?;
        light?;
        update?;
        stats?;
        configuration?;
        activities?;

        for entry in &mut self.activities {
            activity::refresh_activity(&self.client, entry).await?;
        }

        tracing::debug!(
            endpoint = %self.client.endpoint(),
            activities = self.activities.len(),
            "Remote refreshed"
        );

        Ok(())
    }

    fn apply_system_info(&mut self, info: &SystemInfoResponse) {
        self.model_name.clone_from(&info.model_name);
        self.model_number.clone_from(&info.model_number);
        self.serial_number.clone_from(&info.serial_number);
        self.hw_revision.clone_from(&info.hw_revision);
    }

    fn apply_battery(&mut self, battery: &BatteryResponse) {
        self.battery_level = battery.capacity;
        self.battery_status.clone_from(&battery.status);
        self.is_charging = battery.power_supply;
    }

    fn apply_ambient_light(&mut self, light: &AmbientLightResponse) {
        self.ambient_light_intensity = light.intensity;
    }

    fn apply_update(&mut self, update: &UpdateResponse) {
        self.update_in_progress = update.update_in_progress;
        self.next_update_check_date.clone_from(&update.next_check_date);
        self.sw_version = Some(update.installed_version.clone());
        self.automatic_updates = update.update_check_enabled;
        if let Some(available) = &update.available {
            self.available_updates.clone_from(available);
        }
        self.latest_sw_version = Some(update.latest_version().to_string());
        self.release_notes_url = update
            .latest_release()
            .and_then(|release| release.release_notes_url.clone());
    }

    fn apply_stats(&mut self, stats: &StatsResponse) {
        self.memory_total = stats.memory_total_mib();
        self.memory_available = stats.memory_available_mib();
        self.storage_total = stats.storage_total_mib();
        self.storage_available = stats.storage_available_mib();
        self.cpu_load = stats.load_avg;
    }

    fn apply_configuration(&mut self, configuration: &ConfigurationResponse) {
        self.name.clone_from(&configuration.device.name);
    }

    fn apply_activities(&mut self, entities: &[ActivityEntity]) {
        self.activities = entities.iter().map(Activity::from).collect();
    }

    // ========== Activities ==========

    /// Activities known from the last refresh, in remote order.
    #[must_use]
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Looks up an activity by entity id.
    #[must_use]
    pub fn activity(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|activity| activity.id() == id)
    }

    /// Returns a handle to command an activity.
    pub fn activity_mut(&mut self, id: &str) -> Option<ActivityHandle<'_>> {
        let client = &self.client;
        self.activities
            .iter_mut()
            .find(|activity| activity.id() == id)
            .map(|activity| ActivityHandle::new(client, activity))
    }

    /// Returns handles to every known activity.
    pub fn activity_handles(&mut self) -> impl Iterator<Item = ActivityHandle<'_>> {
        let client = &self.client;
        self.activities
            .iter_mut()
            .map(move |activity| ActivityHandle::new(client, activity))
    }

    /// Reads the current state of an activity from the remote.
    ///
    /// Returns `None` when no activity has this id.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn activity_state(&self, id: &str) -> Result<Option<ActivityState>> {
        activity::fetch_activity_state(&self.client, id).await
    }

    // ========== System ==========

    /// Sends a system command given by name.
    ///
    /// Accepted names are `STANDBY`, `REBOOT`, `POWER_OFF`, `RESTART`,
    /// `RESTART_UI` and `RESTART_CORE`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SystemCommandNotFound`] for any other name, or error
    /// if the request fails.
    pub async fn post_system_command(&self, command: &str) -> Result<Value> {
        let command: SystemCommand = command
            .parse()
            .map_err(|_| Error::SystemCommandNotFound(command.to_string()))?;
        self.send_system_command(command).await
    }

    /// Sends a system command.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn send_system_command(&self, command: SystemCommand) -> Result<Value> {
        tracing::debug!(%command, "Sending system command");
        let request = self
            .client
            .request(Method::POST, SYSTEM_PATH, RequestKind::Command)
            .query(&[("cmd", command.as_str())]);
        self.client.execute_value(request).await
    }

    // ========== Firmware ==========

    /// Makes the remote check for new firmware right away.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn check_for_updates(&mut self) -> Result<UpdateResponse> {
        let body = self
            .client
            .send_command::<()>(Method::PUT, UPDATE_PATH, None)
            .await?;
        let update: UpdateResponse = serde_json::from_value(body)?;
        self.apply_update(&update);
        Ok(update)
    }

    /// Starts installing the latest firmware.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn update_firmware(&self) -> Result<Value> {
        self.client
            .send_command::<()>(Method::POST, LATEST_UPDATE_PATH, None)
            .await
    }

    /// Returns the progress of the latest firmware installation.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn firmware_update_progress(&self) -> Result<Value> {
        self.client.get_json(LATEST_UPDATE_PATH).await
    }
}
