// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! System, power, sensor, statistics and configuration responses.

use serde::Deserialize;

const BYTES_PER_MIB: f64 = 1_048_576.0;

/// Body of `GET system`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemInfoResponse {
    /// Model name, e.g. `Remote Two`.
    #[serde(default)]
    pub model_name: Option<String>,
    /// Model number.
    #[serde(default)]
    pub model_number: Option<String>,
    /// Serial number.
    #[serde(default)]
    pub serial_number: Option<String>,
    /// Hardware revision, e.g. `rev2`.
    #[serde(default)]
    pub hw_revision: Option<String>,
}

/// Body of `GET system/power/battery`.
///
/// # Examples
///
/// ```
/// use ucremote_lib::response::BatteryResponse;
///
/// let json = r#"{"capacity": 87, "status": "CHARGING", "power_supply": true}"#;
/// let battery: BatteryResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(battery.capacity, 87);
/// assert!(battery.power_supply);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct BatteryResponse {
    /// Remaining capacity in percent.
    pub capacity: u8,
    /// Charging status, e.g. `CHARGING` or `DISCHARGING`.
    pub status: String,
    /// Whether external power is connected.
    pub power_supply: bool,
}

/// Body of `GET system/sensors/ambient_light`.
#[derive(Debug, Clone, Deserialize)]
pub struct AmbientLightResponse {
    /// Light intensity in lux.
    pub intensity: u32,
}

/// Body of `GET pub/status`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsResponse {
    /// Memory usage.
    #[serde(default)]
    pub memory: MemoryStats,
    /// Filesystem usage.
    #[serde(default)]
    pub filesystem: FilesystemStats,
    /// CPU load averages.
    #[serde(default)]
    pub load_avg: LoadAverage,
}

/// Memory statistics, in bytes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoryStats {
    /// Total memory.
    #[serde(default)]
    pub total_memory: u64,
    /// Available memory.
    #[serde(default)]
    pub available_memory: u64,
}

/// Filesystem statistics.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilesystemStats {
    /// The user data partition.
    #[serde(default)]
    pub user_data: UserDataStats,
}

/// User data partition statistics, in bytes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserDataStats {
    /// Used space.
    #[serde(default)]
    pub used: u64,
    /// Available space.
    #[serde(default)]
    pub available: u64,
}

/// CPU load averages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct LoadAverage {
    /// One minute average.
    #[serde(default)]
    pub one: f64,
    /// Five minute average.
    #[serde(default)]
    pub five: f64,
    /// Fifteen minute average.
    #[serde(default)]
    pub fifteen: f64,
}

#[allow(clippy::cast_precision_loss)]
fn mib(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MIB
}

impl StatsResponse {
    /// Total memory in MiB.
    #[must_use]
    pub fn memory_total_mib(&self) -> f64 {
        mib(self.memory.total_memory)
    }

    /// Available memory in MiB.
    #[must_use]
    pub fn memory_available_mib(&self) -> f64 {
        mib(self.memory.available_memory)
    }

    /// Size of the user data partition in MiB.
    #[must_use]
    pub fn storage_total_mib(&self) -> f64 {
        let data = &self.filesystem.user_data;
        mib(data.used.saturating_add(data.available))
    }

    /// Available space on the user data partition in MiB.
    #[must_use]
    pub fn storage_available_mib(&self) -> f64 {
        mib(self.filesystem.user_data.available)
    }
}

/// Body of `GET cfg`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigurationResponse {
    /// Device section.
    #[serde(default)]
    pub device: DeviceConfiguration,
}

/// Device section of the configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeviceConfiguration {
    /// User supplied name of the remote.
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_are_converted_to_mib() {
        let json = r#"{
            "memory": {"total_memory": 2097152, "available_memory": 1048576},
            "filesystem": {"user_data": {"used": 3145728, "available": 1048576}},
            "load_avg": {"one": 0.5, "five": 0.25, "fifteen": 0.1}
        }"#;
        let stats: StatsResponse = serde_json::from_str(json).unwrap();

        assert!((stats.memory_total_mib() - 2.0).abs() < f64::EPSILON);
        assert!((stats.memory_available_mib() - 1.0).abs() < f64::EPSILON);
        assert!((stats.storage_total_mib() - 4.0).abs() < f64::EPSILON);
        assert!((stats.storage_available_mib() - 1.0).abs() < f64::EPSILON);
        assert!((stats.load_avg.one - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn stats_with_missing_sections() {
        let stats: StatsResponse = serde_json::from_str("{}").unwrap();
        assert!(stats.memory_total_mib().abs() < f64::EPSILON);
        assert_eq!(stats.load_avg, LoadAverage::default());
    }

    #[test]
    fn configuration_name() {
        let json = r#"{"device": {"name": "Living Room"}, "display": {}}"#;
        let cfg: ConfigurationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.device.name.as_deref(), Some("Living Room"));
    }

    #[test]
    fn battery_requires_capacity() {
        let result = serde_json::from_str::<BatteryResponse>(r#"{"status": "FULL"}"#);
        assert!(result.is_err());
    }
}
