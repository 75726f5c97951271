// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the REST client using wiremock.

use std::time::Duration;

use serde_json::json;
use ucremote_lib::{Error, IrCommand, ProtocolError, Remote, SystemCommand};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PIN_AUTH: &str = "Basic d2ViLWNvbmZpZ3VyYXRvcjoxMjM0";

fn remote(server: &MockServer) -> Remote {
    Remote::http(server.uri())
        .with_api_key("secret")
        .build_without_probe()
        .unwrap()
}

async fn mount_json(server: &MockServer, verb: &str, route: &str, body: serde_json::Value) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn activities_body() -> serde_json::Value {
    json!([
        {"entity_id": "uc.main.tv", "name": {"en": "Watch TV"}, "attributes": {"state": "OFF"}},
        {"entity_id": "uc.main.music", "name": {"en": "Music"}, "attributes": {"state": "ON"}}
    ])
}

// ============================================================================
// Telemetry
// ============================================================================

mod telemetry {
    use super::*;

    #[tokio::test]
    async fn fetch_battery_updates_mirror() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/system/power/battery"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "capacity": 87,
                "status": "CHARGING",
                "power_supply": true
            })))
            .mount(&server)
            .await;

        let mut remote = remote(&server);
        remote.fetch_battery().await.unwrap();

        assert_eq!(remote.battery_level(), 87);
        assert_eq!(remote.battery_status(), "CHARGING");
        assert!(remote.is_charging());
    }

    #[tokio::test]
    async fn fetch_stats_converts_to_mib() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "GET",
            "/api/pub/status",
            json!({
                "memory": {"total_memory": 536_870_912_u64, "available_memory": 268_435_456_u64},
                "filesystem": {"user_data": {"used": 104_857_600_u64, "available": 943_718_400_u64}},
                "load_avg": {"one": 0.5, "five": 0.25, "fifteen": 0.1}
            }),
        )
        .await;

        let mut remote = remote(&server);
        remote.fetch_stats().await.unwrap();

        assert!((remote.memory_total() - 512.0).abs() < f64::EPSILON);
        assert!((remote.memory_available() - 256.0).abs() < f64::EPSILON);
        assert!((remote.storage_total() - 1000.0).abs() < f64::EPSILON);
        assert!((remote.storage_available() - 900.0).abs() < f64::EPSILON);
        assert!((remote.cpu_load_one() - 0.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn fetch_configuration_sets_name() {
        let server = MockServer::start().await;
        mount_json(&server, "GET", "/api/cfg", json!({"device": {"name": "Living Room"}})).await;

        let mut remote = remote(&server);
        assert_eq!(remote.name(), "Unfolded Circle Remote Two");

        remote.fetch_configuration().await.unwrap();
        assert_eq!(remote.name(), "Living Room");
    }

    #[tokio::test]
    async fn refresh_all_keeps_successful_results() {
        let server = MockServer::start().await;
        mount_json(&server, "GET", "/api/system", json!({"model_name": "Remote Two"})).await;
        mount_json(
            &server,
            "GET",
            "/api/system/power/battery",
            json!({"capacity": 42, "status": "DISCHARGING", "power_supply": false}),
        )
        .await;
        mount_json(
            &server,
            "GET",
            "/api/system/sensors/ambient_light",
            json!({"intensity": 120}),
        )
        .await;

        Mock::given(method("GET"))
            .and(path("/api/system/update"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "code": "SERVER_ERROR",
                "message": "update service unavailable"
            })))
            .mount(&server)
            .await;

        let mut remote = remote(&server);
        let result = remote.refresh_all().await;

        assert!(matches!(result, Err(Error::Http { status: 500, .. })));
        assert_eq!(remote.battery_level(), 42);
        assert_eq!(remote.ambient_light_intensity(), 120);
    }

    #[tokio::test]
    async fn refresh_all_waits_for_slow_calls_after_a_failure() {
        let server = MockServer::start().await;
        mount_json(&server, "GET", "/api/system", json!({})).await;
        mount_json(
            &server,
            "GET",
            "/api/system/sensors/ambient_light",
            json!({"intensity": 5}),
        )
        .await;

        Mock::given(method("GET"))
            .and(path("/api/system/power/battery"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"capacity": 64, "status": "DISCHARGING", "power_supply": false}))
                    .set_delay(Duration::from_millis(300)),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/system/update"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "code": "SERVER_ERROR",
                "message": "update service unavailable"
            })))
            .mount(&server)
            .await;

        let mut remote = remote(&server);
        let result = remote.refresh_all().await;

        assert!(matches!(result, Err(Error::Http { status: 500, .. })));
        assert_eq!(remote.battery_level(), 64);
    }

    #[tokio::test]
    async fn build_refreshes_everything() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "GET",
            "/api/system",
            json!({
                "model_name": "Remote Two",
                "model_number": "UCR2",
                "serial_number": "1234567",
                "hw_revision": "rev2"
            }),
        )
        .await;
        mount_json(
            &server,
            "GET",
            "/api/system/power/battery",
            json!({"capacity": 100, "status": "FULL", "power_supply": true}),
        )
        .await;
        mount_json(
            &server,
            "GET",
            "/api/system/sensors/ambient_light",
            json!({"intensity": 3}),
        )
        .await;
        mount_json(
            &server,
            "GET",
            "/api/system/update",
            json!({
                "update_in_progress": false,
                "installed_version": "1.6.7",
                "update_check_enabled": true,
                "available": [
                    {"channel": "TESTING", "version": "1.7.2", "release_notes_url": "https://notes.invalid/1.7.2"},
                    {"channel": "STABLE", "version": "1.7.0"}
                ]
            }),
        )
        .await;
        mount_json(&server, "GET", "/api/pub/status", json!({})).await;
        mount_json(&server, "GET", "/api/cfg", json!({"device": {"name": "Den"}})).await;
        mount_json(&server, "GET", "/api/activities", activities_body()).await;

        let remote = Remote::http(server.uri())
            .with_api_key("secret")
            .build()
            .await
            .unwrap();

        assert_eq!(remote.name(), "Den");
        assert_eq!(remote.model_number(), "UCR2");
        assert_eq!(remote.hw_revision(), "Revision 2");
        assert_eq!(remote.sw_version(), "1.6.7");
        assert_eq!(remote.latest_sw_version(), "1.7.2");
        assert_eq!(remote.activities().len(), 2);
        assert!(remote.activity("uc.main.music").unwrap().is_on());
    }

    #[tokio::test]
    async fn query_timeout_is_applied() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/system/sensors/ambient_light"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"intensity": 1}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let mut remote = Remote::http(server.uri())
            .with_query_timeout(Duration::from_millis(50))
            .build_without_probe()
            .unwrap();

        let result = remote.fetch_ambient_light().await;
        assert!(matches!(
            result,
            Err(Error::Protocol(ProtocolError::Http(ref e))) if e.is_timeout()
        ));
    }
}

// ============================================================================
// Connectivity and errors
// ============================================================================

mod connectivity {
    use super::*;

    #[tokio::test]
    async fn can_connect_on_ok() {
        let server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/api/activities"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        assert!(remote(&server).can_connect().await.unwrap());
    }

    #[tokio::test]
    async fn cannot_connect_when_unauthorized() {
        let server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/api/activities"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        assert!(!remote(&server).can_connect().await.unwrap());
    }

    #[tokio::test]
    async fn malformed_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/system/power/battery"))
            .respond_with(ResponseTemplate::new(503).set_body_string("<html>busy</html>"))
            .mount(&server)
            .await;

        let result = remote(&server).fetch_battery().await;
        assert!(matches!(
            result,
            Err(Error::MalformedResponse { status: 503, ref body }) if body == "<html>busy</html>"
        ));
    }

    #[tokio::test]
    async fn pin_is_sent_as_basic_auth() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/system/sensors/ambient_light"))
            .and(header("authorization", PIN_AUTH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"intensity": 7})))
            .expect(1)
            .mount(&server)
            .await;

        let mut remote = Remote::http(server.uri())
            .with_pin("1234")
            .build_without_probe()
            .unwrap();

        remote.fetch_ambient_light().await.unwrap();
        assert_eq!(remote.ambient_light_intensity(), 7);
    }
}

// ============================================================================
// System commands and firmware
// ============================================================================

mod system {
    use super::*;

    #[tokio::test]
    async fn every_system_command_is_posted() {
        let server = MockServer::start().await;

        for command in SystemCommand::ALL {
            Mock::given(method("POST"))
                .and(path("/api/system"))
                .and(query_param("cmd", command.as_str()))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "status": "ok",
                    "cmd": command.as_str()
                })))
                .expect(1)
                .mount(&server)
                .await;
        }

        let remote = remote(&server);
        for name in [
            "STANDBY",
            "REBOOT",
            "POWER_OFF",
            "RESTART",
            "RESTART_UI",
            "RESTART_CORE",
        ] {
            let body = remote.post_system_command(name).await.unwrap();
            assert_eq!(body, json!({"status": "ok", "cmd": name}));
        }
    }

    #[tokio::test]
    async fn unknown_system_command_is_not_sent() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = remote(&server).post_system_command("BOGUS").await;
        assert!(matches!(result, Err(Error::SystemCommandNotFound(ref cmd)) if cmd == "BOGUS"));
    }

    #[tokio::test]
    async fn check_for_updates_refreshes_versions() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "PUT",
            "/api/system/update",
            json!({
                "update_in_progress": false,
                "installed_version": "1.6.7",
                "update_check_enabled": false,
                "available": [{"channel": "STABLE", "version": "1.7.0"}]
            }),
        )
        .await;

        let mut remote = remote(&server);
        let update = remote.check_for_updates().await.unwrap();

        assert_eq!(update.installed_version, "1.6.7");
        assert_eq!(remote.latest_sw_version(), "1.7.0");
        assert!(!remote.automatic_updates());
    }

    #[tokio::test]
    async fn update_firmware_and_progress() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "POST",
            "/api/system/update/latest",
            json!({"state": "START"}),
        )
        .await;
        mount_json(
            &server,
            "GET",
            "/api/system/update/latest",
            json!({"state": "PROGRESS", "percent": 40}),
        )
        .await;

        let remote = remote(&server);
        assert_eq!(remote.update_firmware().await.unwrap()["state"], "START");
        assert_eq!(
            remote.firmware_update_progress().await.unwrap()["percent"],
            40
        );
    }
}

// ============================================================================
// Activities
// ============================================================================

mod activities {
    use super::*;

    #[tokio::test]
    async fn turn_on_sets_state_without_reading_back() {
        let server = MockServer::start().await;
        mount_json(&server, "GET", "/api/activities", activities_body()).await;

        let mut remote = remote(&server);
        remote.fetch_activities().await.unwrap();

        Mock::given(method("PUT"))
            .and(path("/api/entities/uc.main.tv/command"))
            .and(body_json(json!({"entity_id": "uc.main.tv", "cmd_id": "activity.on"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut handle = remote.activity_mut("uc.main.tv").unwrap();
        assert!(!handle.is_on());
        handle.turn_on().await.unwrap();
        assert!(handle.is_on());

        assert!(remote.activity("uc.main.tv").unwrap().is_on());
    }

    #[tokio::test]
    async fn failed_turn_off_keeps_state() {
        let server = MockServer::start().await;
        mount_json(&server, "GET", "/api/activities", activities_body()).await;

        Mock::given(method("PUT"))
            .and(path("/api/entities/uc.main.music/command"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "code": "CONFLICT",
                "message": "activity is busy"
            })))
            .mount(&server)
            .await;

        let mut remote = remote(&server);
        remote.fetch_activities().await.unwrap();

        let mut handle = remote.activity_mut("uc.main.music").unwrap();
        let result = handle.turn_off().await;

        assert!(matches!(result, Err(Error::Http { status: 409, ref code, .. }) if code == "CONFLICT"));
        assert!(handle.is_on());
    }

    #[tokio::test]
    async fn refresh_state_of_removed_activity() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/activities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(activities_body()))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        let mut remote = remote(&server);
        remote.fetch_activities().await.unwrap();

        mount_json(&server, "GET", "/api/activities", json!([])).await;

        let mut handle = remote.activity_mut("uc.main.music").unwrap();
        assert_eq!(handle.refresh_state().await.unwrap(), None);
        assert!(handle.is_on());
    }

    #[tokio::test]
    async fn activity_state_by_id() {
        let server = MockServer::start().await;
        mount_json(&server, "GET", "/api/activities", activities_body()).await;

        let remote = remote(&server);
        assert_eq!(
            remote.activity_state("uc.main.music").await.unwrap(),
            Some(ucremote_lib::ActivityState::On)
        );
        assert_eq!(remote.activity_state("uc.main").await.unwrap(), None);
    }
}

// ============================================================================
// API keys
// ============================================================================

mod api_keys {
    use super::*;

    #[tokio::test]
    async fn create_api_key_with_pin() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/api_keys"))
            .and(header("authorization", PIN_AUTH))
            .and(body_json(json!({"name": "ucremote_lib", "scopes": ["admin"]})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"api_key": "new-key"})))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/system/sensors/ambient_light"))
            .and(header("authorization", "Bearer new-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"intensity": 9})))
            .expect(1)
            .mount(&server)
            .await;

        let mut remote = Remote::http(server.uri())
            .with_pin("1234")
            .build_without_probe()
            .unwrap();

        assert_eq!(remote.create_api_key().await.unwrap(), "new-key");
        assert_eq!(remote.client().api_key(), Some("new-key"));

        remote.fetch_ambient_light().await.unwrap();
    }

    #[tokio::test]
    async fn create_api_key_requires_pin() {
        let server = MockServer::start().await;

        let mut remote = remote(&server);
        let result = remote.create_api_key().await;

        assert!(matches!(result, Err(Error::Authentication(_))));
        assert_eq!(remote.client().api_key(), Some("secret"));
    }

    #[tokio::test]
    async fn revoke_existing_api_key() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "GET",
            "/api/auth/api_keys",
            json!([
                {"key_id": "k-1", "name": "other", "scopes": ["admin"]},
                {"key_id": "k-2", "name": "ucremote_lib", "scopes": ["admin"]}
            ]),
        )
        .await;

        Mock::given(method("DELETE"))
            .and(path("/api/auth/api_keys/k-2"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        remote(&server).revoke_api_key("ucremote_lib").await.unwrap();
    }

    #[tokio::test]
    async fn revoke_missing_api_key() {
        let server = MockServer::start().await;
        mount_json(&server, "GET", "/api/auth/api_keys", json!([])).await;

        let result = remote(&server).revoke_api_key("missing").await;
        assert!(matches!(result, Err(Error::ApiKeyNotFound { ref name }) if name == "missing"));
    }
}

// ============================================================================
// Infrared
// ============================================================================

mod infrared {
    use super::*;

    async fn mount_docks(server: &MockServer) {
        mount_json(
            server,
            "GET",
            "/api/ir/emitters",
            json!([
                {"device_id": "dock-1", "name": "Main", "active": true},
                {"device_id": "dock-2", "name": "Attic", "active": false}
            ]),
        )
        .await;
    }

    #[tokio::test]
    async fn command_without_code_is_invalid() {
        let server = MockServer::start().await;
        mount_docks(&server).await;

        let mut remote = remote(&server);
        remote.fetch_docks().await.unwrap();

        let result = remote.send_ir_command(&IrCommand::new().repeat(1)).await;
        assert!(matches!(result, Err(Error::InvalidIrFormat)));
    }

    #[tokio::test]
    async fn unknown_or_inactive_dock() {
        let server = MockServer::start().await;
        mount_docks(&server).await;

        let mut remote = remote(&server);
        assert_eq!(remote.fetch_docks().await.unwrap().len(), 1);

        for dock in ["Garage", "Attic"] {
            let cmd = IrCommand::new().code("0x1").format("HEX").dock(dock);
            let result = remote.send_ir_command(&cmd).await;
            assert!(matches!(result, Err(Error::NoEmitterFound)));
        }
    }

    #[tokio::test]
    async fn send_raw_code() {
        let server = MockServer::start().await;
        mount_docks(&server).await;

        Mock::given(method("PUT"))
            .and(path("/api/ir/emitters/dock-1/send"))
            .and(body_json(json!({"code": "0x20DF10EF", "format": "HEX", "repeat": 2})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut remote = remote(&server);
        remote.fetch_docks().await.unwrap();

        let cmd = IrCommand::new().code("0x20DF10EF").format("HEX").repeat(2);
        remote.send_ir_command(&cmd).await.unwrap();
    }

    #[tokio::test]
    async fn send_predefined_code() {
        let server = MockServer::start().await;
        mount_docks(&server).await;
        mount_json(
            &server,
            "GET",
            "/api/remotes",
            json!([
                {"entity_id": "uc.remote.tv", "name": {"en": "TV"}, "enabled": true},
                {"entity_id": "uc.remote.old", "name": {"en": "Old"}, "enabled": false}
            ]),
        )
        .await;
        mount_json(
            &server,
            "GET",
            "/api/remotes/uc.remote.tv/ir",
            json!({"id": "uc.codeset.tv"}),
        )
        .await;

        Mock::given(method("PUT"))
            .and(path("/api/ir/emitters/dock-1/send"))
            .and(body_json(json!({
                "codeset_id": "uc.codeset.tv",
                "cmd_id": "POWER_TOGGLE",
                "port_id": "1"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut remote = remote(&server);
        remote.fetch_docks().await.unwrap();
        assert_eq!(remote.fetch_ir_remotes().await.unwrap().len(), 1);
        remote.fetch_remote_codesets().await.unwrap();

        let cmd = IrCommand::new()
            .device("TV")
            .command("POWER_TOGGLE")
            .dock("Main")
            .port("1");
        remote.send_ir_command(&cmd).await.unwrap();

        let missing = IrCommand::new().device("Old").command("POWER_TOGGLE");
        assert!(matches!(
            remote.send_ir_command(&missing).await,
            Err(Error::CodesetNotFound { ref name }) if name == "Old"
        ));
    }

    #[tokio::test]
    async fn custom_codesets_are_listed() {
        let server = MockServer::start().await;
        mount_json(
            &server,
            "GET",
            "/api/ir/codes/custom",
            json!([{"device": "Amp", "device_id": "custom.amp"}]),
        )
        .await;

        let mut remote = remote(&server);
        let codesets = remote.fetch_custom_codesets().await.unwrap();

        assert_eq!(codesets.len(), 1);
        assert_eq!(codesets[0].name(), "Amp");
        assert_eq!(codesets[0].device_id(), "custom.amp");
    }
}
