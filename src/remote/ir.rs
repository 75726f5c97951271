// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Infrared remotes, codesets, docks, and sending IR codes.

use reqwest::Method;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::remote::Remote;
use crate::response::{CustomCodesetEntry, EmitterEntry, RemoteCodesetResponse, RemoteEntity};
use crate::types::IrCommand;

const REMOTES_PATH: &str = "remotes";
const CUSTOM_CODES_PATH: &str = "ir/codes/custom";
const EMITTERS_PATH: &str = "ir/emitters";

/// An IR remote defined on the remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrRemote {
    name: String,
    entity_id: String,
}

impl IrRemote {
    /// English name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entity id.
    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }
}

/// A named set of IR codes for one target device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codeset {
    name: String,
    device_id: String,
}

impl Codeset {
    /// Name of the target device.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Codeset id used in IR send requests.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }
}

/// A dock able to emit IR codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dock {
    name: String,
    device_id: String,
}

impl Dock {
    /// Dock name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Emitter id.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }
}

impl Remote {
    /// Enabled IR remotes from the last fetch.
    #[must_use]
    pub fn ir_remotes(&self) -> &[IrRemote] {
        &self.ir_remotes
    }

    /// Codesets of the IR remotes from the last fetch.
    #[must_use]
    pub fn codesets(&self) -> &[Codeset] {
        &self.codesets
    }

    /// Custom codesets from the last fetch.
    #[must_use]
    pub fn custom_codesets(&self) -> &[Codeset] {
        &self.custom_codesets
    }

    /// Active docks from the last fetch.
    #[must_use]
    pub fn docks(&self) -> &[Dock] {
        &self.docks
    }

    /// Replaces the IR remote list with the enabled IR remotes.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn fetch_ir_remotes(&mut self) -> Result<&[IrRemote]> {
        let entities: Vec<RemoteEntity> = self.client.get_json(REMOTES_PATH).await?;
        self.ir_remotes = entities
            .into_iter()
            .filter(|entity| entity.enabled)
            .map(|entity| IrRemote {
                name: entity.name.en.unwrap_or_else(|| entity.entity_id.clone()),
                entity_id: entity.entity_id,
            })
            .collect();
        Ok(&self.ir_remotes)
    }

    /// Replaces the codeset list with the codeset of each known IR remote.
    ///
    /// Uses the IR remotes from [`fetch_ir_remotes`](Self::fetch_ir_remotes).
    ///
    /// # Errors
    ///
    /// Returns error if any request fails. The previous list is then kept.
    pub async fn fetch_remote_codesets(&mut self) -> Result<&[Codeset]> {
        let mut codesets = Vec::with_capacity(self.ir_remotes.len());
        for remote in &self.ir_remotes {
            let path = format!(
                "{REMOTES_PATH}/{}/ir",
                urlencoding::encode(remote.entity_id())
            );
            let codeset: RemoteCodesetResponse = self.client.get_json(&path).await?;
            codesets.push(Codeset {
                name: remote.name.clone(),
                device_id: codeset.id,
            });
        }
        self.codesets = codesets;
        Ok(&self.codesets)
    }

    /// Replaces the custom codeset list.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn fetch_custom_codesets(&mut self) -> Result<&[Codeset]> {
        let entries: Vec<CustomCodesetEntry> = self.client.get_json(CUSTOM_CODES_PATH).await?;
        self.custom_codesets = entries
            .into_iter()
            .map(|entry| Codeset {
                name: entry.device,
                device_id: entry.device_id,
            })
            .collect();
        Ok(&self.custom_codesets)
    }

    /// Replaces the dock list with the active emitters.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn fetch_docks(&mut self) -> Result<&[Dock]> {
        let emitters: Vec<EmitterEntry> = self.client.get_json(EMITTERS_PATH).await?;
        self.docks = emitters
            .into_iter()
            .filter(|emitter| emitter.active)
            .map(|emitter| Dock {
                name: emitter.name,
                device_id: emitter.device_id,
            })
            .collect();
        Ok(&self.docks)
    }

    /// Sends an IR code through a dock.
    ///
    /// Works on the docks and codesets of the last fetch; call
    /// [`fetch_docks`](Self::fetch_docks) and the codeset fetches first.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidIrFormat`] if the command has neither a device and
    ///   command nor a code and format
    /// - [`Error::CodesetNotFound`] if no codeset is known for the device
    /// - [`Error::NoEmitterFound`] if the named dock is unknown, or no dock is
    ///   known at all
    /// - any request error
    pub async fn send_ir_command(&self, command: &IrCommand) -> Result<Value> {
        let body = self.ir_payload(command)?;
        let emitter = self.resolve_emitter(command.dock_name())?;

        tracing::debug!(dock = %emitter.name, "Sending IR command");

        let path = format!(
            "{EMITTERS_PATH}/{}/send",
            urlencoding::encode(emitter.device_id())
        );
        self.client
            .send_command(Method::PUT, &path, Some(&Value::Object(body)))
            .await
    }

    fn ir_payload(&self, command: &IrCommand) -> Result<Map<String, Value>> {
        let mut body = Map::new();

        if let Some((device, cmd_id)) = command.predefined() {
            let codeset = self
                .find_codeset(device)
                .ok_or_else(|| Error::CodesetNotFound {
                    name: device.to_string(),
                })?;
            body.insert("codeset_id".into(), codeset.device_id.clone().into());
            body.insert("cmd_id".into(), cmd_id.into());
        } else if let Some((code, format)) = command.raw() {
            body.insert("code".into(), code.into());
            body.insert("format".into(), format.into());
        } else {
            return Err(Error::InvalidIrFormat);
        }

        if command.repeat_count() > 0 {
            body.insert("repeat".into(), command.repeat_count().into());
        }
        if let Some(port) = command.port_id() {
            body.insert("port_id".into(), port.into());
        }

        Ok(body)
    }

    fn find_codeset(&self, device: &str) -> Option<&Codeset> {
        self.codesets
            .iter()
            .chain(&self.custom_codesets)
            .find(|codeset| codeset.name == device)
    }

    fn resolve_emitter(&self, dock: Option<&str>) -> Result<&Dock> {
        let emitter = match dock {
            Some(name) => self.docks.iter().find(|d| d.name == name),
            None => self.docks.first(),
        };
        emitter.ok_or(Error::NoEmitterFound)
    }
}
