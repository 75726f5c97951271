// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Activities and the handle used to command them.

use reqwest::Method;
use serde::Serialize;

use crate::error::Result;
use crate::protocol::HttpClient;
use crate::remote::ACTIVITIES_PATH;
use crate::response::ActivityEntity;
use crate::types::ActivityState;

/// An activity as last seen on the remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    id: String,
    name: String,
    state: ActivityState,
}

impl Activity {
    /// Entity id of the activity.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// English name of the activity.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last known state.
    #[must_use]
    pub fn state(&self) -> ActivityState {
        self.state
    }

    /// Whether the activity was running when last seen.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.state == ActivityState::On
    }
}

impl From<&ActivityEntity> for Activity {
    fn from(entity: &ActivityEntity) -> Self {
        Self {
            id: entity.entity_id.clone(),
            name: entity.display_name().to_string(),
            state: entity.state(),
        }
    }
}

#[derive(Serialize)]
struct EntityCommand<'a> {
    entity_id: &'a str,
    cmd_id: &'a str,
}

/// Handle to command one activity of a [`Remote`](crate::Remote).
///
/// The handle borrows the session, so it cannot outlive it and no other
/// command can be issued on the session while the handle exists.
///
/// After [`turn_on`](Self::turn_on) or [`turn_off`](Self::turn_off) succeed
/// the local state is set without reading it back from the remote. It may
/// drift from reality until the next refresh.
#[derive(Debug)]
pub struct ActivityHandle<'a> {
    client: &'a HttpClient,
    activity: &'a mut Activity,
}

impl<'a> ActivityHandle<'a> {
    pub(crate) fn new(client: &'a HttpClient, activity: &'a mut Activity) -> Self {
        Self { client, activity }
    }

    /// The activity this handle commands.
    #[must_use]
    pub fn activity(&self) -> &Activity {
        &*self.activity
    }

    /// Entity id of the activity.
    #[must_use]
    pub fn id(&self) -> &str {
        self.activity.id()
    }

    /// Whether the activity is running, as far as this session knows.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.activity.is_on()
    }

    /// Starts the activity.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails. The local state is then unchanged.
    pub async fn turn_on(&mut self) -> Result<()> {
        self.set_state(ActivityState::On).await
    }

    /// Stops the activity.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails. The local state is then unchanged.
    pub async fn turn_off(&mut self) -> Result<()> {
        self.set_state(ActivityState::Off).await
    }

    async fn set_state(&mut self, state: ActivityState) -> Result<()> {
        let path = format!(
            "entities/{}/command",
            urlencoding::encode(&self.activity.id)
        );
        let body = EntityCommand {
            entity_id: &self.activity.id,
            cmd_id: state.command_id(),
        };

        self.client
            .send_command(Method::PUT, &path, Some(&body))
            .await?;

        self.activity.state = state;
        Ok(())
    }

    /// Reads the state back from the remote.
    ///
    /// Returns `None`, leaving the local state alone, when the activity no
    /// longer exists on the remote.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn refresh_state(&mut self) -> Result<Option<ActivityState>> {
        refresh_activity(self.client, self.activity).await
    }
}

/// Looks up the current state of an activity by exact id.
pub(crate) async fn fetch_activity_state(
    client: &HttpClient,
    id: &str,
) -> Result<Option<ActivityState>> {
    let entities: Vec<ActivityEntity> = client.get_json(ACTIVITIES_PATH).await?;
    Ok(entities
        .iter()
        .find(|entity| entity.entity_id == id)
        .map(ActivityEntity::state))
}

/// Overwrites the state of `activity` with the one on the remote.
pub(crate) async fn refresh_activity(
    client: &HttpClient,
    activity: &mut Activity,
) -> Result<Option<ActivityState>> {
    let state = fetch_activity_state(client, &activity.id).await?;
    match state {
        Some(state) => activity.state = state,
        None => tracing::debug!(id = %activity.id, "Activity no longer exists on the remote"),
    }
    Ok(state)
}
