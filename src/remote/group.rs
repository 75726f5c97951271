// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered collection of remotes.

use crate::remote::Remote;

/// Remotes found on the network, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct RemoteGroup {
    remotes: Vec<Remote>,
}

impl RemoteGroup {
    /// Creates a group from remotes.
    #[must_use]
    pub fn new(remotes: Vec<Remote>) -> Self {
        Self { remotes }
    }

    /// Number of remotes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.remotes.len()
    }

    /// Whether the group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remotes.is_empty()
    }

    /// Returns the remote at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Remote> {
        self.remotes.get(index)
    }

    /// Returns the remote at `index` mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Remote> {
        self.remotes.get_mut(index)
    }

    /// Iterates over the remotes.
    pub fn iter(&self) -> std::slice::Iter<'_, Remote> {
        self.remotes.iter()
    }

    /// Iterates over the remotes mutably.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Remote> {
        self.remotes.iter_mut()
    }

    /// Appends a remote.
    pub fn push(&mut self, remote: Remote) {
        self.remotes.push(remote);
    }

    /// Unwraps the group into its remotes.
    #[must_use]
    pub fn into_vec(self) -> Vec<Remote> {
        self.remotes
    }
}

impl IntoIterator for RemoteGroup {
    type Item = Remote;
    type IntoIter = std::vec::IntoIter<Remote>;

    fn into_iter(self) -> Self::IntoIter {
        self.remotes.into_iter()
    }
}

impl<'a> IntoIterator for &'a RemoteGroup {
    type Item = &'a Remote;
    type IntoIter = std::slice::Iter<'a, Remote>;

    fn into_iter(self) -> Self::IntoIter {
        self.remotes.iter()
    }
}

impl<'a> IntoIterator for &'a mut RemoteGroup {
    type Item = &'a mut Remote;
    type IntoIter = std::slice::IterMut<'a, Remote>;

    fn into_iter(self) -> Self::IntoIter {
        self.remotes.iter_mut()
    }
}

impl FromIterator<Remote> for RemoteGroup {
    fn from_iter<I: IntoIterator<Item = Remote>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
