// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP plumbing for the remote's REST API.
//!
//! - [`resolve_endpoint`] turns whatever address the user has into the base
//!   API URL.
//! - [`HttpConfig`] collects credentials and deadlines and builds an
//!   [`HttpClient`].
//! - [`HttpClient`] authenticates each request with the active credential
//!   (bearer API key, or Basic auth with the PIN) and maps error responses.

mod endpoint;
mod http;

pub use endpoint::{configuration_url, resolve_endpoint};
pub use http::{
    AUTH_USERNAME, Credential, DEFAULT_API_KEY_NAME, HttpClient, HttpConfig, RequestKind,
};
