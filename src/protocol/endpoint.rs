// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalization of user supplied addresses into API endpoints.
//!
//! Users may hand over a bare host, `host:port`, a host with a path, or a
//! full URL. All of them are turned into a base URL whose path ends with a
//! single `api/` segment, so relative resource paths can be appended
//! directly. Query strings, fragments and user info are dropped.
//! Normalization is best effort and never fails.

use url::Url;

/// Scheme used when the input does not carry one.
const DEFAULT_SCHEME: &str = "http";

/// Last path segment of every API endpoint.
const API_SEGMENT: &str = "api";

/// Path of the web configurator, relative to the host.
const CONFIGURATOR_PATH: &str = "/configurator/";

/// Parses a raw address into a URL stripped down to scheme, host, port and
/// path.
///
/// Returns `None` when the address does not parse into an HTTP URL with a
/// host.
fn parse_address(raw: &str) -> Option<Url> {
    let raw = raw.trim();
    let lower = raw.to_ascii_lowercase();

    let mut url = if lower.starts_with("http://") || lower.starts_with("https://") {
        Url::parse(raw)
    } else {
        Url::parse(&format!("{DEFAULT_SCHEME}://{raw}"))
    }
    .ok()?;

    if url.host_str().is_none_or(str::is_empty) {
        return None;
    }
    if url.set_username("").is_err() || url.set_password(None).is_err() {
        return None;
    }
    url.set_query(None);
    url.set_fragment(None);

    Some(url)
}

/// Last resort when the address is not a URL at all.
fn fallback_base(raw: &str) -> String {
    let raw = raw.trim();
    let rest = raw
        .split_once("://")
        .map_or(raw, |(_, rest)| rest)
        .trim_matches('/');
    format!("{DEFAULT_SCHEME}://{rest}")
}

/// Resolves a raw address into the canonical base API URL.
///
/// # Examples
///
/// ```
/// use ucremote_lib::protocol::resolve_endpoint;
///
/// assert_eq!(resolve_endpoint("192.168.1.20"), "http://192.168.1.20/api/");
/// assert_eq!(resolve_endpoint("remote.local/api"), "http://remote.local/api/");
/// assert_eq!(
///     resolve_endpoint("http://192.168.1.20:8080"),
///     "http://192.168.1.20:8080/api/"
/// );
/// ```
#[must_use]
pub fn resolve_endpoint(raw: &str) -> String {
    let Some(mut url) = parse_address(raw) else {
        return format!("{}/{API_SEGMENT}/", fallback_base(raw));
    };

    let mut segments: Vec<String> = url
        .path_segments()
        .map(|segments| {
            segments
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    if segments.last().map(String::as_str) != Some(API_SEGMENT) {
        segments.push(API_SEGMENT.to_string());
    }

    url.set_path(&format!("/{}/", segments.join("/")));
    url.to_string()
}

/// Derives the human facing web configurator URL from an address.
///
/// # Examples
///
/// ```
/// use ucremote_lib::protocol::configuration_url;
///
/// assert_eq!(
///     configuration_url("http://192.168.1.20:8080/api/"),
///     "http://192.168.1.20:8080/configurator/"
/// );
/// ```
#[must_use]
pub fn configuration_url(raw: &str) -> String {
    match parse_address(raw) {
        Some(mut url) => {
            url.set_path(CONFIGURATOR_PATH);
            url.to_string()
        }
        None => {
            let base = fallback_base(raw);
            let authority = base
                .strip_prefix("http://")
                .and_then(|rest| rest.split('/').next())
                .unwrap_or_default();
            format!("{DEFAULT_SCHEME}://{authority}{CONFIGURATOR_PATH}")
        }
    }
}
