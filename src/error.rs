// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `ucremote` library.
//!
//! This module provides the error hierarchy for handling failures across the
//! library: rejected requests, precondition failures on commands, transport
//! errors, JSON parsing, and device discovery.
//!
//! Nothing is recovered locally. Every failure is returned to the immediate
//! caller.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The remote answered with a non-2xx status and a well-formed error body.
    #[error("HTTP {status} request: {code} reason: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error code reported by the remote.
        code: String,
        /// Human readable message reported by the remote.
        message: String,
    },

    /// The remote answered with a non-2xx status but the body was not the
    /// expected `{code, message}` object.
    #[error("HTTP {status} with malformed error body: {body}")]
    MalformedResponse {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A credential precondition was not met.
    #[error("authentication error: {0}")]
    Authentication(String),

    /// The system command is not one of the supported commands.
    #[error("invalid system command: {0}")]
    SystemCommandNotFound(String),

    /// Neither a code and format nor a device and command were supplied.
    #[error("supply (code and format) or (device and command)")]
    InvalidIrFormat,

    /// No IR emitter matched the supplied criteria.
    #[error("no emitter could be found with the supplied criteria")]
    NoEmitterFound,

    /// No IR codeset is known for the target device.
    #[error("IR codeset '{name}' not found")]
    CodesetNotFound {
        /// Name of the target device that was looked up.
        name: String,
    },

    /// No API key with the given name exists on the remote.
    #[error("API key '{name}' not found")]
    ApiKeyNotFound {
        /// Name of the API key that was looked up.
        name: String,
    },

    /// Error occurred during protocol communication.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while discovering devices.
    #[error("discovery error: {0}")]
    Discovery(#[from] DiscoveryError),
}

/// Errors related to value validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// An invalid activity state string was provided.
    #[error("invalid activity state: {0}")]
    InvalidActivityState(String),

    /// An unknown system command string was provided.
    #[error("unknown system command: {0}")]
    UnknownSystemCommand(String),
}

/// Errors related to HTTP communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Errors related to parsing remote responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to mDNS device discovery.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The mDNS daemon could not be started or browsing failed.
    #[cfg(feature = "discovery")]
    #[error("mDNS error: {0}")]
    Mdns(#[from] mdns_sd::Error),

    /// The background browse task did not complete.
    #[error("browse task failed: {0}")]
    Task(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Protocol(ProtocolError::Http(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(ParseError::Json(err))
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
