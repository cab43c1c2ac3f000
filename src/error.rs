// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 U.S. Federal Government (in countries where recognized)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for the administration client.
//!
//! Every failure path of the substitution engine, the artifact providers and
//! the SOAP caller maps to one variant of [`AdminError`]. Nothing is retried
//! or suppressed inside the crate.

use thiserror::Error;

/// Result type alias using [`AdminError`].
pub type Result<T> = std::result::Result<T, AdminError>;

/// Boxed error used as the cause of a transport failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while preparing or executing an administration call.
#[derive(Debug, Error)]
pub enum AdminError {
    /// A template contains `${` without a closing `}`.
    #[error("Malformed template: unterminated placeholder at offset {offset}")]
    MalformedTemplate {
        /// Byte offset of the unterminated `${`.
        offset: usize,
    },

    /// A placeholder has no binding and is not a reserved name.
    #[error("Unknown variable: {name}")]
    UnknownVariable {
        /// Identifier found between `${` and `}`.
        name: String,
    },

    /// The artifact provider has no usable artifact for the system.
    #[error("No authentication artifact available for system '{system}': {reason}")]
    ArtifactUnavailable {
        /// Target system name.
        system: String,
        /// Why the artifact could not be produced.
        reason: String,
    },

    /// The call was aborted before any network I/O because no artifact
    /// could be attached.
    #[error("Authentication failure for system '{system}': {reason}")]
    AuthenticationFailure {
        /// Target system name.
        system: String,
        /// Underlying provider message.
        reason: String,
    },

    /// Connection or I/O failure during the HTTP exchange.
    #[error("Transport failure: {0}")]
    TransportFailure(#[source] BoxError),

    /// The exchange completed but the gateway did not answer `200 OK`.
    #[error("Gateway returned {status_line}: {body}")]
    HttpStatusFailure {
        /// Numeric HTTP status.
        status: u16,
        /// Status line as received, e.g. `HTTP/1.1 500 Internal Server Error`.
        status_line: String,
        /// Response body, kept for diagnostics.
        body: String,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// TLS or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error outside the HTTP exchange.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for AdminError {
    fn from(err: reqwest::Error) -> Self {
        Self::TransportFailure(Box::new(err))
    }
}

impl AdminError {
    /// Create a malformed template error.
    pub fn malformed_template(offset: usize) -> Self {
        Self::MalformedTemplate { offset }
    }

    /// Create an unknown variable error.
    pub fn unknown_variable(name: impl Into<String>) -> Self {
        Self::UnknownVariable { name: name.into() }
    }

    /// Create an artifact unavailable error.
    pub fn artifact_unavailable(system: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ArtifactUnavailable {
            system: system.into(),
            reason: reason.into(),
        }
    }

    /// Create an authentication failure error.
    pub fn authentication_failure(system: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AuthenticationFailure {
            system: system.into(),
            reason: reason.into(),
        }
    }

    /// Wrap any error as a transport failure.
    pub fn transport(cause: impl Into<BoxError>) -> Self {
        Self::TransportFailure(cause.into())
    }

    /// Create an HTTP status failure.
    pub fn http_status(
        status: u16,
        status_line: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self::HttpStatusFailure {
            status,
            status_line: status_line.into(),
            body: body.into(),
        }
    }

    /// Create a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a TLS error with the given message.
    pub fn tls(msg: impl Into<String>) -> Self {
        Self::Tls(msg.into())
    }

    /// Returns true if no artifact could be attached to the call.
    ///
    /// Callers implementing a refresh-and-retry policy for stale artifacts
    /// key off this together with [`AdminError::status`].
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationFailure { .. } | Self::ArtifactUnavailable { .. }
        )
    }

    /// Returns the HTTP status if this is an [`AdminError::HttpStatusFailure`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatusFailure { status, .. } => Some(*status),
            _ => None,
        }
    }
}
