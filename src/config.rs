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

//! Configuration types for the SOAP caller.
//!
//! This module provides the programmatic configuration used to build a
//! [`ReqwestTransport`](crate::transport::ReqwestTransport) and bind a
//! [`SoapCaller`](crate::SoapCaller) to a target system.

use std::time::Duration;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for a SOAP caller bound to one target system.
#[derive(Clone)]
pub struct CallerConfig {
    /// Target system name; selects the artifact to attach.
    pub system: String,

    /// Total request timeout.
    pub timeout: Duration,

    /// TCP/TLS connect timeout.
    pub connect_timeout: Duration,

    /// HTTP Basic credentials sent at the transport level in addition to
    /// the SAML artifact.
    pub http_auth: Option<HttpAuth>,

    /// Trust anchor configuration for gateway certificate verification.
    pub trust_anchors: TrustAnchors,

    /// Additional HTTP headers to include in requests.
    pub additional_headers: Vec<(String, String)>,

    /// User-Agent header value.
    pub user_agent: String,
}

impl std::fmt::Debug for CallerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallerConfig")
            .field("system", &self.system)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("http_auth", &self.http_auth.is_some())
            .field("trust_anchors", &self.trust_anchors)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl CallerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CallerConfigBuilder {
        CallerConfigBuilder::new()
    }
}

/// Builder for [`CallerConfig`].
#[derive(Default)]
pub struct CallerConfigBuilder {
    system: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_auth: Option<HttpAuth>,
    trust_anchors: Option<TrustAnchors>,
    additional_headers: Vec<(String, String)>,
    user_agent: Option<String>,
}

impl CallerConfigBuilder {
    /// Create a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target system name.
    pub fn system(mut self, name: impl Into<String>) -> Self {
        self.system = Some(name.into());
        self
    }

    /// Set the total request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set HTTP Basic authentication credentials.
    pub fn http_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.http_auth = Some(HttpAuth::new(username, password));
        self
    }

    /// Use Mozilla's root CA store (webpki-roots) for gateway verification.
    pub fn trust_webpki_roots(mut self) -> Self {
        self.trust_anchors = Some(TrustAnchors::WebPki);
        self
    }

    /// Use explicit PEM-encoded CA certificates for gateway verification.
    pub fn trust_explicit(mut self, ca_certs: Vec<Vec<u8>>) -> Self {
        self.trust_anchors = Some(TrustAnchors::Explicit(ca_certs));
        self
    }

    /// Accept any gateway certificate (insecure, for testing only).
    pub fn trust_any_insecure(mut self) -> Self {
        self.trust_anchors = Some(TrustAnchors::InsecureAcceptAny);
        self
    }

    /// Add an additional HTTP header to all requests.
    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_headers.push((name.into(), value.into()));
        self
    }

    /// Override the User-Agent header.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the system name is not set or empty.
    pub fn build(self) -> Result<CallerConfig, &'static str> {
        let system = self.system.ok_or("system is required")?;
        if system.is_empty() {
            return Err("system must not be empty");
        }

        Ok(CallerConfig {
            system,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            http_auth: self.http_auth,
            trust_anchors: self.trust_anchors.unwrap_or(TrustAnchors::WebPki),
            additional_headers: self.additional_headers,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| crate::USER_AGENT.to_string()),
        })
    }
}

/// HTTP Basic authentication credentials.
#[derive(Clone)]
pub struct HttpAuth {
    /// Username.
    pub username: String,

    /// Password.
    pub password: String,
}

impl HttpAuth {
    /// Create new HTTP auth credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for HttpAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAuth")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Trust anchor configuration for gateway certificate verification.
#[derive(Clone)]
pub enum TrustAnchors {
    /// Use Mozilla's root CA store (webpki-roots).
    WebPki,

    /// Use explicit CA certificates (PEM-encoded).
    Explicit(Vec<Vec<u8>>),

    /// Accept any gateway certificate (insecure, for testing only).
    ///
    /// **WARNING**: This disables all server certificate verification.
    InsecureAcceptAny,
}

impl std::fmt::Debug for TrustAnchors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WebPki => write!(f, "WebPki"),
            Self::Explicit(certs) => write!(f, "Explicit({} certs)", certs.len()),
            Self::InsecureAcceptAny => write!(f, "InsecureAcceptAny"),
        }
    }
}
