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

//! Authentication artifact providers.
//!
//! A SAML artifact is an opaque bearer string issued by an external identity
//! provider for one target system. The [`ArtifactProvider`] trait is the only
//! thing the SOAP caller needs from that subsystem: "give me the current
//! artifact for system X, or tell me there is none".
//!
//! Validity windows belong to the provider. Callers ask again on every
//! invocation and never cache the result.
//!
//! Two providers ship with the crate:
//!
//! - [`StaticArtifactProvider`]: an in-memory registry keyed by system name,
//!   filled by whatever component performs the SSO handshake.
//! - [`SourceArtifactProvider`]: reads each system's artifact from an
//!   environment variable or a file every time it is asked.
//!
//! # Example
//!
//! ```
//! use cordys_admin_client::artifact::{ArtifactProvider, StaticArtifactProvider};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = StaticArtifactProvider::new();
//! provider.insert("dev", "AAQAAK7Y...");
//!
//! let artifact = provider.artifact("dev").await?;
//! assert_eq!(artifact, "AAQAAK7Y...");
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{AdminError, Result};

/// Source of authentication artifacts for named target systems.
#[async_trait]
pub trait ArtifactProvider: Send + Sync {
    /// Return the current artifact for `system`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::ArtifactUnavailable`] when no artifact can be
    /// produced for the system.
    async fn artifact(&self, system: &str) -> Result<String>;
}

#[async_trait]
impl<P: ArtifactProvider + ?Sized> ArtifactProvider for Arc<P> {
    async fn artifact(&self, system: &str) -> Result<String> {
        (**self).artifact(system).await
    }
}

#[async_trait]
impl<P: ArtifactProvider + ?Sized> ArtifactProvider for Box<P> {
    async fn artifact(&self, system: &str) -> Result<String> {
        (**self).artifact(system).await
    }
}

/// In-memory, thread-safe registry of artifacts keyed by system name.
#[derive(Debug, Default)]
pub struct StaticArtifactProvider {
    artifacts: RwLock<HashMap<String, String>>,
}

impl StaticArtifactProvider {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or replace the artifact for a system.
    pub fn insert(&self, system: impl Into<String>, artifact: impl Into<String>) {
        let mut artifacts = self
            .artifacts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        artifacts.insert(system.into(), artifact.into());
    }

    /// Forget the artifact for a system, returning it if present.
    pub fn remove(&self, system: &str) -> Option<String> {
        let mut artifacts = self
            .artifacts
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        artifacts.remove(system)
    }

    /// Returns true if an artifact is registered for the system.
    pub fn contains(&self, system: &str) -> bool {
        self.artifacts
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains_key(system)
    }
}

#[async_trait]
impl ArtifactProvider for StaticArtifactProvider {
    async fn artifact(&self, system: &str) -> Result<String> {
        let artifacts = self
            .artifacts
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        artifacts
            .get(system)
            .cloned()
            .ok_or_else(|| AdminError::artifact_unavailable(system, "no artifact registered"))
    }
}

/// Where a system's artifact is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSource {
    /// `env:NAME`: value of an environment variable.
    Env(String),
    /// `file:/path`: contents of a file, surrounding whitespace trimmed.
    File(PathBuf),
    /// `literal:VALUE`: a fixed value, mostly useful for testing.
    Literal(String),
}

impl ArtifactSource {
    /// Parse a `scheme:value` source specification.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown scheme or empty value.
    pub fn parse(spec: &str) -> Result<Self> {
        let source = if let Some(var_name) = spec.strip_prefix("env:") {
            Self::Env(var_name.to_string())
        } else if let Some(path) = spec.strip_prefix("file:") {
            Self::File(PathBuf::from(path))
        } else if let Some(value) = spec.strip_prefix("literal:") {
            Self::Literal(value.to_string())
        } else {
            return Err(AdminError::config(format!(
                "Unknown artifact source '{spec}'; use env:VAR_NAME, file:/path or literal:VALUE"
            )));
        };

        let empty = match &source {
            Self::Env(name) => name.is_empty(),
            Self::File(path) => path.as_os_str().is_empty(),
            Self::Literal(_) => false,
        };
        if empty {
            return Err(AdminError::config(format!("Empty artifact source '{spec}'")));
        }

        Ok(source)
    }

    async fn read(&self, system: &str) -> Result<String> {
        let value = match self {
            Self::Env(var_name) => std::env::var(var_name).map_err(|_| {
                AdminError::artifact_unavailable(
                    system,
                    format!("environment variable {var_name} not set"),
                )
            })?,
            Self::File(path) => tokio::fs::read_to_string(path)
                .await
                .map(|s| s.trim().to_string())
                .map_err(|e| {
                    AdminError::artifact_unavailable(
                        system,
                        format!("failed to read {}: {e}", path.display()),
                    )
                })?,
            Self::Literal(value) => value.clone(),
        };

        Ok(value)
    }
}

/// Provider that resolves each system's [`ArtifactSource`] on every request.
#[derive(Debug, Clone, Default)]
pub struct SourceArtifactProvider {
    sources: HashMap<String, ArtifactSource>,
}

impl SourceArtifactProvider {
    /// Create a provider with no systems.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the artifact source for a system, builder style.
    pub fn with_source(mut self, system: impl Into<String>, source: ArtifactSource) -> Self {
        self.sources.insert(system.into(), source);
        self
    }

    /// Names of the systems this provider knows about.
    pub fn systems(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }
}

#[async_trait]
impl ArtifactProvider for SourceArtifactProvider {
    async fn artifact(&self, system: &str) -> Result<String> {
        let source = self.sources.get(system).ok_or_else(|| {
            AdminError::artifact_unavailable(system, "no artifact source configured")
        })?;

        tracing::debug!(system, source = source_kind(source), "Reading artifact");
        source.read(system).await
    }
}

fn source_kind(source: &ArtifactSource) -> &'static str {
    match source {
        ArtifactSource::Env(_) => "env",
        ArtifactSource::File(_) => "file",
        ArtifactSource::Literal(_) => "literal",
    }
}
