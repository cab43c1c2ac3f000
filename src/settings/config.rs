// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 U.S. Federal Government (in countries where recognized)

//! Settings file structures.
//!
//! This module defines the TOML schema describing the target systems an
//! administrator works with: gateway URL, artifact source, transport
//! credentials and template variables per system.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::artifact::{ArtifactSource, SourceArtifactProvider};
use crate::config::{CallerConfig, CallerConfigBuilder};
use crate::error::{AdminError, Result};
use crate::template::{self, Bindings};

/// Complete settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminSettings {
    /// Values applied to every system unless overridden.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Target systems keyed by name.
    #[serde(default)]
    pub systems: BTreeMap<String, SystemConfig>,
}

impl AdminSettings {
    /// Parse settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or has unknown fields.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| AdminError::config(format!("Invalid TOML: {e}")))
    }

    /// Serialize settings to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| AdminError::config(format!("TOML serialize: {e}")))
    }

    /// Validate the settings for completeness and consistency.
    ///
    /// # Errors
    ///
    /// Returns an error listing every validation failure.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.systems.is_empty() {
            errors.push("at least one [systems.<name>] block is required".to_string());
        }

        if self.defaults.timeout_seconds == 0 {
            errors.push("defaults.timeout_seconds must be > 0".to_string());
        }

        if self.defaults.trust.mode == TrustMode::Explicit
            && self.defaults.trust.ca_bundle_path.is_none()
        {
            errors.push(
                "defaults.trust.ca_bundle_path is required when trust.mode is 'explicit'"
                    .to_string(),
            );
        }

        for (name, system) in &self.systems {
            if system.gateway_url.is_empty() {
                errors.push(format!("systems.{name}.gateway_url is required"));
            } else if !system.gateway_url.starts_with("https://")
                && !system.gateway_url.starts_with("http://")
            {
                errors.push(format!("systems.{name}.gateway_url must be an http(s) URL"));
            }

            if let Err(e) = ArtifactSource::parse(&system.artifact) {
                errors.push(format!("systems.{name}.artifact: {e}"));
            }

            if system.timeout_seconds == Some(0) {
                errors.push(format!("systems.{name}.timeout_seconds must be > 0"));
            }

            if let Some(ref auth) = system.authentication {
                if auth.username.is_empty() {
                    errors.push(format!("systems.{name}.authentication.username is required"));
                }
                if auth.password_source.is_empty() {
                    errors.push(format!(
                        "systems.{name}.authentication.password_source is required"
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AdminError::config(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }

    /// Look up a system by name.
    pub fn system(&self, name: &str) -> Result<&SystemConfig> {
        self.systems
            .get(name)
            .ok_or_else(|| AdminError::config(format!("Unknown system '{name}'")))
    }

    /// Resolve the gateway URL of a system.
    ///
    /// The URL template is resolved against the system's `variables`, then
    /// `overrides`, and the install-directory marker is replaced when the
    /// system declares `install_dir`.
    pub fn gateway_url(&self, name: &str, overrides: &Bindings) -> Result<String> {
        let system = self.system(name)?;
        system.render(&system.gateway_url, overrides)
    }

    /// Build an artifact provider covering every configured system.
    pub fn artifact_provider(&self) -> Result<SourceArtifactProvider> {
        self.systems
            .iter()
            .try_fold(
                SourceArtifactProvider::new(),
                |provider, (name, system)| -> Result<SourceArtifactProvider> {
                    let source = ArtifactSource::parse(&system.artifact)?;
                    Ok(provider.with_source(name.clone(), source))
                },
            )
    }

    /// Convert a system's settings into a caller configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the system is unknown, the CA bundle cannot be read,
    /// or the transport password cannot be resolved.
    pub fn to_caller_config(&self, name: &str) -> Result<CallerConfig> {
        let system = self.system(name)?;
        let mut builder = CallerConfigBuilder::new().system(name);

        let timeout = system.timeout_seconds.unwrap_or(self.defaults.timeout_seconds);
        builder = builder
            .timeout(Duration::from_secs(timeout))
            .connect_timeout(Duration::from_secs(self.defaults.connect_timeout_seconds));

        builder = match self.defaults.trust.mode {
            TrustMode::WebPki => builder.trust_webpki_roots(),
            TrustMode::Explicit => {
                let path = self.defaults.trust.ca_bundle_path.as_ref().ok_or_else(|| {
                    AdminError::config("ca_bundle_path required for explicit trust")
                })?;
                let ca_pem = std::fs::read(path).map_err(|e| {
                    AdminError::config(format!("Failed to read {}: {e}", path.display()))
                })?;
                builder.trust_explicit(vec![ca_pem])
            }
            TrustMode::Insecure => builder.trust_any_insecure(),
        };

        if let Some(ref auth) = system.authentication {
            let password = resolve_password(&auth.password_source)?;
            builder = builder.http_auth(auth.username.clone(), password);
        }

        for (header, value) in &system.headers {
            builder = builder.add_header(header.clone(), value.clone());
        }

        builder
            .build()
            .map_err(|e| AdminError::config(format!("Failed to build config: {e}")))
    }
}

/// Settings shared by all systems.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// TLS trust configuration.
    #[serde(default)]
    pub trust: TrustConfig,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            trust: TrustConfig::default(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

/// One target system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemConfig {
    /// SOAP gateway URL; may contain `${name}` placeholders.
    pub gateway_url: String,

    /// Artifact source: `env:VAR_NAME`, `file:/path` or `literal:VALUE`.
    pub artifact: String,

    /// Installation directory used by the second substitution stage.
    #[serde(default)]
    pub install_dir: Option<String>,

    /// Per-system request timeout override in seconds.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// Template variables available when rendering URLs and bodies.
    #[serde(default)]
    pub variables: BTreeMap<String, String>,

    /// Additional HTTP headers.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Transport-level credentials sent alongside the artifact.
    #[serde(default)]
    pub authentication: Option<AuthenticationConfig>,
}

impl SystemConfig {
    /// Template bindings declared for this system.
    pub fn bindings(&self) -> Bindings {
        self.variables
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Render a template against this system's variables plus `overrides`.
    pub fn render(&self, template_text: &str, overrides: &Bindings) -> Result<String> {
        let mut bindings = self.bindings();
        bindings.extend(overrides.clone());

        let rendered = template::substitute(template_text, &bindings)?;
        Ok(match self.install_dir {
            Some(ref dir) => template::resolve_install_dir(&rendered, dir),
            None => rendered,
        })
    }
}

/// TLS trust configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TrustConfig {
    /// Trust verification mode.
    #[serde(default)]
    pub mode: TrustMode,

    /// Path to CA certificate bundle (PEM format).
    /// Required when mode is "explicit".
    #[serde(default)]
    pub ca_bundle_path: Option<PathBuf>,
}

/// Trust verification mode.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrustMode {
    /// Use system/Mozilla root CA certificates.
    #[default]
    WebPki,

    /// Use explicit CA certificates from a file.
    Explicit,

    /// Accept any certificate (INSECURE - testing only).
    Insecure,
}

/// Transport-level HTTP Basic credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthenticationConfig {
    /// Username.
    pub username: String,

    /// Password source: "env:VAR_NAME" or "file:/path/to/file".
    pub password_source: String,
}

/// Resolve a password from its configured source.
fn resolve_password(source: &str) -> Result<String> {
    if let Some(var_name) = source.strip_prefix("env:") {
        std::env::var(var_name)
            .map_err(|_| AdminError::config(format!("Environment variable {var_name} not set")))
    } else if let Some(path) = source.strip_prefix("file:") {
        std::fs::read_to_string(path)
            .map(|s| s.trim().to_string())
            .map_err(|e| AdminError::config(format!("Failed to read password file: {e}")))
    } else {
        Err(AdminError::config(format!(
            "Unknown password_source: {source}"
        )))
    }
}
