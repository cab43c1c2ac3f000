// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 U.S. Federal Government (in countries where recognized)

//! Settings file for administration automation.
//!
//! A single TOML file describes every target system: where its SOAP gateway
//! lives, where its SAML artifact comes from, and which template variables
//! apply to it.
//!
//! # Example Configuration
//!
//! ```toml
//! [defaults]
//! timeout_seconds = 30
//!
//! [defaults.trust]
//! mode = "explicit"
//! ca_bundle_path = "/etc/cordys-admin/ca-bundle.pem"
//!
//! [systems.dev]
//! gateway_url = "https://dev.example.com/cordys/com.eibus.web.soap.Gateway.wcp?organization=${org}"
//! artifact = "env:CORDYS_DEV_ARTIFACT"
//! install_dir = "/opt/cordys"
//!
//! [systems.dev.variables]
//! org = "o=system,cn=cordys,cn=dev,o=example.com"
//!
//! [systems.dev.authentication]
//! username = "svc-admin"
//! password_source = "env:CORDYS_DEV_PASSWORD"
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use cordys_admin_client::settings::SettingsLoader;
//! use cordys_admin_client::template::Bindings;
//! use cordys_admin_client::SoapCaller;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = SettingsLoader::new().load()?;
//!
//! let caller = SoapCaller::from_config(
//!     &settings.to_caller_config("dev")?,
//!     Arc::new(settings.artifact_provider()?),
//! )?;
//! let url = settings.gateway_url("dev", &Bindings::new())?;
//! let response = caller.call(&url, "<SOAP:Envelope>...</SOAP:Envelope>").await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod loader;

pub use config::*;
pub use loader::{CONFIG_ENV_VAR, SettingsLoader};
