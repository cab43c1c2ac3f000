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

//! # cordys-admin-client
//!
//! An authenticated SOAP client for administering Cordys systems.
//!
//! Administration operations are SOAP envelopes posted to a system's gateway.
//! Each request is authenticated with a SAML artifact carried in the
//! `SAMLart` query parameter; this library fetches that artifact, builds the
//! request, and maps the outcome to a result or a typed failure.
//!
//! ## Features
//!
//! - **Async-first design** using Tokio
//! - **Pluggable artifact providers** behind the [`ArtifactProvider`] trait
//! - **`${name}` templates** with a deferred install-directory stage
//! - **HTTP Basic auth** at the transport level, next to the artifact
//! - **TOML settings** describing every target system
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use cordys_admin_client::{CallerConfig, SoapCaller};
//! use cordys_admin_client::artifact::StaticArtifactProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = Arc::new(StaticArtifactProvider::new());
//!     provider.insert("dev", "AAQAAK7Y...");
//!
//!     let config = CallerConfig::builder()
//!         .system("dev")
//!         .http_auth("svc-admin", "password")
//!         .build()?;
//!
//!     let caller = SoapCaller::from_config(&config, provider)?;
//!     let response = caller
//!         .call(
//!             "https://cordys.example.com/cordys/com.eibus.web.soap.Gateway.wcp",
//!             "<SOAP:Envelope>...</SOAP:Envelope>",
//!         )
//!         .await?;
//!
//!     println!("{response}");
//!     Ok(())
//! }
//! ```
//!
//! ## Templates
//!
//! ```
//! use cordys_admin_client::template::{resolve_install_dir, substitute, Bindings};
//!
//! let bindings = Bindings::new().with("org", "o=system");
//! let first = substitute("${CORDYS_INSTALL_DIR}/${org}", &bindings).unwrap();
//! assert_eq!(first, "CORDYS_INSTALL_DIR/o=system");
//! assert_eq!(resolve_install_dir(&first, "/opt/cordys"), "/opt/cordys/o=system");
//! ```
//!
//! ## Failures
//!
//! Every call either returns the raw response body of a `200 OK` exchange or
//! an [`AdminError`]. No call is retried; a caller that wants to refresh a
//! stale artifact checks [`AdminError::is_authentication_failure`] or
//! [`AdminError::status`] and calls again.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod artifact;
pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod settings;
pub mod template;
pub mod transport;

// Re-export main types at crate root for convenience
pub use artifact::ArtifactProvider;
pub use client::{ARTIFACT_PARAM, SoapCaller};
pub use config::{CallerConfig, CallerConfigBuilder, HttpAuth, TrustAnchors};
pub use error::{AdminError, Result};
pub use query::QueryParams;
pub use template::{Bindings, substitute};
pub use transport::{HttpTransport, ReqwestTransport};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent string for HTTP requests.
pub const USER_AGENT: &str = concat!("cordys-admin-client/", env!("CARGO_PKG_VERSION"));
