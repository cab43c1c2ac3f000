// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 U.S. Federal Government (in countries where recognized)

//! Variable substitution for request bodies and URLs.
//!
//! Templates contain `${name}` placeholders resolved against a [`Bindings`]
//! map. Two names are reserved and behave differently when they are not
//! bound:
//!
//! - `${dollar}` resolves to a literal `$`.
//! - `${CORDYS_INSTALL_DIR}` is deferred: the first stage writes the bare
//!   marker `CORDYS_INSTALL_DIR` into the output and a second stage,
//!   [`resolve_install_dir`], replaces it once the installation directory of
//!   the target system is known.
//!
//! Any other unbound placeholder is an error.
//!
//! # Example
//!
//! ```
//! use cordys_admin_client::template::{substitute, Bindings};
//!
//! let bindings = Bindings::new().with("org", "o=system,cn=cordys");
//! let body = substitute("<dn>${org}</dn><cost>${dollar}5</cost>", &bindings).unwrap();
//! assert_eq!(body, "<dn>o=system,cn=cordys</dn><cost>$5</cost>");
//! ```

use std::collections::HashMap;

use crate::error::{AdminError, Result};

const PLACEHOLDER_OPEN: &str = "${";

/// Reserved placeholder names with fixed resolution semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedVariable {
    /// `${dollar}`: resolves to a literal `$`.
    Dollar,
    /// `${CORDYS_INSTALL_DIR}`: passed through as a marker for the second stage.
    InstallDir,
}

impl ReservedVariable {
    /// Look up a reserved variable by placeholder name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dollar" => Some(Self::Dollar),
            "CORDYS_INSTALL_DIR" => Some(Self::InstallDir),
            _ => None,
        }
    }

    /// The placeholder name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dollar => "dollar",
            Self::InstallDir => "CORDYS_INSTALL_DIR",
        }
    }

    /// Text written by the first stage when the name is unbound.
    pub fn first_stage_value(&self) -> &'static str {
        match self {
            Self::Dollar => "$",
            Self::InstallDir => self.name(),
        }
    }

    /// Whether a later stage is expected to resolve the emitted text.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::InstallDir)
    }
}

/// Name to value map used to resolve placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: HashMap<String, String>,
}

impl Bindings {
    /// Create an empty binding set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a binding.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Look up a binding.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no bindings.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merge another binding set into this one. Entries in `other` win.
    pub fn extend(&mut self, other: Bindings) {
        self.values.extend(other.values);
    }

    /// Parse a `name=value` pair, splitting on the first `=`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the pair has no `=` or an empty name.
    pub fn parse_pair(pair: &str) -> Result<(String, String)> {
        match pair.split_once('=') {
            Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
            _ => Err(AdminError::config(format!(
                "Expected NAME=VALUE, got '{pair}'"
            ))),
        }
    }
}

impl From<HashMap<String, String>> for Bindings {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Resolve every `${name}` placeholder in `template`.
///
/// Bound names always win, including over the reserved names. Substituted
/// values are not scanned again.
///
/// # Errors
///
/// - [`AdminError::MalformedTemplate`] when a `${` has no closing `}`.
/// - [`AdminError::UnknownVariable`] when a name is neither bound nor reserved.
pub fn substitute(template: &str, bindings: &Bindings) -> Result<String> {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    let mut consumed = 0;

    while let Some(var_start) = rest.find(PLACEHOLDER_OPEN) {
        result.push_str(&rest[..var_start]);

        let after_open = &rest[var_start + PLACEHOLDER_OPEN.len()..];
        let Some(var_end) = after_open.find('}') else {
            return Err(AdminError::malformed_template(consumed + var_start));
        };

        let var_name = &after_open[..var_end];
        result.push_str(resolve(var_name, bindings)?);

        let advance = var_start + PLACEHOLDER_OPEN.len() + var_end + 1;
        consumed += advance;
        rest = &rest[advance..];
    }

    result.push_str(rest);
    Ok(result)
}

fn resolve<'a>(name: &str, bindings: &'a Bindings) -> Result<&'a str> {
    if let Some(value) = bindings.get(name) {
        return Ok(value);
    }

    match ReservedVariable::from_name(name) {
        Some(reserved) => Ok(reserved.first_stage_value()),
        None => Err(AdminError::unknown_variable(name)),
    }
}

/// Second stage: replace the deferred install-directory marker.
///
/// Applied to text produced by [`substitute`] once the installation directory
/// of the target system is known.
pub fn resolve_install_dir(text: &str, install_dir: &str) -> String {
    text.replace(ReservedVariable::InstallDir.name(), install_dir)
}
