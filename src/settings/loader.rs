// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 U.S. Federal Government (in countries where recognized)

//! Settings file discovery and loading.

use std::path::{Path, PathBuf};

use crate::error::{AdminError, Result};

use super::config::AdminSettings;

/// Environment variable that overrides settings discovery.
pub const CONFIG_ENV_VAR: &str = "CORDYS_ADMIN_CONFIG";

/// Settings loader with discovery and precedence rules.
///
/// # Search Order
///
/// First found wins:
///
/// 1. Explicit path (if set via `with_path()`)
/// 2. Environment variable `CORDYS_ADMIN_CONFIG`
/// 3. Unix: `/etc/cordys-admin/config.toml`
/// 4. User config dir: `<config_dir>/cordys-admin/config.toml`
/// 5. Current directory: `./cordys-admin.toml`
///
/// # Example
///
/// ```no_run
/// use cordys_admin_client::settings::SettingsLoader;
///
/// let settings = SettingsLoader::new()
///     .with_path("/etc/cordys-admin/config.toml")
///     .load()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    explicit_path: Option<PathBuf>,
    validate: bool,
    env_var_name: String,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    /// Create a new loader with default settings.
    pub fn new() -> Self {
        Self {
            explicit_path: None,
            validate: true,
            env_var_name: CONFIG_ENV_VAR.to_string(),
        }
    }

    /// Set an explicit settings file path.
    ///
    /// When set, only this path will be checked (no discovery).
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.explicit_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Enable or disable validation after loading.
    ///
    /// Default: `true`
    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Set the environment variable name for path override.
    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var_name = name.into();
        self
    }

    /// Load the settings file.
    ///
    /// # Errors
    ///
    /// Returns an error if no file is found, it cannot be read, the TOML is
    /// invalid, or validation fails (if enabled).
    pub fn load(&self) -> Result<AdminSettings> {
        let path = self.find_config_file()?;
        tracing::debug!(path = %path.display(), "Loading settings");

        let toml_content = std::fs::read_to_string(&path).map_err(|e| {
            AdminError::config(format!("Failed to read {}: {e}", path.display()))
        })?;

        self.load_from_str(&toml_content)
    }

    /// Load settings from a TOML string.
    pub fn load_from_str(&self, toml_content: &str) -> Result<AdminSettings> {
        let settings = AdminSettings::from_toml(toml_content)?;

        if self.validate {
            settings.validate()?;
        }

        Ok(settings)
    }

    /// Find the settings file path.
    pub fn find_config_file(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.explicit_path {
            if path.exists() {
                return Ok(path.clone());
            }
            return Err(AdminError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        if let Ok(env_path) = std::env::var(&self.env_var_name) {
            let path = PathBuf::from(&env_path);
            if path.exists() {
                return Ok(path);
            }
            return Err(AdminError::config(format!(
                "Configuration file from {} not found: {}",
                self.env_var_name, env_path
            )));
        }

        let search_paths = self.get_search_paths();
        if let Some(path) = search_paths.iter().find(|p| p.exists()) {
            return Ok(path.clone());
        }

        Err(AdminError::config(format!(
            "No configuration file found. Searched:\n  - {}",
            search_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join("\n  - ")
        )))
    }

    /// Get the list of paths to search for settings files.
    pub fn get_search_paths(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        #[cfg(unix)]
        paths.push(PathBuf::from("/etc/cordys-admin/config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("cordys-admin").join("config.toml"));
        }

        paths.push(PathBuf::from("cordys-admin.toml"));

        paths
    }
}
