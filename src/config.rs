//! Configuration module for the application shell.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `PETCLINIC_` and use double
//! underscores to separate nested levels:
//! - `PETCLINIC_SERVER__BIND=0.0.0.0:9090` sets `server.bind`
//! - `PETCLINIC_SERVER__REQUEST_LOG=false` sets `server.request_log`
//! - `PETCLINIC_DEBUG=true` sets `debug`
//!
//! Note that `PETCLINIC_PROFILE` belongs to active-profile resolution, not
//! to these settings; the extractor ignores it as an unknown key.

use crate::error::{BootstrapError, BootstrapResult};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Global debug mode
    #[serde(default = "default_false")]
    pub debug: bool,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// HTTP server bind address
    #[serde(default = "default_bind_address")]
    pub bind: String,

    /// Log each request/response pair at the server edge
    #[serde(default = "default_true")]
    pub request_log: bool,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_false() -> bool {
    false
}
fn default_true() -> bool {
    true
}
fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            debug: false,
            server: ServerConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind_address(),
            request_log: true,
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> BootstrapResult<Self> {
        // Try to find the workspace root by looking for .petclinic directory
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(".petclinic/settings.toml"));

        Self::load_from(config_path)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<std::path::Path>) -> BootstrapResult<Self> {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Settings::default()))
            // Layer in config file if it exists
            .merge(Toml::file(path))
            // Layer in environment variables with PETCLINIC_ prefix
            // Use double underscore (__) to separate nested levels
            // Single underscore (_) remains as is within field names
            .merge(Env::prefixed("PETCLINIC_").map(|key| {
                key.as_str()
                    .to_lowercase()
                    .replace("__", ".") // Double underscore becomes dot
                    .into()
            }))
            // Extract into Settings struct
            .extract()
            .map_err(|e| BootstrapError::SettingsLoad {
                source: Box::new(e),
            })
    }

    /// Find the workspace root by looking for .petclinic directory
    /// Searches from current directory up to root
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(".petclinic");
            if config_dir.exists() && config_dir.is_dir() {
                return Some(config_dir.join("settings.toml"));
            }
        }

        None
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> BootstrapResult<()> {
        let path = path.as_ref();
        let parent = path.parent().ok_or_else(|| BootstrapError::ConfigError {
            reason: format!("invalid settings path '{}'", path.display()),
        })?;
        std::fs::create_dir_all(parent).map_err(|source| BootstrapError::FileWrite {
            path: parent.to_path_buf(),
            source,
        })?;

        let toml_string =
            toml::to_string_pretty(self).map_err(|e| BootstrapError::ConfigError {
                reason: format!("cannot serialize settings: {e}"),
            })?;
        std::fs::write(path, toml_string).map_err(|source| BootstrapError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// Create a default settings file with helpful comments
    pub fn init_config_file(force: bool) -> BootstrapResult<PathBuf> {
        let config_path = PathBuf::from(".petclinic/settings.toml");

        if !force && config_path.exists() {
            return Err(BootstrapError::ConfigError {
                reason: "configuration file already exists, use --force to overwrite".to_string(),
            });
        }

        // Create parent directory if needed
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| BootstrapError::FileWrite {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        // Create a well-documented settings.toml template
        let template = r#"# Petclinic Configuration File

# Version of the configuration schema
version = 1

# Global debug mode
debug = false

[server]
# HTTP server bind address
bind = "127.0.0.1:8080"

# Log each request/response pair at the server edge
request_log = true
"#;

        std::fs::write(&config_path, template).map_err(|source| BootstrapError::FileWrite {
            path: config_path.clone(),
            source,
        })?;

        // Create starter resource files for the configuration scopes
        Self::create_starter_scope_files(force)?;

        Ok(config_path)
    }

    /// Create starter resource files under config/ for the root and web
    /// configuration scopes. Existing files are left alone unless forced.
    fn create_starter_scope_files(force: bool) -> BootstrapResult<()> {
        let config_dir = PathBuf::from("config");
        std::fs::create_dir_all(&config_dir).map_err(|source| BootstrapError::FileWrite {
            path: config_dir.clone(),
            source,
        })?;

        let business = r#"# Business wiring: service and data-access configuration.
# Top-level tables are profiles; the active profile overlays [default].

[default.datasource]
url = "petclinic.db"
pool_size = 8

[jdbc.datasource]
url = "petclinic.db"

[jdbc-test.datasource]
url = ":memory:"
pool_size = 1
"#;

        let tools = r#"# Tool wiring: caching and supporting infrastructure.

[default.cache]
enabled = true
ttl_secs = 300

[jdbc-test.cache]
enabled = false
"#;

        let web = r#"# Presentation wiring. Profile-independent.

[default]
title = "Petclinic"
welcome = "Welcome to the Pet Clinic"
"#;

        for (name, content) in [
            ("business.toml", business),
            ("tools.toml", tools),
            ("web.toml", web),
        ] {
            let path = config_dir.join(name);
            if !force && path.exists() {
                continue;
            }
            std::fs::write(&path, content).map_err(|source| BootstrapError::FileWrite {
                path: path.clone(),
                source,
            })?;
        }

        Ok(())
    }
}
