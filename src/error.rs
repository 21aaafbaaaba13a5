//! Error types for the application shell
//!
//! This module provides structured error types using thiserror for better
//! error handling and actionable error messages.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bootstrap and startup operations
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// Settings could not be loaded from the layered sources
    #[error("Failed to load settings: {source}")]
    SettingsLoad { source: Box<figment::Error> },

    /// A configuration scope's resources could not be materialized
    #[error("Failed to materialize the '{scope}' configuration scope: {source}")]
    ScopeRead {
        scope: String,
        source: Box<figment::Error>,
    },

    /// Configuration errors
    #[error("Invalid configuration: {reason}")]
    ConfigError { reason: String },

    /// File system errors
    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Listener errors
    #[error("Failed to bind '{addr}': {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },
}

impl BootstrapError {
    /// Get a stable status code for this error type.
    ///
    /// Returns a string identifier that can be used in JSON responses
    /// for programmatic error handling.
    pub fn status_code(&self) -> String {
        match self {
            Self::SettingsLoad { .. } => "SETTINGS_LOAD_ERROR",
            Self::ScopeRead { .. } => "SCOPE_READ_ERROR",
            Self::ConfigError { .. } => "CONFIG_ERROR",
            Self::FileWrite { .. } => "FILE_WRITE_ERROR",
            Self::Bind { .. } => "BIND_ERROR",
        }
        .to_string()
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::SettingsLoad { .. } | Self::ConfigError { .. } => vec![
                "Run 'petclinic init --force' to regenerate the default configuration",
                "Check the TOML syntax in .petclinic/settings.toml",
            ],
            Self::ScopeRead { .. } => vec![
                "Check the TOML syntax of the resource files under config/",
                "Run 'petclinic init' to create starter resource files",
            ],
            Self::FileWrite { .. } => vec![
                "Check directory permissions in the current working directory",
                "Ensure the file is not locked by another process",
            ],
            Self::Bind { .. } => vec![
                "Check that no other process is listening on the address",
                "Pass --bind to choose a different address and port",
            ],
        }
    }
}

/// Result type alias for bootstrap operations
pub type BootstrapResult<T> = Result<T, BootstrapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_are_stable() {
        let err = BootstrapError::ConfigError {
            reason: "bad value".to_string(),
        };
        assert_eq!(err.status_code(), "CONFIG_ERROR");

        let err = BootstrapError::Bind {
            addr: "127.0.0.1:8080".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::AddrInUse),
        };
        assert_eq!(err.status_code(), "BIND_ERROR");
    }

    #[test]
    fn test_every_error_has_recovery_suggestions() {
        let err = BootstrapError::ConfigError {
            reason: "bad value".to_string(),
        };
        assert!(!err.recovery_suggestions().is_empty());

        let err = BootstrapError::FileWrite {
            path: PathBuf::from("config/web.toml"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(!err.recovery_suggestions().is_empty());
    }
}
