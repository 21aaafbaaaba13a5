//! Active-profile resolution.
//!
//! The profile is a deployment-chosen string that selects which wiring
//! variant of the root configuration scope is active (for example which
//! data-access strategy the business layer uses).
//!
//! Resolution order:
//! 1. Explicit runtime override (`--profile`)
//! 2. `PETCLINIC_PROFILE` environment variable (container/orchestration)
//! 3. Stock default

/// Profile used when neither the override nor the environment supplies one.
pub const DEFAULT_PROFILE: &str = "jdbc";

/// Environment variable consulted when no explicit override is given.
pub const PROFILE_ENV_VAR: &str = "PETCLINIC_PROFILE";

/// The ambient inputs profile resolution reads, captured as plain values so
/// tests can substitute deterministic sources instead of mutating real
/// process state.
#[derive(Debug, Clone, Default)]
pub struct ProfileSources {
    /// Explicit runtime override, highest precedence.
    pub override_value: Option<String>,

    /// Value of [`PROFILE_ENV_VAR`] at capture time.
    pub env_value: Option<String>,
}

impl ProfileSources {
    pub fn new(override_value: Option<String>, env_value: Option<String>) -> Self {
        Self {
            override_value,
            env_value,
        }
    }

    /// Capture the real process environment as the second source.
    pub fn from_process(override_value: Option<String>) -> Self {
        Self {
            override_value,
            env_value: std::env::var(PROFILE_ENV_VAR).ok(),
        }
    }
}

/// Resolve the active profile from the captured sources.
///
/// An empty value is treated identically to an absent one and falls through
/// to the next source, so the result is never empty.
pub fn resolve_active_profile(sources: &ProfileSources) -> String {
    match &sources.override_value {
        Some(value) if !value.is_empty() => return value.clone(),
        _ => {}
    }

    match &sources.env_value {
        Some(value) if !value.is_empty() => return value.clone(),
        _ => {}
    }

    DEFAULT_PROFILE.to_string()
}
