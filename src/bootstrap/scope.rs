//! Configuration scopes.
//!
//! A scope is a named, ordered list of TOML resource locations plus an
//! optional profile tag. Construction only declares the locations; no file
//! is read until the figment is extracted by the serving layer, and missing
//! resources are tolerated at that point (figment's file provider is
//! lenient). Validating that the named resources exist or parse is the
//! consumer's concern, not this module's.
//!
//! Resource files use nested-profile form: top-level tables are profile
//! names, with `[default]` holding the profile-independent values.

use figment::{
    Figment,
    providers::{Format, Toml},
};
use std::path::{Path, PathBuf};

/// Business wiring: service and data-access configuration.
pub const BUSINESS_CONFIG: &str = "config/business.toml";

/// Tool wiring: caching and supporting infrastructure.
pub const TOOLS_CONFIG: &str = "config/tools.toml";

/// Presentation wiring.
pub const WEB_CONFIG: &str = "config/web.toml";

/// A named collection of configuration-resource locations with an optional
/// profile tag, later materialized into live wiring by the serving layer.
#[derive(Debug, Clone)]
pub struct ConfigScope {
    name: &'static str,
    locations: Vec<PathBuf>,
    profile: Option<String>,
}

impl ConfigScope {
    /// The root scope: business wiring then tool wiring, in that order,
    /// tagged with the active profile.
    pub fn root(profile: impl Into<String>) -> Self {
        Self {
            name: "root",
            locations: vec![PathBuf::from(BUSINESS_CONFIG), PathBuf::from(TOOLS_CONFIG)],
            profile: Some(profile.into()),
        }
    }

    /// The web scope: presentation wiring only, untagged.
    pub fn web() -> Self {
        Self {
            name: "web",
            locations: vec![PathBuf::from(WEB_CONFIG)],
            profile: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Resource locations in declaration order.
    pub fn locations(&self) -> &[PathBuf] {
        &self.locations
    }

    /// The profile tag, if this scope carries one.
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Assemble the scope into a figment, merging resources in declaration
    /// order and selecting the profile tag when present. Reads happen
    /// lazily at extraction time.
    pub fn figment(&self) -> Figment {
        self.figment_relative_to(Path::new(""))
    }

    /// Like [`figment`](Self::figment), with locations resolved against a
    /// base directory instead of the working directory.
    pub fn figment_relative_to(&self, base: &Path) -> Figment {
        let mut figment = Figment::new();
        for location in &self.locations {
            figment = figment.merge(Toml::file(base.join(location)).nested());
        }
        if let Some(profile) = &self.profile {
            figment = figment.select(profile.clone());
        }
        figment
    }
}
