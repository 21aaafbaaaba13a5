//! Application startup wiring.
//!
//! Run once at process start, before any request handling begins: resolve
//! the active profile, compose the root and web configuration scopes,
//! declare the request filters, and map the front dispatcher. The
//! constructed wiring is handed to the serving layer, which owns all
//! subsequent lifecycle and concurrency.

pub mod filter;
pub mod profile;
pub mod scope;

pub use filter::{EncodingFilter, request_filters, route_mappings};
pub use profile::{DEFAULT_PROFILE, PROFILE_ENV_VAR, ProfileSources, resolve_active_profile};
pub use scope::ConfigScope;

/// The not-yet-initialized application shell. Consuming it via
/// [`initialize`](Bootstrapper::initialize) is the only transition out of
/// this state.
#[derive(Debug, Default)]
pub struct Bootstrapper {
    sources: ProfileSources,
}

impl Bootstrapper {
    pub fn new(sources: ProfileSources) -> Self {
        Self { sources }
    }

    /// Capture the process environment as the profile source, with an
    /// optional explicit override taking precedence.
    pub fn from_process(override_value: Option<String>) -> Self {
        Self::new(ProfileSources::from_process(override_value))
    }

    /// Resolve the profile and compose the configuration scopes. Every
    /// input path has a defined fallback, so initialization cannot fail.
    pub fn initialize(self) -> AppWiring {
        let active_profile = resolve_active_profile(&self.sources);
        AppWiring {
            root: ConfigScope::root(active_profile.clone()),
            web: ConfigScope::web(),
            active_profile,
        }
    }
}

/// The initialized startup wiring: one resolved profile, two sibling
/// configuration scopes, and the filter and route tables the serving layer
/// installs.
#[derive(Debug, Clone)]
pub struct AppWiring {
    pub active_profile: String,
    pub root: ConfigScope,
    pub web: ConfigScope,
}

impl AppWiring {
    /// Path patterns the front dispatcher is bound to.
    pub fn route_mappings(&self) -> &'static [&'static str] {
        route_mappings()
    }

    /// Filters installed ahead of the dispatcher.
    pub fn request_filters(&self) -> Vec<EncodingFilter> {
        request_filters()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_tags_root_scope_with_resolved_profile() {
        let sources = ProfileSources::new(Some("staging".to_string()), None);
        let wiring = Bootstrapper::new(sources).initialize();

        assert_eq!(wiring.active_profile, "staging");
        assert_eq!(wiring.root.profile(), Some("staging"));
        assert_eq!(wiring.web.profile(), None);
    }

    #[test]
    fn test_initialize_with_no_sources_uses_default_profile() {
        let wiring = Bootstrapper::default().initialize();
        assert_eq!(wiring.active_profile, DEFAULT_PROFILE);
    }

    #[test]
    fn test_wiring_tables() {
        let wiring = Bootstrapper::default().initialize();

        assert_eq!(wiring.route_mappings(), ["/"]);

        let filters = wiring.request_filters();
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0], EncodingFilter::forced());
    }

    #[test]
    fn test_scopes_are_siblings_with_fixed_locations() {
        let wiring = Bootstrapper::default().initialize();
        assert_eq!(wiring.root.locations().len(), 2);
        assert_eq!(wiring.web.locations().len(), 1);
    }
}
