/// The main library module for petclinic
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod io;
pub mod server;

// Explicit exports for better API clarity
pub use bootstrap::{
    AppWiring, Bootstrapper, ConfigScope, DEFAULT_PROFILE, EncodingFilter, PROFILE_ENV_VAR,
    ProfileSources, resolve_active_profile,
};
pub use config::Settings;
pub use error::{BootstrapError, BootstrapResult};
pub use io::ExitCode;
