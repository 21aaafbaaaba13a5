//! CLI entry point for the petclinic web application.
//!
//! Provides commands for serving the application, inspecting the active
//! configuration, and initializing a working directory.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use petclinic::{Bootstrapper, ExitCode, Settings, server};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Veterinary clinic sample web application
#[derive(Parser)]
#[command(
    name = "petclinic",
    version = env!("CARGO_PKG_VERSION"),
    about = "Veterinary clinic sample web application",
    long_about = "Serve the clinic application with profile-driven configuration wiring.",
    next_line_help = true,
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Explicit runtime profile override (takes precedence over PETCLINIC_PROFILE)
    #[arg(short, long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    #[command(
        about = "Start the HTTP server",
        after_help = "Examples:\n  petclinic serve\n  petclinic serve --bind 0.0.0.0:9090\n  petclinic --profile jdbc-test serve\n  PETCLINIC_PROFILE=jdbc-test petclinic serve"
    )]
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Show current configuration settings
    #[command(
        about = "Display the resolved profile and active settings",
        after_help = "Examples:\n  petclinic config\n  petclinic config --json | jq -r '.active_profile'"
    )]
    Config {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Initialize working directory
    #[command(about = "Set up .petclinic directory and starter config/ resources")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load settings first so the log level can honor the debug flag
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    let mut settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            for suggestion in e.recovery_suggestions() {
                eprintln!("  Suggestion: {suggestion}");
            }
            ExitCode::from_error(&e).exit();
        }
    };

    let default_directive = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .init();

    match cli.command {
        Commands::Init { force } => match Settings::init_config_file(force) {
            Ok(path) => {
                println!("Created configuration file at: {}", path.display());
                println!("Starter scope resources are under config/.");
                println!("Edit these files to customize your settings.");
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::from_error(&e).exit();
            }
        },

        Commands::Config { json } => {
            let wiring = Bootstrapper::from_process(cli.profile).initialize();
            if json {
                let payload = serde_json::json!({
                    "active_profile": wiring.active_profile,
                    "settings": settings,
                });
                match serde_json::to_string_pretty(&payload) {
                    Ok(json_str) => println!("{json_str}"),
                    Err(e) => eprintln!("Error displaying config: {e}"),
                }
            } else {
                println!("Active profile: {}", wiring.active_profile);
                println!("{}", "=".repeat(50));
                match toml::to_string_pretty(&settings) {
                    Ok(toml_str) => println!("{toml_str}"),
                    Err(e) => eprintln!("Error displaying config: {e}"),
                }
            }
        }

        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                // Override config with CLI args
                settings.server.bind = bind;
            }

            let wiring = Bootstrapper::from_process(cli.profile).initialize();
            if let Err(e) = server::serve(wiring, settings).await {
                eprintln!("Error: {e}");
                ExitCode::GeneralError.exit();
            }
        }
    }
}
