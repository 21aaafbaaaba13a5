//! Input/Output handling for the CLI surface.
//!
//! This module provides:
//! - Consistent error handling and exit codes

pub mod exit_code;

pub use exit_code::ExitCode;
