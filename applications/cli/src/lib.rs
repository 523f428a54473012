//! Pokoro CLI Library
//!
//! Configuration, the headless audio device and subcommand implementations
//! behind the `pokoro` binary. Exposed as a library for testing.

pub mod commands;
pub mod config;
pub mod device;
pub mod error;

pub use commands::Context;
pub use config::AppConfig;
pub use device::HeadlessDevice;
pub use error::{CliError, Result};
