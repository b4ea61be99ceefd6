//! Soundpool admin CLI library
//!
//! Configuration, subcommands, and text rendering behind the `pool-admin`
//! binary.

pub mod commands;
pub mod config;
pub mod error;
pub mod progress;
pub mod render;

pub use commands::{App, ImportRequest};
pub use config::AdminConfig;
pub use error::{AdminError, Result};
