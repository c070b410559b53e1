//! PM-Pro command line
//!
//! - [`app`]: command tree and dispatch
//! - [`config`]: layered TOML/environment configuration
//! - [`backlog`]: JSON and TOML feature backlog files
//! - [`render`]: plain-text output
//! - [`logging`]: tracing subscriber setup

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod app;
pub mod backlog;
pub mod config;
pub mod logging;
pub mod render;

pub use app::{build_cli, execute, Context};
pub use config::PmConfig;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
