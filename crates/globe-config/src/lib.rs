//! Configuration for the globe tools.
//!
//! Settings persist to disk as a RON file; every section falls back to its
//! defaults when missing, and selected fields can be overridden from the
//! command line.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, DebugConfig, MeshConfig, ReprojectConfig, ViewConfig,
    default_config_dir,
};
pub use error::ConfigError;
