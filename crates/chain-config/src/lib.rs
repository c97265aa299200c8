#![deny(unused_must_use)]

pub mod config;

pub use config::*;

/// Environment variable naming the config file used by e2e tooling.
pub const CONFIG_FILE_KEY: &str = "PC_E2E_CONFIG";
