use std::path::PathBuf;

/// A clock or encoding parameter is missing, zero or inconsistent.
///
/// These are fatal: nothing built on a broken clock can be trusted.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("`{field}` must be greater than zero")]
    ZeroValue { field: &'static str },
    #[error(
        "partner chain epoch ({pc_epoch_seconds}s) is longer than main chain epoch ({mc_epoch_seconds}s)"
    )]
    PcEpochLongerThanMcEpoch {
        pc_epoch_seconds: u64,
        mc_epoch_seconds: u64,
    },
    #[error("`{field}` overflows u64")]
    Overflow { field: &'static str },
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse JSON config {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse TOML config {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
