use crate::{
    ChainClockConfig,
    ConfigurationError,
    HeaderEncodingConfig,
    MainChainClock,
    PartnerChainClock,
    CONFIG_FILE_KEY,
};
use pc_e2e_types::McEpoch;
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    env,
    fs,
    path::Path,
    str::FromStr,
};

/// Name accepted by [`E2eConfig::from_str`] for the built-in local preset.
pub const LOCAL_TESTNET: &str = "local_testnet";

/// Everything the e2e core needs to know about a deployed environment.
#[derive(Clone, Debug, Deserialize, Serialize, Eq, PartialEq)]
pub struct E2eConfig {
    #[serde(flatten)]
    pub clock: ChainClockConfig,
    #[serde(flatten)]
    pub block_encoding: HeaderEncodingConfig,
}

impl E2eConfig {
    /// The local docker testnet: one second main chain slots, 120 slot main
    /// chain epochs and 6 second partner chain blocks in 10 slot epochs.
    pub fn local_testnet() -> Self {
        Self {
            clock: ChainClockConfig {
                main_chain: MainChainClock {
                    epoch_length: 120,
                    slot_length: 1,
                    init_timestamp: 1_666_656_000,
                },
                partner_chain: PartnerChainClock {
                    block_duration: 6,
                    slots_in_epoch: 10,
                },
                deployment_mc_epoch: McEpoch::new(1),
                initial_pc_epoch: None,
            },
            block_encoding: HeaderEncodingConfig::local_testnet(),
        }
    }

    /// Reads and validates a config file. Files ending in `.json` are parsed
    /// as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let is_json = path
            .extension()
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        let config: Self = if is_json {
            serde_json::from_str(&content).map_err(|source| ConfigurationError::Json {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            toml::from_str(&content).map_err(|source| ConfigurationError::Toml {
                path: path.to_path_buf(),
                source,
            })?
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded e2e config");
        Ok(config)
    }

    /// Loads the config named by the `PC_E2E_CONFIG` environment variable,
    /// falling back to the local testnet preset when it is unset.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        match env::var(CONFIG_FILE_KEY) {
            Ok(value) => value.parse(),
            Err(_) => {
                tracing::info!(
                    "`{CONFIG_FILE_KEY}` is not set, using the {LOCAL_TESTNET} preset"
                );
                Ok(Self::local_testnet())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.clock.validate()
    }
}

impl FromStr for E2eConfig {
    type Err = ConfigurationError;

    /// Either the name of a preset or a path to a config file.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            LOCAL_TESTNET => Ok(Self::local_testnet()),
            path => Self::load(path),
        }
    }
}
