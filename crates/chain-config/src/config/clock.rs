use crate::ConfigurationError;
use pc_e2e_types::{
    McEpoch,
    PcEpoch,
};
use serde::{
    Deserialize,
    Serialize,
};

/// Main chain slot clock.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, Eq, PartialEq)]
pub struct MainChainClock {
    /// Number of slots in a main chain epoch.
    pub epoch_length: u64,
    /// Slot length in seconds.
    pub slot_length: u64,
    /// Unix timestamp (seconds) of the start of main chain epoch 0.
    pub init_timestamp: u64,
}

impl MainChainClock {
    /// Length of one main chain epoch in seconds.
    pub fn epoch_duration_seconds(&self) -> u64 {
        self.epoch_length.saturating_mul(self.slot_length)
    }
}

/// Partner chain block clock.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, Eq, PartialEq)]
pub struct PartnerChainClock {
    /// Seconds between two slots, one block per slot.
    pub block_duration: u64,
    /// Slots in one partner chain epoch.
    pub slots_in_epoch: u64,
}

impl PartnerChainClock {
    /// Length of one partner chain epoch in seconds.
    pub fn epoch_duration_seconds(&self) -> u64 {
        self.block_duration.saturating_mul(self.slots_in_epoch)
    }

    /// Length of one partner chain epoch in milliseconds.
    pub fn epoch_duration_millis(&self) -> u64 {
        self.epoch_duration_seconds().saturating_mul(1000)
    }
}

/// The two chain clocks plus the deployment facts needed to correlate them.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, Eq, PartialEq)]
pub struct ChainClockConfig {
    pub main_chain: MainChainClock,
    pub partner_chain: PartnerChainClock,
    /// Main chain epoch in which the partner chain was started.
    pub deployment_mc_epoch: McEpoch,
    /// First partner chain epoch, when the chain started mid-epoch and the
    /// computed boundary for `deployment_mc_epoch` is therefore inexact.
    #[serde(default)]
    pub initial_pc_epoch: Option<PcEpoch>,
}

impl ChainClockConfig {
    /// Checks that every clock parameter is usable.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let non_zero = [
            ("main_chain.epoch_length", self.main_chain.epoch_length),
            ("main_chain.slot_length", self.main_chain.slot_length),
            ("partner_chain.block_duration", self.partner_chain.block_duration),
            ("partner_chain.slots_in_epoch", self.partner_chain.slots_in_epoch),
        ];
        for (field, value) in non_zero {
            if value == 0 {
                return Err(ConfigurationError::ZeroValue { field })
            }
        }

        let mc_epoch_seconds = self
            .main_chain
            .epoch_length
            .checked_mul(self.main_chain.slot_length)
            .ok_or(ConfigurationError::Overflow {
                field: "main_chain.epoch_length * main_chain.slot_length",
            })?;
        let pc_epoch_seconds = self
            .partner_chain
            .block_duration
            .checked_mul(self.partner_chain.slots_in_epoch)
            // epoch boundaries are also computed in milliseconds
            .filter(|seconds| seconds.checked_mul(1000).is_some())
            .ok_or(ConfigurationError::Overflow {
                field: "partner_chain.block_duration * partner_chain.slots_in_epoch",
            })?;

        if pc_epoch_seconds > mc_epoch_seconds {
            return Err(ConfigurationError::PcEpochLongerThanMcEpoch {
                pc_epoch_seconds,
                mc_epoch_seconds,
            })
        }

        Ok(())
    }

    /// Number of whole partner chain epochs that fit in one main chain epoch.
    pub fn pc_epochs_in_mc_epoch(&self) -> u64 {
        self.main_chain.epoch_duration_seconds()
            / self.partner_chain.epoch_duration_seconds().max(1)
    }
}
