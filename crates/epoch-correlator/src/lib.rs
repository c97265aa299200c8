//! Maps main chain epochs onto the partner chain epochs that start during
//! them, and back.

#![deny(unused_crate_dependencies)]
#![deny(unused_must_use)]

mod correlator;

pub use correlator::EpochCorrelator;

use pc_e2e_types::{
    McEpoch,
    PcEpoch,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The clocks produced an empty or inverted range. Only a broken
    /// configuration can cause this.
    #[error("main chain epoch {mc_epoch} maps to the empty partner chain epoch range [{start}, {stop})")]
    InvalidRange {
        mc_epoch: McEpoch,
        start: PcEpoch,
        stop: PcEpoch,
    },
    /// The start of the epoch does not fit in a `u64` timestamp.
    #[error("start of main chain epoch {mc_epoch} overflows a unix timestamp")]
    TimestampOverflow { mc_epoch: McEpoch },
    /// No main chain epoch in `1..=current_mc_epoch` contains the epoch.
    #[error("partner chain epoch {pc_epoch} predates main chain epochs up to {current_mc_epoch}")]
    EpochNotFound {
        pc_epoch: PcEpoch,
        current_mc_epoch: McEpoch,
    },
}

pub type Result<T> = core::result::Result<T, Error>;
