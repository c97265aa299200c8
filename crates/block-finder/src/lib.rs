//! Finds the range of partner chain blocks produced during a past partner
//! chain epoch by bisecting over block timestamps.

#![deny(unused_must_use)]

mod finder;

pub mod ports;

pub use finder::{
    BlockFinder,
    EpochQuery,
    BLOCKS_AFTER_EPOCH_CHANGE_FROM_NEW_COMMITTEE,
    MAX_MISSING_BLOCKS_PER_PC_EPOCH,
};

use pc_e2e_types::{
    BlockNumber,
    PcEpoch,
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to fetch the latest partner chain block number: {0}")]
    LatestBlock(#[source] anyhow::Error),
    #[error("failed to fetch the timestamp of block {block}: {source}")]
    BlockTimestamp {
        block: BlockNumber,
        #[source]
        source: anyhow::Error,
    },
    /// Only finished epochs have a last block.
    #[error("epoch {target} is not before the current epoch {current}")]
    EpochNotInPast { target: PcEpoch, current: PcEpoch },
}

pub type Result<T> = core::result::Result<T, Error>;
