use crate::{
    ports::BlockTimestampOracle,
    Error,
    Result,
};
use pc_e2e_chain_config::PartnerChainClock;
use pc_e2e_types::{
    BlockNumber,
    PcEpoch,
};
use std::ops::RangeInclusive;


/// Number of retries, each one slot later, when the block of an epoch
/// boundary is missing. It also sizes the search windows.
pub const MAX_MISSING_BLOCKS_PER_PC_EPOCH: u64 = 10;

/// The first block of an epoch is still sealed by the previous committee.
pub const BLOCKS_AFTER_EPOCH_CHANGE_FROM_NEW_COMMITTEE: u64 = 1;

/// Which epoch to look for, relative to the chain's current epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EpochQuery {
    /// Start of the epoch after `current_epoch`, in milliseconds.
    pub next_epoch_timestamp_millis: u64,
    pub current_epoch: PcEpoch,
    pub target_epoch: PcEpoch,
}

impl EpochQuery {
    /// A query for a chain whose epochs are aligned to the Unix epoch, which
    /// is how partner chain epochs are numbered.
    pub fn aligned(
        clock: &PartnerChainClock,
        current_epoch: PcEpoch,
        target_epoch: PcEpoch,
    ) -> Self {
        Self {
            next_epoch_timestamp_millis: current_epoch
                .get()
                .saturating_add(1)
                .saturating_mul(clock.epoch_duration_millis()),
            current_epoch,
            target_epoch,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Boundary {
    First,
    Last,
}

impl Boundary {
    fn as_str(&self) -> &'static str {
        match self {
            Boundary::First => "first",
            Boundary::Last => "last",
        }
    }
}

pub struct BlockFinder<O> {
    oracle: O,
    clock: PartnerChainClock,
}

impl<O> BlockFinder<O>
where
    O: BlockTimestampOracle,
{
    pub fn new(oracle: O, clock: PartnerChainClock) -> Self {
        Self { oracle, clock }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Blocks produced during `query.target_epoch`.
    ///
    /// Returns `Ok(None)` when a boundary block cannot be found within
    /// [`MAX_MISSING_BLOCKS_PER_PC_EPOCH`] retries. The epoch data is then
    /// incomplete and the caller should skip the epoch.
    pub async fn get_block_range(
        &self,
        query: EpochQuery,
    ) -> Result<Option<RangeInclusive<BlockNumber>>> {
        let EpochQuery {
            next_epoch_timestamp_millis,
            current_epoch,
            target_epoch,
        } = query;
        if target_epoch >= current_epoch {
            return Err(Error::EpochNotInPast {
                target: target_epoch,
                current: current_epoch,
            })
        }
        tracing::info!(epoch = %target_epoch, "finding block range");

        let epochs_back = current_epoch.get() - target_epoch.get();
        let epoch_millis = self.clock.epoch_duration_millis();
        let start_millis = next_epoch_timestamp_millis
            .saturating_sub(epochs_back.saturating_add(1).saturating_mul(epoch_millis));
        let end_millis = start_millis.saturating_add(epoch_millis);

        let latest_block = self
            .oracle
            .latest_block_number()
            .await
            .map_err(Error::LatestBlock)?;
        let latest_timestamp = self.timestamp_millis(latest_block).await?;
        let blocks_since_start = latest_timestamp.saturating_sub(start_millis)
            / 1000
            / self.clock.block_duration.max(1);
        let approximate_first_block = latest_block.saturating_sub(blocks_since_start);

        let first_window = (
            approximate_first_block,
            approximate_first_block.saturating_add(
                MAX_MISSING_BLOCKS_PER_PC_EPOCH.saturating_mul(epochs_back),
            ),
        );
        let Some(first_block) = self
            .find_boundary(
                Boundary::First,
                target_epoch,
                first_window,
                start_millis / 1000,
                latest_block,
            )
            .await?
        else {
            return Ok(None)
        };
        let first_block =
            first_block.saturating_add(BLOCKS_AFTER_EPOCH_CHANGE_FROM_NEW_COMMITTEE);

        let expected_last = first_block.saturating_add(self.clock.slots_in_epoch);
        let last_window = (
            expected_last.saturating_sub(MAX_MISSING_BLOCKS_PER_PC_EPOCH),
            expected_last.saturating_add(MAX_MISSING_BLOCKS_PER_PC_EPOCH),
        );
        let Some(last_block) = self
            .find_boundary(
                Boundary::Last,
                target_epoch,
                last_window,
                end_millis / 1000,
                latest_block,
            )
            .await?
        else {
            return Ok(None)
        };

        if last_block < first_block {
            tracing::error!(
                epoch = %target_epoch,
                first_block,
                last_block,
                "epoch boundary unresolvable: last block precedes first block"
            );
            return Ok(None)
        }

        tracing::info!(
            epoch = %target_epoch,
            first_block,
            last_block,
            "found block range"
        );
        Ok(Some(first_block..=last_block))
    }

    /// Searches for the block at `target_seconds`, retrying one slot later
    /// each time the block is missing and widening the window by one block.
    async fn find_boundary(
        &self,
        boundary: Boundary,
        epoch: PcEpoch,
        (low, high): (BlockNumber, BlockNumber),
        mut target_seconds: u64,
        latest_block: BlockNumber,
    ) -> Result<Option<BlockNumber>> {
        for retry in 0..=MAX_MISSING_BLOCKS_PER_PC_EPOCH {
            let high = high.saturating_add(retry).min(latest_block);
            if let Some(block) = self
                .get_block_with_timestamp(low.min(high), high, target_seconds)
                .await?
            {
                return Ok(Some(block))
            }
            target_seconds = target_seconds.saturating_add(self.clock.block_duration);
        }

        tracing::error!(
            %epoch,
            boundary = boundary.as_str(),
            target_seconds,
            "epoch boundary unresolvable: missing {} block of epoch",
            boundary.as_str()
        );
        Ok(None)
    }

    /// Bisects `[low, high]` for a block whose timestamp, truncated to whole
    /// seconds, equals `target_seconds`.
    ///
    /// Timestamps never decrease with the block number. Makes at most
    /// `log2(high - low) + 2` oracle calls.
    pub async fn get_block_with_timestamp(
        &self,
        mut low: BlockNumber,
        mut high: BlockNumber,
        target_seconds: u64,
    ) -> Result<Option<BlockNumber>> {
        if high < low {
            return Ok(None)
        }

        loop {
            let middle = low + (high - low) / 2;
            let middle_seconds = self.timestamp_millis(middle).await? / 1000;
            if middle_seconds == target_seconds {
                return Ok(Some(middle))
            }

            if high - low <= 1 {
                if high != middle {
                    let high_seconds = self.timestamp_millis(high).await? / 1000;
                    if high_seconds == target_seconds {
                        return Ok(Some(high))
                    }
                }
                tracing::debug!(target_seconds, low, high, "missing block with timestamp");
                return Ok(None)
            }

            if middle_seconds < target_seconds {
                low = middle;
            } else {
                high = middle;
            }
        }
    }

    async fn timestamp_millis(&self, block: BlockNumber) -> Result<u64> {
        self.oracle
            .block_timestamp_millis(block)
            .await
            .map_err(|source| Error::BlockTimestamp { block, source })
    }
}
