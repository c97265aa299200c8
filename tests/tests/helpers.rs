use pc_e2e_authorship::{
    encode_header_for_hashing,
    test_helpers::sealed_header,
};
use pc_e2e_block_finder::ports::BlockTimestampOracle;
use pc_e2e_chain_config::{
    E2eConfig,
    PartnerChainClock,
};
use pc_e2e_tx_signer::ports::ChainState;
use pc_e2e_types::{
    test_helpers::TestSigner,
    BlockHeader,
    BlockNumber,
    Bytes32,
    CommitteeMember,
    PcEpoch,
    SignatureScheme,
};
use std::{
    collections::{
        BTreeMap,
        BTreeSet,
    },
    ops::RangeInclusive,
};

/// Partner chain epoch the synthetic chain starts at. Main chain epoch 3 of
/// the local testnet covers epochs 27_777_606 and 27_777_607.
pub const FIRST_EPOCH: PcEpoch = PcEpoch::new(27_777_604);

/// Milliseconds between the slot start and the block timestamp.
const TIMESTAMP_DRIFT_MILLIS: u64 = 250;

#[derive(Clone, Debug)]
pub struct SyntheticBlock {
    pub header: BlockHeader,
    pub timestamp_millis: u64,
}

/// A local testnet partner chain sealed by a round-robin committee of one key
/// per scheme, with one block per slot except in the empty slots.
#[derive(Clone, Debug)]
pub struct TwoChain {
    pub config: E2eConfig,
    pub committee: Vec<TestSigner>,
    blocks: Vec<SyntheticBlock>,
    nonces: BTreeMap<Bytes32, u64>,
}

impl TwoChain {
    /// A chain running `slots` slots from the start of [`FIRST_EPOCH`].
    /// `empty_slots` are offsets from its first slot.
    pub fn new(slots: u64, empty_slots: impl IntoIterator<Item = u64>) -> Self {
        let config = E2eConfig::local_testnet();
        let committee = vec![
            TestSigner::new(SignatureScheme::Sr25519, 1),
            TestSigner::new(SignatureScheme::Ed25519, 2),
            TestSigner::new(SignatureScheme::Ecdsa, 3),
        ];
        let clock = config.clock.partner_chain;
        let empty_slots: BTreeSet<_> = empty_slots.into_iter().collect();
        let first_slot = FIRST_EPOCH.get() * clock.slots_in_epoch;

        let blocks = (0..slots)
            .filter(|offset| !empty_slots.contains(offset))
            .map(|offset| first_slot + offset)
            .enumerate()
            .map(|(number, slot)| {
                let author = &committee[(slot % committee.len() as u64) as usize];
                SyntheticBlock {
                    header: sealed_header(
                        number as BlockNumber,
                        slot,
                        author,
                        &config.block_encoding,
                    ),
                    timestamp_millis: slot * clock.block_duration * 1000
                        + TIMESTAMP_DRIFT_MILLIS,
                }
            })
            .collect();

        Self {
            config,
            committee,
            blocks,
            nonces: BTreeMap::new(),
        }
    }

    pub fn with_nonce(mut self, account: Bytes32, nonce: u64) -> Self {
        self.nonces.insert(account, nonce);
        self
    }

    pub fn clock(&self) -> PartnerChainClock {
        self.config.clock.partner_chain
    }

    pub fn members(&self) -> Vec<CommitteeMember> {
        self.committee.iter().map(TestSigner::member).collect()
    }

    pub fn header(&self, number: BlockNumber) -> &BlockHeader {
        &self.blocks[number as usize].header
    }

    pub fn latest_block(&self) -> BlockNumber {
        self.blocks.len() as BlockNumber - 1
    }

    /// Epoch of the latest block.
    pub fn current_epoch(&self) -> PcEpoch {
        let latest = &self.blocks[self.blocks.len() - 1];
        PcEpoch::new(latest.timestamp_millis / self.clock().epoch_duration_millis())
    }

    /// The blocks sealed by the committee of `epoch`: from the block after
    /// the epoch's first block up to the first block of the next epoch.
    pub fn expected_range(&self, epoch: PcEpoch) -> RangeInclusive<BlockNumber> {
        let first = self.first_block_at_or_after(epoch);
        let last = self.first_block_at_or_after(PcEpoch::new(epoch.get() + 1));
        first + 1..=last
    }

    fn first_block_at_or_after(&self, epoch: PcEpoch) -> BlockNumber {
        let slot = epoch.get() * self.clock().slots_in_epoch;
        self.blocks
            .iter()
            .position(|block| block.timestamp_millis / 1000 >= slot * self.clock().block_duration)
            .expect("the chain outlives the epoch") as BlockNumber
    }

    /// The hash the chain reports for a block.
    pub fn block_hash(&self, number: BlockNumber) -> Option<Bytes32> {
        let block = self.blocks.get(number as usize)?;
        encode_header_for_hashing(&block.header, &self.config.block_encoding)
            .ok()
            .map(|encoded| encoded.hash)
    }
}

#[async_trait::async_trait]
impl BlockTimestampOracle for TwoChain {
    async fn latest_block_number(&self) -> anyhow::Result<BlockNumber> {
        Ok(self.latest_block())
    }

    async fn block_timestamp_millis(&self, block: BlockNumber) -> anyhow::Result<u64> {
        self.blocks
            .get(block as usize)
            .map(|block| block.timestamp_millis)
            .ok_or_else(|| anyhow::anyhow!("block {block} does not exist"))
    }
}

#[async_trait::async_trait]
impl ChainState for TwoChain {
    async fn account_nonce(&self, account: &Bytes32) -> anyhow::Result<Option<u64>> {
        Ok(self.nonces.get(account).copied())
    }

    async fn finalized_block_number(&self) -> anyhow::Result<BlockNumber> {
        Ok(self.latest_block())
    }

    async fn block_hash(&self, number: BlockNumber) -> anyhow::Result<Bytes32> {
        TwoChain::block_hash(self, number)
            .ok_or_else(|| anyhow::anyhow!("block {number} does not exist"))
    }
}
