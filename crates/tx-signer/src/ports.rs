use pc_e2e_types::{
    BlockNumber,
    Bytes32,
};

/// The chain state the signer reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ChainState: Send + Sync {
    /// Next nonce of `account`, `None` for an account the chain has never seen.
    async fn account_nonce(&self, account: &Bytes32) -> anyhow::Result<Option<u64>>;

    /// Number of the latest finalized block.
    async fn finalized_block_number(&self) -> anyhow::Result<BlockNumber>;

    /// Hash of the block at `number` on the finalized chain.
    async fn block_hash(&self, number: BlockNumber) -> anyhow::Result<Bytes32>;
}
