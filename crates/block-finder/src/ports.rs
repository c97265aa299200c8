use pc_e2e_types::BlockNumber;

/// Reads block timestamps from a partner chain node.
///
/// Every call may hit the network, so the finder keeps the number of calls
/// bounded.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BlockTimestampOracle: Send + Sync {
    /// Number of the latest block.
    async fn latest_block_number(&self) -> anyhow::Result<BlockNumber>;

    /// The timestamp set by the `Timestamp` inherent of `block`, in
    /// milliseconds since the Unix epoch.
    async fn block_timestamp_millis(&self, block: BlockNumber) -> anyhow::Result<u64>;
}
