//! Re-encodes partner chain block headers into the exact bytes their author
//! signed, and proves which committee member sealed a block.

#![deny(unused_must_use)]

pub mod aura;
pub mod codec;
pub mod verifier;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use codec::{
    encode_header_for_hashing,
    EncodedHeader,
};
pub use verifier::{
    verify_author,
    AuthorshipVerifier,
    BlockAuthorship,
};

use pc_e2e_types::{
    BlockNumber,
    Bytes32,
    CommitteeMember,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("malformed header of block {number}{}: {reason}", log_index.map(|i| format!(" (digest log {i})")).unwrap_or_default())]
    MalformedHeader {
        number: BlockNumber,
        log_index: Option<usize>,
        reason: String,
    },
    #[error("block {number} has {consensus_logs} consensus logs, at most 2 can be encoded")]
    UnsupportedDigestShape {
        number: BlockNumber,
        consensus_logs: usize,
    },
    #[error("no committee member signed block {number} with hash {hash}")]
    HashMismatch { number: BlockNumber, hash: Bytes32 },
    #[error("block {number} in slot {slot} was sealed by {actual}, expected {expected}")]
    UnexpectedAuthor {
        number: BlockNumber,
        slot: u64,
        expected: CommitteeMember,
        actual: CommitteeMember,
    },
    #[error("cannot attribute block {number}: the committee is empty")]
    EmptyCommittee { number: BlockNumber },
}

impl Error {
    pub(crate) fn malformed(
        number: BlockNumber,
        log_index: Option<usize>,
        reason: impl Into<String>,
    ) -> Self {
        Error::MalformedHeader {
            number,
            log_index,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
