//! The crate `pc-e2e-types` contains the data model shared by the partner chain
//! e2e crates: epoch and block primitives, block headers and digest logs,
//! committee members, the compact integer codec and the signature schemes
//! used by block authors and wallets.

#![deny(unused_must_use)]
#![deny(missing_docs)]

pub mod codec;
pub mod committee;
pub mod crypto;
pub mod extrinsic;
pub mod header;
pub mod primitives;
pub mod serde_hex;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use committee::{
    CommitteeMember,
    SignatureScheme,
};
pub use header::{
    BlockHeader,
    DigestLog,
    EngineId,
};
pub use primitives::{
    BlockNumber,
    Bytes32,
    EpochRange,
    McEpoch,
    PcEpoch,
};
