//! Builds and signs partner chain extrinsics for secp256k1 wallets.
//!
//! The chain verifies every signature over a BLAKE2b-256 digest of the
//! signing payload, whatever the signature scheme. Generic tooling signs
//! ECDSA payloads with Keccak-256, so the payload is serialized and hashed
//! here instead.

#![deny(unused_must_use)]

mod keypair;
mod payload;
mod signer;

pub mod ports;

pub use keypair::EcdsaKeypair;
pub use payload::{
    signing_payload,
    RuntimeContext,
    TipPayment,
    MAX_UNHASHED_PAYLOAD_LEN,
};
pub use signer::EcdsaSigner;

use pc_e2e_types::{
    BlockNumber,
    Bytes32,
};

/// A transaction could not be signed. Nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    #[error("failed to fetch the nonce of account {account}: {source}")]
    Nonce {
        account: Bytes32,
        #[source]
        source: anyhow::Error,
    },
    #[error("failed to fetch the finalized block number: {0}")]
    FinalizedBlock(#[source] anyhow::Error),
    #[error("failed to fetch the hash of era checkpoint block {block}: {source}")]
    CheckpointHash {
        block: BlockNumber,
        #[source]
        source: anyhow::Error,
    },
    #[error("the runtime charges tips in the native token, tip asset {0} cannot be used")]
    AssetTipUnsupported(u128),
    #[error("invalid secp256k1 secret key")]
    InvalidSecretKey,
    #[error("secp256k1 signing failed: {0}")]
    Crypto(#[from] k256::ecdsa::Error),
}

pub type Result<T> = core::result::Result<T, SigningError>;
