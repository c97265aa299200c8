//! Aura slot assignment of partner chain blocks.

use crate::{
    Error,
    Result,
};
use pc_e2e_types::{
    header::{
        AURA_ENGINE_ID,
        MC_HASH_ENGINE_ID,
    },
    BlockHeader,
    Bytes32,
};

/// The slot a block was authored in, from its `aura` pre-runtime log.
pub fn aura_slot(header: &BlockHeader) -> Result<u64> {
    let payload = header
        .pre_runtime(&AURA_ENGINE_ID)
        .ok_or_else(|| Error::malformed(header.number, None, "missing aura pre-runtime log"))?;
    let slot: [u8; 8] = payload.try_into().map_err(|_| {
        Error::malformed(
            header.number,
            None,
            format!("aura slot is {} bytes long, expected 8", payload.len()),
        )
    })?;
    Ok(u64::from_le_bytes(slot))
}

/// The validator scheduled for `slot` under round-robin Aura.
pub fn expected_author<T>(slot: u64, validators: &[T]) -> Option<&T> {
    let len = u64::try_from(validators.len()).ok().filter(|len| *len > 0)?;
    let index = usize::try_from(slot % len).ok()?;
    validators.get(index)
}

/// The main chain block hash a partner chain block refers to.
pub fn main_chain_hash(header: &BlockHeader) -> Result<Bytes32> {
    let payload = header.pre_runtime(&MC_HASH_ENGINE_ID).ok_or_else(|| {
        Error::malformed(header.number, None, "missing main chain hash pre-runtime log")
    })?;
    Bytes32::from_slice(payload)
        .map_err(|err| Error::malformed(header.number, None, err.to_string()))
}
