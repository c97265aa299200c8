//! The compact integer codec and the few fixed-width helpers the partner chain
//! wire format needs.
//!
//! A compact integer starts with a two bit mode tag in the least significant
//! bits of its first byte:
//!
//! | mode   | range              | width                                  |
//! |--------|--------------------|----------------------------------------|
//! | `0b00` | `0..2^6`           | 1 byte                                 |
//! | `0b01` | `2^6..2^14`        | 2 bytes, little-endian                 |
//! | `0b10` | `2^14..2^30`       | 4 bytes, little-endian                 |
//! | `0b11` | `2^30..=u128::MAX` | 1 prefix byte + 4..=16 bytes, little-endian |
//!
//! In the big-integer mode the upper six bits of the prefix byte hold the number
//! of value bytes minus four.


const SINGLE_BYTE_LIMIT: u128 = 1 << 6;
const TWO_BYTE_LIMIT: u128 = 1 << 14;
const FOUR_BYTE_LIMIT: u128 = 1 << 30;
const MAX_BIG_INTEGER_BYTES: usize = 16;

/// Errors produced while decoding compact integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The input ended before the value was complete.
    #[error("unexpected end of input: needed {needed} bytes, got {available}")]
    UnexpectedEnd {
        /// Bytes required by the encoding.
        needed: usize,
        /// Bytes actually available.
        available: usize,
    },
    /// The value was encoded with a wider mode than necessary.
    #[error("non-canonical compact encoding of {value}")]
    NonCanonical {
        /// The decoded value.
        value: u128,
    },
    /// The big-integer prefix announces more bytes than a `u128` holds.
    #[error("compact integer of {0} bytes does not fit into u128")]
    Overflow(usize),
}

/// Number of bytes [`encode_compact`] writes for `value`.
pub fn compact_len(value: u128) -> usize {
    if value < SINGLE_BYTE_LIMIT {
        1
    } else if value < TWO_BYTE_LIMIT {
        2
    } else if value < FOUR_BYTE_LIMIT {
        4
    } else {
        1 + big_integer_width(value)
    }
}

/// Appends the compact encoding of `value` to `out`.
pub fn encode_compact(value: impl Into<u128>, out: &mut Vec<u8>) {
    let value = value.into();
    if value < SINGLE_BYTE_LIMIT {
        out.push((value as u8) << 2);
    } else if value < TWO_BYTE_LIMIT {
        out.extend_from_slice(&(((value as u16) << 2) | 0b01).to_le_bytes());
    } else if value < FOUR_BYTE_LIMIT {
        out.extend_from_slice(&(((value as u32) << 2) | 0b10).to_le_bytes());
    } else {
        let width = big_integer_width(value);
        out.push((((width - 4) as u8) << 2) | 0b11);
        out.extend_from_slice(&value.to_le_bytes()[..width]);
    }
}

/// Returns the compact encoding of `value` as a fresh vector.
pub fn compact(value: impl Into<u128>) -> Vec<u8> {
    let mut out = Vec::new();
    encode_compact(value, &mut out);
    out
}

/// Decodes a compact integer from the start of `input`.
///
/// Returns the value and the number of bytes consumed.
pub fn decode_compact(input: &[u8]) -> Result<(u128, usize), CodecError> {
    let prefix = *input.first().ok_or(CodecError::UnexpectedEnd {
        needed: 1,
        available: 0,
    })?;

    match prefix & 0b11 {
        0b00 => Ok((u128::from(prefix >> 2), 1)),
        0b01 => {
            let bytes = take::<2>(input)?;
            let value = u128::from(u16::from_le_bytes(bytes) >> 2);
            canonical(value, SINGLE_BYTE_LIMIT)?;
            Ok((value, 2))
        }
        0b10 => {
            let bytes = take::<4>(input)?;
            let value = u128::from(u32::from_le_bytes(bytes) >> 2);
            canonical(value, TWO_BYTE_LIMIT)?;
            Ok((value, 4))
        }
        _ => {
            let width = usize::from(prefix >> 2) + 4;
            if width > MAX_BIG_INTEGER_BYTES {
                return Err(CodecError::Overflow(width));
            }
            let available = input.len().saturating_sub(1);
            if available < width {
                return Err(CodecError::UnexpectedEnd {
                    needed: width + 1,
                    available: input.len(),
                });
            }
            let mut le = [0u8; MAX_BIG_INTEGER_BYTES];
            le[..width].copy_from_slice(&input[1..=width]);
            let value = u128::from_le_bytes(le);
            canonical(value, FOUR_BYTE_LIMIT)?;
            if big_integer_width(value) != width {
                return Err(CodecError::NonCanonical { value });
            }
            Ok((value, width + 1))
        }
    }
}

/// Appends `bytes` prefixed with their compact encoded length.
pub fn encode_bytes(bytes: &[u8], out: &mut Vec<u8>) {
    encode_compact(bytes.len() as u64, out);
    out.extend_from_slice(bytes);
}

/// Appends an optional `u128` as a one byte presence flag followed by the
/// little-endian value.
pub fn encode_option_u128(value: Option<u128>, out: &mut Vec<u8>) {
    match value {
        None => out.push(0),
        Some(value) => {
            out.push(1);
            out.extend_from_slice(&value.to_le_bytes());
        }
    }
}

fn big_integer_width(value: u128) -> usize {
    let significant = MAX_BIG_INTEGER_BYTES - (value.leading_zeros() as usize / 8);
    significant.max(4)
}

fn take<const N: usize>(input: &[u8]) -> Result<[u8; N], CodecError> {
    input
        .get(..N)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(CodecError::UnexpectedEnd {
            needed: N,
            available: input.len(),
        })
}

fn canonical(value: u128, lower_bound: u128) -> Result<(), CodecError> {
    if value < lower_bound {
        Err(CodecError::NonCanonical { value })
    } else {
        Ok(())
    }
}
