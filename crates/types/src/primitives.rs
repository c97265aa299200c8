//! Epoch, block and hash primitives.

use derive_more::{
    Display,
    From,
    Into,
};
use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};
use std::{
    fmt,
    str::FromStr,
};

/// Partner chain block number.
pub type BlockNumber = u64;

/// Main chain epoch number.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    From,
    Into,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct McEpoch(u64);

impl McEpoch {
    /// Wraps a raw epoch number.
    pub const fn new(epoch: u64) -> Self {
        Self(epoch)
    }

    /// The raw epoch number.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The following main chain epoch.
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Partner chain epoch number.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    From,
    Into,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct PcEpoch(u64);

impl PcEpoch {
    /// Wraps a raw epoch number.
    pub const fn new(epoch: u64) -> Self {
        Self(epoch)
    }

    /// The raw epoch number.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Half-open range `[start, stop)` of partner chain epochs that belong to one
/// main chain epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EpochRange {
    /// First partner chain epoch of the range.
    pub start: PcEpoch,
    /// First partner chain epoch after the range.
    pub stop: PcEpoch,
}

impl EpochRange {
    /// Creates the range `[start, stop)`.
    pub const fn new(start: PcEpoch, stop: PcEpoch) -> Self {
        Self { start, stop }
    }

    /// Returns `true` if `epoch` lies in `[start, stop)`.
    pub fn contains(&self, epoch: PcEpoch) -> bool {
        self.start <= epoch && epoch < self.stop
    }

    /// Number of partner chain epochs in the range.
    pub fn len(&self) -> u64 {
        self.stop.get().saturating_sub(self.start.get())
    }

    /// Returns `true` if the range holds no epochs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the epochs of the range in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = PcEpoch> {
        (self.start.get()..self.stop.get()).map(PcEpoch::new)
    }
}

impl fmt::Display for EpochRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.stop)
    }
}

/// Error returned when parsing a hex encoded [`Bytes32`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Bytes32ParseError {
    /// The input is not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    /// The input decoded to the wrong number of bytes.
    #[error("expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

/// 32 bytes used for hashes and roots.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bytes32([u8; 32]);

impl Bytes32 {
    /// Wraps raw bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// All bytes are zero.
    pub const fn zeroed() -> Self {
        Self([0; 32])
    }

    /// Copies the bytes out of a slice, which must be exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Bytes32ParseError> {
        let array: [u8; 32] = bytes
            .try_into()
            .map_err(|_| Bytes32ParseError::InvalidLength(bytes.len()))?;
        Ok(Self(array))
    }

    /// The underlying bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for Bytes32 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<Bytes32> for [u8; 32] {
    fn from(bytes: Bytes32) -> Self {
        bytes.0
    }
}

impl AsRef<[u8]> for Bytes32 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Bytes32 {
    type Err = Bytes32ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes)
    }
}

impl Serialize for Bytes32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Bytes32 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
