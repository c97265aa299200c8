use serde::{
    Deserialize,
    Serialize,
};

const MIN_PERIOD: u64 = 4;
const MAX_PERIOD: u64 = 1 << 16;

/// The era a caller asks for, before the current block is known.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EraSpec {
    /// The transaction never expires.
    #[default]
    Immortal,
    /// The transaction is valid for `period` blocks starting at `current`.
    /// When `current` is `None` the latest finalized block is used.
    Mortal {
        /// Requested validity period in blocks.
        period: u64,
        /// Reference block number.
        current: Option<u64>,
    },
}

/// A resolved transaction era.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Era {
    /// Valid forever. Encoded as the single byte `0x00`.
    #[default]
    Immortal,
    /// Valid during `period` blocks, `phase` being the birth block modulo
    /// `period`.
    Mortal {
        /// Power of two in `[4, 65536]`.
        period: u64,
        /// Quantized phase, always lower than `period`.
        phase: u64,
    },
}

impl Era {
    /// Creates a mortal era for a transaction built at block `current`.
    ///
    /// The period is rounded up to a power of two and clamped to `[4, 65536]`.
    /// The phase is quantized so that it fits the two byte encoding.
    pub fn mortal(period: u64, current: u64) -> Self {
        let period = period
            .checked_next_power_of_two()
            .unwrap_or(MAX_PERIOD)
            .clamp(MIN_PERIOD, MAX_PERIOD);
        let phase = current % period;
        let quantize_factor = quantize_factor(period);
        let quantized_phase = phase / quantize_factor * quantize_factor;

        Era::Mortal {
            period,
            phase: quantized_phase,
        }
    }

    /// Appends the era's encoding to `out`.
    pub fn encode_to(&self, out: &mut Vec<u8>) {
        match *self {
            Era::Immortal => out.push(0),
            Era::Mortal { period, phase } => {
                let period_bits = u64::from(period.trailing_zeros())
                    .saturating_sub(1)
                    .clamp(1, 15);
                let quantized_phase = (phase / quantize_factor(period)) << 4;
                let encoded = (period_bits | quantized_phase) as u16;
                out.extend_from_slice(&encoded.to_le_bytes());
            }
        }
    }

    /// Number of the block the era starts at, given any block `current` within
    /// its validity window. The immortal era starts at genesis.
    pub fn birth(&self, current: u64) -> u64 {
        match *self {
            Era::Immortal => 0,
            Era::Mortal { period, phase } => {
                (current.max(phase) - phase) / period * period + phase
            }
        }
    }
}

fn quantize_factor(period: u64) -> u64 {
    (period >> 12).max(1)
}
