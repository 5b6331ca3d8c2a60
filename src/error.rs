//! Error types for share decoding and secret recovery.

use num_bigint::BigUint;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any failure of the decode-then-interpolate pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Interpolation(#[from] InterpolationError),
}

/// Errors raised while turning a raw payload into a share set.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not JSON, or its top level is not an object.
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    /// `keys.k` is absent or not an integer
    #[error("threshold `keys.k` not found or not an integer")]
    MissingThreshold,

    /// A key accepted as a share index carries an unusable entry.
    #[error("malformed share entry under key {key:?}: {reason}")]
    MalformedShareEntry { key: String, reason: MalformedReason },

    #[error("duplicate share index {0}")]
    DuplicateIndex(BigUint),
}

/// What exactly is wrong with a share entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("entry is not an object")]
    NotAnObject,

    #[error("`{0}` is not a string")]
    NotAString(&'static str),

    #[error("missing `base`")]
    MissingBase,

    #[error("invalid base {0:?} (must be 2-36)")]
    InvalidBase(String),

    #[error("missing `value`")]
    MissingValue,

    #[error("empty `value`")]
    EmptyValue,

    #[error("{value:?} is not a number in base {base}")]
    InvalidDigits { value: String, base: u32 },

    #[error("negative value {0}")]
    Negative(String),
}

/// Errors raised by Lagrange interpolation at x = 0.
#[derive(Debug, Error)]
pub enum InterpolationError {
    #[error("invalid threshold {0} (must be positive)")]
    InvalidThreshold(i64),

    #[error("insufficient shares: need {needed}, got {available}")]
    InsufficientShares { needed: u64, available: usize },

    /// Two selected shares have the same index.
    #[error("degenerate inputs: index {0} appears twice")]
    DegenerateInputs(BigUint),

    #[error("interpolated constant term is not an integer")]
    NonIntegerResult,
}
