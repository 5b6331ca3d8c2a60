//! Recovers a Shamir secret from shares given as `(index, value in base b)` pairs.
//!
//! Values are decoded into big integers and the constant term is interpolated
//! over exact rationals, so nothing is lost to floating point or modular
//! reduction.
//!
//! ```
//! let payload = br#"{
//!     "keys": { "n": 2, "k": 2 },
//!     "1": { "base": "10", "value": "4" },
//!     "2": { "base": "2", "value": "111" }
//! }"#;
//! let secret = tiny_ss_recover::recover(payload).unwrap();
//! assert_eq!(secret.to_string(), "1");
//! ```

pub mod decode;
pub mod error;
pub mod interpolate;
pub mod share;

pub use decode::{decode, decode_str};
pub use error::{DecodeError, Error, InterpolationError, MalformedReason, Result};
pub use interpolate::interpolate;
pub use share::{Secret, Share, ShareSet, Threshold};

/// Decodes `payload` and interpolates the secret.
pub fn recover(payload: &[u8]) -> Result<Secret> {
    let (shares, k) = decode(payload)?;
    Ok(interpolate(&shares, k)?)
}
