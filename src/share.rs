use std::fmt;

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use tracing::trace;

use crate::error::DecodeError;

/// One evaluation point `(x, y)` of the secret polynomial.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Share {
    pub(crate) index: BigUint,
    pub(crate) value: BigUint,
}

impl Share {
    /// Returns `None` for index 0, which would be the secret itself.
    pub fn new(index: BigUint, value: BigUint) -> Option<Self> {
        if index.is_zero() {
            None
        } else {
            Some(Share { index, value })
        }
    }

    pub fn index(&self) -> &BigUint {
        &self.index
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }
}

/// Shares sorted by ascending index, with pairwise distinct indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShareSet {
    shares: Vec<Share>,
}

impl ShareSet {
    pub fn new(mut shares: Vec<Share>) -> Result<Self, DecodeError> {
        shares.sort_by(|a, b| a.index.cmp(&b.index));
        if let Some(pair) = shares.windows(2).find(|w| w[0].index == w[1].index) {
            return Err(DecodeError::DuplicateIndex(pair[1].index.clone()));
        }
        trace!(count = shares.len(), "share set built");
        Ok(ShareSet { shares })
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Share> {
        self.shares.iter()
    }

    pub fn indices(&self) -> impl Iterator<Item = &BigUint> + '_ {
        self.shares.iter().map(Share::index)
    }

    /// The `k` lowest-indexed shares, or fewer if the set is smaller.
    pub fn first(&self, k: usize) -> &[Share] {
        &self.shares[..k.min(self.shares.len())]
    }
}

impl<'a> IntoIterator for &'a ShareSet {
    type Item = &'a Share;
    type IntoIter = std::slice::Iter<'a, Share>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Minimum number of shares needed, exactly as read from the metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Threshold(pub i64);

impl Threshold {
    pub fn get(self) -> i64 {
        self.0
    }
}

/// The recovered constant term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Secret(BigInt);

impl Secret {
    pub(crate) fn new(value: BigInt) -> Self {
        Secret(value)
    }

    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    pub fn into_inner(self) -> BigInt {
        self.0
    }

    pub fn to_str_radix(&self, radix: u32) -> String {
        self.0.to_str_radix(radix)
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
