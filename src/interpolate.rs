use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use tracing::{debug, trace};

use crate::error::InterpolationError;
use crate::share::{Secret, Share, ShareSet, Threshold};

/// Recovers the constant term of the degree `k - 1` polynomial through the
/// `k` lowest-indexed shares. Extra shares are not cross-checked.
pub fn interpolate(shares: &ShareSet, k: Threshold) -> Result<Secret, InterpolationError> {
    let k = k.get();
    if k < 1 {
        return Err(InterpolationError::InvalidThreshold(k));
    }
    let needed = k as u64;
    if (shares.len() as u64) < needed {
        return Err(InterpolationError::InsufficientShares {
            needed,
            available: shares.len(),
        });
    }

    let selected = shares.first(needed as usize);
    debug!(k, available = shares.len(), "interpolating at x = 0");
    lagrange_at_zero(selected)
}

/// `sum_i y_i * prod_{j != i} (-x_j) / (x_i - x_j)` over exact rationals.
fn lagrange_at_zero(points: &[Share]) -> Result<Secret, InterpolationError> {
    let xs: Vec<BigInt> = points
        .iter()
        .map(|share| BigInt::from(share.index().clone()))
        .collect();

    let mut sum = BigRational::zero();
    for (i, share) in points.iter().enumerate() {
        let xi = &xs[i];
        let (numerator, denominator) = xs
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .try_fold((BigInt::one(), BigInt::one()), |(num, den), (_, xj)| {
                let diff = xi - xj;
                if diff.is_zero() {
                    Err(InterpolationError::DegenerateInputs(share.index().clone()))
                } else {
                    Ok((num * -xj, den * diff))
                }
            })?;
        trace!(x = %xi, %numerator, %denominator, "basis at zero");

        let y = BigInt::from(share.value().clone());
        sum += BigRational::new(y * numerator, denominator);
    }

    if !sum.is_integer() {
        return Err(InterpolationError::NonIntegerResult);
    }
    Ok(Secret::new(sum.to_integer()))
}
