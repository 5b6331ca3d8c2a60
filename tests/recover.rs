mod common;

use common::{evaluate_at, payload};
use num_bigint::{BigInt, BigUint};
use proptest::prelude::*;
use serde_json::json;
use tiny_ss_recover::{decode, recover, DecodeError, Error, InterpolationError};

fn arb_polynomial() -> impl Strategy<Value = Vec<BigUint>> {
    prop::collection::vec(any::<u128>().prop_map(BigUint::from), 1..=6)
}

fn arb_shares() -> impl Strategy<Value = (Vec<BigUint>, Vec<(u64, u32, BigUint)>)> {
    (arb_polynomial(), 0usize..=4)
        .prop_flat_map(|(polynomial, extra)| {
            let k = polynomial.len();
            let n = k + extra;
            (
                Just(polynomial),
                prop::sample::subsequence((1..=n as u64).collect::<Vec<_>>(), k),
                prop::collection::vec(2u32..=36, k),
            )
        })
        .prop_map(|(polynomial, xs, bases)| {
            let shares = xs
                .into_iter()
                .zip(bases)
                .map(|(x, base)| (x, base, evaluate_at(&polynomial, x)))
                .collect();
            (polynomial, shares)
        })
}

proptest! {
    #[test]
    fn any_k_shares_recover_the_constant_term((polynomial, shares) in arb_shares()) {
        let k = polynomial.len() as i64;
        let secret = recover(&payload(k, &shares)).unwrap();
        prop_assert_eq!(secret.into_inner(), BigInt::from(polynomial[0].clone()));
    }

    #[test]
    fn base_does_not_change_the_result(
        value in any::<u128>(),
        base_a in 2u32..=36,
        base_b in 2u32..=36,
    ) {
        let y = BigUint::from(value);
        let other = BigUint::from(12345u32);
        let a = payload(2, &[(1, base_a, y.clone()), (2, 10, other.clone())]);
        let b = payload(2, &[(1, base_b, y), (2, 10, other)]);

        prop_assert_eq!(decode(&a).unwrap().0, decode(&b).unwrap().0);
        prop_assert_eq!(recover(&a).unwrap(), recover(&b).unwrap());
    }
}

#[test]
fn hex_and_decimal_agree() {
    let hex = br#"{"keys":{"k":2}, "1":{"base":"16","value":"ff"}, "2":{"base":"10","value":"300"}}"#;
    let dec = br#"{"keys":{"k":2}, "1":{"base":"10","value":"255"}, "2":{"base":"10","value":"300"}}"#;
    let secret = recover(hex).unwrap();
    assert_eq!(secret, recover(dec).unwrap());
    assert_eq!(secret.to_string(), "210");
}

#[test]
fn all_supplied_shares_beyond_k_are_ignored() {
    let polynomial = [7u32, 3, 5].map(BigUint::from);
    let shares: Vec<_> = (1..=6)
        .map(|x| (x, 10, evaluate_at(&polynomial, x)))
        .collect();
    let secret = recover(&payload(3, &shares)).unwrap();
    assert_eq!(secret.to_string(), "7");
}

#[test]
fn values_beyond_64_bits() {
    let digits = "1z2y3x4w5v6u7t8s9r0qponmlkjihgfedcba9876";
    assert_eq!(digits.len(), 40);
    let secret = BigUint::parse_bytes(digits.as_bytes(), 36).unwrap();
    let slope = BigUint::parse_bytes(b"zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz", 36).unwrap();
    let polynomial = [secret.clone(), slope];

    let shares: Vec<_> = [3u64, 11]
        .into_iter()
        .map(|x| (x, 36, evaluate_at(&polynomial, x)))
        .collect();
    assert!(shares.iter().all(|(_, _, y)| y.bits() > 64));

    let recovered = recover(&payload(2, &shares)).unwrap();
    assert_eq!(recovered.into_inner(), BigInt::from(secret));
}

#[test]
fn non_numeric_keys_are_tolerated() {
    let payload = json!({
        "keys": { "n": 2, "k": 2 },
        "note": "irrelevant",
        "1": { "base": "10", "value": "4" },
        "2": { "base": "10", "value": "7" }
    });
    let secret = recover(&serde_json::to_vec(&payload).unwrap()).unwrap();
    assert_eq!(secret.to_string(), "1");
}

#[test]
fn too_few_shares() {
    let payload = br#"{"keys":{"k":3}, "1":{"base":"10","value":"4"}, "2":{"base":"10","value":"7"}}"#;
    assert!(matches!(
        recover(payload),
        Err(Error::Interpolation(InterpolationError::InsufficientShares {
            needed: 3,
            available: 2
        }))
    ));
}

#[test]
fn indices_colliding_after_parsing() {
    let payload = br#"{"keys":{"k":2}, "3":{"base":"10","value":"4"}, "+3":{"base":"10","value":"4"}, "1":{"base":"10","value":"1"}}"#;
    assert!(matches!(
        recover(payload),
        Err(Error::Decode(DecodeError::DuplicateIndex(_)))
    ));
}
