#![allow(dead_code)]

use num_bigint::BigUint;
use num_traits::Zero;
use serde_json::{json, Map, Value};

/// Exact Horner evaluation, lowest coefficient first.
pub fn evaluate_at(polynomial: &[BigUint], x: u64) -> BigUint {
    let x = BigUint::from(x);
    polynomial
        .iter()
        .rev()
        .fold(BigUint::zero(), |sum, item| &x * sum + item)
}

/// Builds a payload from `(index, base, value)` triples.
pub fn payload(k: i64, shares: &[(u64, u32, BigUint)]) -> Vec<u8> {
    let mut map = Map::new();
    map.insert("keys".into(), json!({ "n": shares.len(), "k": k }));
    for (index, base, value) in shares {
        map.insert(
            index.to_string(),
            json!({ "base": base.to_string(), "value": value.to_str_radix(*base) }),
        );
    }
    serde_json::to_vec(&Value::Object(map)).unwrap()
}
