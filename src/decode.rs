//! Share decoder.
//!
//! A payload is a JSON object whose `"keys"` entry holds the threshold `k` and
//! whose positive-integer keys hold shares encoded as `{"base": "..", "value": ".."}`.
//! Keys that are neither are ignored. Once a key is accepted as a share index its
//! entry must be well formed, otherwise the whole payload is rejected.

use std::fmt;
use std::marker::PhantomData;

use num_bigint::BigUint;
use num_traits::Zero;
use serde::de::{value::MapAccessDeserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::{debug, trace};

use crate::error::{DecodeError, MalformedReason};
use crate::share::{Share, ShareSet, Threshold};

const METADATA_KEY: &str = "keys";

/// Decodes a raw JSON payload into a validated share set and its threshold.
pub fn decode(payload: &[u8]) -> Result<(ShareSet, Threshold), DecodeError> {
    let payload: Payload = serde_json::from_slice(payload)?;
    payload.validate()
}

pub fn decode_str(payload: &str) -> Result<(ShareSet, Threshold), DecodeError> {
    decode(payload.as_bytes())
}

/// Deserializes only from a map, never from a sequence.
struct Object<T>(T);

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Object<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ObjectVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for ObjectVisitor<T> {
            type Value = Object<T>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object")
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
                T::deserialize(MapAccessDeserializer::new(map)).map(Object)
            }
        }

        deserializer.deserialize_map(ObjectVisitor(PhantomData))
    }
}

#[derive(Deserialize)]
struct ThresholdFields {
    k: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Metadata {
    Threshold(Object<ThresholdFields>),
    Malformed(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Field {
    Text(String),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
struct EncodedFields {
    base: Option<Field>,
    value: Option<Field>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EncodedShare {
    Fields(Object<EncodedFields>),
    Malformed(IgnoredAny),
}

/// One top-level entry, classified by its key.
enum Entry {
    Metadata(Metadata),
    Share {
        key: String,
        index: BigUint,
        encoded: EncodedShare,
    },
    Unrecognized(String),
}

struct Payload {
    entries: Vec<Entry>,
}

impl<'de> Deserialize<'de> for Payload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PayloadVisitor;

        impl<'de> Visitor<'de> for PayloadVisitor {
            type Value = Payload;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of shares and `keys` metadata")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Payload, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(key) = map.next_key::<String>()? {
                    let entry = if key == METADATA_KEY {
                        Entry::Metadata(map.next_value()?)
                    } else if let Some(index) = parse_index(&key) {
                        let encoded = map.next_value()?;
                        Entry::Share {
                            key,
                            index,
                            encoded,
                        }
                    } else {
                        map.next_value::<IgnoredAny>()?;
                        Entry::Unrecognized(key)
                    };
                    entries.push(entry);
                }
                Ok(Payload { entries })
            }
        }

        deserializer.deserialize_map(PayloadVisitor)
    }
}

impl Payload {
    fn validate(self) -> Result<(ShareSet, Threshold), DecodeError> {
        let threshold = self
            .entries
            .iter()
            .rev()
            .find_map(|entry| match entry {
                Entry::Metadata(metadata) => Some(metadata),
                _ => None,
            })
            .and_then(|metadata| match metadata {
                Metadata::Threshold(Object(fields)) => Some(Threshold(fields.k)),
                Metadata::Malformed(_) => None,
            })
            .ok_or(DecodeError::MissingThreshold)?;

        let mut shares = Vec::new();
        for entry in self.entries {
            match entry {
                Entry::Share {
                    key,
                    index,
                    encoded,
                } => {
                    let value = decode_value(encoded).map_err(|reason| {
                        DecodeError::MalformedShareEntry { key, reason }
                    })?;
                    shares.push(Share { index, value });
                }
                Entry::Unrecognized(key) => trace!(%key, "skipping non-index key"),
                Entry::Metadata(_) => {}
            }
        }

        debug!(shares = shares.len(), k = threshold.get(), "payload decoded");
        Ok((ShareSet::new(shares)?, threshold))
    }
}

fn decode_value(encoded: EncodedShare) -> Result<BigUint, MalformedReason> {
    let fields = match encoded {
        EncodedShare::Fields(Object(fields)) => fields,
        EncodedShare::Malformed(_) => return Err(MalformedReason::NotAnObject),
    };
    let base = match fields.base {
        Some(Field::Text(base)) => base,
        Some(Field::Other(_)) => return Err(MalformedReason::NotAString("base")),
        None => return Err(MalformedReason::MissingBase),
    };
    let value = match fields.value {
        Some(Field::Text(value)) => value,
        Some(Field::Other(_)) => return Err(MalformedReason::NotAString("value")),
        None => return Err(MalformedReason::MissingValue),
    };

    let base = parse_base(&base).ok_or(MalformedReason::InvalidBase(base))?;
    if value.is_empty() {
        return Err(MalformedReason::EmptyValue);
    }
    parse_value(&value, base)
}

/// A share index: decimal digits with an optional `+`, greater than zero.
fn parse_index(key: &str) -> Option<BigUint> {
    let digits = key.strip_prefix('+').unwrap_or(key);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    parse_digits(digits, 10).filter(|index| !index.is_zero())
}

fn parse_base(base: &str) -> Option<u32> {
    base.parse::<u32>().ok().filter(|b| (2..=36).contains(b))
}

fn parse_value(value: &str, base: u32) -> Result<BigUint, MalformedReason> {
    let (negative, digits) = match value.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    let magnitude = parse_digits(digits, base).ok_or_else(|| MalformedReason::InvalidDigits {
        value: value.to_owned(),
        base,
    })?;
    if negative && !magnitude.is_zero() {
        return Err(MalformedReason::Negative(value.to_owned()));
    }
    Ok(magnitude)
}

/// Strict digit parsing: every character must be a digit of `radix`,
/// case-insensitive, with no separators.
fn parse_digits(s: &str, radix: u32) -> Option<BigUint> {
    if s.is_empty() {
        return None;
    }
    let digits = s
        .chars()
        .map(|c| c.to_digit(radix).map(|d| d as u8))
        .collect::<Option<Vec<u8>>>()?;
    BigUint::from_radix_be(&digits, radix)
}
