//! Decoders for composite values: unit, pairs, sequences and mappings.
//!
//! Composite syntax uses a fixed `,` between items and splits each item on
//! its first `=` into key and value.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use super::{Arity, Decode};
use crate::DecodeError;

const ITEM_SEPARATOR: char = ',';
const KEY_VALUE_SEPARATOR: char = '=';

impl Decode for () {
    const ARITY: Arity = Arity::Zero;

    fn decode(_raw: &str) -> Result<Self, DecodeError> {
        Ok(())
    }
}

impl<A: Decode, B: Decode> Decode for (A, B) {
    const ARITY: Arity = Arity::Two;

    fn decode(raw: &str) -> Result<Self, DecodeError> {
        let (key, value) = raw.split_once(KEY_VALUE_SEPARATOR).ok_or_else(|| {
            DecodeError::new("a key=value pair", format!("no '=' found in '{raw}'"))
        })?;
        Ok((A::decode(key)?, B::decode(value)?))
    }
}

impl<A: Decode> Decode for Vec<A> {
    const ARITY: Arity = A::ARITY.at_least_one();

    fn decode(raw: &str) -> Result<Self, DecodeError> {
        raw.split(ITEM_SEPARATOR).map(A::decode).collect()
    }
}

impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: Decode + Eq + Hash,
    V: Decode,
    S: BuildHasher + Default,
{
    const ARITY: Arity = Arity::Two;

    fn decode(raw: &str) -> Result<Self, DecodeError> {
        raw.split(ITEM_SEPARATOR)
            .map(<(K, V)>::decode)
            .collect()
    }
}

impl<K, V> Decode for BTreeMap<K, V>
where
    K: Decode + Ord,
    V: Decode,
{
    const ARITY: Arity = Arity::Two;

    fn decode(raw: &str) -> Result<Self, DecodeError> {
        raw.split(ITEM_SEPARATOR)
            .map(<(K, V)>::decode)
            .collect()
    }
}
