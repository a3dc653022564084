//! Decoders for scalar values: text, characters, numbers and booleans.

use std::path::PathBuf;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use super::Decode;
use crate::DecodeError;

impl Decode for String {
    fn decode(raw: &str) -> Result<Self, DecodeError> {
        Ok(raw.to_owned())
    }
}

impl Decode for PathBuf {
    fn decode(raw: &str) -> Result<Self, DecodeError> {
        Ok(Self::from(raw))
    }
}

impl Decode for char {
    fn decode(raw: &str) -> Result<Self, DecodeError> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Ok(ch),
            _ => Err(DecodeError::new(
                "a single character",
                format!("'{raw}' is not exactly one character"),
            )),
        }
    }
}

impl Decode for bool {
    fn decode(raw: &str) -> Result<Self, DecodeError> {
        match raw.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" => Ok(false),
            _ => Err(DecodeError::new(
                "a boolean",
                "expected one of true, false, yes, no, 1 or 0",
            )),
        }
    }
}

macro_rules! decode_via_from_str {
    ($expected:literal => $($ty:ty),+ $(,)?) => {
        $(
            impl Decode for $ty {
                fn decode(raw: &str) -> Result<Self, DecodeError> {
                    <$ty as FromStr>::from_str(raw)
                        .map_err(|err| DecodeError::new($expected, err.to_string()))
                }
            }
        )+
    };
}

decode_via_from_str!("a number" => f32, f64);
decode_via_from_str!("a decimal number" => BigDecimal);

/// Splits an optional sign and `0x` prefix from integer text.
///
/// Returns the text to hand to `from_str_radix` together with the radix.
fn integer_digits(raw: &str) -> (String, u32) {
    let (negative, body) = raw
        .strip_prefix('-')
        .map_or((false, raw), |rest| (true, rest));
    let (digits, radix) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
        .map_or((body, 10), |hex| (hex, 16));
    let text = if negative {
        format!("-{digits}")
    } else {
        digits.to_owned()
    };
    (text, radix)
}

macro_rules! decode_integer {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Decode for $ty {
                fn decode(raw: &str) -> Result<Self, DecodeError> {
                    let (digits, radix) = integer_digits(raw);
                    <$ty>::from_str_radix(&digits, radix)
                        .map_err(|err| DecodeError::new("an integer", err.to_string()))
                }
            }
        )+
    };
}

decode_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Decode for BigInt {
    fn decode(raw: &str) -> Result<Self, DecodeError> {
        let (digits, radix) = integer_digits(raw);
        Self::parse_bytes(digits.as_bytes(), radix).ok_or_else(|| {
            DecodeError::new("an integer", format!("'{raw}' is not a valid integer"))
        })
    }
}
