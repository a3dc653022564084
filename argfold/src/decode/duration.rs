//! Decoder for [`Duration`] values written as `<magnitude>[ ]<unit>`.
//!
//! Magnitudes may carry a decimal fraction (`1.5h`). Units accept the short
//! forms `ns`, `us`, `ms`, `s`, `m`, `h`, `d` and their long singular or
//! plural names.

use std::time::Duration;

use super::Decode;
use crate::DecodeError;

const EXPECTED: &str = "a duration";
const NANOS_PER_SECOND: u128 = 1_000_000_000;

impl Decode for Duration {
    fn decode(raw: &str) -> Result<Self, DecodeError> {
        let text = raw.trim();
        let split = text
            .find(|ch: char| !(ch.is_ascii_digit() || ch == '.'))
            .unwrap_or(text.len());
        let (magnitude, unit) = text
            .split_at_checked(split)
            .ok_or_else(|| DecodeError::new(EXPECTED, "malformed magnitude"))?;
        let per_unit = unit_nanos(unit.trim())?;
        let nanos = scaled_nanos(magnitude, per_unit)?;
        let seconds = nanos
            .checked_div(NANOS_PER_SECOND)
            .and_then(|secs| u64::try_from(secs).ok())
            .ok_or_else(|| DecodeError::new(EXPECTED, "duration is too long"))?;
        let subsec = nanos
            .checked_rem(NANOS_PER_SECOND)
            .and_then(|rem| u32::try_from(rem).ok())
            .unwrap_or(0);
        Ok(Self::new(seconds, subsec))
    }
}

fn unit_nanos(unit: &str) -> Result<u128, DecodeError> {
    let nanos = match unit.to_ascii_lowercase().as_str() {
        "ns" | "nano" | "nanos" | "nanosecond" | "nanoseconds" => 1,
        "us" | "micro" | "micros" | "microsecond" | "microseconds" => 1_000,
        "ms" | "milli" | "millis" | "millisecond" | "milliseconds" => 1_000_000,
        "s" | "sec" | "secs" | "second" | "seconds" => NANOS_PER_SECOND,
        "m" | "min" | "mins" | "minute" | "minutes" => 60 * NANOS_PER_SECOND,
        "h" | "hour" | "hours" => 3_600 * NANOS_PER_SECOND,
        "d" | "day" | "days" => 86_400 * NANOS_PER_SECOND,
        "" => return Err(DecodeError::new(EXPECTED, "missing time unit")),
        other => {
            return Err(DecodeError::new(
                EXPECTED,
                format!("unknown time unit '{other}'"),
            ));
        }
    };
    Ok(nanos)
}

fn scaled_nanos(magnitude: &str, per_unit: u128) -> Result<u128, DecodeError> {
    let overflow = || DecodeError::new(EXPECTED, "duration is too long");
    let (whole, fraction) = magnitude.split_once('.').unwrap_or((magnitude, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(DecodeError::new(EXPECTED, "missing magnitude"));
    }
    let whole_value = parse_digits(whole)?;
    let fraction_value = parse_digits(fraction)?;
    let scale = u32::try_from(fraction.len())
        .ok()
        .and_then(|len| 10_u128.checked_pow(len))
        .ok_or_else(overflow)?;
    let whole_nanos = whole_value.checked_mul(per_unit).ok_or_else(overflow)?;
    let fraction_nanos = fraction_value
        .checked_mul(per_unit)
        .and_then(|n| n.checked_div(scale))
        .ok_or_else(overflow)?;
    whole_nanos.checked_add(fraction_nanos).ok_or_else(overflow)
}

fn parse_digits(digits: &str) -> Result<u128, DecodeError> {
    if digits.is_empty() {
        return Ok(0);
    }
    digits
        .parse::<u128>()
        .map_err(|err| DecodeError::new(EXPECTED, err.to_string()))
}
