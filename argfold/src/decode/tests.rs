//! Unit tests for the built-in decoders.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use std::time::Duration;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use rstest::rstest;

use super::{Arity, Decode, Decoder};

#[rstest]
#[case("0x1F", 31)]
#[case("10", 10)]
#[case("-0x10", -16)]
#[case("-7", -7)]
fn integers_honour_hex_prefix(#[case] raw: &str, #[case] expected: i64) {
    assert_eq!(i64::decode(raw), Ok(expected));
    assert_eq!(i32::decode(raw).map(i64::from), Ok(expected));
    assert_eq!(BigInt::decode(raw), Ok(BigInt::from(expected)));
}

#[rstest]
#[case("")]
#[case("0x")]
#[case("12abc")]
#[case("0xZZ")]
fn malformed_integers_fail(#[case] raw: &str) {
    assert!(i32::decode(raw).is_err());
    assert!(BigInt::decode(raw).is_err());
}

#[test]
fn unsigned_integers_reject_negative_text() {
    assert!(u32::decode("-1").is_err());
}

#[rstest]
#[case("true", true)]
#[case("TRUE", true)]
#[case("Yes", true)]
#[case("1", true)]
#[case("false", false)]
#[case("nO", false)]
#[case("0", false)]
fn booleans_accept_known_spellings(#[case] raw: &str, #[case] expected: bool) {
    assert_eq!(bool::decode(raw), Ok(expected));
}

#[rstest]
#[case("on")]
#[case("2")]
#[case("")]
#[case("y")]
fn booleans_reject_other_text(#[case] raw: &str) {
    assert!(bool::decode(raw).is_err());
}

#[test]
fn characters_require_exactly_one() {
    assert_eq!(char::decode("x"), Ok('x'));
    assert!(char::decode("").is_err());
    assert!(char::decode("xy").is_err());
}

#[test]
fn decimals_and_doubles_decode() {
    assert_eq!(f64::decode("0.5"), Ok(0.5));
    assert!(f64::decode("half").is_err());
    let expected = BigDecimal::from_str("12.345").ok();
    assert_eq!(BigDecimal::decode("12.345").ok(), expected);
}

#[rstest]
#[case("30s", Duration::from_secs(30))]
#[case("5 minutes", Duration::from_secs(300))]
#[case("1.5h", Duration::from_secs(5_400))]
#[case("250ms", Duration::from_millis(250))]
#[case("2 days", Duration::from_secs(172_800))]
fn durations_decode(#[case] raw: &str, #[case] expected: Duration) {
    assert_eq!(Duration::decode(raw), Ok(expected));
}

#[rstest]
#[case("10")]
#[case("s")]
#[case("10 fortnights")]
#[case("1.2.3s")]
fn malformed_durations_fail(#[case] raw: &str) {
    assert!(Duration::decode(raw).is_err());
}

#[test]
fn pairs_split_on_first_equals() {
    assert_eq!(
        <(String, String)>::decode("key=a=b"),
        Ok((String::from("key"), String::from("a=b")))
    );
    assert!(<(String, i32)>::decode("novalue").is_err());
}

#[test]
fn sequences_keep_order() {
    assert_eq!(Vec::<i32>::decode("1,2,3"), Ok(vec![1, 2, 3]));
    assert!(Vec::<i32>::decode("1,x,3").is_err());
}

#[test]
fn mappings_overwrite_duplicates() {
    let map = HashMap::<i32, bool>::decode("1=false,2=true");
    assert_eq!(map, Ok(HashMap::from([(1, false), (2, true)])));
    let repeated = BTreeMap::<i32, bool>::decode("1=false,1=true");
    assert_eq!(repeated, Ok(BTreeMap::from([(1, true)])));
}

#[test]
fn ordered_pairs_preserve_duplicates() {
    assert_eq!(
        Vec::<(i32, bool)>::decode("1=false,1=true"),
        Ok(vec![(1, false), (1, true)])
    );
}

#[rstest]
#[case(<() as Decode>::ARITY, Arity::Zero)]
#[case(<String as Decode>::ARITY, Arity::One)]
#[case(<Vec<i32> as Decode>::ARITY, Arity::One)]
#[case(<(String, i32) as Decode>::ARITY, Arity::Two)]
#[case(<Vec<(String, i32)> as Decode>::ARITY, Arity::Two)]
#[case(<HashMap<String, i32> as Decode>::ARITY, Arity::Two)]
fn arities_follow_shape(#[case] actual: Arity, #[case] expected: Arity) {
    assert_eq!(actual, expected);
}

#[test]
fn custom_decoders_wrap_closures() {
    let decoder = Decoder::new(Arity::One, |raw: &str| Ok(raw.len()));
    assert_eq!(decoder.decode("four"), Ok(4));
    assert_eq!(decoder.clone().arity(), Arity::One);
    assert_eq!(Decoder::<u8>::of().decode("0xff"), Ok(255));
}
