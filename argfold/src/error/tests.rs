//! Unit tests for diagnostic rendering and aggregation behaviour.

use rstest::rstest;

use super::{DecodeError, ParseError, ParseErrors};

#[rstest]
#[case(1, "Missing option --foo")]
#[case(3, "Option --foo must be given 3 times")]
fn mandatory_message_depends_on_bound(#[case] min_occurs: usize, #[case] expected: &str) {
    let err = ParseError::MissingMandatory {
        subject: "option --foo".into(),
        min_occurs,
    };
    assert_eq!(err.to_string(), expected);
}

#[test]
fn decode_failure_names_definition_and_input() {
    let err = ParseError::Decode {
        subject: "option --port".into(),
        raw: "eighty".into(),
        source: DecodeError::new("an integer", "invalid digit found in string"),
    };
    assert_eq!(
        err.to_string(),
        "Option --port could not decode an integer for: eighty (invalid digit found in string)"
    );
}

#[rstest]
#[case(ParseError::UnknownOption { token: "-x".into() }, true)]
#[case(ParseError::UnknownArgument { token: "x".into() }, true)]
#[case(ParseError::ConfigCheck { message: "bad".into() }, false)]
fn classifies_unrecognised_tokens(#[case] err: ParseError, #[case] expected: bool) {
    assert_eq!(err.is_unrecognised(), expected);
}

#[test]
fn aggregate_numbers_entries() {
    let errors = ParseErrors::new(vec![
        ParseError::UnknownArgument { token: "a".into() },
        ParseError::UnknownArgument { token: "b".into() },
    ]);
    let display = errors.to_string();
    assert!(display.starts_with("1: Unknown argument 'a'"));
    assert!(display.contains("\n2: Unknown argument 'b'"));
    let borrowed: Vec<_> = errors.iter().collect();
    assert_eq!(borrowed.len(), 2);
    let owned: Vec<_> = errors.into_iter().collect();
    assert_eq!(owned.len(), 2);
}

#[test]
fn empty_aggregate_renders_nothing() {
    let errors = ParseErrors::default();
    assert!(errors.is_empty());
    assert_eq!(errors.to_string(), "");
}
