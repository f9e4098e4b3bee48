use std::num::ParseIntError;

use theorydata_core::{Case, CaseError, ExitMode, NormalCase, ReturnsCase, TestCase, ThrowsCase};

fn parse_error() -> ParseIntError {
    "not a number".parse::<i32>().unwrap_err()
}

#[test]
fn test_normal_case_name() {
    let case = TestCase::normal("adds two numbers", "3", (1, 2)).unwrap();

    assert_eq!(case.definition(), "adds two numbers");
    assert_eq!(case.exit_mode(), ExitMode::Normal);
    assert_eq!(case.arity(), 2);
    assert_eq!(case.case_name(), "adds two numbers => 3");
}

#[test]
fn test_normal_case_without_outcome_is_named_by_definition() {
    let case: NormalCase<(i32,)> = TestCase::normal("negates", "", (5,)).unwrap();
    assert_eq!(case.case_name(), "negates");
}

#[test]
fn test_returns_case_name() {
    let case: ReturnsCase<i32, (i32, i32)> =
        TestCase::returns("adds two numbers", 3, (1, 2)).unwrap();

    assert_eq!(case.exit_mode(), ExitMode::Returns);
    assert_eq!(case.case_name(), "adds two numbers => returns 3");
    assert_eq!(case.expected_param().downcast_ref::<i32>(), Some(&3));
}

#[test]
fn test_throws_case_name() {
    let case: ThrowsCase<ParseIntError, (&str,)> =
        TestCase::throws("rejects text", parse_error(), ("abc",)).unwrap();

    assert_eq!(case.exit_mode(), ExitMode::Throws);
    assert_eq!(case.case_name(), "rejects text => throws ParseIntError");
    assert!(case.expected_param().is::<ParseIntError>());
}

#[test]
fn test_empty_definition_is_rejected() {
    assert_eq!(
        TestCase::normal("", "3", (1, 2)).unwrap_err(),
        CaseError::EmptyDefinition
    );
    assert_eq!(
        TestCase::returns("   ", 3, (1,)).unwrap_err(),
        CaseError::EmptyDefinition
    );
}

#[test]
fn test_case_name_is_deterministic() {
    let case = TestCase::returns("doubles", 8_u64, (4_u64,)).unwrap();
    let first = case.case_name();

    assert_eq!(case.case_name(), first);
    assert_eq!(case.clone().case_name(), first);
    assert_eq!(case.to_string(), first);
}

#[test]
fn test_zero_and_nine_arity() {
    let empty = TestCase::normal("no arguments", "nothing happens", ()).unwrap();
    assert_eq!(empty.arity(), 0);
    assert!(empty.arg_params().is_empty());

    let nine = TestCase::normal("nine arguments", "sum is 45", (1, 2, 3, 4, 5, 6, 7, 8, 9)).unwrap();
    assert_eq!(nine.arity(), 9);
    let values: Vec<i32> = nine
        .arg_params()
        .iter()
        .map(|p| *p.downcast_ref::<i32>().unwrap())
        .collect();
    assert_eq!(values, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
}

#[test]
fn test_nullable_slots() {
    let case = TestCase::normal("handles missing input", "defaults to zero", (None::<i32>, Some("x"))).unwrap();
    let params = case.arg_params();

    assert_eq!(params[0].downcast_ref::<Option<i32>>(), Some(&None));
    assert_eq!(params[1].downcast_ref::<Option<&str>>(), Some(&Some("x")));
}
