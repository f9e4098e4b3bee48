use std::borrow::Cow;
use std::num::ParseIntError;

use theorydata_core::{
    ArgsMode, CaseSource, DynamicSource, HolderError, NormalCase, ReturnsCase, RowHolder, TestCase,
    ThrowsCase,
};

type AddCase = NormalCase<(i32, i32)>;

#[test]
fn test_first_case_fixes_the_type() {
    let mut source = DynamicSource::new(ArgsMode::Flattened);
    assert!(source.case_type().is_none());
    assert!(source.is_empty());

    assert!(source.add_normal("adds two numbers", "3", (1, 2)).unwrap());
    assert_eq!(source.case_type(), Some(std::any::type_name::<AddCase>()));
    assert_eq!(source.len(), 1);
}

#[test]
fn test_type_mismatch_leaves_rows_intact() {
    let mut source = DynamicSource::new(ArgsMode::Flattened);
    source.add_normal("adds two numbers", "3", (1, 2)).unwrap();

    let err = source.add_returns("adds", 3, (1, 2)).unwrap_err();
    assert!(matches!(err, HolderError::TypeMismatch { .. }));

    // a different arity is a different type too
    let err = source.add_normal("negates", "-1", (1,)).unwrap_err();
    assert!(matches!(err, HolderError::TypeMismatch { .. }));

    assert_eq!(source.len(), 1);
    let rows = source.rows::<AddCase>(None, None).unwrap().unwrap();
    assert_eq!(rows[0].case_name(), "adds two numbers => 3");
}

#[test]
fn test_duplicate_is_not_an_error() {
    let mut source = DynamicSource::new(ArgsMode::WholeObject);

    assert!(source.add_normal("adds", "3", (1, 2)).unwrap());
    assert!(!source.add_normal("adds", "3", (1, 2)).unwrap());
    assert_eq!(source.len(), 1);
}

#[test]
fn test_invalid_case_is_surfaced() {
    let mut source = DynamicSource::new(ArgsMode::WholeObject);

    let err = source.add_normal("", "3", (1, 2)).unwrap_err();
    assert!(matches!(err, HolderError::Case(_)));
    assert!(source.case_type().is_none());
}

#[test]
fn test_rows_of_empty_source() {
    let source = DynamicSource::new(ArgsMode::WholeObject);
    assert!(source.rows::<AddCase>(Some("Add_Test"), None).unwrap().is_none());
}

#[test]
fn test_rows_of_wrong_type() {
    let mut source = DynamicSource::new(ArgsMode::WholeObject);
    source.add_normal("adds", "3", (1, 2)).unwrap();

    let result = source.rows::<ReturnsCase<i32, (i32, i32)>>(None, None);
    assert!(matches!(result, Err(HolderError::TypeMismatch { .. })));
}

#[test]
fn test_rows_with_method_and_mode() {
    let mut source = DynamicSource::new(ArgsMode::WholeObject);
    source.add_normal("adds", "3", (1, 2)).unwrap();

    let rows = source
        .rows::<AddCase>(Some("Add_Test"), Some(ArgsMode::Flattened))
        .unwrap()
        .unwrap();
    assert_eq!(rows[0].display_name(), Some("Add_Test(adds => 3)"));
    assert_eq!(rows[0].params().len(), 2);
}

#[test]
fn test_rows_under_defaults_are_borrowed() {
    let mut source = DynamicSource::new(ArgsMode::Flattened);
    source.add_normal("adds", "3", (1, 2)).unwrap();

    let rows = source.rows::<AddCase>(None, None).unwrap().unwrap();
    assert!(matches!(rows, Cow::Borrowed(_)));

    let rows = source.rows::<AddCase>(None, Some(ArgsMode::WholeObject)).unwrap().unwrap();
    assert!(matches!(rows, Cow::Owned(_)));
    assert_eq!(rows[0].params().len(), 1);
}

#[test]
fn test_with_mode_is_scoped() {
    let mut source = DynamicSource::new(ArgsMode::WholeObject);

    source.with_mode(Some(ArgsMode::Flattened), |source| {
        assert_eq!(source.mode(), ArgsMode::Flattened);
        source.add_normal("adds", "3", (1, 2)).unwrap();
    });
    assert_eq!(source.mode(), ArgsMode::WholeObject);

    // the holder was started under the overridden mode
    let holder = source.holder::<AddCase>().unwrap().unwrap();
    assert_eq!(holder.mode(), ArgsMode::Flattened);

    source.with_mode(None, |source| assert_eq!(source.mode(), ArgsMode::WholeObject));
}

#[test]
fn test_reset_releases_type_binding() {
    let mut source = DynamicSource::new(ArgsMode::WholeObject);
    source.add_normal("adds", "3", (1, 2)).unwrap();
    source.reset();

    assert!(source.is_empty());
    let err: ParseIntError = "x".parse::<i32>().unwrap_err();
    assert!(source.add_throws("rejects text", err, ("x",)).unwrap());
    assert_eq!(
        source.case_type(),
        Some(std::any::type_name::<ThrowsCase<ParseIntError, (&str,)>>())
    );
}

#[test]
fn test_holder_mut_allows_metadata_edits() {
    let mut source = DynamicSource::new(ArgsMode::WholeObject);
    source.add_normal("adds", "3", (1, 2)).unwrap();

    let holder = source.holder_mut::<AddCase>().unwrap().unwrap();
    holder
        .set_metadata("adds => 3", theorydata_core::MetadataUpdate::Timeout(Some(10)))
        .unwrap();

    let rows = source.rows::<AddCase>(None, None).unwrap().unwrap();
    assert_eq!(rows[0].metadata().timeout_ms, Some(10));
}

#[test]
fn test_holder_from_case_source() {
    let cases: Vec<AddCase> = vec![
        TestCase::normal("adds", "3", (1, 2)).unwrap(),
        TestCase::normal("subtracts", "-1", (1, 2)).unwrap(),
    ];
    assert_eq!(cases.cases().count(), 2);

    let holder = RowHolder::from_source(ArgsMode::Flattened, &cases);
    assert_eq!(holder.len(), 2);
    assert_eq!(holder.iter().next().unwrap().params().len(), 2);
}
