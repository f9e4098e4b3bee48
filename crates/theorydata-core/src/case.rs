use std::fmt;

use thiserror::Error;

use crate::args::{ArgList, MAX_ARITY};
use crate::expected::{Description, ExitMode, Expected, Returns, Throws};
use crate::param::{Argument, Param};

/// Errors raised while constructing a test case.
#[derive(Debug, Error, PartialEq)]
pub enum CaseError {
    #[error("Test case definition must not be empty")]
    EmptyDefinition,

    #[error("Too many arguments: {arity} given, at most {} supported", MAX_ARITY)]
    TooManyArguments { arity: usize },

    #[error("Invalid expected value for a '{exit_mode:?}' case: {reason}")]
    InvalidExpected { exit_mode: ExitMode, reason: String },
}

/// Common surface of every test case type.
///
/// Identity of a case is its concrete type plus its [`Case::case_name`];
/// two cases of one type with equal names are duplicates.
pub trait Case: fmt::Debug + Clone + Send + Sync + 'static {
    /// Free-text description of the scenario. Never empty.
    fn definition(&self) -> &str;

    fn exit_mode(&self) -> ExitMode;

    /// The expected outcome as rendered into the case name.
    fn expected_description(&self) -> String;

    /// The expected outcome as a flattened argument.
    fn expected_param(&self) -> Param;

    /// Number of argument slots.
    fn arity(&self) -> usize;

    /// `Arg1..ArgN` in order.
    fn arg_params(&self) -> Vec<Param>;

    /// Canonical name of the case, used for display and de-duplication.
    fn case_name(&self) -> String {
        render_case_name(
            self.definition(),
            self.exit_mode(),
            &self.expected_description(),
        )
    }
}

/// Renders `definition => [exit mode] expected`.
///
/// A normal case with an empty outcome is named by its definition alone.
pub fn render_case_name(definition: &str, exit_mode: ExitMode, expected: &str) -> String {
    match exit_mode {
        ExitMode::Normal if expected.is_empty() => definition.to_string(),
        ExitMode::Normal => format!("{} => {}", definition, expected),
        _ => format!("{} => {} {}", definition, exit_mode, expected),
    }
}

pub(crate) fn validate_definition(definition: &str) -> Result<(), CaseError> {
    if definition.trim().is_empty() {
        return Err(CaseError::EmptyDefinition);
    }
    Ok(())
}

/// A strongly typed test case: a definition, an expectation and up to nine
/// typed arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase<X, A> {
    definition: String,
    expected: X,
    args: A,
}

/// A case that completes normally.
pub type NormalCase<A> = TestCase<Description, A>;

/// A case that returns a value.
pub type ReturnsCase<T, A> = TestCase<Returns<T>, A>;

/// A case that fails with an error.
pub type ThrowsCase<E, A> = TestCase<Throws<E>, A>;

impl<X, A> TestCase<X, A>
where
    X: Expected,
    A: ArgList,
{
    /// Creates a case, rejecting an empty definition.
    pub fn new(definition: impl Into<String>, expected: X, args: A) -> Result<Self, CaseError> {
        let definition = definition.into();
        validate_definition(&definition)?;
        Ok(Self {
            definition,
            expected,
            args,
        })
    }

    pub fn expected(&self) -> &X {
        &self.expected
    }

    pub fn args(&self) -> &A {
        &self.args
    }
}

impl<A: ArgList> TestCase<Description, A> {
    /// Creates a normally completing case described by `expected`.
    pub fn normal(
        definition: impl Into<String>,
        expected: impl Into<String>,
        args: A,
    ) -> Result<Self, CaseError> {
        Self::new(definition, Description(expected.into()), args)
    }
}

impl<T, A> TestCase<Returns<T>, A>
where
    T: Argument + Clone + fmt::Display,
    A: ArgList,
{
    /// Creates a case expected to return `value`.
    pub fn returns(definition: impl Into<String>, value: T, args: A) -> Result<Self, CaseError> {
        Self::new(definition, Returns(value), args)
    }
}

impl<E, A> TestCase<Throws<E>, A>
where
    E: std::error::Error + Send + Sync + 'static,
    A: ArgList,
{
    /// Creates a case expected to fail with `error`.
    pub fn throws(definition: impl Into<String>, error: E, args: A) -> Result<Self, CaseError> {
        Self::new(definition, Throws::new(error), args)
    }
}

impl<X, A> Case for TestCase<X, A>
where
    X: Expected,
    A: ArgList,
{
    fn definition(&self) -> &str {
        &self.definition
    }

    fn exit_mode(&self) -> ExitMode {
        self.expected.exit_mode()
    }

    fn expected_description(&self) -> String {
        self.expected.describe()
    }

    fn expected_param(&self) -> Param {
        self.expected.to_param()
    }

    fn arity(&self) -> usize {
        A::ARITY
    }

    fn arg_params(&self) -> Vec<Param> {
        self.args.to_params()
    }
}

impl<X, A> fmt::Display for TestCase<X, A>
where
    X: Expected,
    A: ArgList,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.case_name())
    }
}
