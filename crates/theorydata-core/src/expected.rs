use std::any;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::param::{Argument, Param};

/// How a test case concludes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitMode {
    /// Completes normally; the expectation is a free-text outcome.
    #[default]
    Normal,
    /// Returns a value that the test compares against.
    Returns,
    /// Fails with an error of a known type.
    Throws,
}

impl ExitMode {
    /// Keyword used inside case names. Empty for `Normal`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitMode::Normal => "",
            ExitMode::Returns => "returns",
            ExitMode::Throws => "throws",
        }
    }

    /// Whether cases with this exit mode carry an expected value worth
    /// passing to the test method.
    pub fn carries_expected(&self) -> bool {
        !matches!(self, ExitMode::Normal)
    }
}

impl fmt::Display for ExitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The expected outcome of a test case.
pub trait Expected: fmt::Debug + Clone + Send + Sync + 'static {
    /// Exit mode this expectation belongs to.
    fn exit_mode(&self) -> ExitMode;

    /// Text rendered into the case name.
    fn describe(&self) -> String;

    /// The expectation as a flattened argument.
    fn to_param(&self) -> Param;
}

/// Outcome description of a normally completing case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Description(pub String);

impl Description {
    pub fn new(text: impl Into<String>) -> Self {
        Description(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Description {
    fn from(text: &str) -> Self {
        Description(text.to_string())
    }
}

impl From<String> for Description {
    fn from(text: String) -> Self {
        Description(text)
    }
}

impl Expected for Description {
    fn exit_mode(&self) -> ExitMode {
        ExitMode::Normal
    }

    fn describe(&self) -> String {
        self.0.clone()
    }

    fn to_param(&self) -> Param {
        Param::new(self.0.clone())
    }
}

/// The value a case is expected to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Returns<T>(pub T);

impl<T> Expected for Returns<T>
where
    T: Argument + Clone + fmt::Display,
{
    fn exit_mode(&self) -> ExitMode {
        ExitMode::Returns
    }

    fn describe(&self) -> String {
        self.0.to_string()
    }

    fn to_param(&self) -> Param {
        Param::new(self.0.clone())
    }
}

/// The error a case is expected to fail with.
///
/// The error instance is shared, so cloning a case never clones the error.
pub struct Throws<E>(Arc<E>);

impl<E> Throws<E>
where
    E: Error + Send + Sync + 'static,
{
    pub fn new(error: E) -> Self {
        Throws(Arc::new(error))
    }

    pub fn error(&self) -> &E {
        &self.0
    }

    /// Unqualified name of the error type, e.g. `ParseIntError`.
    pub fn type_name(&self) -> &'static str {
        short_type_name(any::type_name::<E>())
    }
}

impl<E> Clone for Throws<E> {
    fn clone(&self) -> Self {
        Throws(Arc::clone(&self.0))
    }
}

impl<E: fmt::Debug> fmt::Debug for Throws<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Throws").field(&self.0).finish()
    }
}

// Errors rarely implement PartialEq; same type and same message is close enough.
impl<E: fmt::Display> PartialEq for Throws<E> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.to_string() == other.0.to_string()
    }
}

impl<E> Expected for Throws<E>
where
    E: Error + Send + Sync + 'static,
{
    fn exit_mode(&self) -> ExitMode {
        ExitMode::Throws
    }

    fn describe(&self) -> String {
        self.type_name().to_string()
    }

    fn to_param(&self) -> Param {
        Param::from_arc(Arc::clone(&self.0))
    }
}

/// Strips module paths and generic arguments from a type name.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("core::num::error::ParseIntError"), "ParseIntError");
        assert_eq!(short_type_name("my::Wrapper<alloc::string::String>"), "Wrapper");
        assert_eq!(short_type_name("Plain"), "Plain");
    }

    #[test]
    fn test_exit_mode_keywords() {
        assert_eq!(ExitMode::Normal.to_string(), "");
        assert_eq!(ExitMode::Returns.to_string(), "returns");
        assert_eq!(ExitMode::Throws.to_string(), "throws");
        assert!(!ExitMode::Normal.carries_expected());
        assert!(ExitMode::Throws.carries_expected());
    }

    #[test]
    fn test_throws_describes_error_type() {
        let err = "x".parse::<i32>().unwrap_err();
        let throws = Throws::new(err);
        assert_eq!(throws.describe(), "ParseIntError");
        assert!(throws.to_param().is::<std::num::ParseIntError>());
    }
}
