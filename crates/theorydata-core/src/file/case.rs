use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::args::MAX_ARITY;
use crate::case::{validate_definition, Case, CaseError};
use crate::expected::ExitMode;
use crate::param::Param;

/// A test case read from a case file.
///
/// The expected value and the arguments are kept as JSON values, so one
/// holder can take every case of a file regardless of argument types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileCase {
    definition: String,
    exit_mode: ExitMode,
    expected: Value,
    args: Vec<Value>,
}

impl FileCase {
    pub fn new(
        definition: impl Into<String>,
        exit_mode: ExitMode,
        expected: Value,
        args: Vec<Value>,
    ) -> Result<Self, CaseError> {
        let definition = definition.into();
        validate_definition(&definition)?;

        if args.len() > MAX_ARITY {
            return Err(CaseError::TooManyArguments { arity: args.len() });
        }

        match (exit_mode, &expected) {
            (ExitMode::Returns, Value::Null) => {
                return Err(CaseError::InvalidExpected {
                    exit_mode,
                    reason: "a returned value is required".to_string(),
                });
            }
            (ExitMode::Throws, Value::String(name)) if !name.trim().is_empty() => {}
            (ExitMode::Throws, _) => {
                return Err(CaseError::InvalidExpected {
                    exit_mode,
                    reason: "expected must name the error type".to_string(),
                });
            }
            _ => {}
        }

        Ok(Self {
            definition,
            exit_mode,
            expected,
            args,
        })
    }

    /// Exit mode and arity of the case.
    pub fn shape(&self) -> CaseShape {
        CaseShape {
            exit_mode: self.exit_mode,
            arity: self.args.len(),
        }
    }

    pub fn expected(&self) -> &Value {
        &self.expected
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }
}

/// What a typed case would fix through its type: exit mode and arity.
///
/// All cases of one file share a shape, so their flattened rows line up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaseShape {
    pub exit_mode: ExitMode,
    pub arity: usize,
}

impl fmt::Display for CaseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let exit_mode = match self.exit_mode {
            ExitMode::Normal => "normal",
            other => other.as_str(),
        };
        write!(f, "{} case with {} args", exit_mode, self.arity)
    }
}

impl Case for FileCase {
    fn definition(&self) -> &str {
        &self.definition
    }

    fn exit_mode(&self) -> ExitMode {
        self.exit_mode
    }

    fn expected_description(&self) -> String {
        match &self.expected {
            Value::Null => String::new(),
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }

    fn expected_param(&self) -> Param {
        Param::new(self.expected.clone())
    }

    fn arity(&self) -> usize {
        self.args.len()
    }

    fn arg_params(&self) -> Vec<Param> {
        self.args.iter().cloned().map(Param::new).collect()
    }
}
