use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::case::Case;

/// Errors raised when a conversion strategy cannot be resolved.
#[derive(Debug, Error, PartialEq)]
pub enum StrategyError {
    #[error("Invalid args mode: '{0}' (expected 'whole_object' or 'flattened')")]
    InvalidMode(String),

    #[error("Invalid expected policy: '{0}' (expected 'by_exit_mode', 'include' or 'trim')")]
    InvalidPolicy(String),
}

/// Selects how a test case becomes an argument list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgsMode {
    /// The case itself is the single argument.
    #[default]
    WholeObject,
    /// The case's fields become positional arguments.
    Flattened,
}

impl ArgsMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgsMode::WholeObject => "whole_object",
            ArgsMode::Flattened => "flattened",
        }
    }

    /// Numeric code of the mode.
    pub fn code(&self) -> u8 {
        match self {
            ArgsMode::WholeObject => 0,
            ArgsMode::Flattened => 1,
        }
    }
}

impl fmt::Display for ArgsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArgsMode {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "whole_object" | "whole-object" | "instance" | "0" => Ok(ArgsMode::WholeObject),
            "flattened" | "properties" | "1" => Ok(ArgsMode::Flattened),
            _ => Err(StrategyError::InvalidMode(s.to_string())),
        }
    }
}

impl TryFrom<u8> for ArgsMode {
    type Error = StrategyError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(ArgsMode::WholeObject),
            1 => Ok(ArgsMode::Flattened),
            other => Err(StrategyError::InvalidMode(other.to_string())),
        }
    }
}

/// Decides whether the expected value leads a flattened argument list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedPolicy {
    /// Include it for returning and throwing cases, drop it for normal ones.
    #[default]
    ByExitMode,
    /// Always include it.
    Include,
    /// Never include it.
    Trim,
}

impl ExpectedPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpectedPolicy::ByExitMode => "by_exit_mode",
            ExpectedPolicy::Include => "include",
            ExpectedPolicy::Trim => "trim",
        }
    }

    /// Resolves the policy for one case.
    pub fn includes_expected<C: Case>(&self, case: &C) -> bool {
        match self {
            ExpectedPolicy::ByExitMode => case.exit_mode().carries_expected(),
            ExpectedPolicy::Include => true,
            ExpectedPolicy::Trim => false,
        }
    }
}

impl fmt::Display for ExpectedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpectedPolicy {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "by_exit_mode" | "by-exit-mode" | "auto" => Ok(ExpectedPolicy::ByExitMode),
            "include" => Ok(ExpectedPolicy::Include),
            "trim" => Ok(ExpectedPolicy::Trim),
            _ => Err(StrategyError::InvalidPolicy(s.to_string())),
        }
    }
}

/// The resolved conversion of one row.
///
/// `include_expected` only matters for [`ArgsMode::Flattened`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversionStrategy {
    pub mode: ArgsMode,
    pub include_expected: bool,
}

impl ConversionStrategy {
    pub fn new(mode: ArgsMode, include_expected: bool) -> Self {
        Self {
            mode,
            include_expected,
        }
    }

    pub fn whole_object() -> Self {
        Self::new(ArgsMode::WholeObject, false)
    }

    pub fn flattened(include_expected: bool) -> Self {
        Self::new(ArgsMode::Flattened, include_expected)
    }

    /// Resolves `mode` and `policy` against a concrete case.
    pub fn for_case<C: Case>(mode: ArgsMode, policy: ExpectedPolicy, case: &C) -> Self {
        match mode {
            ArgsMode::WholeObject => Self::whole_object(),
            ArgsMode::Flattened => Self::flattened(policy.includes_expected(case)),
        }
    }
}

impl fmt::Display for ConversionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            ArgsMode::Flattened if self.include_expected => write!(f, "flattened+expected"),
            mode => write!(f, "{}", mode),
        }
    }
}
