//! Pure mapping from a test case to the argument list a test host receives.

use crate::case::Case;
use crate::param::Param;
use crate::strategy::{ArgsMode, ConversionStrategy};

/// Converts `case` into its argument list.
///
/// - `WholeObject`: `[case]`
/// - `Flattened`: `[expected?, arg1, .., argN]`, with `expected` present only
///   when `strategy.include_expected` is set
pub fn to_params<C: Case>(case: &C, strategy: ConversionStrategy) -> Vec<Param> {
    match strategy.mode {
        ArgsMode::WholeObject => vec![Param::new(case.clone())],
        ArgsMode::Flattened => {
            let mut params = Vec::with_capacity(case.arity() + 1);
            if strategy.include_expected {
                params.push(case.expected_param());
            }
            params.extend(case.arg_params());
            params
        }
    }
}

/// Canonical name of `case`.
pub fn case_name<C: Case>(case: &C) -> String {
    case.case_name()
}
