mod error;

pub use error::HolderError;

use std::any;
use std::borrow::Cow;
use std::collections::HashMap;

use tracing::{debug, warn};

use crate::case::Case;
use crate::row::{MetadataUpdate, Row};
use crate::source::CaseSource;
use crate::strategy::{ArgsMode, ConversionStrategy, ExpectedPolicy};

/// An insertion-ordered collection of rows converted from cases of one type.
///
/// Cases are de-duplicated by case name: adding a case whose name is already
/// present does nothing. Alternate views under another mode or method name
/// are computed on demand and never touch the stored rows.
#[derive(Debug, Clone)]
pub struct RowHolder<C: Case> {
    rows: Vec<Row<C>>,
    index: HashMap<String, usize>,
    mode: ArgsMode,
    policy: ExpectedPolicy,
    method_name: Option<String>,
}

impl<C: Case> Default for RowHolder<C> {
    fn default() -> Self {
        Self::new(ArgsMode::default())
    }
}

impl<C: Case> RowHolder<C> {
    /// Creates an empty holder converting with `mode`.
    pub fn new(mode: ArgsMode) -> Self {
        Self::with_policy(mode, ExpectedPolicy::default())
    }

    /// Creates an empty holder with an explicit expected-value policy.
    pub fn with_policy(mode: ArgsMode, policy: ExpectedPolicy) -> Self {
        Self {
            rows: Vec::new(),
            index: HashMap::new(),
            mode,
            policy,
            method_name: None,
        }
    }

    /// Creates a holder from a sequence of cases.
    pub fn from_cases(mode: ArgsMode, cases: impl IntoIterator<Item = C>) -> Self {
        let mut holder = Self::new(mode);
        holder.extend(cases);
        holder
    }

    /// Creates a holder from everything `source` yields.
    pub fn from_source<S>(mode: ArgsMode, source: &S) -> Self
    where
        S: CaseSource<Case = C> + ?Sized,
    {
        Self::from_cases(mode, source.cases())
    }

    /// Adds a case converted under the holder's defaults.
    ///
    /// Returns `false` without changing anything if a case with the same
    /// case name is already held.
    pub fn add(&mut self, case: C) -> bool {
        let case_name = case.case_name();

        if let Some(&position) = self.index.get(&case_name) {
            let kept = self.rows[position].case();
            if !same_values(kept, &case) {
                warn!(
                    case_name = %case_name,
                    kept = ?kept,
                    dropped = ?case,
                    "case name collision; dropping case with different values"
                );
            } else {
                debug!(case_name = %case_name, "duplicate case ignored");
            }
            return false;
        }

        let strategy = ConversionStrategy::for_case(self.mode, self.policy, &case);
        let row = Row::named_new(case, strategy, self.method_name.as_deref());
        debug!(case_name = %case_name, strategy = %strategy, "row added");

        self.index.insert(case_name, self.rows.len());
        self.rows.push(row);
        true
    }

    /// The rows as seen under `mode` and `method_name`.
    ///
    /// When both are absent or equal to the holder's defaults the stored
    /// rows are borrowed as they are.
    pub fn rows(&self, mode: Option<ArgsMode>, method_name: Option<&str>) -> Cow<'_, [Row<C>]> {
        self.rows_with_policy(mode, None, method_name)
    }

    /// Like [`RowHolder::rows`], also overriding the expected-value policy.
    pub fn rows_with_policy(
        &self,
        mode: Option<ArgsMode>,
        policy: Option<ExpectedPolicy>,
        method_name: Option<&str>,
    ) -> Cow<'_, [Row<C>]> {
        let mode = mode.unwrap_or(self.mode);
        let policy = policy.unwrap_or(self.policy);
        let method_name = method_name.filter(|name| !name.is_empty());

        let same_name = method_name.is_none() || method_name == self.method_name.as_deref();
        if mode == self.mode && policy == self.policy && same_name {
            return Cow::Borrowed(&self.rows);
        }

        debug!(
            rows = self.rows.len(),
            mode = %mode,
            policy = %policy,
            method_name = method_name.unwrap_or_default(),
            "regenerating rows"
        );

        Cow::Owned(
            self.rows
                .iter()
                .map(|row| {
                    let strategy = ConversionStrategy::for_case(mode, policy, row.case());
                    row.reconverted(strategy, method_name)
                })
                .collect(),
        )
    }

    /// A new holder whose defaults are `mode` and `method_name`.
    pub fn converted(&self, mode: ArgsMode, method_name: Option<&str>) -> Self {
        let rows = self.rows(Some(mode), method_name).into_owned();
        let method_name = method_name
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .or_else(|| self.method_name.clone());

        Self {
            rows,
            index: self.index.clone(),
            mode,
            policy: self.policy,
            method_name,
        }
    }

    /// Edits the metadata of the row named `case_name` in place.
    pub fn set_metadata(&mut self, case_name: &str, update: MetadataUpdate) -> Result<(), HolderError> {
        let position = *self
            .index
            .get(case_name)
            .ok_or_else(|| HolderError::RowNotFound(case_name.to_string()))?;
        update.apply(self.rows[position].metadata_mut())?;
        Ok(())
    }

    pub fn get(&self, case_name: &str) -> Option<&Row<C>> {
        self.index.get(case_name).map(|&position| &self.rows[position])
    }

    pub fn contains(&self, case_name: &str) -> bool {
        self.index.contains_key(case_name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row<C>> {
        self.rows.iter()
    }

    /// Case names in insertion order.
    pub fn case_names(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(Row::case_name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Removes all rows, keeping the defaults.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.index.clear();
    }

    pub fn mode(&self) -> ArgsMode {
        self.mode
    }

    pub fn policy(&self) -> ExpectedPolicy {
        self.policy
    }

    pub fn method_name(&self) -> Option<&str> {
        self.method_name.as_deref()
    }

    /// Type name of the held cases.
    pub fn case_type(&self) -> &'static str {
        any::type_name::<C>()
    }
}

/// Whether two cases carry the same expected value and arguments.
fn same_values<C: Case>(a: &C, b: &C) -> bool {
    let values = |case: &C| format!("{:?} {:?}", case.expected_param(), case.arg_params());
    values(a) == values(b)
}

impl<C: Case> Extend<C> for RowHolder<C> {
    fn extend<I: IntoIterator<Item = C>>(&mut self, cases: I) {
        for case in cases {
            self.add(case);
        }
    }
}

impl<'a, C: Case> IntoIterator for &'a RowHolder<C> {
    type Item = &'a Row<C>;
    type IntoIter = std::slice::Iter<'a, Row<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
