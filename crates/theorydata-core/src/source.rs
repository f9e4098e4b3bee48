//! Case providers and the type-erased accumulating data source.

use std::any::{self, Any};
use std::borrow::Cow;
use std::fmt;

use tracing::debug;

use crate::args::ArgList;
use crate::case::{Case, TestCase};
use crate::holder::{HolderError, RowHolder};
use crate::param::Argument;
use crate::row::Row;
use crate::strategy::{ArgsMode, ExpectedPolicy};

/// Supplies test cases to a [`RowHolder`].
///
/// Discovery of where cases live (files, fixtures, generated tables) is up
/// to the implementor; the holder only consumes the sequence.
pub trait CaseSource {
    type Case: Case;

    fn cases(&self) -> Box<dyn Iterator<Item = Self::Case> + '_>;
}

impl<C: Case> CaseSource for Vec<C> {
    type Case = C;

    fn cases(&self) -> Box<dyn Iterator<Item = C> + '_> {
        Box::new(self.iter().cloned())
    }
}

impl<C: Case> CaseSource for [C] {
    type Case = C;

    fn cases(&self) -> Box<dyn Iterator<Item = C> + '_> {
        Box::new(self.iter().cloned())
    }
}

trait ErasedHolder: Send + Sync {
    fn case_type(&self) -> &'static str;
    fn len(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C: Case> ErasedHolder for RowHolder<C> {
    fn case_type(&self) -> &'static str {
        RowHolder::case_type(self)
    }

    fn len(&self) -> usize {
        RowHolder::len(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Accumulates cases whose concrete type is fixed by the first case added.
///
/// Adding a case of any other type fails with
/// [`HolderError::TypeMismatch`] and leaves the collected rows untouched.
pub struct DynamicSource {
    mode: ArgsMode,
    policy: ExpectedPolicy,
    holder: Option<Box<dyn ErasedHolder>>,
}

impl DynamicSource {
    pub fn new(mode: ArgsMode) -> Self {
        Self::with_policy(mode, ExpectedPolicy::default())
    }

    pub fn with_policy(mode: ArgsMode, policy: ExpectedPolicy) -> Self {
        Self {
            mode,
            policy,
            holder: None,
        }
    }

    /// Default mode for new holders and for row requests without a mode.
    pub fn mode(&self) -> ArgsMode {
        self.mode
    }

    /// Runs `action` with the default mode temporarily replaced by `mode`.
    pub fn with_mode<R>(&mut self, mode: Option<ArgsMode>, action: impl FnOnce(&mut Self) -> R) -> R {
        let Some(mode) = mode else {
            return action(self);
        };
        let previous = std::mem::replace(&mut self.mode, mode);
        let result = action(self);
        self.mode = previous;
        result
    }

    /// Adds a case. The first case fixes the accepted case type.
    ///
    /// Returns `Ok(false)` for a duplicate case name.
    pub fn add<C: Case>(&mut self, case: C) -> Result<bool, HolderError> {
        let Some(erased) = self.holder.as_mut() else {
            let mut holder = RowHolder::<C>::with_policy(self.mode, self.policy);
            let added = holder.add(case);
            debug!(case_type = holder.case_type(), mode = %self.mode, "data source initialized");
            self.holder = Some(Box::new(holder));
            return Ok(added);
        };

        let expected = erased.case_type();
        match erased.as_any_mut().downcast_mut::<RowHolder<C>>() {
            Some(holder) => Ok(holder.add(case)),
            None => Err(HolderError::type_mismatch(expected, any::type_name::<C>())),
        }
    }

    /// Builds a normally completing case and adds it.
    pub fn add_normal<A: ArgList>(
        &mut self,
        definition: &str,
        expected: &str,
        args: A,
    ) -> Result<bool, HolderError> {
        let case = TestCase::normal(definition, expected, args)?;
        self.add(case)
    }

    /// Builds a case expected to return `value` and adds it.
    pub fn add_returns<T, A>(&mut self, definition: &str, value: T, args: A) -> Result<bool, HolderError>
    where
        T: Argument + Clone + fmt::Display,
        A: ArgList,
    {
        let case = TestCase::returns(definition, value, args)?;
        self.add(case)
    }

    /// Builds a case expected to fail with `error` and adds it.
    pub fn add_throws<E, A>(&mut self, definition: &str, error: E, args: A) -> Result<bool, HolderError>
    where
        E: std::error::Error + Send + Sync + 'static,
        A: ArgList,
    {
        let case = TestCase::throws(definition, error, args)?;
        self.add(case)
    }

    /// Rows of the collected `C` cases under `method_name` and `mode`.
    ///
    /// `Ok(None)` means nothing was added yet. The stored rows are borrowed
    /// when nothing differs from the holder's defaults.
    pub fn rows<C: Case>(
        &self,
        method_name: Option<&str>,
        mode: Option<ArgsMode>,
    ) -> Result<Option<Cow<'_, [Row<C>]>>, HolderError> {
        let Some(holder) = self.holder::<C>()? else {
            return Ok(None);
        };
        let mode = mode.unwrap_or(self.mode);
        Ok(Some(holder.rows(Some(mode), method_name)))
    }

    /// The typed holder, if one was started.
    pub fn holder<C: Case>(&self) -> Result<Option<&RowHolder<C>>, HolderError> {
        let Some(erased) = self.holder.as_deref() else {
            return Ok(None);
        };
        erased
            .as_any()
            .downcast_ref::<RowHolder<C>>()
            .map(Some)
            .ok_or_else(|| HolderError::type_mismatch(erased.case_type(), any::type_name::<C>()))
    }

    pub fn holder_mut<C: Case>(&mut self) -> Result<Option<&mut RowHolder<C>>, HolderError> {
        let Some(erased) = self.holder.as_deref_mut() else {
            return Ok(None);
        };
        let expected = erased.case_type();
        erased
            .as_any_mut()
            .downcast_mut::<RowHolder<C>>()
            .map(Some)
            .ok_or_else(|| HolderError::type_mismatch(expected, any::type_name::<C>()))
    }

    /// Type name of the accepted cases, once fixed.
    pub fn case_type(&self) -> Option<&'static str> {
        self.holder.as_ref().map(|holder| holder.case_type())
    }

    pub fn len(&self) -> usize {
        self.holder.as_ref().map_or(0, |holder| holder.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops all rows and the type binding.
    pub fn reset(&mut self) {
        self.holder = None;
    }
}

impl fmt::Debug for DynamicSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicSource")
            .field("mode", &self.mode)
            .field("policy", &self.policy)
            .field("case_type", &self.case_type())
            .field("len", &self.len())
            .finish()
    }
}
