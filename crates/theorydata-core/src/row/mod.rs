mod metadata;

pub use metadata::{Metadata, MetadataUpdate, RowError};

use std::sync::Arc;

use crate::case::Case;
use crate::convert;
use crate::naming::Naming;
use crate::param::Param;
use crate::strategy::ConversionStrategy;

/// A test case converted into the unit a test host consumes: an argument
/// list, an optional display name and metadata.
///
/// Rows are values. Changing the strategy or the method name produces a new
/// row that copies the metadata and recomputes params and display name.
#[derive(Debug, Clone)]
pub struct Row<C: Case> {
    case: Arc<C>,
    case_name: String,
    strategy: ConversionStrategy,
    params: Vec<Param>,
    naming: Naming,
    metadata: Metadata,
}

impl<C: Case> Row<C> {
    /// Converts `case` under `strategy`. The row starts unnamed.
    pub fn new(case: C, strategy: ConversionStrategy) -> Self {
        let case_name = convert::case_name(&case);
        let params = convert::to_params(&case, strategy);
        Self {
            case: Arc::new(case),
            case_name,
            strategy,
            params,
            naming: Naming::Unnamed,
            metadata: Metadata::default(),
        }
    }

    /// Converts `case` and names it after `method_name` in one step.
    pub fn named_new(case: C, strategy: ConversionStrategy, method_name: Option<&str>) -> Self {
        let row = Self::new(case, strategy);
        let naming = row.naming.bind(method_name, &row.case_name);
        Self { naming, ..row }
    }

    /// Produces the row as seen under `strategy` and `method_name`.
    ///
    /// Metadata is copied verbatim. Params are recomputed only when the
    /// strategy changes; the display name is rebuilt from the stored case
    /// name. With the same strategy and no new name the row is returned
    /// unchanged.
    pub fn reconverted(&self, strategy: ConversionStrategy, method_name: Option<&str>) -> Self {
        let naming = self.naming.bind(method_name, &self.case_name);
        if strategy == self.strategy && naming == self.naming {
            return self.clone();
        }

        let params = if strategy == self.strategy {
            self.params.clone()
        } else {
            convert::to_params(self.case.as_ref(), strategy)
        };

        Self {
            case: Arc::clone(&self.case),
            case_name: self.case_name.clone(),
            strategy,
            params,
            naming,
            metadata: self.metadata.clone(),
        }
    }

    /// Binds a method name, keeping the strategy.
    pub fn named(&self, method_name: &str) -> Self {
        self.reconverted(self.strategy, Some(method_name))
    }

    /// Switches strategy, keeping the naming state.
    pub fn with_strategy(&self, strategy: ConversionStrategy) -> Self {
        self.reconverted(strategy, None)
    }

    pub fn with_skip(&self, skip: Option<&str>) -> Self {
        self.with_metadata(|m| m.skip = skip.map(str::to_string))
    }

    pub fn with_explicit(&self, explicit: Option<bool>) -> Self {
        self.with_metadata(|m| m.explicit = explicit)
    }

    pub fn with_timeout(&self, timeout_ms: Option<u32>) -> Self {
        self.with_metadata(|m| m.timeout_ms = timeout_ms)
    }

    /// Adds a trait value. Adding the same pair twice is a no-op.
    pub fn with_trait(&self, name: &str, value: &str) -> Result<Self, RowError> {
        let mut metadata = self.metadata.clone();
        metadata.add_trait(name, value)?;
        Ok(Self {
            metadata,
            ..self.clone()
        })
    }

    fn with_metadata(&self, edit: impl FnOnce(&mut Metadata)) -> Self {
        let mut row = self.clone();
        edit(&mut row.metadata);
        row
    }

    pub(crate) fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    /// The argument list for the test method.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn display_name(&self) -> Option<&str> {
        self.naming.display_name()
    }

    pub fn case_name(&self) -> &str {
        &self.case_name
    }

    pub fn case(&self) -> &C {
        &self.case
    }

    pub fn strategy(&self) -> ConversionStrategy {
        self.strategy
    }

    pub fn naming(&self) -> &Naming {
        &self.naming
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}
