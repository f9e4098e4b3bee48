use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when editing row metadata.
#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("Trait name must not be empty")]
    EmptyTraitName,

    #[error("Value of trait '{0}' must not be empty")]
    EmptyTraitValue(String),
}

/// Per-row annotations interpreted by the test host.
///
/// Metadata survives every strategy change and renaming of its row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Skip reason; `None` runs the test.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit: Option<bool>,

    /// Timeout in milliseconds. Passed through, never enforced here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u32>,

    /// Trait name to the set of its values.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub traits: BTreeMap<String, BTreeSet<String>>,
}

impl Metadata {
    /// Adds a trait value. Returns `false` if it was already present.
    pub fn add_trait(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<bool, RowError> {
        let name = name.into();
        let value = value.into();
        if name.is_empty() {
            return Err(RowError::EmptyTraitName);
        }
        if value.is_empty() {
            return Err(RowError::EmptyTraitValue(name));
        }
        Ok(self.traits.entry(name).or_default().insert(value))
    }

    /// Checks whether `name` carries `value`.
    pub fn has_trait(&self, name: &str, value: &str) -> bool {
        self.traits
            .get(name)
            .is_some_and(|values| values.contains(value))
    }

    /// The edits that reproduce this metadata on a fresh row.
    pub fn into_updates(self) -> Vec<MetadataUpdate> {
        let mut updates = Vec::new();
        if self.skip.is_some() {
            updates.push(MetadataUpdate::Skip(self.skip));
        }
        if self.explicit.is_some() {
            updates.push(MetadataUpdate::Explicit(self.explicit));
        }
        if self.timeout_ms.is_some() {
            updates.push(MetadataUpdate::Timeout(self.timeout_ms));
        }
        for (name, values) in self.traits {
            for value in values {
                updates.push(MetadataUpdate::Trait {
                    name: name.clone(),
                    value,
                });
            }
        }
        updates
    }

    pub fn is_empty(&self) -> bool {
        self.skip.is_none()
            && self.explicit.is_none()
            && self.timeout_ms.is_none()
            && self.traits.is_empty()
    }
}

/// A single metadata edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataUpdate {
    Skip(Option<String>),
    Explicit(Option<bool>),
    Timeout(Option<u32>),
    Trait { name: String, value: String },
}

impl MetadataUpdate {
    pub fn add_trait(name: impl Into<String>, value: impl Into<String>) -> Self {
        MetadataUpdate::Trait {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Applies the edit. On error `metadata` is left unchanged.
    pub fn apply(self, metadata: &mut Metadata) -> Result<(), RowError> {
        match self {
            MetadataUpdate::Skip(skip) => metadata.skip = skip,
            MetadataUpdate::Explicit(explicit) => metadata.explicit = explicit,
            MetadataUpdate::Timeout(timeout) => metadata.timeout_ms = timeout,
            MetadataUpdate::Trait { name, value } => {
                metadata.add_trait(name, value)?;
            }
        }
        Ok(())
    }
}
