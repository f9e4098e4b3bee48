use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::case::Case;
use crate::expected::ExitMode;
use crate::holder::{HolderError, RowHolder};
use crate::row::Metadata;
use crate::strategy::{ArgsMode, ExpectedPolicy};

use super::case::FileCase;
use super::error::LoadError;

/// One case as written in a case file.
///
/// ```yaml
/// - definition: adds two numbers
///   exit_mode: returns
///   expected: 3
///   args: [1, 2]
///   skip: flaky on CI
///   traits:
///     category: [math]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseEntry {
    pub definition: String,

    #[serde(default)]
    pub exit_mode: ExitMode,

    #[serde(default)]
    pub expected: Value,

    #[serde(default)]
    pub args: Vec<Value>,

    #[serde(flatten)]
    pub metadata: Metadata,
}

/// Contents of a case file: an optional test method name and the cases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    #[serde(default)]
    pub cases: Vec<CaseEntry>,
}

impl CaseFile {
    /// Validates every entry into a [`FileCase`].
    ///
    /// The first entry fixes the shape of the file; an entry with another
    /// exit mode or arity fails with [`HolderError::TypeMismatch`].
    pub fn to_cases(&self) -> Result<Vec<FileCase>, LoadError> {
        let cases = self
            .cases
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                FileCase::new(
                    entry.definition.clone(),
                    entry.exit_mode,
                    entry.expected.clone(),
                    entry.args.clone(),
                )
                .map_err(|source| LoadError::Case {
                    index,
                    definition: entry.definition.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(first) = cases.first() {
            let shape = first.shape();
            if let Some(other) = cases.iter().find(|case| case.shape() != shape) {
                let mismatch = HolderError::type_mismatch(shape.to_string(), other.shape().to_string());
                return Err(mismatch.into());
            }
        }

        Ok(cases)
    }

    /// Builds a holder from the file, applying each entry's metadata and the
    /// file's method name.
    ///
    /// Every entry is validated before the first row is added. Metadata of an
    /// entry dropped as a duplicate is ignored.
    pub fn into_holder(
        self,
        mode: ArgsMode,
        policy: ExpectedPolicy,
    ) -> Result<RowHolder<FileCase>, LoadError> {
        let cases = self.to_cases()?;
        let mut holder = RowHolder::with_policy(mode, policy);

        for (case, entry) in cases.into_iter().zip(self.cases) {
            let case_name = case.case_name();
            if !holder.add(case) {
                continue;
            }
            for update in entry.metadata.into_updates() {
                holder.set_metadata(&case_name, update)?;
            }
        }

        Ok(match self.method.as_deref() {
            Some(method) => holder.converted(mode, Some(method)),
            None => holder,
        })
    }
}

/// Reads a case file. The format follows the extension: `.json`, `.yaml`
/// or `.yml`.
pub fn load_case_file(path: impl AsRef<Path>) -> Result<CaseFile, LoadError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let content = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
    let file: CaseFile = match extension.as_deref() {
        Some("json") => serde_json::from_str(&content)?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        _ => return Err(LoadError::UnsupportedFormat(path.to_path_buf())),
    };

    debug!(path = %path.display(), cases = file.cases.len(), "case file loaded");
    Ok(file)
}

/// Finds case files under `root`, honouring ignore files.
///
/// A `root` that is itself a file is returned as is. Results are sorted.
pub fn discover_case_files(
    root: impl AsRef<Path>,
    extensions: &[String],
) -> Result<Vec<PathBuf>, LoadError> {
    let root = root.as_ref();
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    if !root.exists() {
        return Err(LoadError::io(
            root,
            std::io::Error::new(std::io::ErrorKind::NotFound, "path does not exist"),
        ));
    }

    let walker = WalkBuilder::new(root).hidden(true).git_ignore(true).build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| LoadError::Walk {
            path: root.to_path_buf(),
            message: e.to_string(),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)));
        if matches {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}
