mod case;
mod error;
mod loader;

pub use case::{CaseShape, FileCase};
pub use error::LoadError;
pub use loader::{discover_case_files, load_case_file, CaseEntry, CaseFile};
