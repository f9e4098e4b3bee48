pub mod args;
pub mod case;
pub mod config;
pub mod convert;
pub mod expected;
pub mod file;
pub mod holder;
pub mod naming;
pub mod param;
pub mod row;
pub mod source;
pub mod strategy;

pub use args::{ArgList, MAX_ARITY};
pub use case::{Case, CaseError, NormalCase, ReturnsCase, TestCase, ThrowsCase};
pub use config::{Config, ConfigError};
pub use expected::{Description, ExitMode, Expected, Returns, Throws};
pub use file::{
    discover_case_files, load_case_file, CaseEntry, CaseFile, CaseShape, FileCase, LoadError,
};
pub use holder::{HolderError, RowHolder};
pub use naming::{display_name, Naming};
pub use param::{Argument, Param};
pub use row::{Metadata, MetadataUpdate, Row, RowError};
pub use source::{CaseSource, DynamicSource};
pub use strategy::{ArgsMode, ConversionStrategy, ExpectedPolicy, StrategyError};
