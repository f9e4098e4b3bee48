//! Default values for theorydata configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

use crate::strategy::{ArgsMode, ExpectedPolicy};

// ============================================================================
// Conversion Defaults
// ============================================================================

/// Cases are passed to test methods as a single object unless configured.
pub const DEFAULT_ARGS_MODE: ArgsMode = ArgsMode::WholeObject;

/// The expected value leads flattened rows of returning and throwing cases.
pub const DEFAULT_EXPECTED_POLICY: ExpectedPolicy = ExpectedPolicy::ByExitMode;

// ============================================================================
// Case File Defaults
// ============================================================================

/// Case file extensions picked up when scanning a directory.
pub const DEFAULT_CASE_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

// ============================================================================
// Logging Defaults
// ============================================================================

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

// ============================================================================
// Locations
// ============================================================================

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = "theorydata.toml";

/// Directory under the user config dir.
pub const USER_CONFIG_DIR: &str = "theorydata";

/// File name inside [`USER_CONFIG_DIR`].
pub const USER_CONFIG_FILE: &str = "config.toml";

// ============================================================================
// Environment Variables
// ============================================================================

pub const ENV_ARGS_MODE: &str = "THEORYDATA_ARGS_MODE";
pub const ENV_EXPECTED_POLICY: &str = "THEORYDATA_EXPECTED";
pub const ENV_METHOD_NAME: &str = "THEORYDATA_METHOD_NAME";
pub const ENV_LOG_FILTER: &str = "THEORYDATA_LOG";
