//! Configuration and constants.

/// File the dashboard reads when no path is given.
pub const DEFAULT_DATA_FILE: &str = "merged_feature_engineered.csv";

/// Environment variable that overrides [`DEFAULT_DATA_FILE`].
pub const DATA_PATH_ENV: &str = "WORKFORCE_DATA";

/// Number of rows shown in the "top N" tables.
pub const DEFAULT_TOP_N: usize = 5;

// Source column names for the two categorical columns.
// Numeric column names live on `NumericField`.
pub const STATE_COLUMN: &str = "indiastates";
pub const INDUSTRY_COLUMN: &str = "industry_group";
