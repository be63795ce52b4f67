use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_LOGGING_LEVEL: &str = "info";
pub const DEFAULT_OUTPUT_DATE_FORMAT: &str = "%Y_%m";

/// One (metadata field, chrono pattern) pair.
///
/// Rules are evaluated in configured order and the first field present in the
/// extracted metadata wins, regardless of whether a later rule could also
/// match.
#[derive(Debug, Clone, Deserialize)]
pub struct DateFieldRule {
    pub field: String,
    pub pattern: String,
}

/// On-disk configuration, before defaulting. Field names match the JSON keys
/// of the configuration file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
    #[serde(default)]
    pub logging_level: Option<String>,
    #[serde(default)]
    pub thread_count: Option<i64>,
    #[serde(default)]
    pub date_fields: Vec<DateFieldRule>,
    #[serde(default)]
    pub output_date_format: Option<String>,
    #[serde(default)]
    pub exiftool_path: Option<PathBuf>,
}

/// Resolved configuration, read-only after construction and shared by
/// reference across all classifier workers.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    pub thread_count: usize,
    pub date_fields: Vec<DateFieldRule>,
    pub output_date_format: String,
    pub exiftool_path: Option<PathBuf>,
}
