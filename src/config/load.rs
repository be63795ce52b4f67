use crate::config::types::{
    DEFAULT_LOGGING_LEVEL, DEFAULT_OUTPUT_DATE_FORMAT, DispatchConfig, RawConfig,
};
use anyhow::{Context, Result, bail};
use log::warn;
use std::fs;
use std::path::Path;

impl RawConfig {
    /// Reads and parses the JSON configuration file. Defaulting happens in
    /// [`RawConfig::resolve`], after logging has been initialized.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse configuration file {}", path.display()))
    }

    /// Logging level for logger initialization, before the rest of the
    /// configuration has been resolved.
    #[must_use]
    pub fn logging_level(&self) -> &str {
        self.logging_level.as_deref().unwrap_or(DEFAULT_LOGGING_LEVEL)
    }

    /// Applies defaults and validates. An empty rule list is a configuration
    /// error; a missing or non-positive thread count falls back to the number
    /// of CPUs.
    pub fn resolve(self) -> Result<DispatchConfig> {
        if self.date_fields.is_empty() {
            bail!("no date fields specified in the configuration file");
        }

        let thread_count = match self.thread_count {
            Some(n) if n > 0 => n as usize,
            _ => {
                let cpus = num_cpus::get();
                warn!("no thread count specified (or non-positive), falling back to {cpus}");
                cpus
            }
        };

        let output_date_format = self.output_date_format.unwrap_or_else(|| {
            warn!("no output date format specified, using default ({DEFAULT_OUTPUT_DATE_FORMAT})");
            DEFAULT_OUTPUT_DATE_FORMAT.to_string()
        });

        Ok(DispatchConfig {
            thread_count,
            date_fields: self.date_fields,
            output_date_format,
            exiftool_path: self.exiftool_path,
        })
    }
}
