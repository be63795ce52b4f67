pub mod load;
pub mod types;

pub use types::{
    DEFAULT_LOGGING_LEVEL, DEFAULT_OUTPUT_DATE_FORMAT, DateFieldRule, DispatchConfig, RawConfig,
};
