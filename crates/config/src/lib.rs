mod settings;

pub use settings::{DEFAULT_ATTRIBUTE_KEY, DEFAULT_RETENTION_DAYS, Settings};
