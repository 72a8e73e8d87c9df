#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("Invalid range for {property}: {value:?} (expected \"min-max\")")]
    InvalidRange { property: String, value: String },

    #[error("Invalid ISD-AS in UnwantedASes: {0}")]
    InvalidIsdAs(String),

    #[error("No configuration file found (tried {0})")]
    NotFound(String),
}
