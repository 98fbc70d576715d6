use thiserror::Error;

#[derive(Error, Debug)]
pub enum SightError {
    #[error("{field} out of range: {reason}")]
    ConfigurationOutOfRange { field: &'static str, reason: String },

    #[error("Config IO error: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SightError {
    pub(crate) fn out_of_range(field: &'static str, reason: impl Into<String>) -> Self {
        SightError::ConfigurationOutOfRange {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SightError>;
