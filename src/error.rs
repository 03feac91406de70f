use thiserror::Error;

/// Rejected session entry parameters. Raised before any session state exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required parameter `{field}`")]
    Missing { field: &'static str },

    #[error("parameter `{field}` must be a whole number, got {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("parameter `{field}` must be at least {min}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
    },

    #[error("invalid color {value:?}, expected #RRGGBB")]
    InvalidColor { value: String },

    #[error("invalid breathing pattern {value:?}, expected INHALE-HOLD-EXHALE such as 4-7-8")]
    InvalidPattern { value: String },
}

/// Failure of a best-effort feedback side effect. Never reaches the session.
#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("feedback device unavailable: {0}")]
    Io(#[from] std::io::Error),

    #[error("feedback sink is poisoned")]
    Poisoned,
}

/// Problem with data compiled into the binary.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("embedded file {0} not found")]
    Missing(String),

    #[error("embedded file {name} is not valid: {source}")]
    Invalid {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}
