use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYYMMDD, YYYY-MM-DD, today or yesterday)")]
    InvalidDate { input: String },

    #[error("Invalid time \"{input}\" (expected HH:MM)")]
    InvalidTime { input: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("No restaurant given. Pass --restaurant or set `restaurant` in the config file.")]
    MissingRestaurant,

    #[error("Failed to read orders from {path}: {source}")]
    Fetch {
        path: String,
        source: std::io::Error,
    },

    #[error("{0}")]
    Jq(#[from] JqError),
}

/// Why a raw order record was excluded at the ingestion boundary
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum RecordError {
    #[error("record is not an object")]
    NotAnObject,

    #[error("missing or invalid order id")]
    MissingId,

    #[error("missing items array")]
    MissingItems,

    #[error("unknown status {0:?}")]
    UnknownStatus(String),

    #[error("missing or invalid creation timestamp")]
    InvalidTimestamp,

    #[error("invalid JSON: {0}")]
    Json(String),
}

#[derive(Debug, Error)]
pub(crate) enum JqError {
    #[error("jq not found. Please install jq to use --jq option.")]
    NotFound,

    #[error("Failed to run jq: {0}")]
    Spawn(std::io::Error),

    #[error("Failed to write to jq stdin: {0}")]
    Stdin(std::io::Error),

    #[error("Failed to wait for jq: {0}")]
    Wait(std::io::Error),

    #[error("Invalid UTF-8 from jq: {0}")]
    Utf8(std::string::FromUtf8Error),

    #[error("jq error: {0}")]
    Filter(String),
}
