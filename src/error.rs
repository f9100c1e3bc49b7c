use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures reported by the exchange for a single request.
///
/// `NoSession` and `Throttled` come from the response header and are handled
/// specially by the retry layer. Everything else is an `Operation` failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("no active session")]
    NoSession,

    #[error("request throttle exceeded")]
    Throttled,

    #[error("{operation} error. Error code: {status}; API code: {api_code}")]
    Operation {
        operation: &'static str,
        status: String,
        api_code: String,
    },

    #[error("{operation} transport failure: {reason}")]
    Transport {
        operation: &'static str,
        reason: String,
    },
}

/// Errors raised while decoding compressed market prices.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("runner segment {segment} has {found} detail fields, expected {expected}")]
    FieldCount {
        segment: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid {field} value '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid bet side '{0}'")]
    InvalidSide(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("{operation} exceeded {attempts} attempts")]
    ExceededRetries {
        operation: String,
        attempts: u32,
        #[source]
        last_error: Option<Box<Error>>,
    },

    #[error("winners string [{payload}] is incorrectly formatted")]
    MalformedFeed { payload: String },

    #[error("problem fetching results from URL {url}: {reason}")]
    FeedUnavailable { url: String, reason: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when every retry attempt was used up.
    #[must_use]
    pub const fn is_exceeded_retries(&self) -> bool {
        matches!(self, Self::ExceededRetries { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
