use std::fmt;
use thiserror::Error;

/// Machine-readable error codes surfaced by the odds client.
///
/// The code is what callers branch on (the query layer skips retries for
/// [`ErrorCode::SportDisabled`], for example); the message is for humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ApiKeyRequired,
    ApiKeyInvalid,
    ApiRateLimit,
    ResourceNotFound,
    ApiConnectionError,
    SportDisabled,
    InitializationError,
}

impl ErrorCode {
    /// Stable upper-case identifier, suitable for logs and scripts
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ApiKeyRequired => "API_KEY_REQUIRED",
            ErrorCode::ApiKeyInvalid => "API_KEY_INVALID",
            ErrorCode::ApiRateLimit => "API_RATE_LIMIT",
            ErrorCode::ResourceNotFound => "RESOURCE_NOT_FOUND",
            ErrorCode::ApiConnectionError => "API_CONNECTION_ERROR",
            ErrorCode::SportDisabled => "SPORT_DISABLED",
            ErrorCode::InitializationError => "INITIALIZATION_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by the odds client and the configuration resolver.
///
/// Every variant maps to exactly one [`ErrorCode`]; use [`OddsApiError::code`]
/// instead of matching on variants when only the category matters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OddsApiError {
    #[error("An API key is required before odds can be fetched")]
    ApiKeyRequired,

    #[error("The API key was rejected by the odds provider (401)")]
    ApiKeyInvalid,

    #[error("Odds provider rate limit exceeded (429): {url}")]
    ApiRateLimit { url: String },

    #[error("Requested resource not found (404): {url}")]
    ResourceNotFound { url: String },

    #[error("Could not reach the odds provider: {message}")]
    ApiConnectionError { message: String },

    #[error("Sport is disabled in the configuration: {sport}")]
    SportDisabled { sport: String },

    #[error("Odds client initialization failed: {message}")]
    InitializationError { message: String },
}

impl OddsApiError {
    /// Create a rate limit error for the given URL
    pub fn rate_limit(url: impl Into<String>) -> Self {
        Self::ApiRateLimit { url: url.into() }
    }

    /// Create a not found error for the given URL
    pub fn not_found(url: impl Into<String>) -> Self {
        Self::ResourceNotFound { url: url.into() }
    }

    /// Create a connection error (transport failures, unexpected statuses, bad bodies)
    pub fn connection(message: impl Into<String>) -> Self {
        Self::ApiConnectionError {
            message: message.into(),
        }
    }

    /// Create a sport disabled error
    pub fn sport_disabled(sport: impl Into<String>) -> Self {
        Self::SportDisabled {
            sport: sport.into(),
        }
    }

    /// Create an initialization error
    pub fn initialization(message: impl Into<String>) -> Self {
        Self::InitializationError {
            message: message.into(),
        }
    }

    /// The machine-readable code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            OddsApiError::ApiKeyRequired => ErrorCode::ApiKeyRequired,
            OddsApiError::ApiKeyInvalid => ErrorCode::ApiKeyInvalid,
            OddsApiError::ApiRateLimit { .. } => ErrorCode::ApiRateLimit,
            OddsApiError::ResourceNotFound { .. } => ErrorCode::ResourceNotFound,
            OddsApiError::ApiConnectionError { .. } => ErrorCode::ApiConnectionError,
            OddsApiError::SportDisabled { .. } => ErrorCode::SportDisabled,
            OddsApiError::InitializationError { .. } => ErrorCode::InitializationError,
        }
    }

    /// Business-rule errors are the caller's fault and never worth retrying
    pub fn is_business_rule(&self) -> bool {
        matches!(self, OddsApiError::SportDisabled { .. })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Odds(#[from] OddsApiError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// The odds error code, if this error came from the odds client
    pub fn odds_code(&self) -> Option<ErrorCode> {
        match self {
            AppError::Odds(e) => Some(e.code()),
            _ => None,
        }
    }
}
