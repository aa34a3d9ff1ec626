//! Error types for Unbrowser API calls.
//!
//! Every failure surfaces as a variant of [`Error`]. Variants that originate
//! from the service carry the server's error code, and [`Error::is_retryable`]
//! encodes which of them the client retries on its own.

use http::StatusCode;

/// Service error codes that are never retried, even when the attempt budget
/// has room left.
pub const NON_RETRYABLE_CODES: &[&str] = &["INVALID_REQUEST", "INVALID_URL", "FORBIDDEN"];

/// The main error type for Unbrowser API calls.
///
/// # Examples
///
/// ```no_run
/// use unbrowser::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new("ub_live_xxxxx")?;
///
/// match client.browse("https://example.com", None, None).await {
///     Ok(result) => println!("{}", result.title),
///     Err(Error::RateLimited { retry_after, .. }) => {
///         eprintln!("rate limited, retry after {:?}s", retry_after);
///     }
///     Err(Error::Api { code, message }) => eprintln!("[{}] {}", code, message),
///     Err(e) => eprintln!("other error: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The API key was rejected (HTTP 401).
    #[error("[UNAUTHORIZED] {message}")]
    Authentication {
        /// Human readable reason.
        message: String,
    },

    /// The account exceeded its request quota (HTTP 429).
    ///
    /// `retry_after` is the number of seconds from the `Retry-After` header,
    /// when the server sent one.
    #[error("[RATE_LIMITED] {message}")]
    RateLimited {
        /// Human readable reason.
        message: String,
        /// Seconds to wait before trying again.
        retry_after: Option<u64>,
    },

    /// A request was rejected locally before anything was sent.
    #[error("[INVALID_REQUEST] {0}")]
    Validation(String),

    /// The service answered with an error envelope.
    #[error("[{code}] {message}")]
    Api {
        /// Server supplied error code, e.g. `INVALID_URL`.
        code: String,
        /// Server supplied message.
        message: String,
    },

    /// The request timed out, the connection could not be established, or
    /// the connection was dropped before a full response arrived.
    #[error("[TIMEOUT] {message}")]
    Timeout {
        /// Description of the underlying transport failure.
        message: String,
    },

    /// The response body could not be mapped onto the expected type.
    ///
    /// The raw body and the serde message are kept so that schema drift can
    /// be diagnosed from logs.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
    },

    /// Invalid client configuration, such as a bad header value.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The base URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A failure that retrying cannot fix: an unbuildable request, a redirect
    /// loop or an undecodable body.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
}

impl Error {
    /// Returns the error code the way the service spells it.
    ///
    /// ```
    /// use unbrowser::Error;
    ///
    /// let err = Error::Api {
    ///     code: "INVALID_URL".to_string(),
    ///     message: "Invalid URL".to_string(),
    /// };
    /// assert_eq!(err.code(), "INVALID_URL");
    /// assert_eq!(Error::Validation("empty".into()).code(), "INVALID_REQUEST");
    /// ```
    pub fn code(&self) -> &str {
        match self {
            Error::Authentication { .. } => "UNAUTHORIZED",
            Error::RateLimited { .. } => "RATE_LIMITED",
            Error::Validation(_) => "INVALID_REQUEST",
            Error::Api { code, .. } => code,
            Error::Timeout { .. } => "TIMEOUT",
            Error::DeserializationFailed { .. } => "PARSE_ERROR",
            Error::Configuration(_) | Error::InvalidUrl(_) => "CONFIGURATION_ERROR",
            Error::Network(_) => "NETWORK_ERROR",
        }
    }

    /// Returns `true` if the client retries this error while attempts remain.
    ///
    /// Timeouts, connection failures and service errors outside
    /// [`NON_RETRYABLE_CODES`] are retryable. Authentication, rate limiting,
    /// local validation and parse failures are terminal.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::Api { code, .. } => !NON_RETRYABLE_CODES.contains(&code.as_str()),
            Error::Authentication { .. }
            | Error::RateLimited { .. }
            | Error::Validation(_)
            | Error::DeserializationFailed { .. }
            | Error::Configuration(_)
            | Error::InvalidUrl(_)
            | Error::Network(_) => false,
        }
    }

    /// Returns the `Retry-After` hint of a rate-limit failure.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Error::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Returns the HTTP status code if this error kept one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::DeserializationFailed { status, .. } => Some(*status),
            Error::Authentication { .. } => Some(StatusCode::UNAUTHORIZED),
            Error::RateLimited { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            _ => None,
        }
    }

    /// Returns the raw response body of a parse failure.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    pub(crate) fn api(code: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Api {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() || err.is_redirect() || err.is_decode() {
            Error::Network(err)
        } else {
            Error::Timeout {
                message: transport_message(&err),
            }
        }
    }
}

/// Renders a transport error with its source chain, e.g. the underlying
/// `connection closed before message completed`.
fn transport_message(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    message
}

/// A specialized `Result` type for Unbrowser API calls.
pub type Result<T> = std::result::Result<T, Error>;
