use std::io;
use thiserror::Error;

/// Unified error type for the salescall tool
#[derive(Error, Debug)]
pub enum SalesCallError {
    /// Bad or missing command-line arguments
    #[error("{0}")]
    Usage(String),

    /// Configuration file unreadable or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// A handler was invoked without one of its required arguments
    #[error("Missing parameter: {0}")]
    MissingArgument(String),

    /// IO-related errors
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Transport or API failure talking to the chat completion endpoint
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// The call succeeded but generation stopped for a reason other than "stop"
    #[error("Encountered unexpected finish reason from OpenAI API: {0}")]
    UnexpectedFinishReason(String),

    /// The call succeeded but the first choice carried no content
    #[error("Missing content from OpenAI API response")]
    EmptyContent,
}

impl From<reqwest::Error> for SalesCallError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SalesCallError::Gateway(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            SalesCallError::Gateway(format!("Connection failed: {}", err))
        } else if err.is_status() {
            SalesCallError::Gateway(format!("API returned error status: {}", err))
        } else if err.is_decode() {
            SalesCallError::Gateway(format!("Malformed response body: {}", err))
        } else {
            SalesCallError::Gateway(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for SalesCallError {
    fn from(err: serde_json::Error) -> Self {
        SalesCallError::Gateway(format!("JSON error: {}", err))
    }
}
