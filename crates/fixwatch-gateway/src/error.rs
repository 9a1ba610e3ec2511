use std::fmt;

/// Result type for gateway operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur when talking to the gateway
#[derive(Debug)]
pub enum Error {
    /// The start request could not be issued or was rejected.
    /// Carries the message shown to the operator.
    Start(String),
    /// A read request failed at the transport level
    Transport(reqwest::Error),
    /// A read request returned a non-success HTTP status
    Status { status: u16, path: String },
    /// A response body did not match the wire schema
    Decode(reqwest::Error),
    /// The configured base URL is not usable
    BaseUrl(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Start(msg) => write!(f, "Failed to start agent: {}", msg),
            Error::Transport(err) => write!(f, "Request failed: {}", err),
            Error::Status { status, path } => {
                write!(f, "Gateway returned HTTP {} for {}", status, path)
            }
            Error::Decode(err) => write!(f, "Unexpected response body: {}", err),
            Error::BaseUrl(msg) => write!(f, "Invalid gateway URL: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Transport(err) | Error::Decode(err) => Some(err),
            Error::Start(_) | Error::Status { .. } | Error::BaseUrl(_) => None,
        }
    }
}
