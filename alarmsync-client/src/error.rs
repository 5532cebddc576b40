#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,

    #[error("Network unreachable: {0}")]
    Network(String),

    #[error("Unexpected HTTP status {status}")]
    Status { status: u16, body: String },

    #[error("Malformed payload: {0}")]
    Decode(String),
}

impl TransportError {
    /// HTTP status of a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            TransportError::Status {
                status: status.as_u16(),
                body: String::new(),
            }
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Decode(err.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No session token stored")]
    NoTokenStored,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Device identifier is missing")]
    MissingDeviceIdentifier,

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Backend rejected request with status {status:?}")]
    BackendRejected { status: String },

    #[error("Alarm command was not acknowledged: {0}")]
    CommandFailed(#[source] Box<Error>),

    #[error("Session was replaced by a newer login or logout")]
    SessionSuperseded,

    #[error("Request cancelled")]
    Cancelled,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
