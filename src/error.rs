use std::fmt;

#[derive(Debug)]
pub enum DocAskError {
    /// Non-success HTTP status on conversation creation, ask or history.
    Transport { status: u16, reason: String },
    /// HTTP success but the decoded envelope reported failure. The raw
    /// envelope is kept for diagnostics.
    Api { envelope: serde_json::Value },
    Config(String),
    Network(reqwest::Error),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    Other(String),
}

impl fmt::Display for DocAskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocAskError::Transport { status, reason } => {
                write!(f, "HTTP error (status {}): {}", status, reason)
            }
            DocAskError::Api { envelope } => write!(f, "API request failed: {}", envelope),
            DocAskError::Config(msg) => write!(f, "Configuration error: {}", msg),
            DocAskError::Network(e) => write!(f, "Network error: {}", e),
            DocAskError::IoError(e) => write!(f, "IO error: {}", e),
            DocAskError::JsonError(e) => write!(f, "JSON error: {}", e),
            DocAskError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for DocAskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocAskError::Network(e) => Some(e),
            DocAskError::IoError(e) => Some(e),
            DocAskError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DocAskError {
    fn from(err: reqwest::Error) -> Self {
        DocAskError::Network(err)
    }
}

impl From<std::io::Error> for DocAskError {
    fn from(err: std::io::Error) -> Self {
        DocAskError::IoError(err)
    }
}

impl From<serde_json::Error> for DocAskError {
    fn from(err: serde_json::Error) -> Self {
        DocAskError::JsonError(err)
    }
}

impl From<String> for DocAskError {
    fn from(msg: String) -> Self {
        DocAskError::Other(msg)
    }
}

impl From<&str> for DocAskError {
    fn from(msg: &str) -> Self {
        DocAskError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DocAskError>;
