use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("web storage rejected the write: {0}")]
    Web(String),
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response body was null")]
    NullBody,
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Transport(err.to_string())
    }
}

pub type ChatResult<T> = Result<T, ChatError>;

#[derive(Debug, Error)]
#[error("invalid value for {key}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub reason: String,
}
