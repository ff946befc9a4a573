use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Request superseded by a newer one")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    pub fn backend<S: Into<String>>(msg: S) -> Self {
        Self::Backend(msg.into())
    }

    pub fn invalid_state<S: Into<String>>(msg: S) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// True for failures caused by talking to the outside world, as opposed
    /// to input the user can correct.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Backend(_))
    }

    pub fn is_pii_safe(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Io(_) | Self::Json(_) => false,
            Self::Validation(_)
            | Self::Backend(_)
            | Self::InvalidState(_)
            | Self::Cancelled
            | Self::Config(_) => true,
        }
    }

    pub fn to_safe_string(&self) -> String {
        if self.is_pii_safe() {
            self.to_string()
        } else {
            match self {
                Self::Transport(_) => "Network request failed".to_string(),
                Self::Io(_) => "File operation failed".to_string(),
                Self::Json(_) => "Could not read data".to_string(),
                _ => self.to_string(),
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
