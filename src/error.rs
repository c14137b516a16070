use thiserror::Error;

/// A fault raised by a downstream handler.
///
/// The message text of a fault is its `Display` output.
pub type Fault = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, ProblemError>;

#[derive(Debug, Error)]
pub enum ProblemError {
    #[error("Failed to serialize problem details: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidConfig { key: String, message: String },
}

impl ProblemError {
    pub fn invalid_config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Outcome of a request that did not produce a response.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The downstream fault was not intercepted. The boxed fault is the
    /// exact value raised downstream.
    #[error("{0}")]
    Unhandled(Fault),

    /// The fault was intercepted but its problem details could not be encoded.
    #[error("Failed to serialize problem details: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProcessError {
    /// Collapse into the boxed error type used by tower services.
    ///
    /// `Unhandled` yields the original fault untouched.
    pub fn into_fault(self) -> Fault {
        match self {
            ProcessError::Unhandled(fault) => fault,
            ProcessError::Serialization(err) => Box::new(ProblemError::Serialization(err)),
        }
    }

    pub fn is_unhandled(&self) -> bool {
        matches!(self, ProcessError::Unhandled(_))
    }
}
