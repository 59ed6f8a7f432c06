use thiserror::Error;

/// The engine's single error kind. Every syntactic violation the compiler can
/// detect maps to this variant with a reason describing the first offending
/// construct.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("invalid pattern: {reason}")]
    InvalidPattern { reason: String },
}

impl CompileError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        CompileError::InvalidPattern {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            CompileError::InvalidPattern { reason } => reason,
        }
    }
}
