//! Errors raised while parsing and running ex commands.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExError {
    /// No registry entry matches the typed name.
    UnknownCommand { token: String },
    /// A required argument was empty.
    MalformedArgument { command: &'static str },
    /// The handler ran and reported failure.
    HandlerFailure { message: String },
    /// Input does not map to any completion source.
    NoCompletionContext,
    /// Input does not map to any history list.
    NoHistoryContext,
}

impl ExError {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::HandlerFailure {
            message: message.into(),
        }
    }

    /// Whether the error is worth showing to the user.
    ///
    /// Missing completion or history context just means there is nothing to do.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, Self::NoCompletionContext | Self::NoHistoryContext)
    }
}

impl fmt::Display for ExError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand { token } => write!(f, "Unknown command: {token}"),
            Self::MalformedArgument { command } => write!(f, "Missing argument for :{command}"),
            Self::HandlerFailure { message } => f.write_str(message),
            Self::NoCompletionContext => f.write_str("No completion available"),
            Self::NoHistoryContext => f.write_str("No history available"),
        }
    }
}

impl std::error::Error for ExError {}
