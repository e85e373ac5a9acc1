use std::fmt;

/// Dashboard error types.
///
/// None of these are fatal: every controller path returns the view to an
/// interactive state before the error is handed back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Form input rejected before any network call.
    Validation(String),
    /// Non-success response (or transport failure) on a user-initiated request.
    /// The message is shown to the user as-is.
    Request(String),
    /// Failure while fetching verification status during polling.
    Poll(String),
    /// Failure while clearing server-side verification history.
    Reset(String),
}

impl AppError {
    /// Message meant for the alert box, without the variant prefix.
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Validation(msg)
            | AppError::Request(msg)
            | AppError::Poll(msg)
            | AppError::Reset(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Request(msg) => write!(f, "Request error: {}", msg),
            AppError::Poll(msg) => write!(f, "Poll error: {}", msg),
            AppError::Reset(msg) => write!(f, "Reset error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    /// Converts a `reqwest::Error` into an `AppError`.
    fn from(err: reqwest::Error) -> Self {
        AppError::Request(format!("Erro de conexão: {}", err))
    }
}
