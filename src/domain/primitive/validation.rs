/// Message shown when a validator rejects a value without explaining why.
pub const GENERIC_INVALID_MESSAGE: &str = "Invalid answer.";

/// Outcome of validating a raw prompt value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    /// Rejected with the generic message.
    Invalid,
    /// Rejected with a specific message.
    Rejected(String),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    /// The error line to display, or `None` when valid.
    pub fn error_message(self) -> Option<String> {
        match self {
            Validation::Valid => None,
            Validation::Invalid => Some(GENERIC_INVALID_MESSAGE.to_string()),
            Validation::Rejected(message) => Some(message),
        }
    }
}

impl From<bool> for Validation {
    fn from(ok: bool) -> Self {
        if ok { Validation::Valid } else { Validation::Invalid }
    }
}

impl From<String> for Validation {
    fn from(message: String) -> Self {
        Validation::Rejected(message)
    }
}

impl From<&str> for Validation {
    fn from(message: &str) -> Self {
        Validation::Rejected(message.to_string())
    }
}

impl From<Result<(), String>> for Validation {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Validation::Valid,
            Err(message) => Validation::Rejected(message),
        }
    }
}
