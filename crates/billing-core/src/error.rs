//! Billing Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Reasons a string is not a card number
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardNumberError {
    /// No digits at all
    #[error("card number is empty")]
    Empty,

    /// Anything outside ASCII '0'..='9', separators included
    #[error("invalid character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },
}

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Card number failed input validation (not the checksum)
    #[error("Invalid card number: {0}")]
    InvalidCard(#[from] CardNumberError),

    /// Registration payload rejected
    #[error("Invalid payment: {0}")]
    InvalidPayment(String),

    /// Session id could not be parsed
    #[error("Invalid session id: {0}")]
    InvalidSessionId(String),

    /// No pending payment for this session (unknown or expired)
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PaymentError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Get user-friendly message
    pub const fn user_message(&self) -> &str {
        match self {
            Self::InvalidCard(_) => "Card number must contain digits only.",
            Self::InvalidPayment(_) => "The payment details are invalid.",
            Self::InvalidSessionId(_) => "The payment session link is malformed.",
            Self::SessionNotFound(_) => "This payment session does not exist or has expired.",
            Self::Config(_) => "Service configuration error.",
            Self::Storage(_) => "An error occurred processing your request.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_error_converts() {
        let err: PaymentError = CardNumberError::Empty.into();
        assert!(matches!(err, PaymentError::InvalidCard(CardNumberError::Empty)));
        assert_eq!(err.to_string(), "Invalid card number: card number is empty");
    }

    #[test]
    fn test_only_storage_is_retryable() {
        assert!(PaymentError::Storage("down".into()).is_retryable());
        assert!(!PaymentError::SessionNotFound("abc".into()).is_retryable());
        assert!(!PaymentError::InvalidCard(CardNumberError::Empty).is_retryable());
    }
}
