use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

pub const LOAN_LIMIT_REASON: &str = "loan_limit";
pub const DUPLICATE_LOAN_REASON: &str = "duplicate_loan";

#[derive(Debug, Clone, PartialEq)]
pub enum LibraryError {
    // The book is not stocked at the branch or its quantity is exhausted. The patron
    // has been subscribed for a notification, so the caller can retry once it arrives.
    NotAvailable {
        message: String,
    },
    IneligiblePatron {
        message: String,
        reason_code: Option<String>,
    },
    InvalidToken {
        message: String,
    },
    TransferInfeasible {
        message: String,
    },
    NotTracked {
        message: String,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn not_available(message: &str) -> LibraryError {
        LibraryError::NotAvailable { message: message.to_string() }
    }

    pub fn ineligible_patron(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::IneligiblePatron { message: message.to_string(), reason_code }
    }

    pub fn invalid_token(message: &str) -> LibraryError {
        LibraryError::InvalidToken { message: message.to_string() }
    }

    pub fn transfer_infeasible(message: &str) -> LibraryError {
        LibraryError::TransferInfeasible { message: message.to_string() }
    }

    pub fn not_tracked(message: &str) -> LibraryError {
        LibraryError::NotTracked { message: message.to_string() }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::NotAvailable { .. } => { true }
            LibraryError::IneligiblePatron { .. } => { false }
            LibraryError::InvalidToken { .. } => { false }
            LibraryError::TransferInfeasible { .. } => { false }
            LibraryError::NotTracked { .. } => { false }
            LibraryError::DuplicateKey { .. } => { false }
            LibraryError::NotFound { .. } => { false }
            LibraryError::Validation { .. } => { false }
            LibraryError::Serialization { .. } => { false }
            LibraryError::Runtime { .. } => { false }
        }
    }

    pub fn reason_code(&self) -> Option<&str> {
        match self {
            LibraryError::IneligiblePatron { reason_code, .. } |
            LibraryError::Validation { reason_code, .. } |
            LibraryError::Runtime { reason_code, .. } => { reason_code.as_deref() }
            _ => { None }
        }
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::NotAvailable { message } => {
                write!(f, "{}", message)
            }
            LibraryError::IneligiblePatron { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::InvalidToken { message } => {
                write!(f, "{}", message)
            }
            LibraryError::TransferInfeasible { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotTracked { message } => {
                write!(f, "{}", message)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for branch operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum CheckoutStatus {
    CheckedOut,
    Returned,
}

impl From<String> for CheckoutStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "CheckedOut" => CheckoutStatus::CheckedOut,
            "Returned" => CheckoutStatus::Returned,
            _ => CheckoutStatus::CheckedOut,
        }
    }
}

impl Display for CheckoutStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            CheckoutStatus::CheckedOut => write!(f, "CheckedOut"),
            CheckoutStatus::Returned => write!(f, "Returned"),
        }
    }
}

// SearchField names the book attribute a search term matched against
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum SearchField {
    Title,
    Author,
    Isbn,
}

impl From<String> for SearchField {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Author" => SearchField::Author,
            "Isbn" => SearchField::Isbn,
            _ => SearchField::Title,
        }
    }
}

impl Display for SearchField {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            SearchField::Title => write!(f, "Title"),
            SearchField::Author => write!(f, "Author"),
            SearchField::Isbn => write!(f, "Isbn"),
        }
    }
}
