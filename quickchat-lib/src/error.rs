use thiserror::Error;

use crate::Category;

/// Account registration failures. The display strings are the exact feedback
/// shown to the user, who decides whether to retry. Recipient and message
/// length problems are reported through [`crate::check_recipient_cell`] and
/// [`crate::LengthCheck`] instead; they are sentinels, not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Username is not correctly formatted.\nIt must contain an underscore (_) and be no more than five characters long.")]
    BadUsername,

    #[error("Password is not correctly formatted.\nIt must be at least eight characters long and include:\n- A capital letter\n- A number\n- A special character")]
    BadPassword,

    #[error("Cell phone number is not correctly formatted.\nIt must start with +27 and be followed by exactly 9 digits.")]
    BadCellphone,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The target category is full. The ledger rejects the new entry rather
    /// than evicting an old one; nothing is mutated.
    #[error("{category} storage full ({capacity} messages)")]
    CapacityExceeded { category: Category, capacity: usize },

    /// No sent message matched the given id or hash.
    #[error("Hash not found.")]
    NotFound,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to access message store: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}
