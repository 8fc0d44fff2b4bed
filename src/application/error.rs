use thiserror::Error;

use crate::domain::Cents;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Amount must be positive")]
    InvalidAmount,

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Insufficient funds: balance {balance}, required {required}")]
    InsufficientFunds { balance: Cents, required: Cents },

    #[error("Cannot transfer to the same account")]
    SameAccount,

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
