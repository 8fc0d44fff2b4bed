use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AccountId, Cents};

pub type TransactionId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Transfer,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
            TransactionKind::Transfer => "transfer",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A ledger entry. The log is append-only: transactions are never mutated
/// or deleted, even when their account is closed.
///
/// A transfer is a single record carrying both sides: `account_id` is the
/// source and `target_account_id` the destination. Deposits and withdrawals
/// leave `target_account_id` unset and it is omitted from the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    pub account_id: AccountId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Amount in cents (always positive)
    pub amount: Cents,
    pub date: DateTime<Utc>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_account_id: Option<AccountId>,
}

impl Transaction {
    fn new(
        account_id: AccountId,
        kind: TransactionKind,
        amount: Cents,
        description: impl Into<String>,
    ) -> Self {
        assert!(amount > 0, "transaction amount must be positive");
        Self {
            id: Uuid::new_v4(),
            account_id,
            kind,
            amount,
            date: Utc::now(),
            description: description.into(),
            target_account_id: None,
        }
    }

    pub fn deposit(account_id: AccountId, amount: Cents, description: impl Into<String>) -> Self {
        Self::new(account_id, TransactionKind::Deposit, amount, description)
    }

    pub fn withdrawal(
        account_id: AccountId,
        amount: Cents,
        description: impl Into<String>,
    ) -> Self {
        Self::new(account_id, TransactionKind::Withdrawal, amount, description)
    }

    pub fn transfer(
        from: AccountId,
        to: AccountId,
        amount: Cents,
        description: impl Into<String>,
    ) -> Self {
        let mut tx = Self::new(from, TransactionKind::Transfer, amount, description);
        tx.target_account_id = Some(to);
        tx
    }

    /// Returns true if this transaction touches the given account, either
    /// as its owner or as the destination of a transfer.
    pub fn involves(&self, account_id: AccountId) -> bool {
        self.account_id == account_id || self.target_account_id == Some(account_id)
    }
}
