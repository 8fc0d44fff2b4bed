use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Cents, UserId};

pub type AccountId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Savings,
    Checking,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Savings => "savings",
            AccountType::Checking => "checking",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "savings" => Some(AccountType::Savings),
            "checking" => Some(AccountType::Checking),
            _ => None,
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bank account. Balance is in cents and never goes negative; it is only
/// mutated through the ledger's deposit/withdraw/transfer operations.
///
/// Serialized field names match the persisted snapshot format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub owner_id: UserId,
    pub full_name: String,
    pub date_of_birth: String,
    pub address: String,
    pub contact_number: String,
    pub email: String,
    pub account_type: AccountType,
    pub balance: Cents,
    pub created_at: DateTime<Utc>,
}

/// Holder details supplied when opening an account. Id, balance and
/// creation time are assigned by the ledger.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub owner_id: UserId,
    pub full_name: String,
    pub date_of_birth: String,
    pub address: String,
    pub contact_number: String,
    pub email: String,
    pub account_type: AccountType,
}

impl Account {
    /// Open a new account with zero balance.
    pub fn open(details: NewAccount) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: details.owner_id,
            full_name: details.full_name,
            date_of_birth: details.date_of_birth,
            address: details.address,
            contact_number: details.contact_number,
            email: details.email,
            account_type: details.account_type,
            balance: 0,
            created_at: Utc::now(),
        }
    }
}

/// Partial update of an account's holder details. Deliberately enumerates
/// the editable fields only: balance, id and creation time cannot be set
/// through an update.
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub full_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub account_type: Option<AccountType>,
}

impl AccountUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.date_of_birth.is_none()
            && self.address.is_none()
            && self.contact_number.is_none()
            && self.email.is_none()
            && self.account_type.is_none()
    }

    /// Apply the supplied fields to an account, leaving the rest untouched.
    pub fn apply(self, account: &mut Account) {
        if let Some(full_name) = self.full_name {
            account.full_name = full_name;
        }
        if let Some(date_of_birth) = self.date_of_birth {
            account.date_of_birth = date_of_birth;
        }
        if let Some(address) = self.address {
            account.address = address;
        }
        if let Some(contact_number) = self.contact_number {
            account.contact_number = contact_number;
        }
        if let Some(email) = self.email {
            account.email = email;
        }
        if let Some(account_type) = self.account_type {
            account.account_type = account_type;
        }
    }
}
