// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use anyhow::Result;
use finbank::application::{IdentityService, LedgerService};
use finbank::domain::{AccountType, NewAccount, UserId};
use finbank::storage::Repository;
use tempfile::TempDir;
use uuid::Uuid;

/// Temp directory plus the snapshot path inside it. Services opened on the
/// same path share state through the file, like separate runs of the tool.
pub fn test_snapshot() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("finbank.json");
    Ok((dir, path))
}

pub fn open_identity(path: &Path) -> Result<IdentityService> {
    Ok(IdentityService::open(Repository::open(path))?)
}

pub fn open_ledger(path: &Path) -> Result<LedgerService> {
    Ok(LedgerService::open(Repository::open(path))?)
}

/// Standard account holder details for tests.
pub fn holder_details(owner_id: UserId) -> NewAccount {
    NewAccount {
        owner_id,
        full_name: "Ada Lovelace".into(),
        date_of_birth: "1815-12-10".into(),
        address: "12 St James's Square, London".into(),
        contact_number: "+44 20 0000 0000".into(),
        email: "ada@example.com".into(),
        account_type: AccountType::Savings,
    }
}

/// Holder details with an arbitrary owner, for tests that don't care.
pub fn any_holder_details() -> NewAccount {
    holder_details(Uuid::new_v4())
}
