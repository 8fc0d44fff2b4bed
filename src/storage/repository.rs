use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::domain::{Account, Transaction, User};

use super::{JsonFileStore, MemoryStore, SnapshotStore};

/// Snapshot keys. The fb_ prefix is part of the snapshot format; existing
/// snapshots load unchanged.
pub const USERS_KEY: &str = "fb_users";
pub const SESSION_KEY: &str = "fb_session";
pub const ACCOUNTS_KEY: &str = "fb_accounts";
pub const TRANSACTIONS_KEY: &str = "fb_transactions";

/// Typed access to the four snapshot blobs. Owns the backing store; the
/// services never touch keys or raw JSON directly.
pub struct Repository {
    store: Box<dyn SnapshotStore>,
}

impl Repository {
    pub fn new(store: Box<dyn SnapshotStore>) -> Self {
        Self { store }
    }

    /// Open (or create on first write) a file-backed snapshot.
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::new(Box::new(JsonFileStore::open(path)))
    }

    /// Fresh in-memory repository, nothing persisted.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    fn load_vec<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.store.read(key)? {
            Some(value) => serde_json::from_value(value)
                .with_context(|| format!("corrupt snapshot blob '{key}'")),
            None => Ok(Vec::new()),
        }
    }

    pub fn load_users(&self) -> Result<Vec<User>> {
        self.load_vec(USERS_KEY)
    }

    pub fn save_users(&mut self, users: &[User]) -> Result<()> {
        let blob = serde_json::to_value(users)?;
        self.store.write_batch(vec![(USERS_KEY, Some(blob))])
    }

    pub fn load_session(&self) -> Result<Option<User>> {
        match self.store.read(SESSION_KEY)? {
            Some(Value::Null) | None => Ok(None),
            Some(value) => Ok(Some(
                serde_json::from_value(value).context("corrupt snapshot blob 'fb_session'")?,
            )),
        }
    }

    /// Persist the session; `None` removes the blob entirely.
    pub fn save_session(&mut self, session: Option<&User>) -> Result<()> {
        let entry = match session {
            Some(user) => Some(serde_json::to_value(user)?),
            None => None,
        };
        self.store.write_batch(vec![(SESSION_KEY, entry)])
    }

    pub fn load_accounts(&self) -> Result<Vec<Account>> {
        self.load_vec(ACCOUNTS_KEY)
    }

    pub fn load_transactions(&self) -> Result<Vec<Transaction>> {
        self.load_vec(TRANSACTIONS_KEY)
    }

    /// Persist accounts and transactions in a single commit, so a balance
    /// change and its transaction record can never be split across
    /// snapshots.
    pub fn save_ledger(
        &mut self,
        accounts: &[Account],
        transactions: &[Transaction],
    ) -> Result<()> {
        self.store.write_batch(vec![
            (ACCOUNTS_KEY, Some(serde_json::to_value(accounts)?)),
            (TRANSACTIONS_KEY, Some(serde_json::to_value(transactions)?)),
        ])
    }
}
