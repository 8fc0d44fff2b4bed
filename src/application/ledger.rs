use crate::domain::{
    self, Account, AccountId, AccountUpdate, Cents, IntegrityReport, NewAccount, Transaction,
    UserId,
};
use crate::storage::Repository;

use super::LedgerError;

/// The ledger: accounts plus the append-only transaction log. Owns its
/// state, loaded from the repository at construction. Every successful
/// mutation persists accounts and transactions in one snapshot commit, so
/// a balance change and its transaction record always land together.
pub struct LedgerService {
    repo: Repository,
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
}

impl LedgerService {
    /// Load accounts and transactions from the repository.
    pub fn open(repo: Repository) -> Result<Self, LedgerError> {
        let accounts = repo.load_accounts()?;
        let transactions = repo.load_transactions()?;
        Ok(Self {
            repo,
            accounts,
            transactions,
        })
    }

    fn persist(&mut self) -> Result<(), LedgerError> {
        self.repo.save_ledger(&self.accounts, &self.transactions)?;
        Ok(())
    }

    fn index_of(&self, id: AccountId) -> Result<usize, LedgerError> {
        self.accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| LedgerError::AccountNotFound(id.to_string()))
    }

    // ========================
    // Account operations
    // ========================

    /// Open a new account with zero balance.
    pub fn create_account(&mut self, details: NewAccount) -> Result<Account, LedgerError> {
        let account = Account::open(details);
        self.accounts.push(account.clone());
        if let Err(err) = self.persist() {
            self.accounts.pop();
            return Err(err);
        }
        Ok(account)
    }

    /// Apply a partial update to an account's holder details. Only the
    /// enumerated non-financial fields are reachable through this path;
    /// balance moves only through deposit/withdraw/transfer.
    ///
    /// Returns `Ok(None)` silently when the id is unknown.
    pub fn update_account(
        &mut self,
        id: AccountId,
        update: AccountUpdate,
    ) -> Result<Option<Account>, LedgerError> {
        let Some(index) = self.accounts.iter().position(|a| a.id == id) else {
            return Ok(None);
        };
        let previous = self.accounts[index].clone();
        update.apply(&mut self.accounts[index]);
        let updated = self.accounts[index].clone();
        if let Err(err) = self.persist() {
            self.accounts[index] = previous;
            return Err(err);
        }
        Ok(Some(updated))
    }

    /// Close an account. Its transaction history is retained; history
    /// records are append-only and survive their account.
    pub fn delete_account(&mut self, id: AccountId) -> Result<bool, LedgerError> {
        let Some(index) = self.accounts.iter().position(|a| a.id == id) else {
            return Ok(false);
        };
        let removed = self.accounts.remove(index);
        if let Err(err) = self.persist() {
            self.accounts.insert(index, removed);
            return Err(err);
        }
        Ok(true)
    }

    // ========================
    // Balance operations
    // ========================

    /// Deposit into an account.
    pub fn deposit(
        &mut self,
        account_id: AccountId,
        amount: Cents,
        description: Option<String>,
    ) -> Result<Transaction, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let index = self.index_of(account_id)?;

        // Checked so a balance can never wrap negative
        let previous = self.accounts[index].balance;
        let new_balance = previous
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount)?;

        self.accounts[index].balance = new_balance;
        let tx = Transaction::deposit(
            account_id,
            amount,
            description.unwrap_or_else(|| "Deposit".to_string()),
        );
        self.transactions.push(tx.clone());
        if let Err(err) = self.persist() {
            // Keep in-memory state in step with the snapshot
            self.accounts[index].balance = previous;
            self.transactions.pop();
            return Err(err);
        }
        Ok(tx)
    }

    /// Withdraw from an account. The balance never goes negative.
    pub fn withdraw(
        &mut self,
        account_id: AccountId,
        amount: Cents,
        description: Option<String>,
    ) -> Result<Transaction, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let index = self.index_of(account_id)?;

        let balance = self.accounts[index].balance;
        if balance < amount {
            return Err(LedgerError::InsufficientFunds {
                balance,
                required: amount,
            });
        }

        self.accounts[index].balance = balance - amount;
        let tx = Transaction::withdrawal(
            account_id,
            amount,
            description.unwrap_or_else(|| "Withdrawal".to_string()),
        );
        self.transactions.push(tx.clone());
        if let Err(err) = self.persist() {
            self.accounts[index].balance = balance;
            self.transactions.pop();
            return Err(err);
        }
        Ok(tx)
    }

    /// Move money between two accounts. Both balance changes and the single
    /// transfer record land in the same snapshot commit.
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Cents,
        description: Option<String>,
    ) -> Result<Transaction, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }
        if from == to {
            return Err(LedgerError::SameAccount);
        }
        let from_index = self.index_of(from)?;
        let to_index = self.index_of(to)?;

        let from_balance = self.accounts[from_index].balance;
        if from_balance < amount {
            return Err(LedgerError::InsufficientFunds {
                balance: from_balance,
                required: amount,
            });
        }
        // Checked before either side mutates, so a destination overflow
        // leaves both balances untouched
        let to_balance = self.accounts[to_index].balance;
        let new_to_balance = to_balance
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount)?;

        self.accounts[from_index].balance = from_balance - amount;
        self.accounts[to_index].balance = new_to_balance;
        let tx = Transaction::transfer(
            from,
            to,
            amount,
            description.unwrap_or_else(|| "Transfer".to_string()),
        );
        self.transactions.push(tx.clone());
        if let Err(err) = self.persist() {
            self.accounts[from_index].balance = from_balance;
            self.accounts[to_index].balance = to_balance;
            self.transactions.pop();
            return Err(err);
        }
        Ok(tx)
    }

    // ========================
    // Queries
    // ========================

    pub fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn accounts_for_owner(&self, owner_id: UserId) -> Vec<&Account> {
        domain::accounts_for_owner(owner_id, &self.accounts)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions touching an account, as source or transfer destination.
    pub fn transactions_for_account(&self, account_id: AccountId) -> Vec<&Transaction> {
        domain::transactions_for_account(account_id, &self.transactions)
    }

    /// Sweep the ledger for invariant violations and dangling history.
    pub fn check_integrity(&self) -> IntegrityReport {
        domain::check_integrity(&self.accounts, &self.transactions)
    }
}
