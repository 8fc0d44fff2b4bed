use std::collections::HashSet;

use super::{Account, AccountId, Cents, Transaction, TransactionKind, UserId};

/// Accounts belonging to a given owner, in insertion order.
pub fn accounts_for_owner(owner_id: UserId, accounts: &[Account]) -> Vec<&Account> {
    accounts.iter().filter(|a| a.owner_id == owner_id).collect()
}

/// Transactions touching a given account, as source or transfer destination,
/// in ledger order.
pub fn transactions_for_account(
    account_id: AccountId,
    transactions: &[Transaction],
) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| t.involves(account_id))
        .collect()
}

/// Sum of all account balances.
pub fn total_balance(accounts: &[Account]) -> Cents {
    accounts.iter().map(|a| a.balance).sum()
}

/// Result of an integrity sweep over the ledger state.
#[derive(Debug, Default)]
pub struct IntegrityReport {
    pub issues: Vec<String>,
    /// Transactions whose account references no longer resolve. Expected
    /// after an account is closed; reported separately from hard issues.
    pub orphaned_transactions: usize,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Verify the ledger invariants: non-negative balances, positive transaction
/// amounts, and transfer records carrying a destination.
pub fn check_integrity(accounts: &[Account], transactions: &[Transaction]) -> IntegrityReport {
    let mut report = IntegrityReport::default();
    let known: HashSet<AccountId> = accounts.iter().map(|a| a.id).collect();

    for account in accounts {
        if account.balance < 0 {
            report.issues.push(format!(
                "account {} has negative balance {}",
                account.id, account.balance
            ));
        }
    }

    for tx in transactions {
        if tx.amount <= 0 {
            report
                .issues
                .push(format!("transaction {} has non-positive amount", tx.id));
        }
        match tx.kind {
            TransactionKind::Transfer => {
                if tx.target_account_id.is_none() {
                    report
                        .issues
                        .push(format!("transfer {} is missing a destination", tx.id));
                }
            }
            _ => {
                if tx.target_account_id.is_some() {
                    report.issues.push(format!(
                        "{} transaction {} carries a destination",
                        tx.kind, tx.id
                    ));
                }
            }
        }

        let dangling_source = !known.contains(&tx.account_id);
        let dangling_target = tx
            .target_account_id
            .is_some_and(|target| !known.contains(&target));
        if dangling_source || dangling_target {
            report.orphaned_transactions += 1;
        }
    }

    report
}
