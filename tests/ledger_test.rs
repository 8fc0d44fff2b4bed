mod common;

use anyhow::Result;
use common::{any_holder_details, holder_details, open_ledger, test_snapshot};
use finbank::application::LedgerError;
use finbank::domain::{AccountType, AccountUpdate, TransactionKind, total_balance};
use uuid::Uuid;

#[test]
fn test_balances_stay_non_negative_through_operation_sequence() -> Result<()> {
    let (_dir, path) = test_snapshot()?;
    let mut ledger = open_ledger(&path)?;

    let a = ledger.create_account(any_holder_details())?;
    let b = ledger.create_account(any_holder_details())?;

    ledger.deposit(a.id, 10000, None)?;
    ledger.withdraw(a.id, 2500, None)?;
    ledger.transfer(a.id, b.id, 7000, None)?;
    ledger.withdraw(b.id, 7000, None)?;
    ledger.deposit(b.id, 1, None)?;

    for account in ledger.accounts() {
        assert!(account.balance >= 0, "balance went negative");
    }
    assert!(ledger.check_integrity().is_clean());

    Ok(())
}

#[test]
fn test_deposit_withdraw_symmetry() -> Result<()> {
    let (_dir, path) = test_snapshot()?;
    let mut ledger = open_ledger(&path)?;
    let account = ledger.create_account(any_holder_details())?;

    ledger.deposit(account.id, 5000, None)?;
    let before = ledger.account(account.id).unwrap().balance;
    let history_before = ledger.transactions().len();

    ledger.deposit(account.id, 1234, None)?;
    ledger.withdraw(account.id, 1234, None)?;

    assert_eq!(ledger.account(account.id).unwrap().balance, before);
    assert_eq!(ledger.transactions().len(), history_before + 2);

    Ok(())
}

#[test]
fn test_transfer_conserves_money_and_appends_one_record() -> Result<()> {
    let (_dir, path) = test_snapshot()?;
    let mut ledger = open_ledger(&path)?;

    let a = ledger.create_account(any_holder_details())?;
    let b = ledger.create_account(any_holder_details())?;
    ledger.deposit(a.id, 10000, None)?;

    let total_before = total_balance(ledger.accounts());
    ledger.transfer(a.id, b.id, 3000, Some("Rent".into()))?;

    assert_eq!(ledger.account(a.id).unwrap().balance, 7000);
    assert_eq!(ledger.account(b.id).unwrap().balance, 3000);
    assert_eq!(total_balance(ledger.accounts()), total_before);

    let transfers: Vec<_> = ledger
        .transactions()
        .iter()
        .filter(|t| t.kind == TransactionKind::Transfer)
        .collect();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].account_id, a.id);
    assert_eq!(transfers[0].target_account_id, Some(b.id));
    assert_eq!(transfers[0].description, "Rent");

    Ok(())
}

#[test]
fn test_invalid_amounts_produce_no_state_change() -> Result<()> {
    let (_dir, path) = test_snapshot()?;
    let mut ledger = open_ledger(&path)?;
    let account = ledger.create_account(any_holder_details())?;

    for amount in [0, -500] {
        assert!(matches!(
            ledger.deposit(account.id, amount, None),
            Err(LedgerError::InvalidAmount)
        ));
        assert!(matches!(
            ledger.withdraw(account.id, amount, None),
            Err(LedgerError::InvalidAmount)
        ));
    }

    assert_eq!(ledger.account(account.id).unwrap().balance, 0);
    assert!(ledger.transactions().is_empty());

    Ok(())
}

#[test]
fn test_overdraw_fails_and_leaves_history_unchanged() -> Result<()> {
    let (_dir, path) = test_snapshot()?;
    let mut ledger = open_ledger(&path)?;
    let account = ledger.create_account(any_holder_details())?;
    ledger.deposit(account.id, 1000, None)?;

    let err = ledger.withdraw(account.id, 5000, None).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::InsufficientFunds {
            balance: 1000,
            required: 5000
        }
    ));
    assert_eq!(ledger.account(account.id).unwrap().balance, 1000);
    assert_eq!(ledger.transactions().len(), 1);

    Ok(())
}

#[test]
fn test_transfer_validation_order() -> Result<()> {
    let (_dir, path) = test_snapshot()?;
    let mut ledger = open_ledger(&path)?;
    let account = ledger.create_account(any_holder_details())?;

    // Amount is checked before anything else
    assert!(matches!(
        ledger.transfer(account.id, account.id, 0, None),
        Err(LedgerError::InvalidAmount)
    ));
    // Same-account is checked before existence
    let ghost = Uuid::new_v4();
    assert!(matches!(
        ledger.transfer(ghost, ghost, 100, None),
        Err(LedgerError::SameAccount)
    ));
    assert!(matches!(
        ledger.transfer(account.id, ghost, 100, None),
        Err(LedgerError::AccountNotFound(_))
    ));

    Ok(())
}

#[test]
fn test_update_is_restricted_to_holder_details() -> Result<()> {
    let (_dir, path) = test_snapshot()?;
    let mut ledger = open_ledger(&path)?;
    let account = ledger.create_account(any_holder_details())?;
    ledger.deposit(account.id, 4200, None)?;

    let updated = ledger
        .update_account(
            account.id,
            AccountUpdate {
                full_name: Some("Augusta Ada King".into()),
                account_type: Some(AccountType::Checking),
                ..Default::default()
            },
        )?
        .expect("account exists");

    assert_eq!(updated.full_name, "Augusta Ada King");
    assert_eq!(updated.account_type, AccountType::Checking);
    // Financial fields are untouched by the update path
    assert_eq!(updated.balance, 4200);
    assert_eq!(updated.id, account.id);
    assert_eq!(updated.created_at, account.created_at);

    Ok(())
}

#[test]
fn test_closing_account_retains_transactions() -> Result<()> {
    let (_dir, path) = test_snapshot()?;
    let mut ledger = open_ledger(&path)?;

    let a = ledger.create_account(any_holder_details())?;
    let b = ledger.create_account(any_holder_details())?;
    ledger.deposit(a.id, 5000, None)?;
    ledger.transfer(a.id, b.id, 2000, None)?;

    assert!(ledger.delete_account(a.id)?);

    // History still shows both records from b's side and the orphan count
    assert_eq!(ledger.transactions().len(), 2);
    assert_eq!(ledger.transactions_for_account(b.id).len(), 1);
    let report = ledger.check_integrity();
    assert!(report.is_clean());
    assert_eq!(report.orphaned_transactions, 2);

    Ok(())
}

#[test]
fn test_owner_and_account_queries() -> Result<()> {
    let (_dir, path) = test_snapshot()?;
    let mut ledger = open_ledger(&path)?;

    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let a1 = ledger.create_account(holder_details(alice))?;
    let a2 = ledger.create_account(holder_details(alice))?;
    let b1 = ledger.create_account(holder_details(bob))?;

    assert_eq!(ledger.accounts_for_owner(alice).len(), 2);
    assert_eq!(ledger.accounts_for_owner(bob).len(), 1);

    ledger.deposit(a1.id, 1000, None)?;
    ledger.transfer(a1.id, b1.id, 500, None)?;

    assert_eq!(ledger.transactions_for_account(a1.id).len(), 2);
    assert_eq!(ledger.transactions_for_account(b1.id).len(), 1);
    assert_eq!(ledger.transactions_for_account(a2.id).len(), 0);

    Ok(())
}
