use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::application::{IdentityService, LedgerService};
use crate::domain::{AccountId, AccountType, AccountUpdate, NewAccount, format_cents, parse_cents};
use crate::storage::Repository;

/// Finbank - demo banking ledger
#[derive(Parser)]
#[command(name = "finbank")]
#[command(about = "A local-first demo banking ledger")]
#[command(version)]
pub struct Cli {
    /// Snapshot file path
    #[arg(short, long, default_value = "finbank.json")]
    pub data: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a new user
    Register {
        username: String,

        /// Full name of the user
        #[arg(long)]
        full_name: String,

        /// Password (demo tool: passed on the command line)
        #[arg(long)]
        password: String,
    },

    /// Log in and persist the session
    Login {
        username: String,

        #[arg(long)]
        password: String,
    },

    /// Clear the current session
    Logout,

    /// Show the currently logged-in user
    Whoami,

    /// Account management commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Deposit into an account
    Deposit {
        /// Account ID
        account: String,

        /// Amount (e.g., "50.00" or "50")
        amount: String,

        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Withdraw from an account
    Withdraw {
        /// Account ID
        account: String,

        /// Amount (e.g., "50.00" or "50")
        amount: String,

        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Transfer between two accounts
    Transfer {
        /// Amount (e.g., "50.00" or "50")
        amount: String,

        /// Source account ID
        #[arg(long)]
        from: String,

        /// Destination account ID
        #[arg(long)]
        to: String,

        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// List transactions for an account
    Transactions {
        /// Account ID
        account: String,
    },

    /// Verify ledger integrity
    Check,
}

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Open a new account for the logged-in user
    Open {
        /// Account holder's full name
        #[arg(long)]
        name: String,

        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: String,

        #[arg(long)]
        address: String,

        #[arg(long)]
        contact: String,

        #[arg(long)]
        email: String,

        /// Account type: savings or checking
        #[arg(long = "type", default_value = "checking")]
        account_type: String,
    },

    /// List accounts owned by the logged-in user
    List,

    /// Update an account's holder details
    Update {
        /// Account ID
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        dob: Option<String>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        contact: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Account type: savings or checking
        #[arg(long = "type")]
        account_type: Option<String>,
    },

    /// Close an account (history is retained)
    Close {
        /// Account ID
        id: String,
    },
}

fn parse_account_id(raw: &str) -> Result<AccountId> {
    Uuid::parse_str(raw).context("Invalid account ID format (expected UUID)")
}

fn parse_account_type(raw: &str) -> Result<AccountType> {
    AccountType::from_str(raw)
        .with_context(|| format!("Invalid account type '{raw}'. Use 'savings' or 'checking'"))
}

fn parse_amount(raw: &str) -> Result<i64> {
    parse_cents(raw).context("Invalid amount format. Use '50.00' or '50'")
}

impl Cli {
    fn identity(&self) -> Result<IdentityService> {
        Ok(IdentityService::open(Repository::open(&self.data))?)
    }

    fn ledger(&self) -> Result<LedgerService> {
        Ok(LedgerService::open(Repository::open(&self.data))?)
    }

    pub fn run(self) -> Result<()> {
        match &self.command {
            Commands::Register {
                username,
                full_name,
                password,
            } => {
                let mut identity = self.identity()?;
                let user = identity.register(username, password, full_name)?;
                println!("Registered user: {} ({})", user.username, user.id);
                println!("Use 'finbank login {}' to log in", user.username);
            }

            Commands::Login { username, password } => {
                let mut identity = self.identity()?;
                let user = identity.login(username, password)?;
                println!("Logged in as {} ({})", user.username, user.full_name);
            }

            Commands::Logout => {
                let mut identity = self.identity()?;
                identity.logout()?;
                println!("Logged out");
            }

            Commands::Whoami => {
                let identity = self.identity()?;
                match identity.current_user() {
                    Some(user) => {
                        println!("{} ({})", user.username, user.full_name);
                    }
                    None => println!("Not logged in"),
                }
            }

            Commands::Account(account_cmd) => {
                self.run_account_command(account_cmd)?;
            }

            Commands::Deposit {
                account,
                amount,
                description,
            } => {
                let mut ledger = self.ledger()?;
                let account_id = parse_account_id(account)?;
                let tx = ledger.deposit(account_id, parse_amount(amount)?, description.clone())?;
                let balance = ledger.account(account_id).map(|a| a.balance).unwrap_or(0);
                println!(
                    "Deposited {} into {} (balance: {})",
                    format_cents(tx.amount),
                    account_id,
                    format_cents(balance)
                );
            }

            Commands::Withdraw {
                account,
                amount,
                description,
            } => {
                let mut ledger = self.ledger()?;
                let account_id = parse_account_id(account)?;
                let tx = ledger.withdraw(account_id, parse_amount(amount)?, description.clone())?;
                let balance = ledger.account(account_id).map(|a| a.balance).unwrap_or(0);
                println!(
                    "Withdrew {} from {} (balance: {})",
                    format_cents(tx.amount),
                    account_id,
                    format_cents(balance)
                );
            }

            Commands::Transfer {
                amount,
                from,
                to,
                description,
            } => {
                let mut ledger = self.ledger()?;
                let from_id = parse_account_id(from)?;
                let to_id = parse_account_id(to)?;
                let tx = ledger.transfer(from_id, to_id, parse_amount(amount)?, description.clone())?;
                println!(
                    "Transferred {}: {} -> {} ({})",
                    format_cents(tx.amount),
                    from_id,
                    to_id,
                    tx.id
                );
            }

            Commands::Transactions { account } => {
                let ledger = self.ledger()?;
                let account_id = parse_account_id(account)?;
                let history = ledger.transactions_for_account(account_id);

                if history.is_empty() {
                    println!("No transactions");
                    return Ok(());
                }
                for tx in history {
                    let direction = match tx.target_account_id {
                        Some(target) if target == account_id => "in",
                        Some(_) => "out",
                        None => "",
                    };
                    println!(
                        "{}  {:<10}  {:>12}  {} {}",
                        tx.date.format("%Y-%m-%d %H:%M"),
                        tx.kind,
                        format_cents(tx.amount),
                        tx.description,
                        direction
                    );
                }
            }

            Commands::Check => {
                let ledger = self.ledger()?;
                let report = ledger.check_integrity();
                if report.is_clean() {
                    println!("Ledger OK");
                } else {
                    println!("Found {} issue(s):", report.issues.len());
                    for issue in &report.issues {
                        println!("  {issue}");
                    }
                }
                if report.orphaned_transactions > 0 {
                    println!(
                        "Note: {} transaction(s) reference closed accounts",
                        report.orphaned_transactions
                    );
                }
            }
        }

        Ok(())
    }

    fn run_account_command(&self, cmd: &AccountCommands) -> Result<()> {
        match cmd {
            AccountCommands::Open {
                name,
                dob,
                address,
                contact,
                email,
                account_type,
            } => {
                let identity = self.identity()?;
                let Some(owner) = identity.current_user() else {
                    bail!("Not logged in. Use 'finbank login' first");
                };

                let mut ledger = self.ledger()?;
                let account = ledger.create_account(NewAccount {
                    owner_id: owner.id,
                    full_name: name.clone(),
                    date_of_birth: dob.clone(),
                    address: address.clone(),
                    contact_number: contact.clone(),
                    email: email.clone(),
                    account_type: parse_account_type(account_type)?,
                })?;
                println!("Opened {} account: {}", account.account_type, account.id);
            }

            AccountCommands::List => {
                let identity = self.identity()?;
                let Some(owner) = identity.current_user() else {
                    bail!("Not logged in. Use 'finbank login' first");
                };

                let ledger = self.ledger()?;
                let accounts = ledger.accounts_for_owner(owner.id);
                if accounts.is_empty() {
                    println!("No accounts");
                    return Ok(());
                }
                for account in accounts {
                    println!(
                        "{}  {:<8}  {:>12}  {}",
                        account.id,
                        account.account_type,
                        format_cents(account.balance),
                        account.full_name
                    );
                }
            }

            AccountCommands::Update {
                id,
                name,
                dob,
                address,
                contact,
                email,
                account_type,
            } => {
                let mut ledger = self.ledger()?;
                let account_id = parse_account_id(id)?;

                let update = AccountUpdate {
                    full_name: name.clone(),
                    date_of_birth: dob.clone(),
                    address: address.clone(),
                    contact_number: contact.clone(),
                    email: email.clone(),
                    account_type: account_type.as_deref().map(parse_account_type).transpose()?,
                };
                if update.is_empty() {
                    bail!("Nothing to update: supply at least one field");
                }

                match ledger.update_account(account_id, update)? {
                    Some(account) => println!("Updated account {}", account.id),
                    None => println!("Account not found: {account_id}"),
                }
            }

            AccountCommands::Close { id } => {
                let mut ledger = self.ledger()?;
                let account_id = parse_account_id(id)?;
                if ledger.delete_account(account_id)? {
                    println!("Closed account {account_id}");
                } else {
                    println!("Account not found: {account_id}");
                }
            }
        }

        Ok(())
    }
}
