use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::{
  account::{Account, AccountId, Amount, Balance},
  operation::{Operation, OperationKind, OperationOutcome},
  store::{AccountStore, AccountStoreTx, InMemoryAccountStore, StoreError},
};

pub type Result<T> = core::result::Result<T, LedgerError>;

/// Possible errors that can happen while applying operations to a ledger.
/// Rejections leave every account untouched, except for [`LedgerError::PartialTransferFailure`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
  #[error("Account not found: {0}")]
  AccountNotFound(AccountId),

  #[error("Insufficient funds in account {account}: balance is {balance}, requested {amount}")]
  InsufficientFunds {
    account: AccountId,
    balance: Balance,
    amount: Amount,
  },

  #[error("Invalid amount {0}, it must be positive")]
  InvalidAmount(Amount),

  #[error("Balance overflow for account: {0}")]
  BalanceOverflow(AccountId),

  #[error("Unknown operation type: {0}")]
  UnknownOperationType(String),

  #[error("Missing {field} for {kind} operation")]
  MissingField {
    kind: OperationKind,
    field: &'static str,
  },

  #[error("Transfer from {origin} debited the origin but failed to credit {destination}: {source}")]
  PartialTransferFailure {
    origin: AccountId,
    destination: AccountId,
    source: StoreError,
  },

  #[error(transparent)]
  Store(#[from] StoreError),
}

/// Interface implemented by ledgers.
///
/// All the operations take `&self` so a single ledger can be shared between concurrent callers.
/// They are `async` to allow implementations backed by external systems involving IO.
#[async_trait]
pub trait Ledger: Send + Sync {
  /// Balance of an existing account.
  async fn get_balance(&self, id: AccountId) -> Result<Balance>;
  /// Credits `amount` into `destination`, opening the account if it does not exist yet.
  async fn deposit(&self, destination: AccountId, amount: Amount) -> Result<Account>;
  /// Debits `amount` from an existing account with enough funds.
  async fn withdraw(&self, origin: AccountId, amount: Amount) -> Result<Account>;
  /// Moves `amount` from `origin` into `destination`, opening the destination if needed.
  /// It returns the resulting origin and destination accounts, in that order.
  async fn transfer(
    &self,
    origin: AccountId,
    destination: AccountId,
    amount: Amount,
  ) -> Result<(Account, Account)>;
  /// Forgets every account.
  async fn reset(&self) -> Result<()>;
  /// State of all the accounts, sorted by account ID.
  async fn accounts_report(&self) -> Result<Vec<Account>>;

  /// Applies a decoded [`Operation`] and reports the accounts it touched.
  async fn process(&self, operation: Operation) -> Result<OperationOutcome> {
    match operation {
      Operation::Deposit {
        destination,
        amount,
      } => self
        .deposit(destination, amount)
        .await
        .map(OperationOutcome::deposited),
      Operation::Withdraw { origin, amount } => self
        .withdraw(origin, amount)
        .await
        .map(OperationOutcome::withdrawn),
      Operation::Transfer {
        origin,
        destination,
        amount,
      } => self
        .transfer(origin, destination, amount)
        .await
        .map(|(origin, destination)| OperationOutcome::transferred(origin, destination)),
      Operation::Balance { origin } => {
        let balance = self.get_balance(origin.clone()).await?;
        Ok(OperationOutcome::queried(origin, balance))
      }
      Operation::Reset => self.reset().await.map(|_| OperationOutcome::cleared()),
    }
  }
}

/// Implementation of the [`Ledger`] on top of an [`AccountStore`].
///
/// Every balance-changing operation runs its read, validation and writes inside a single
/// store session, so concurrent operations on the same accounts are serialized.
#[derive(Debug)]
pub struct LedgerEngine<S = InMemoryAccountStore> {
  store: Arc<S>,
}

impl LedgerEngine<InMemoryAccountStore> {
  pub fn in_memory() -> Self {
    Self::new(Arc::new(InMemoryAccountStore::new()))
  }
}

impl Default for LedgerEngine<InMemoryAccountStore> {
  fn default() -> Self {
    Self::in_memory()
  }
}

impl<S> LedgerEngine<S>
where
  S: AccountStore,
{
  pub fn new(store: Arc<S>) -> Self {
    Self { store }
  }

  fn balance_of(&self, id: AccountId) -> Result<Balance> {
    match self.store.find(&id)? {
      Some(account) => Ok(account.balance),
      None => Err(LedgerError::AccountNotFound(id)),
    }
  }

  fn deposit_into(&self, destination: AccountId, amount: Amount) -> Result<Account> {
    check_amount(amount)?;
    let mut session = self.store.begin()?;
    let account = session
      .find(&destination)
      .unwrap_or_else(|| Account::empty(destination));
    let account = credit(account, amount)?;
    Ok(session.upsert(account)?)
  }

  fn withdraw_from(&self, origin: AccountId, amount: Amount) -> Result<Account> {
    check_amount(amount)?;
    let mut session = self.store.begin()?;
    let account = session
      .find(&origin)
      .ok_or(LedgerError::AccountNotFound(origin))?;
    let account = debit(account, amount)?;
    Ok(session.upsert(account)?)
  }

  fn transfer_between(
    &self,
    origin: AccountId,
    destination: AccountId,
    amount: Amount,
  ) -> Result<(Account, Account)> {
    check_amount(amount)?;
    let mut session = self.store.begin()?;
    let origin_account = session
      .find(&origin)
      .ok_or_else(|| LedgerError::AccountNotFound(origin.clone()))?;
    let origin_account = debit(origin_account, amount)?;

    if origin == destination {
      // debit and credit cancel out, the stored record is already right
      let account = credit(origin_account, amount)?;
      return Ok((account.clone(), account));
    }

    let destination_account = session
      .find(&destination)
      .unwrap_or_else(|| Account::empty(destination.clone()));
    let destination_account = credit(destination_account, amount)?;

    let origin_account = session.upsert(origin_account)?;
    let destination_account =
      session
        .upsert(destination_account)
        .map_err(|source| LedgerError::PartialTransferFailure {
          origin,
          destination,
          source,
        })?;

    Ok((origin_account, destination_account))
  }

  fn accounts_sorted(&self) -> Result<Vec<Account>> {
    let mut accounts = self.store.snapshot()?;
    accounts.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(accounts)
  }
}

fn check_amount(amount: Amount) -> Result<()> {
  if amount > 0 {
    Ok(())
  } else {
    Err(LedgerError::InvalidAmount(amount))
  }
}

fn debit(mut account: Account, amount: Amount) -> Result<Account> {
  if account.can_cover(amount) {
    account.balance -= amount;
    Ok(account)
  } else {
    Err(LedgerError::InsufficientFunds {
      account: account.id,
      balance: account.balance,
      amount,
    })
  }
}

fn credit(mut account: Account, amount: Amount) -> Result<Account> {
  match account.balance.checked_add(amount) {
    Some(balance) => {
      account.balance = balance;
      Ok(account)
    }
    None => Err(LedgerError::BalanceOverflow(account.id)),
  }
}

#[async_trait]
impl<S> Ledger for LedgerEngine<S>
where
  S: AccountStore,
{
  async fn get_balance(&self, id: AccountId) -> Result<Balance> {
    self.balance_of(id)
  }

  async fn deposit(&self, destination: AccountId, amount: Amount) -> Result<Account> {
    self.deposit_into(destination, amount)
  }

  async fn withdraw(&self, origin: AccountId, amount: Amount) -> Result<Account> {
    self.withdraw_from(origin, amount)
  }

  async fn transfer(
    &self,
    origin: AccountId,
    destination: AccountId,
    amount: Amount,
  ) -> Result<(Account, Account)> {
    self.transfer_between(origin, destination, amount)
  }

  async fn reset(&self) -> Result<()> {
    Ok(self.store.reset()?)
  }

  async fn accounts_report(&self) -> Result<Vec<Account>> {
    self.accounts_sorted()
  }
}
