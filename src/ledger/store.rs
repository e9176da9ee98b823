use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

use thiserror::Error;
use tracing::debug;

use super::account::{Account, AccountId};

pub type StoreResult<T> = core::result::Result<T, StoreError>;

/// Technical failures of an [`AccountStore`].
/// Unknown accounts are not errors, lookups report them as `None`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
  #[error("Accounts lock poisoned by a writer that panicked")]
  LockPoisoned,
}

impl<T> From<PoisonError<T>> for StoreError {
  fn from(_: PoisonError<T>) -> Self {
    StoreError::LockPoisoned
  }
}

/// Interface implemented by the holders of account records.
///
/// Records are always handed out as copies, so callers need to go back to the store
/// to observe the latest state, and to write through it to change it.
pub trait AccountStore: Send + Sync {
  /// Current record for `id`, or `None` when the account does not exist.
  fn find(&self, id: &str) -> StoreResult<Option<Account>>;
  /// Creates or replaces the record for the account ID, and returns the stored value.
  fn upsert(&self, account: Account) -> StoreResult<Account>;
  /// Removes every record. Concurrent callers see the store either full or empty.
  fn reset(&self) -> StoreResult<()>;
  /// Copies of all the records, in no particular order.
  fn snapshot(&self) -> StoreResult<Vec<Account>>;
  /// Opens an exclusive session to read, validate and write records as a single step.
  /// Nobody else can read or write the store until the session is dropped.
  fn begin(&self) -> StoreResult<Box<dyn AccountStoreTx + '_>>;
}

/// Exclusive read-modify-write access to an [`AccountStore`], see [`AccountStore::begin`].
pub trait AccountStoreTx {
  fn find(&self, id: &str) -> Option<Account>;
  fn upsert(&mut self, account: Account) -> StoreResult<Account>;
}

/// Implementation of the [`AccountStore`] that keeps the accounts in memory,
/// guarded by a single readers-writer lock.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
  accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl AccountStore for InMemoryAccountStore {
  fn find(&self, id: &str) -> StoreResult<Option<Account>> {
    Ok(self.accounts.read()?.get(id).cloned())
  }

  fn upsert(&self, account: Account) -> StoreResult<Account> {
    self
      .accounts
      .write()?
      .insert(account.id.clone(), account.clone());
    Ok(account)
  }

  fn reset(&self) -> StoreResult<()> {
    let mut accounts = self.accounts.write()?;
    let forgotten = accounts.len();
    accounts.clear();
    debug!(forgotten, "Accounts store reset");
    Ok(())
  }

  fn snapshot(&self) -> StoreResult<Vec<Account>> {
    Ok(self.accounts.read()?.values().cloned().collect())
  }

  fn begin(&self) -> StoreResult<Box<dyn AccountStoreTx + '_>> {
    let accounts = self.accounts.write()?;
    Ok(Box::new(InMemoryAccountStoreTx { accounts }))
  }
}

struct InMemoryAccountStoreTx<'a> {
  accounts: RwLockWriteGuard<'a, HashMap<AccountId, Account>>,
}

impl AccountStoreTx for InMemoryAccountStoreTx<'_> {
  fn find(&self, id: &str) -> Option<Account> {
    self.accounts.get(id).cloned()
  }

  fn upsert(&mut self, account: Account) -> StoreResult<Account> {
    self.accounts.insert(account.id.clone(), account.clone());
    Ok(account)
  }
}
