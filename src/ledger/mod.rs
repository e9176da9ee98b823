//! This module contains the domain logic to keep account balances
//!
//! The [`LedgerEngine`] applies deposits, withdrawals and transfers on top of an [`AccountStore`],
//! and [`InMemoryAccountStore`] is the implementation of the store that keeps the accounts in memory.
//

mod account;
mod engine;
mod operation;
mod store;

pub use account::{Account, AccountId, Amount, Balance};
pub use engine::{Ledger, LedgerEngine, LedgerError, Result};
pub use operation::{Operation, OperationKind, OperationOutcome};
pub use store::{AccountStore, AccountStoreTx, InMemoryAccountStore, StoreError, StoreResult};
