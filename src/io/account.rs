use serde::Serialize;

use crate::ledger::{self, AccountId, Balance};

/// A report on an account state used to serialize into a CSV file
#[derive(Debug, PartialEq, Serialize)]
pub struct AccountReport {
  account: AccountId,
  balance: Balance,
}

impl From<ledger::Account> for AccountReport {
  /// A conversion between the domain representation of an account into a serializable structure
  fn from(account: ledger::Account) -> Self {
    AccountReport {
      account: account.id,
      balance: account.balance,
    }
  }
}

#[cfg(test)]
mod tests {

  use super::*;

  #[test]
  fn from_ledger_account() {
    let account_report: AccountReport = ledger::Account::new("100", 42).into();

    assert_eq!(
      account_report,
      AccountReport {
        account: "100".to_string(),
        balance: 42,
      }
    )
  }
}
