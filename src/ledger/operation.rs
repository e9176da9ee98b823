use std::fmt;
use std::str::FromStr;

use super::{
  account::{Account, AccountId, Amount, Balance},
  engine::LedgerError,
};

/// The kinds of operations supported by a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
  Deposit,
  Withdraw,
  Transfer,
  Balance,
  Reset,
}

impl FromStr for OperationKind {
  type Err = LedgerError;

  fn from_str(kind: &str) -> Result<Self, Self::Err> {
    match kind {
      "deposit" => Ok(OperationKind::Deposit),
      "withdraw" => Ok(OperationKind::Withdraw),
      "transfer" => Ok(OperationKind::Transfer),
      "balance" => Ok(OperationKind::Balance),
      "reset" => Ok(OperationKind::Reset),
      other => Err(LedgerError::UnknownOperationType(other.to_string())),
    }
  }
}

impl fmt::Display for OperationKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      OperationKind::Deposit => write!(f, "deposit"),
      OperationKind::Withdraw => write!(f, "withdraw"),
      OperationKind::Transfer => write!(f, "transfer"),
      OperationKind::Balance => write!(f, "balance"),
      OperationKind::Reset => write!(f, "reset"),
    }
  }
}

/// Representation of the operations a ledger can process.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
  Deposit {
    destination: AccountId,
    amount: Amount,
  },
  Withdraw {
    origin: AccountId,
    amount: Amount,
  },
  Transfer {
    origin: AccountId,
    destination: AccountId,
    amount: Amount,
  },
  Balance {
    origin: AccountId,
  },
  Reset,
}

impl Operation {
  pub fn kind(&self) -> OperationKind {
    match self {
      Operation::Deposit { .. } => OperationKind::Deposit,
      Operation::Withdraw { .. } => OperationKind::Withdraw,
      Operation::Transfer { .. } => OperationKind::Transfer,
      Operation::Balance { .. } => OperationKind::Balance,
      Operation::Reset => OperationKind::Reset,
    }
  }
}

/// The accounts touched by a processed [`Operation`].
/// Withdrawals and balance queries only report the origin, deposits only the destination
/// and transfers both. A reset touches no account in particular and reports none.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationOutcome {
  pub origin: Option<Account>,
  pub destination: Option<Account>,
}

impl OperationOutcome {
  pub fn deposited(destination: Account) -> Self {
    Self {
      origin: None,
      destination: Some(destination),
    }
  }

  pub fn withdrawn(origin: Account) -> Self {
    Self {
      origin: Some(origin),
      destination: None,
    }
  }

  pub fn transferred(origin: Account, destination: Account) -> Self {
    Self {
      origin: Some(origin),
      destination: Some(destination),
    }
  }

  pub fn queried(id: AccountId, balance: Balance) -> Self {
    Self {
      origin: Some(Account::new(id, balance)),
      destination: None,
    }
  }

  pub fn cleared() -> Self {
    Self::default()
  }
}
