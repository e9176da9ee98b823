/// Alias for an account ID
pub type AccountId = String;

/// Alias for an account balance, in whole currency units
pub type Balance = i64;

/// Alias for the amount of an operation, in whole currency units
pub type Amount = i64;

/// This represents the state of an account as kept by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Account {
  pub id: AccountId,
  pub balance: Balance,
}

impl Account {
  pub fn new(id: impl Into<AccountId>, balance: Balance) -> Self {
    Self {
      id: id.into(),
      balance,
    }
  }

  /// An account as it is right after being implicitly opened by a first credit.
  pub fn empty(id: impl Into<AccountId>) -> Self {
    Self::new(id, 0)
  }

  pub fn can_cover(&self, amount: Amount) -> bool {
    self.balance >= amount
  }
}
