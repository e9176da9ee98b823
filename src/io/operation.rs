use std::convert::TryFrom;

use serde::Deserialize;

use crate::ledger::{self, AccountId, Amount, LedgerError, OperationKind};

/// A deserializable operation request.
/// Which of the accounts are required depends on the type of the operation.
#[derive(Debug, Deserialize)]
pub struct OperationRequest {
  #[serde(rename = "type")]
  kind: String,

  origin: Option<AccountId>,

  destination: Option<AccountId>,

  amount: Option<Amount>,
}

impl TryFrom<OperationRequest> for ledger::Operation {
  type Error = LedgerError;

  /// Conversion from a deserializable request into an operation that can be used by the domain logic.
  fn try_from(request: OperationRequest) -> Result<Self, Self::Error> {
    let kind = request.kind.parse::<OperationKind>()?;
    let amount = request.amount.ok_or(LedgerError::MissingField {
      kind,
      field: "amount",
    });

    match kind {
      OperationKind::Deposit => Ok(ledger::Operation::Deposit {
        amount: amount?,
        destination: required(request.destination, kind, "destination")?,
      }),
      OperationKind::Withdraw => Ok(ledger::Operation::Withdraw {
        amount: amount?,
        origin: required(request.origin, kind, "origin")?,
      }),
      OperationKind::Transfer => Ok(ledger::Operation::Transfer {
        amount: amount?,
        origin: required(request.origin, kind, "origin")?,
        destination: required(request.destination, kind, "destination")?,
      }),
      OperationKind::Balance => Ok(ledger::Operation::Balance {
        origin: required(request.origin, kind, "origin")?,
      }),
      OperationKind::Reset => Ok(ledger::Operation::Reset),
    }
  }
}

fn required(
  account_id: Option<AccountId>,
  kind: OperationKind,
  field: &'static str,
) -> Result<AccountId, LedgerError> {
  account_id
    .filter(|id| !id.is_empty())
    .ok_or(LedgerError::MissingField { kind, field })
}

#[cfg(test)]
mod tests {

  use super::*;

  fn request(
    kind: &str,
    origin: Option<&str>,
    destination: Option<&str>,
    amount: Option<Amount>,
  ) -> OperationRequest {
    OperationRequest {
      kind: kind.to_string(),
      origin: origin.map(str::to_string),
      destination: destination.map(str::to_string),
      amount,
    }
  }

  #[test]
  fn ledger_operation_try_from() {
    let cases = vec![
      (
        request("deposit", None, Some("100"), Some(10)),
        ledger::Operation::Deposit {
          destination: "100".to_string(),
          amount: 10,
        },
      ),
      (
        request("withdraw", Some("100"), None, Some(5)),
        ledger::Operation::Withdraw {
          origin: "100".to_string(),
          amount: 5,
        },
      ),
      (
        request("transfer", Some("100"), Some("300"), Some(15)),
        ledger::Operation::Transfer {
          origin: "100".to_string(),
          destination: "300".to_string(),
          amount: 15,
        },
      ),
      (
        // the account not needed by the operation is ignored
        request("deposit", Some("200"), Some("100"), Some(10)),
        ledger::Operation::Deposit {
          destination: "100".to_string(),
          amount: 10,
        },
      ),
      (
        request("balance", Some("100"), None, None),
        ledger::Operation::Balance {
          origin: "100".to_string(),
        },
      ),
      (
        // only the origin is looked at
        request("balance", Some("100"), Some("300"), Some(10)),
        ledger::Operation::Balance {
          origin: "100".to_string(),
        },
      ),
      (request("reset", None, None, None), ledger::Operation::Reset),
      (
        request("reset", Some("100"), Some("300"), Some(10)),
        ledger::Operation::Reset,
      ),
      (
        // amounts are validated by the ledger
        request("withdraw", Some("100"), None, Some(-5)),
        ledger::Operation::Withdraw {
          origin: "100".to_string(),
          amount: -5,
        },
      ),
    ];

    for (input, expected) in cases {
      assert_eq!(ledger::Operation::try_from(input), Ok(expected))
    }
  }

  #[test]
  fn ledger_operation_try_from_fails() {
    let cases = vec![
      (
        request("chargeback", Some("100"), None, Some(10)),
        LedgerError::UnknownOperationType("chargeback".to_string()),
      ),
      (
        request("deposit", Some("100"), None, Some(10)),
        LedgerError::MissingField {
          kind: OperationKind::Deposit,
          field: "destination",
        },
      ),
      (
        request("withdraw", None, Some("100"), Some(10)),
        LedgerError::MissingField {
          kind: OperationKind::Withdraw,
          field: "origin",
        },
      ),
      (
        request("transfer", Some("100"), None, Some(10)),
        LedgerError::MissingField {
          kind: OperationKind::Transfer,
          field: "destination",
        },
      ),
      (
        request("transfer", Some(""), Some("300"), Some(10)),
        LedgerError::MissingField {
          kind: OperationKind::Transfer,
          field: "origin",
        },
      ),
      (
        request("deposit", None, Some("100"), None),
        LedgerError::MissingField {
          kind: OperationKind::Deposit,
          field: "amount",
        },
      ),
      (
        request("balance", None, Some("100"), None),
        LedgerError::MissingField {
          kind: OperationKind::Balance,
          field: "origin",
        },
      ),
      (
        request("balance", Some(""), None, None),
        LedgerError::MissingField {
          kind: OperationKind::Balance,
          field: "origin",
        },
      ),
    ];

    for (input, expected) in cases {
      assert_eq!(ledger::Operation::try_from(input), Err(expected))
    }
  }
}
