use async_trait::async_trait;
use mock_it::Mock;
use tokio_stream::Stream;

use crate::io::{AccountsReportWriter, OperationsReader};
use crate::ledger::{
  self, Account, AccountId, Amount, Balance, Ledger, LedgerError, Operation, OperationOutcome,
};

mockall::mock! {
  pub TestOperationsReader {}
  impl OperationsReader for TestOperationsReader {
    fn read_operations<'a>(
      &'a mut self,
    ) -> Box<dyn Stream<Item = anyhow::Result<Operation>> + Unpin + 'a>;
  }
}

pub fn create_operations_reader_mock(
  operations: Vec<Result<Operation, String>>,
) -> MockTestOperationsReader {
  let mut operations_reader = MockTestOperationsReader::new();
  operations_reader
    .expect_read_operations()
    .returning(move || {
      Box::new(tokio_stream::iter(
        operations
          .clone()
          .into_iter()
          .map(|result| result.map_err(|err| anyhow::anyhow!(err))),
      ))
    });
  operations_reader
}

mockall::mock! {
  pub TestLedger {}
  #[async_trait]
  impl Ledger for TestLedger {
    async fn get_balance(&self, id: AccountId) -> ledger::Result<Balance>;
    async fn deposit(&self, destination: AccountId, amount: Amount) -> ledger::Result<Account>;
    async fn withdraw(&self, origin: AccountId, amount: Amount) -> ledger::Result<Account>;
    async fn transfer(
      &self,
      origin: AccountId,
      destination: AccountId,
      amount: Amount,
    ) -> ledger::Result<(Account, Account)>;
    async fn reset(&self) -> ledger::Result<()>;
    async fn accounts_report(&self) -> ledger::Result<Vec<Account>>;
    async fn process(&self, operation: Operation) -> ledger::Result<OperationOutcome>;
  }
}

pub fn create_ledger_mock(
  operations: Vec<(Operation, Result<OperationOutcome, LedgerError>)>,
  accounts_report: Result<Vec<Account>, LedgerError>,
) -> MockTestLedger {
  let mut ledger = MockTestLedger::new();
  for (operation, result) in operations {
    ledger
      .expect_process()
      .with(mockall::predicate::eq(operation))
      .times(1)
      .return_const(result);
  }
  ledger
    .expect_accounts_report()
    .return_const(accounts_report);
  ledger
}

// `mockall` can't mock the generic `write_accounts_report`, so this one uses `mock-it`.
// More information here: https://github.com/asomers/mockall/issues/299

pub struct MockTestAccountsReportWriter {
  write_accounts_report: Mock<Vec<Account>, Result<(), String>>,
}

impl MockTestAccountsReportWriter {
  pub fn new() -> Self {
    Self {
      write_accounts_report: Mock::new(Err("no rule satisfied".to_string())),
    }
  }
}

#[async_trait(?Send)]
impl AccountsReportWriter for MockTestAccountsReportWriter {
  async fn write_accounts_report<'a, T>(&'a mut self, report: T) -> anyhow::Result<()>
  where
    T: Iterator<Item = Account> + 'a,
  {
    self
      .write_accounts_report
      .called(report.collect())
      .map_err(|err| anyhow::anyhow!(err))
  }
}

pub fn create_accounts_report_writer_mock(
  accounts: Vec<Account>,
) -> MockTestAccountsReportWriter {
  let accounts_report_writer = MockTestAccountsReportWriter::new();
  accounts_report_writer
    .write_accounts_report
    .given(accounts)
    .will_return(Ok(()));
  accounts_report_writer
}
