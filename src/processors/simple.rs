use anyhow::Result;
use tokio_stream::StreamExt;

use super::Summary;
use crate::io::{AccountsReportWriter, OperationsReader};
use crate::ledger::Ledger;

/// This is a simple processor of operations that
/// - reads operations from an [`OperationsReader`]
/// - applies them one by one, in order, to a [`Ledger`]
/// - writes a report including the final state of the accounts using an [`AccountsReportWriter`]
///
/// Operations that can't be read, or that are rejected by the ledger, are logged and skipped.
/// Failures to build or write the final report are returned.
pub async fn run<R, L, W>(
  mut operations_reader: R,
  ledger: L,
  mut accounts_report_writer: W,
) -> Result<Summary>
where
  R: OperationsReader,
  L: Ledger,
  W: AccountsReportWriter,
{
  let summary = Summary::default();
  let mut operations = operations_reader.read_operations();

  while let Some(maybe_operation) = operations.next().await {
    match maybe_operation {
      Ok(operation) => {
        let kind = operation.kind();
        summary.record_outcome(kind, ledger.process(operation).await)
      }
      Err(err) => summary.record_malformed(err),
    }
  }

  let report = ledger.accounts_report().await?;
  accounts_report_writer
    .write_accounts_report(report.into_iter())
    .await?;

  Ok(summary)
}
