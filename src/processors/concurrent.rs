use std::sync::Arc;

use anyhow::Result;
use futures::StreamExt;

use super::Summary;
use crate::io::{AccountsReportWriter, OperationsReader};
use crate::ledger::Ledger;

/// A processor that keeps up to `concurrency` operations in flight at the same time,
/// each of them running as its own task on the runtime.
///
/// Operations are started in the order they are read, but they can complete in any order,
/// so the result of an operation may depend on the ones that are still in flight
/// (e.g. a withdrawal racing the deposit that funds it). The ledger keeps every account consistent.
pub async fn run<R, L, W>(
  mut operations_reader: R,
  ledger: Arc<L>,
  mut accounts_report_writer: W,
  concurrency: usize,
) -> Result<Summary>
where
  R: OperationsReader,
  L: Ledger + 'static,
  W: AccountsReportWriter,
{
  let summary = Summary::default();

  operations_reader
    .read_operations()
    .for_each_concurrent(concurrency, |maybe_operation| {
      let ledger = Arc::clone(&ledger);
      let summary = &summary;
      async move {
        match maybe_operation {
          Ok(operation) => {
            let kind = operation.kind();
            match tokio::spawn(async move { ledger.process(operation).await }).await {
              Ok(result) => summary.record_outcome(kind, result),
              Err(err) => summary.record_failure(kind, err),
            }
          }
          Err(err) => summary.record_malformed(err),
        }
      }
    })
    .await;

  let report = ledger.accounts_report().await?;
  accounts_report_writer
    .write_accounts_report(report.into_iter())
    .await?;

  Ok(summary)
}
