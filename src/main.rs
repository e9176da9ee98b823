use std::sync::Arc;

use account_ledger::config::Config;
use account_ledger::io::{CsvAccountsReportWriter, CsvOperationsReader};
use account_ledger::ledger::LedgerEngine;
use account_ledger::{processors, telemetry};
use anyhow::{Context, Result};
use tokio::io::AsyncRead;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
  telemetry::init();

  let config = Config::from_env()?;
  info!(input = ?config.input, concurrency = config.concurrency, "Starting ledger");

  let reader = get_operations_async_read(&config).await?;
  let operations_reader = CsvOperationsReader::new(reader);
  let ledger = LedgerEngine::in_memory();
  let accounts_report_writer = CsvAccountsReportWriter::new(tokio::io::stdout());

  let summary = if config.is_sequential() {
    processors::simple::run(operations_reader, ledger, accounts_report_writer).await?
  } else {
    processors::concurrent::run(
      operations_reader,
      Arc::new(ledger),
      accounts_report_writer,
      config.concurrency,
    )
    .await?
  };

  summary.log();
  Ok(())
}

type OperationsAsyncRead = Box<dyn AsyncRead + Unpin + Send + Sync>;

/// This allows to use either a file if the path is specified in the command line,
/// or the stdin otherwise, which might be more convenient for pipe the data.
async fn get_operations_async_read(config: &Config) -> Result<OperationsAsyncRead> {
  match &config.input {
    Some(path) => tokio::fs::File::open(path)
      .await
      .map(|file| Box::new(file) as OperationsAsyncRead)
      .with_context(|| format!("Failed to open `{}`", path.display())),
    None => Ok(Box::new(tokio::io::stdin()) as OperationsAsyncRead),
  }
}
