use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::io::AsyncWrite;

use super::account::AccountReport;
use crate::ledger::Account;

/// Interface for the sinks of the final accounts report
#[async_trait(?Send)]
pub trait AccountsReportWriter {
  /// Writes every account yielded by `report`, in the same order.
  async fn write_accounts_report<'a, T>(&'a mut self, report: T) -> Result<()>
  where
    T: Iterator<Item = Account> + 'a;
}

/// Writes the accounts report as CSV, with an `account,balance` header.
/// Nothing is written at all for an empty report.
pub struct CsvAccountsReportWriter<W>(W);

impl<W> CsvAccountsReportWriter<W>
where
  W: AsyncWrite + Unpin + Send + Sync,
{
  pub fn new(writer: W) -> Self {
    Self(writer)
  }
}

#[async_trait(?Send)]
impl<W> AccountsReportWriter for CsvAccountsReportWriter<W>
where
  W: AsyncWrite + Unpin + Send + Sync,
{
  async fn write_accounts_report<'a, T>(&'a mut self, report: T) -> Result<()>
  where
    T: Iterator<Item = Account> + 'a,
  {
    let mut serializer = csv_async::AsyncSerializer::from_writer(&mut self.0);
    for account in report {
      let id = account.id.clone();
      serializer
        .serialize(AccountReport::from(account))
        .await
        .with_context(|| format!("Failed to write account {} into the report", id))?;
    }
    serializer
      .flush()
      .await
      .context("Failed to flush the accounts report")
  }
}
