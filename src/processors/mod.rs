//! Processors feed the operations read from an [`OperationsReader`](crate::io::OperationsReader) into a
//! [`Ledger`](crate::ledger::Ledger), and write the final accounts report.
//!
//! - [`simple`] applies the operations one after the other, in the order they were read.
//! - [`concurrent`] keeps several operations in flight, relying on the ledger to serialize them.

use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, error, info, warn};

use crate::ledger::{self, OperationKind, OperationOutcome};

pub mod concurrent;
pub mod simple;

#[cfg(test)]
mod testing;

/// Counters of what happened with the operations fed into a ledger.
/// Rejections, malformed input and crashed operations are logged and skipped, never propagated.
/// Every input row ends up in exactly one of the counters.
#[derive(Debug, Default)]
pub struct Summary {
  applied: AtomicUsize,
  rejected: AtomicUsize,
  malformed: AtomicUsize,
  failed: AtomicUsize,
}

impl Summary {
  pub fn applied(&self) -> usize {
    self.applied.load(Ordering::Relaxed)
  }

  pub fn rejected(&self) -> usize {
    self.rejected.load(Ordering::Relaxed)
  }

  pub fn malformed(&self) -> usize {
    self.malformed.load(Ordering::Relaxed)
  }

  /// Operations whose outcome is unknown because the task applying them crashed.
  pub fn failed(&self) -> usize {
    self.failed.load(Ordering::Relaxed)
  }

  pub fn total(&self) -> usize {
    self.applied() + self.rejected() + self.malformed() + self.failed()
  }

  pub fn log(&self) {
    info!(
      applied = self.applied(),
      rejected = self.rejected(),
      malformed = self.malformed(),
      failed = self.failed(),
      "Finished processing operations"
    );
  }

  fn record_outcome(&self, kind: OperationKind, result: ledger::Result<OperationOutcome>) {
    match result {
      Ok(outcome) => {
        debug!(%kind, ?outcome, "Operation applied");
        self.applied.fetch_add(1, Ordering::Relaxed);
      }
      Err(err) => {
        warn!(%kind, %err, "Operation rejected");
        self.rejected.fetch_add(1, Ordering::Relaxed);
      }
    }
  }

  fn record_malformed(&self, err: anyhow::Error) {
    warn!("Skipping malformed operation: {:#}", err);
    self.malformed.fetch_add(1, Ordering::Relaxed);
  }

  fn record_failure(&self, kind: OperationKind, err: impl std::fmt::Display) {
    error!(%kind, %err, "Operation crashed");
    self.failed.fetch_add(1, Ordering::Relaxed);
  }
}
