/// Command line and environment configuration of the binary.
pub mod config;

/// Readers of operations and writers of accounts reports, for now only in CSV.
pub mod io;

/// Accounts, the store that keeps them and the engine applying deposits, withdrawals and transfers.
/// Independent ledgers can coexist, each one owning its own store.
pub mod ledger;

/// Glue between readers, a ledger and report writers.
pub mod processors;

pub mod telemetry;
