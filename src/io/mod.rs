//! This module contains all the components needed to read and write data from files (specifically CSV)
//!
//! The [`reader`] module contains a reader of operations from CSV and the [`writer`] module contains an accounts report writer into CSV.
//! Other file formats can be supported by implementing the traits [`OperationsReader`] and [`AccountsReportWriter`] respectively.
//!
//! The [`account`] and [`operation`] modules contain the structs needed to serialize/deserialize data.
//! They are kept apart from the ledger model so the file formats and the domain logic can evolve independently.
//!

mod account;
mod operation;
mod reader;
mod writer;

pub use reader::{CsvOperationsReader, OperationsReader};
pub use writer::{AccountsReportWriter, CsvAccountsReportWriter};
