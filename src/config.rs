use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Environment variable with the number of operations kept in flight
pub const CONCURRENCY_VAR: &str = "LEDGER_CONCURRENCY";

const DEFAULT_CONCURRENCY: usize = 1;

/// Runtime configuration, taken from the command line and the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
  /// File to read the operations from, or the stdin when `None`.
  pub input: Option<PathBuf>,
  /// Operations kept in flight. `1` applies them sequentially, in order.
  pub concurrency: usize,
}

impl Config {
  pub fn from_env() -> Result<Self> {
    Self::parse(std::env::args().skip(1), std::env::var(CONCURRENCY_VAR).ok())
  }

  fn parse<A>(mut args: A, concurrency: Option<String>) -> Result<Self>
  where
    A: Iterator<Item = String>,
  {
    let input = args.next().map(PathBuf::from);
    if let Some(unexpected) = args.next() {
      bail!(
        "Unexpected argument `{}`, only the path of the operations file is accepted",
        unexpected
      );
    }

    let concurrency = match concurrency {
      Some(value) => parse_concurrency(&value)?,
      None => DEFAULT_CONCURRENCY,
    };

    Ok(Self { input, concurrency })
  }

  pub fn is_sequential(&self) -> bool {
    self.concurrency == 1
  }
}

fn parse_concurrency(value: &str) -> Result<usize> {
  let concurrency = value
    .trim()
    .parse::<usize>()
    .with_context(|| format!("Invalid {} `{}`", CONCURRENCY_VAR, value))?;
  if concurrency == 0 {
    bail!("Invalid {} `{}`, it must be at least 1", CONCURRENCY_VAR, value);
  }
  Ok(concurrency)
}
