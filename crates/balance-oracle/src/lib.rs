//! # Balance oracle
//!
//! Fetches the balance of a wallet address by running the node's command-line tool
//! (`<tool> GetBalanceByAddress <address>`) and parsing its JSON reply.
//! Amounts are exact [`Decimal`]s in display units (base units / 10^8).

mod amount;
mod cli_oracle;
mod error;

pub use amount::{format_balance, from_base_units, to_storage_value, BALANCE_DECIMALS};
pub use cli_oracle::{parse_balance_response, CliBalanceOracle, BALANCE_SUBCOMMAND};
pub use error::OracleError;
pub use rust_decimal::Decimal;

use async_trait::async_trait;

/// Source of current wallet balances. [`CliBalanceOracle`] is the production implementation.
#[async_trait]
pub trait BalanceOracle: Send + Sync {
    /// Returns the balance of `address` in display units.
    async fn get_balance(&self, address: &str) -> Result<Decimal, OracleError>;
}
