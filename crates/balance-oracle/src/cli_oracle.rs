//! Balance oracle backed by the node's command-line tool.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, error, instrument};

use crate::amount::from_base_units;
use crate::error::OracleError;
use crate::BalanceOracle;

/// Sub-command the tool expects for a balance lookup.
pub const BALANCE_SUBCOMMAND: &str = "GetBalanceByAddress";

/// Longest stderr excerpt kept in [`OracleError::ToolFailed`].
const STDERR_EXCERPT_LEN: usize = 240;

/// `{"getBalanceByAddressResponse": {"balance": "<integer>"}}`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceEnvelope {
    get_balance_by_address_response: BalanceBody,
}

#[derive(Deserialize)]
struct BalanceBody {
    balance: RawBalance,
}

/// The tool prints the amount as a string; a bare JSON integer is accepted too.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBalance {
    Text(String),
    Number(u64),
}

/// Parses the tool's stdout into display units.
pub fn parse_balance_response(output: &str) -> Result<Decimal, OracleError> {
    let envelope: BalanceEnvelope = serde_json::from_str(output.trim())
        .map_err(|e| OracleError::MalformedResponse(e.to_string()))?;

    let raw = match envelope.get_balance_by_address_response.balance {
        RawBalance::Number(n) => n,
        RawBalance::Text(s) => s.trim().parse::<u64>().map_err(|e| {
            OracleError::MalformedResponse(format!("balance {:?} is not a base-unit integer: {}", s, e))
        })?,
    };

    Ok(from_base_units(raw))
}

/// Runs `<program> [base_args..] GetBalanceByAddress <address>` with a bounded wait.
#[derive(Debug, Clone)]
pub struct CliBalanceOracle {
    program: String,
    /// Placed before the sub-command (e.g. RPC server flags).
    base_args: Vec<String>,
    timeout: Duration,
}

impl CliBalanceOracle {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            base_args: Vec::new(),
            timeout,
        }
    }

    pub fn with_base_args(mut self, base_args: Vec<String>) -> Self {
        self.base_args = base_args;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl BalanceOracle for CliBalanceOracle {
    #[instrument(skip(self), fields(program = %self.program))]
    async fn get_balance(&self, address: &str) -> Result<Decimal, OracleError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.base_args)
            .arg(BALANCE_SUBCOMMAND)
            .arg(address)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the output future on timeout must not leave the tool running.
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(result) => result.map_err(|source| {
                error!(error = %source, "Failed to start balance tool");
                OracleError::Spawn {
                    program: self.program.clone(),
                    source,
                }
            })?,
            Err(_) => {
                error!(timeout_ms = self.timeout.as_millis() as u64, "Balance tool timed out");
                return Err(OracleError::Timeout(self.timeout));
            }
        };

        if !output.status.success() {
            let stderr: String = String::from_utf8_lossy(&output.stderr)
                .trim()
                .chars()
                .take(STDERR_EXCERPT_LEN)
                .collect();
            error!(status = %output.status, stderr = %stderr, "Balance tool exited unsuccessfully");
            return Err(OracleError::ToolFailed {
                status: output.status.to_string(),
                stderr,
            });
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| OracleError::MalformedResponse("stdout is not valid UTF-8".to_string()))?;
        debug!(stdout = %stdout.trim(), "Balance tool answered");

        parse_balance_response(&stdout).map_err(|e| {
            error!(error = %e, "Could not parse balance tool output");
            e
        })
    }
}
