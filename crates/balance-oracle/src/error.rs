//! Oracle error types.

use std::time::Duration;

use thiserror::Error;

/// Errors from querying the balance tool.
#[derive(Error, Debug)]
pub enum OracleError {
    /// The tool could not be started (missing binary, permissions).
    #[error("Failed to start balance tool {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran and exited unsuccessfully.
    #[error("Balance tool failed ({status}): {stderr}")]
    ToolFailed { status: String, stderr: String },

    #[error("Balance tool did not answer within {0:?}")]
    Timeout(Duration),

    /// The tool succeeded but its output is not the expected JSON document.
    #[error("Malformed balance response: {0}")]
    MalformedResponse(String),
}

impl OracleError {
    /// True when the tool itself failed to produce an answer, as opposed to answering garbage.
    pub fn is_invocation_failure(&self) -> bool {
        matches!(
            self,
            OracleError::Spawn { .. } | OracleError::ToolFailed { .. } | OracleError::Timeout(_)
        )
    }
}
