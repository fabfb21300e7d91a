//! Failures a command can end with. Each one becomes a reply; none escapes the handler.

use balance_oracle::OracleError;
use storage::StorageError;
use thiserror::Error;

use super::commands::Command;
use super::replies;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("missing argument for /{}", .0.name())]
    MissingArgument(Command),

    #[error("address {0} is registered to another user")]
    DuplicateAddress(String),

    #[error("user has no registered address")]
    NotRegistered,

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl CommandError {
    /// Text sent back to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            CommandError::MissingArgument(Command::Register) => replies::REGISTER_USAGE,
            CommandError::MissingArgument(Command::SetName) => replies::SETNAME_USAGE,
            CommandError::MissingArgument(_) => replies::GENERIC_USAGE,
            CommandError::DuplicateAddress(_) => replies::DUPLICATE_ADDRESS,
            CommandError::NotRegistered => replies::NOT_REGISTERED,
            CommandError::Oracle(e) if e.is_invocation_failure() => replies::TOOL_FAILED,
            CommandError::Oracle(_) => replies::MALFORMED_RESPONSE,
            CommandError::Storage(_) => replies::STORE_FAILED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_tool_failures_and_garbage_get_distinct_replies() {
        let crashed = CommandError::Oracle(OracleError::ToolFailed {
            status: "exit status: 1".to_string(),
            stderr: String::new(),
        });
        let timed_out = CommandError::Oracle(OracleError::Timeout(Duration::from_secs(10)));
        let garbage = CommandError::Oracle(OracleError::MalformedResponse("eof".to_string()));

        assert_eq!(crashed.user_message(), replies::TOOL_FAILED);
        assert_eq!(timed_out.user_message(), replies::TOOL_FAILED);
        assert_eq!(garbage.user_message(), replies::MALFORMED_RESPONSE);
        assert_ne!(crashed.user_message(), garbage.user_message());
    }

    #[test]
    fn test_usage_depends_on_command() {
        assert_eq!(
            CommandError::MissingArgument(Command::Register).user_message(),
            replies::REGISTER_USAGE
        );
        assert_eq!(
            CommandError::MissingArgument(Command::SetName).user_message(),
            replies::SETNAME_USAGE
        );
    }
}
