//! Verdict of a command execution.

use std::fmt;

use crate::error::{Error, Result};

/// Whether the device accepted a command, and why not if it didn't.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// The command the verdict is about.
    pub command: String,

    /// Diagnostic line reported by the device, set only on failure.
    pub failure_message: Option<String>,
}

impl CommandOutcome {
    /// An accepted command.
    pub fn success(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            failure_message: None,
        }
    }

    /// A rejected command.
    pub fn failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            failure_message: Some(message.into()),
        }
    }

    /// Check if the device accepted the command.
    pub fn is_success(&self) -> bool {
        self.failure_message.is_none()
    }

    /// The diagnostic message, empty on success.
    pub fn message(&self) -> &str {
        self.failure_message.as_deref().unwrap_or("")
    }

    /// Turn a rejection into [`Error::CommandRejected`].
    pub fn into_result(self) -> Result<()> {
        match self.failure_message {
            None => Ok(()),
            Some(message) => Err(Error::CommandRejected {
                command: self.command,
                message,
            }),
        }
    }
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure_message {
            None => write!(f, "'{}': ok", self.command),
            Some(message) => write!(f, "'{}': failed: {}", self.command, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success() {
        let outcome = CommandOutcome::success("show clock");
        assert!(outcome.is_success());
        assert_eq!(outcome.message(), "");
        assert!(outcome.into_result().is_ok());
    }

    #[test]
    fn test_failed_into_result() {
        let outcome = CommandOutcome::failed("interfce Gi0/1", "router(config)#interfce Gi0/1");
        assert!(!outcome.is_success());

        let err = outcome.into_result().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Command error: \"router(config)#interfce Gi0/1\" (command: 'interfce Gi0/1')"
        );
    }
}
