//! Single-command execution and verdict classification.

use log::{debug, warn};

use super::outcome::CommandOutcome;
use crate::error::{Error, Result};
use crate::transport::Transport;

/// Runs commands over a transport and classifies each response.
pub struct CommandExecutor<'a, T> {
    transport: &'a mut T,
    marker: &'a str,
}

impl<'a, T: Transport> CommandExecutor<'a, T> {
    /// Create an executor that treats lines starting with `marker` as rejections.
    pub fn new(transport: &'a mut T, marker: &'a str) -> Self {
        Self { transport, marker }
    }

    /// Send `command` and classify its response.
    ///
    /// Transport failures are errors; a rejection by the device is a
    /// failed [`CommandOutcome`].
    pub async fn execute(&mut self, command: &str) -> Result<CommandOutcome> {
        self.run(command).await.map(|(outcome, _)| outcome)
    }

    /// Send `command` and return its response, failing if the device rejected it.
    pub async fn query(&mut self, command: &str) -> Result<String> {
        let (outcome, response) = self.run(command).await?;
        match outcome.failure_message {
            None => Ok(response),
            Some(message) => Err(Error::CommandRejected {
                command: outcome.command,
                message,
            }),
        }
    }

    async fn run(&mut self, command: &str) -> Result<(CommandOutcome, String)> {
        debug!("executing '{}'", command);
        let response = self.transport.send(command).await?;

        let outcome = classify(command, &response, self.marker);
        if let Some(message) = &outcome.failure_message {
            warn!("'{}' rejected: {}", command, message);
        }
        Ok((outcome, response))
    }
}

/// Classify a command response.
///
/// The first line starting with `marker` rejects the command. The
/// diagnostic is the line before it, or empty when the marker opens the
/// response. Later markers are ignored.
///
/// ```rust
/// use iosfacts::driver::classify;
///
/// let response = "router(config)#ip route 10.0.0.0 255.0.0.0\n\
///                 Bad mask /8 for address 10.0.0.0\n\
///                 % Invalid input detected at '^' marker.";
/// let outcome = classify("ip route 10.0.0.0 255.0.0.0", response, "% ");
/// assert_eq!(outcome.message(), "Bad mask /8 for address 10.0.0.0");
/// ```
pub fn classify(command: &str, response: &str, marker: &str) -> CommandOutcome {
    let mut previous = "";
    for line in response.lines() {
        if line.starts_with(marker) {
            return CommandOutcome::failed(command, previous);
        }
        previous = line;
    }
    CommandOutcome::success(command)
}
