//! Scripted in-memory transport.
//!
//! Answers each command from a response table and records every
//! lifecycle call, so command runs and fact gathering can be exercised
//! against captured device output without a device.
//!
//! # Example
//!
//! ```rust
//! use iosfacts::transport::{ReplayTransport, Transport, TransportEvent};
//!
//! # tokio_test::block_on(async {
//! let mut transport = ReplayTransport::new()
//!     .respond("show clock", "*10:00:00.000 UTC Mon Oct 19 2026");
//!
//! transport.open().await.unwrap();
//! let output = transport.send("show clock").await.unwrap();
//! assert_eq!(output, "*10:00:00.000 UTC Mon Oct 19 2026");
//! assert_eq!(transport.sent_commands(), vec!["show clock"]);
//! # });
//! ```

use std::collections::HashMap;

use log::trace;
use secrecy::SecretString;

use super::Transport;
use crate::error::{Result, SessionError, TransportError};

/// A lifecycle call observed by a [`ReplayTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Open,
    Authenticate { username: String },
    Elevate,
    Send(String),
    Close,
}

/// The call a [`ReplayTransport`] should fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    Open,
    Authenticate,
    Elevate,
    /// Fail when this exact command is sent.
    Command(String),
    Close,
}

/// Transport that replays scripted responses.
#[derive(Debug, Default)]
pub struct ReplayTransport {
    responses: HashMap<String, String>,
    echo_prompt: Option<String>,
    failure: Option<Failure>,
    events: Vec<TransportEvent>,
    is_open: bool,
}

impl ReplayTransport {
    /// Create a transport that answers every command with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command` with `response`.
    pub fn respond(mut self, command: impl Into<String>, response: impl Into<String>) -> Self {
        self.responses.insert(command.into(), response.into());
        self
    }

    /// Prefix every response with an echo line `<prompt><command>`, as a device does.
    pub fn with_echo(mut self, prompt: impl Into<String>) -> Self {
        self.echo_prompt = Some(prompt.into());
        self
    }

    /// Fail the given call.
    pub fn fail_on(mut self, failure: Failure) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Every lifecycle call in order.
    pub fn events(&self) -> &[TransportEvent] {
        &self.events
    }

    /// The commands sent, in order.
    pub fn sent_commands(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                TransportEvent::Send(command) => Some(command.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether the transport is currently open.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    fn check(&self, failure: Failure, stage: &str) -> Result<()> {
        if self.failure.as_ref() == Some(&failure) {
            return Err(TransportError::Injected(stage.to_string()).into());
        }
        Ok(())
    }

    fn require_open(&self) -> Result<()> {
        if !self.is_open {
            return Err(SessionError::NotConnected.into());
        }
        Ok(())
    }
}

impl Transport for ReplayTransport {
    async fn open(&mut self) -> Result<()> {
        if self.is_open {
            return Err(SessionError::AlreadyConnected.into());
        }
        self.events.push(TransportEvent::Open);
        self.check(Failure::Open, "open")?;
        self.is_open = true;
        Ok(())
    }

    async fn authenticate(&mut self, username: &str, _password: &SecretString) -> Result<()> {
        self.require_open()?;
        self.events.push(TransportEvent::Authenticate {
            username: username.to_string(),
        });
        self.check(Failure::Authenticate, "authenticate")?;
        Ok(())
    }

    async fn elevate(&mut self, _secret: &SecretString) -> Result<()> {
        self.require_open()?;
        self.events.push(TransportEvent::Elevate);
        self.check(Failure::Elevate, "elevate")?;
        Ok(())
    }

    async fn send(&mut self, command: &str) -> Result<String> {
        self.require_open()?;
        self.events.push(TransportEvent::Send(command.to_string()));
        self.check(Failure::Command(command.to_string()), "send")?;

        let response = self.responses.get(command).map(String::as_str).unwrap_or("");
        trace!("replaying {} bytes for '{}'", response.len(), command);

        Ok(match &self.echo_prompt {
            Some(prompt) => format!("{prompt}{command}\n{response}"),
            None => response.to_string(),
        })
    }

    async fn close(&mut self) -> Result<()> {
        if !self.is_open {
            return Ok(());
        }
        self.events.push(TransportEvent::Close);
        self.is_open = false;
        self.check(Failure::Close, "close")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_before_open() {
        let mut transport = ReplayTransport::new();
        let err = tokio_test::block_on(transport.send("show version")).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Session(SessionError::NotConnected)
        ));
    }

    #[test]
    fn test_echo() {
        let mut transport = ReplayTransport::new()
            .with_echo("router#")
            .respond("show clock", "10:00");
        tokio_test::block_on(async {
            transport.open().await.unwrap();
            let output = transport.send("show clock").await.unwrap();
            assert_eq!(output, "router#show clock\n10:00");
        });
    }

    #[test]
    fn test_injected_command_failure() {
        let mut transport = ReplayTransport::new().fail_on(Failure::Command("reload".into()));
        tokio_test::block_on(async {
            transport.open().await.unwrap();
            assert!(transport.send("show clock").await.is_ok());
            assert!(transport.send("reload").await.is_err());
        });
        assert_eq!(transport.sent_commands(), vec!["show clock", "reload"]);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut transport = ReplayTransport::new();
        tokio_test::block_on(async {
            transport.close().await.unwrap();
            transport.open().await.unwrap();
            transport.close().await.unwrap();
            transport.close().await.unwrap();
        });
        assert_eq!(transport.events(), &[TransportEvent::Open, TransportEvent::Close]);
    }
}
