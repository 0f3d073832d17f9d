//! Transport capability and its implementations.
//!
//! A [`Transport`] carries one strictly sequential CLI conversation: a
//! command goes out, the full response up to the next prompt comes back,
//! and only then may the next command be sent.
//!
//! - [`SshTransport`] talks to a real device over SSH (russh).
//! - [`ReplayTransport`] answers from a script, for tests and offline runs.

pub mod config;
pub mod replay;
mod ssh;

use std::future::Future;

use secrecy::SecretString;

pub use config::{HostKeyVerification, SshConfig};
pub use replay::{ReplayTransport, TransportEvent};
pub use ssh::SshTransport;

use crate::error::Result;

/// A line-oriented CLI connection to a device.
pub trait Transport: Send {
    /// Establish the underlying connection.
    fn open(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Log in and wait for the first prompt.
    fn authenticate(
        &mut self,
        username: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Raise the session to the privileged level using `secret`.
    fn elevate(&mut self, secret: &SecretString) -> impl Future<Output = Result<()>> + Send;

    /// Send one command and return its response, echo included, prompt excluded.
    fn send(&mut self, command: &str) -> impl Future<Output = Result<String>> + Send;

    /// Tear down the connection. Closing a transport that is not open is a no-op.
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;
}

impl<T: Transport> Transport for &mut T {
    fn open(&mut self) -> impl Future<Output = Result<()>> + Send {
        (**self).open()
    }

    fn authenticate(
        &mut self,
        username: &str,
        password: &SecretString,
    ) -> impl Future<Output = Result<()>> + Send {
        (**self).authenticate(username, password)
    }

    fn elevate(&mut self, secret: &SecretString) -> impl Future<Output = Result<()>> + Send {
        (**self).elevate(secret)
    }

    fn send(&mut self, command: &str) -> impl Future<Output = Result<String>> + Send {
        (**self).send(command)
    }

    fn close(&mut self) -> impl Future<Output = Result<()>> + Send {
        (**self).close()
    }
}
