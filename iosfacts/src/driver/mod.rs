//! Session lifecycle and the command and fact workflows.
//!
//! A [`Session`] owns one transport for one unit of work. Both workflows
//! follow the same lifecycle:
//!
//! 1. open the transport
//! 2. authenticate, elevate, disable paging
//! 3. run the commands or gather the facts
//! 4. send the terminating command and close
//!
//! Step 4 runs on every path once step 1 has succeeded. If the work failed,
//! teardown errors are only logged and the original error is returned.

mod builder;
mod executor;
mod gather;
mod outcome;
mod runner;

pub use builder::SessionBuilder;
pub use executor::{CommandExecutor, classify};
pub use gather::FactAggregator;
pub use outcome::CommandOutcome;
pub use runner::{CommandFileRunner, read_command_file};

use log::{debug, warn};
use secrecy::SecretString;

use crate::error::Result;
use crate::facts::Facts;
use crate::platform::PlatformDefinition;
use crate::transport::Transport;

/// Login credentials for a session.
///
/// Secrets are held in [`SecretString`] and never logged.
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
    /// Secret for privilege elevation; the login password when unset.
    pub enable_secret: Option<SecretString>,
}

impl Credentials {
    /// Credentials that reuse the login password for elevation.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
            enable_secret: None,
        }
    }

    /// Use a separate elevation secret.
    pub fn with_enable_secret(mut self, secret: impl Into<String>) -> Self {
        self.enable_secret = Some(SecretString::from(secret.into()));
        self
    }

    fn elevation_secret(&self) -> &SecretString {
        self.enable_secret.as_ref().unwrap_or(&self.password)
    }
}

/// A single-use CLI session with one device.
///
/// # Example
///
/// ```rust,no_run
/// use iosfacts::driver::{Credentials, Session};
/// use iosfacts::platform::vendors::cisco_ios;
/// use iosfacts::transport::{SshConfig, SshTransport};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let platform = cisco_ios::platform()?;
/// let transport = SshTransport::new(SshConfig::new("192.0.2.10"), platform.clone());
/// let session = Session::new(transport, platform, Credentials::new("admin", "secret"));
///
/// let facts = session.gather_facts().await?;
/// println!("{} runs {}", facts.hostname, facts.version.image);
/// # Ok(())
/// # }
/// ```
pub struct Session<T> {
    transport: T,
    platform: PlatformDefinition,
    credentials: Credentials,
}

impl<T: Transport> Session<T> {
    /// Create a session; nothing is sent until a workflow runs.
    pub fn new(transport: T, platform: PlatformDefinition, credentials: Credentials) -> Self {
        Self {
            transport,
            platform,
            credentials,
        }
    }

    /// The platform this session drives.
    pub fn platform(&self) -> &PlatformDefinition {
        &self.platform
    }

    /// Apply `commands` in order, stopping at the first rejection.
    ///
    /// A rejected command is returned as [`Error::CommandRejected`](crate::Error::CommandRejected).
    pub async fn apply_commands<S: AsRef<str>>(mut self, commands: &[S]) -> Result<()> {
        self.transport.open().await?;
        let result = self.apply(commands).await;
        self.finish(result).await
    }

    /// Gather the device facts.
    pub async fn gather_facts(mut self) -> Result<Facts> {
        self.transport.open().await?;
        let result = self.gather().await;
        self.finish(result).await
    }

    async fn apply<S: AsRef<str>>(&mut self, commands: &[S]) -> Result<()> {
        self.prepare().await?;
        let executor = CommandExecutor::new(&mut self.transport, &self.platform.error_marker);
        CommandFileRunner::new(executor)
            .run_all(commands)
            .await?
            .into_result()
    }

    async fn gather(&mut self) -> Result<Facts> {
        self.prepare().await?;
        FactAggregator::new(&mut self.transport, &self.platform)
            .gather()
            .await
    }

    async fn prepare(&mut self) -> Result<()> {
        let credentials = &self.credentials;
        self.transport
            .authenticate(&credentials.username, &credentials.password)
            .await?;
        self.transport
            .elevate(credentials.elevation_secret())
            .await?;

        if !self.platform.paging_command.is_empty() {
            CommandExecutor::new(&mut self.transport, &self.platform.error_marker)
                .execute(&self.platform.paging_command)
                .await?
                .into_result()?;
        }
        debug!("session ready on {}", self.platform.name);
        Ok(())
    }

    async fn finish<R>(&mut self, result: Result<R>) -> Result<R> {
        let teardown = self.teardown().await;
        match (result, teardown) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(teardown)) => {
                warn!("teardown after failure also failed: {}", teardown);
                Err(e)
            }
        }
    }

    async fn teardown(&mut self) -> Result<()> {
        let exit = if self.platform.exit_command.is_empty() {
            Ok(())
        } else {
            self.transport
                .send(&self.platform.exit_command)
                .await
                .map(drop)
        };
        let close = self.transport.close().await;
        exit.and(close)
    }
}
