//! Builder for SSH sessions.

use std::path::PathBuf;
use std::time::Duration;

use super::{Credentials, Session};
use crate::error::{Result, SessionError};
use crate::platform::PlatformDefinition;
use crate::platform::vendors::cisco_ios;
use crate::transport::{HostKeyVerification, SshConfig, SshTransport};

/// Builder for constructing SSH sessions.
///
/// # Example
///
/// ```rust,no_run
/// use iosfacts::driver::SessionBuilder;
///
/// # async fn example() -> Result<(), iosfacts::Error> {
/// let session = SessionBuilder::new("192.0.2.10")
///     .username("admin")
///     .password("secret")
///     .enable_secret("class")
///     .build()?;
///
/// session.apply_commands(&["interface Loopback0", "description mgmt"]).await?;
/// # Ok(())
/// # }
/// ```
pub struct SessionBuilder {
    config: SshConfig,
    username: Option<String>,
    password: Option<String>,
    enable_secret: Option<String>,
    platform: Option<PlatformDefinition>,
    terminal_size: Option<(u32, u32)>,
}

impl SessionBuilder {
    /// Create a new session builder for the specified host.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            config: SshConfig::new(host),
            username: None,
            password: None,
            enable_secret: None,
            platform: None,
            terminal_size: None,
        }
    }

    /// Set the SSH port (default: 22).
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the username for authentication.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the login password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the privilege elevation secret (default: the login password).
    pub fn enable_secret(mut self, secret: impl Into<String>) -> Self {
        self.enable_secret = Some(secret.into());
        self
    }

    /// Use a custom platform definition instead of Cisco IOS.
    pub fn platform(mut self, platform: PlatformDefinition) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Set the TCP connect and SSH handshake timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Bound every prompt wait (default: wait indefinitely).
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = Some(timeout);
        self
    }

    /// Set terminal dimensions.
    pub fn terminal_size(mut self, width: u32, height: u32) -> Self {
        self.terminal_size = Some((width, height));
        self
    }

    /// Set the host key verification mode.
    pub fn host_key_verification(mut self, mode: HostKeyVerification) -> Self {
        self.config.host_key_verification = mode;
        self
    }

    /// Use a known_hosts file other than `~/.ssh/known_hosts`.
    pub fn known_hosts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.known_hosts_path = Some(path.into());
        self
    }

    /// Build the session.
    ///
    /// Nothing is sent to the device until a workflow runs on the session.
    pub fn build(self) -> Result<Session<SshTransport>> {
        let username = self.username.ok_or_else(|| SessionError::InvalidConfig {
            message: "Username is required".to_string(),
        })?;
        let password = self.password.ok_or_else(|| SessionError::InvalidConfig {
            message: "Password is required".to_string(),
        })?;

        let mut platform = match self.platform {
            Some(platform) => platform,
            None => cisco_ios::platform().map_err(|e| SessionError::InvalidConfig {
                message: format!("Invalid platform pattern: {e}"),
            })?,
        };
        if let Some((width, height)) = self.terminal_size {
            platform = platform.with_terminal_size(width, height);
        }

        let mut credentials = Credentials::new(username, password);
        if let Some(secret) = self.enable_secret {
            credentials = credentials.with_enable_secret(secret);
        }

        let transport = SshTransport::new(self.config, platform.clone());
        Ok(Session::new(transport, platform, credentials))
    }
}
