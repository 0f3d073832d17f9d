//! SSH transport implementation using russh.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use log::{debug, warn};
use russh::client::{self, Handle};
use russh::keys::PublicKey;
use secrecy::{ExposeSecret, SecretString};
use tokio::net::TcpStream;

use super::Transport;
use super::config::{HostKeyVerification, SshConfig};
use crate::channel::ShellChannel;
use crate::error::{Result, SessionError, TransportError};
use crate::platform::{PlatformDefinition, strip_prompt};

/// IOS gives up after this many wrong secrets.
const ELEVATE_ATTEMPTS: usize = 3;

/// SSH transport driving an interactive PTY shell.
///
/// The connection is made in [`open`](Transport::open); the shell is
/// started once [`authenticate`](Transport::authenticate) succeeds.
pub struct SshTransport {
    config: SshConfig,
    platform: PlatformDefinition,
    session: Option<Handle<SshHandler>>,
    shell: Option<ShellChannel>,
}

impl SshTransport {
    /// Create an unconnected transport.
    pub fn new(config: SshConfig, platform: PlatformDefinition) -> Self {
        Self {
            config,
            platform,
            session: None,
            shell: None,
        }
    }

    /// The connection configuration.
    pub fn config(&self) -> &SshConfig {
        &self.config
    }

    fn shell(&mut self) -> Result<&mut ShellChannel> {
        self.shell
            .as_mut()
            .ok_or_else(|| SessionError::NotConnected.into())
    }

    async fn start_shell(&mut self) -> Result<()> {
        let session = self.session.as_ref().ok_or(SessionError::NotConnected)?;
        let channel = session
            .channel_open_session()
            .await
            .map_err(TransportError::Ssh)?;

        channel
            .request_pty(
                true,
                "xterm",
                self.platform.terminal_width,
                self.platform.terminal_height,
                0,
                0,
                &[],
            )
            .await
            .map_err(TransportError::Ssh)?;
        channel
            .request_shell(true)
            .await
            .map_err(TransportError::Ssh)?;

        let mut shell = ShellChannel::new(channel, self.config.search_depth, self.config.read_timeout);
        let (banner, _) = shell.read_until(&[&self.platform.prompt_pattern]).await?;
        debug!("initial prompt: {:?}", last_line(&banner));

        self.shell = Some(shell);
        Ok(())
    }
}

impl Transport for SshTransport {
    async fn open(&mut self) -> Result<()> {
        if self.session.is_some() {
            return Err(SessionError::AlreadyConnected.into());
        }

        let timeout = self.config.connect_timeout;
        debug!("connecting to {}", self.config.socket_addr());

        let stream = tokio::time::timeout(timeout, TcpStream::connect(self.config.socket_addr()))
            .await
            .map_err(|_| TransportError::Timeout(timeout))?
            .map_err(|source| TransportError::ConnectionFailed {
                host: self.config.host.clone(),
                port: self.config.port,
                source,
            })?;

        let ssh_config = Arc::new(client::Config::default());
        let host_key_error: Arc<Mutex<Option<TransportError>>> = Arc::new(Mutex::new(None));
        let handler = SshHandler {
            host: self.config.host.clone(),
            port: self.config.port,
            host_key_verification: self.config.host_key_verification.clone(),
            known_hosts_path: self.config.known_hosts_path.clone(),
            host_key_error: host_key_error.clone(),
        };

        let session = tokio::time::timeout(timeout, client::connect_stream(ssh_config, stream, handler))
            .await
            .map_err(|_| TransportError::Timeout(timeout))?
            .map_err(|e| {
                // Prefer the detailed host key verdict over russh's UnknownKey
                host_key_error
                    .lock()
                    .ok()
                    .and_then(|mut slot| slot.take())
                    .unwrap_or(TransportError::Ssh(e))
            })?;

        self.session = Some(session);
        Ok(())
    }

    async fn authenticate(&mut self, username: &str, password: &SecretString) -> Result<()> {
        let session = self.session.as_mut().ok_or(SessionError::NotConnected)?;

        let success = session
            .authenticate_password(username, password.expose_secret())
            .await
            .map_err(TransportError::Ssh)?
            .success();
        if !success {
            return Err(TransportError::AuthenticationFailed {
                user: username.to_string(),
            }
            .into());
        }
        debug!("authenticated as {}", username);

        self.start_shell().await
    }

    async fn elevate(&mut self, secret: &SecretString) -> Result<()> {
        let command = self.platform.elevate_command.clone();
        let password_prompt = self.platform.password_prompt.clone();
        let prompt = self.platform.prompt_pattern.clone();
        let shell = self.shell()?;

        shell.write_line(&command).await?;
        let (mut output, mut matched) = shell.read_until(&[&password_prompt, &prompt]).await?;

        if matched == 0 {
            shell.write_line(secret.expose_secret()).await?;
            (output, matched) = shell.read_until(&[&password_prompt, &prompt]).await?;

            // Wrong secret: walk the device back to its prompt before failing
            let mut attempts = 1;
            while matched == 0 && attempts < ELEVATE_ATTEMPTS {
                shell.write_line("").await?;
                (output, matched) = shell.read_until(&[&password_prompt, &prompt]).await?;
                attempts += 1;
            }
        }

        let current = last_line(&output).to_string();
        if matched != 1 || !self.platform.is_privileged(&current) {
            return Err(TransportError::ElevationFailed { prompt: current }.into());
        }
        debug!("privileged prompt: {:?}", current);
        Ok(())
    }

    async fn send(&mut self, command: &str) -> Result<String> {
        let prompt = self.platform.prompt_pattern.clone();
        let shell = self.shell()?;

        shell.write_line(command).await?;
        let (raw, _) = shell.read_until(&[&prompt]).await?;
        Ok(strip_prompt(&raw))
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(shell) = self.shell.take() {
            if let Err(e) = shell.close().await {
                debug!("shell channel close failed: {}", e);
            }
        }

        let Some(session) = self.session.take() else {
            return Ok(());
        };
        session
            .disconnect(russh::Disconnect::ByApplication, "", "en")
            .await
            .map_err(TransportError::Ssh)?;
        Ok(())
    }
}

fn last_line(output: &str) -> &str {
    output
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

/// SSH client handler for russh.
struct SshHandler {
    host: String,
    port: u16,
    host_key_verification: HostKeyVerification,
    known_hosts_path: Option<PathBuf>,
    /// Detailed host key error surfaced by `open` instead of the generic
    /// `russh::Error::UnknownKey`.
    host_key_error: Arc<Mutex<Option<TransportError>>>,
}

impl SshHandler {
    /// Check the host key against known_hosts.
    ///
    /// Returns `Ok(true)` if matched, `Ok(false)` if the host is not listed.
    fn check_known_hosts(&self, pubkey: &PublicKey) -> std::result::Result<bool, TransportError> {
        let result = match self.known_hosts_path {
            Some(ref path) => russh::keys::check_known_hosts_path(&self.host, self.port, pubkey, path),
            None => russh::keys::check_known_hosts(&self.host, self.port, pubkey),
        };

        match result {
            Ok(matched) => Ok(matched),
            Err(russh::keys::Error::KeyChanged { line }) => Err(TransportError::HostKeyChanged {
                host: self.host.clone(),
                port: self.port,
                line,
            }),
            Err(e) => Err(TransportError::KnownHosts(e.to_string())),
        }
    }

    fn learn_host_key(&self, pubkey: &PublicKey) -> std::result::Result<(), TransportError> {
        let result = match self.known_hosts_path {
            Some(ref path) => {
                russh::keys::known_hosts::learn_known_hosts_path(&self.host, self.port, pubkey, path)
            }
            None => russh::keys::known_hosts::learn_known_hosts(&self.host, self.port, pubkey),
        };

        result.map_err(|e| TransportError::KnownHosts(e.to_string()))
    }

    fn reject(&self, error: TransportError) -> bool {
        if let Ok(mut slot) = self.host_key_error.lock() {
            *slot = Some(error);
        }
        false
    }
}

impl client::Handler for SshHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        let accepted = match self.host_key_verification {
            HostKeyVerification::Disabled => true,
            HostKeyVerification::AcceptNew => match self.check_known_hosts(server_public_key) {
                Ok(true) => true,
                Ok(false) => {
                    if let Err(e) = self.learn_host_key(server_public_key) {
                        warn!("Failed to save host key: {}", e);
                    }
                    true
                }
                Err(e) => self.reject(e),
            },
            HostKeyVerification::Strict => match self.check_known_hosts(server_public_key) {
                Ok(true) => true,
                Ok(false) => self.reject(TransportError::HostKeyUnknown {
                    host: self.host.clone(),
                    port: self.port,
                }),
                Err(e) => self.reject(e),
            },
        };
        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_line() {
        assert_eq!(last_line("enable\r\nPassword: \r\nrouter#"), "router#");
        assert_eq!(last_line("router>\n\n"), "router>");
        assert_eq!(last_line(""), "");
    }

    #[test]
    fn test_send_before_open() {
        let platform = crate::platform::vendors::cisco_ios::platform().unwrap();
        let mut transport = SshTransport::new(SshConfig::new("192.0.2.1"), platform);
        let err = tokio_test::block_on(transport.send("show version")).unwrap_err();
        assert!(matches!(err, crate::Error::Session(SessionError::NotConnected)));
    }

    #[test]
    fn test_close_without_open() {
        let platform = crate::platform::vendors::cisco_ios::platform().unwrap();
        let mut transport = SshTransport::new(SshConfig::new("192.0.2.1"), platform);
        assert!(tokio_test::block_on(transport.close()).is_ok());
    }
}
