//! Error types for iosfacts.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::parse::ReportKind;

/// Main error type for iosfacts operations.
#[derive(Error, Debug)]
pub enum Error {
    /// SSH transport-level errors (connect, authenticate, elevate)
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel operation errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Session-level misuse or local input errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// The device rejected a command with an error marker
    #[error("Command error: \"{message}\" (command: '{command}')")]
    CommandRejected { command: String, message: String },

    /// A report did not have the shape its parser expects
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Transport layer errors (SSH connection, authentication, privilege).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to connect to host
    #[error("Connection failed to {host}:{port}: {source}")]
    ConnectionFailed {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// SSH handshake or protocol error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// The device did not reach the privileged prompt after elevation
    #[error("Privilege elevation failed, last prompt: '{prompt}'")]
    ElevationFailed { prompt: String },

    /// Host key is not in known_hosts and verification is strict
    #[error("Unknown host key for {host}:{port}")]
    HostKeyUnknown { host: String, port: u16 },

    /// Host key does not match the known_hosts entry
    #[error("Host key for {host}:{port} changed (known_hosts line {line})")]
    HostKeyChanged { host: String, port: u16, line: usize },

    /// known_hosts could not be read or written
    #[error("known_hosts error: {0}")]
    KnownHosts(String),

    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Scripted failure from a replay transport
    #[error("Replay transport failure during {0}")]
    Injected(String),
}

/// Channel layer errors (PTY shell reads and writes).
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Channel closed unexpectedly
    #[error("Channel closed")]
    Closed,

    /// SSH protocol error on the channel
    #[error("Channel SSH error: {0}")]
    Ssh(russh::Error),
}

/// Session layer errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Transport used before `open()`
    #[error("Session not connected - call open() first")]
    NotConnected,

    /// Transport opened twice
    #[error("Session already connected")]
    AlreadyConnected,

    /// Invalid configuration in the session builder
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Command file could not be read
    #[error("Cannot read command file {}: {source}", path.display())]
    CommandFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A report did not match the structure its parser expects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A required header or marker line is absent
    #[error("{report}: missing '{expected}' line")]
    MissingHeader {
        report: ReportKind,
        expected: &'static str,
    },

    /// A field rule could not be applied to its line
    #[error("{report}: line {line} has no '{field}' field: {text:?}")]
    MissingField {
        report: ReportKind,
        line: usize,
        field: &'static str,
        text: String,
    },

    /// A block could not be projected into a record
    #[error("{report}: malformed block at line {line}: {reason}")]
    MalformedBlock {
        report: ReportKind,
        line: usize,
        reason: String,
    },

    /// A field was present but its value is not valid
    #[error("{report}: invalid {field} '{value}' at line {line}")]
    InvalidValue {
        report: ReportKind,
        line: usize,
        field: &'static str,
        value: String,
    },
}

/// Result type alias using iosfacts's Error.
pub type Result<T> = std::result::Result<T, Error>;
