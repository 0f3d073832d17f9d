//! # iosfacts
//!
//! Async Cisco IOS CLI sessions: apply command files with a per-command
//! verdict, and gather a typed facts document from the device's show
//! reports.
//!
//! ## Features
//!
//! - Async SSH sessions via russh, with prompt detection over an
//!   ANSI-stripped buffer
//! - Fail-fast command application driven by the device's `% ` error marker
//! - Declarative, table-driven parsers for interfaces, BGP, VRFs, version
//!   and hostname reports
//! - A scripted [`ReplayTransport`](transport::ReplayTransport) for offline runs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use iosfacts::SessionBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), iosfacts::Error> {
//!     let session = SessionBuilder::new("192.0.2.10")
//!         .username("admin")
//!         .password("secret")
//!         .build()?;
//!
//!     let facts = session.gather_facts().await?;
//!     for (name, interface) in &facts.interfaces {
//!         println!("{name}: {}", interface.status);
//!     }
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod driver;
pub mod error;
pub mod facts;
pub mod parse;
pub mod platform;
pub mod transport;

// Re-export main types for convenience
pub use driver::{CommandOutcome, Credentials, Session, SessionBuilder, read_command_file};
pub use error::{Error, Result};
pub use facts::Facts;
pub use platform::PlatformDefinition;
pub use transport::{SshConfig, Transport};
