//! Channel layer for prompt-driven reads over an interactive shell.
//!
//! Output is ANSI-stripped as it arrives and prompts are matched against
//! the tail of the buffer.

mod buffer;
mod shell;

pub use buffer::PatternBuffer;
pub use shell::ShellChannel;
