//! Fail-fast execution of command lists.

use std::path::Path;

use log::info;

use super::executor::CommandExecutor;
use super::outcome::CommandOutcome;
use crate::error::{Result, SessionError};
use crate::transport::Transport;

/// Runs an ordered list of commands, stopping at the first rejection.
pub struct CommandFileRunner<'a, T> {
    executor: CommandExecutor<'a, T>,
}

impl<'a, T: Transport> CommandFileRunner<'a, T> {
    /// Create a runner around an executor.
    pub fn new(executor: CommandExecutor<'a, T>) -> Self {
        Self { executor }
    }

    /// Execute `commands` in order.
    ///
    /// Returns the first failed outcome, leaving the remaining commands
    /// unsent, or the outcome of the last command when all succeed. No
    /// rollback is attempted.
    pub async fn run_all<S: AsRef<str>>(&mut self, commands: &[S]) -> Result<CommandOutcome> {
        let mut last = CommandOutcome::success("");
        for command in commands {
            last = self.executor.execute(command.as_ref()).await?;
            if !last.is_success() {
                return Ok(last);
            }
        }
        info!("applied {} commands", commands.len());
        Ok(last)
    }
}

/// Load a command file: one command per line, in file order.
///
/// Line terminators are removed; nothing else is trimmed.
pub fn read_command_file(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| SessionError::CommandFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text.lines().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ReplayTransport;

    fn run(transport: &mut ReplayTransport, commands: &[&str]) -> CommandOutcome {
        tokio_test::block_on(async {
            transport.open().await.unwrap();
            let mut runner = CommandFileRunner::new(CommandExecutor::new(transport, "% "));
            runner.run_all(commands).await.unwrap()
        })
    }

    #[test]
    fn test_all_succeed() {
        let mut transport = ReplayTransport::new();
        let outcome = run(&mut transport, &["interface Lo0", "description mgmt", "exit"]);
        assert!(outcome.is_success());
        assert_eq!(transport.sent_commands(), vec!["interface Lo0", "description mgmt", "exit"]);
    }

    #[test]
    fn test_stops_at_first_rejection() {
        let mut transport = ReplayTransport::new()
            .with_echo("router(config)#")
            .respond("ip adress 10.0.0.1 255.0.0.0", "                  ^\n% Invalid input detected at '^' marker.");
        let outcome = run(
            &mut transport,
            &["interface Lo0", "ip adress 10.0.0.1 255.0.0.0", "no shutdown"],
        );

        assert_eq!(outcome.command, "ip adress 10.0.0.1 255.0.0.0");
        assert_eq!(outcome.message(), "                  ^");
        assert_eq!(transport.sent_commands(), vec!["interface Lo0", "ip adress 10.0.0.1 255.0.0.0"]);
    }

    #[test]
    fn test_empty_list() {
        let mut transport = ReplayTransport::new();
        assert!(run(&mut transport, &[]).is_success());
        assert!(transport.sent_commands().is_empty());
    }

    #[test]
    fn test_read_command_file() {
        let path = std::env::temp_dir().join(format!("iosfacts-commands-{}.txt", std::process::id()));
        std::fs::write(&path, "interface Lo0\r\n description  mgmt \n\nexit\n").unwrap();

        let commands = read_command_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(commands, vec!["interface Lo0", " description  mgmt ", "", "exit"]);
    }

    #[test]
    fn test_read_missing_command_file() {
        let err = read_command_file("/nonexistent/iosfacts/commands.txt").unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Session(SessionError::CommandFile { ref path, .. })
                if path.ends_with("commands.txt")
        ));
    }
}
