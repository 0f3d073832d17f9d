//! Platform definitions.
//!
//! A platform bundles the prompt patterns, lifecycle commands, report
//! commands and report layouts of one kind of device.

mod definition;
pub mod vendors;

pub use definition::{PlatformDefinition, ReportCommands};

/// Remove the trailing prompt line from raw output.
///
/// The echoed command line is kept: it is part of the response a command
/// verdict is read from. Line endings are normalized to `\n`.
pub fn strip_prompt(raw: &str) -> String {
    let output = raw.replace("\r\n", "\n");
    let output = output.trim_end_matches(['\r', '\n', ' ']);

    match output.rfind('\n') {
        Some(pos) => output[..pos].to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_prompt() {
        let raw = "router#show clock\r\n*10:00:00.000 UTC Mon Oct 19 2026\r\nrouter#";
        assert_eq!(strip_prompt(raw), "router#show clock\n*10:00:00.000 UTC Mon Oct 19 2026");
    }

    #[test]
    fn test_strip_prompt_only() {
        assert_eq!(strip_prompt("router#"), "");
    }
}
