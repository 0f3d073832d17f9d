//! Platform definition for device-specific configuration.

use regex::bytes::Regex;

use crate::parse::ReportLayout;

/// Commands that produce the reports the facts are built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCommands {
    pub interfaces: String,
    pub bgp_summary: String,
    pub route_distinguishers: String,
    pub version: String,
    pub vrf: String,
    pub hostname: String,
}

/// Platform definition containing all device-specific configuration.
///
/// Prompts and lifecycle commands drive the session; the report commands
/// and [`ReportLayout`] drive fact gathering. Supporting a new software
/// train usually means swapping the layout and leaving the rest alone.
#[derive(Debug, Clone)]
pub struct PlatformDefinition {
    /// Platform name (e.g., "cisco_ios").
    pub name: String,

    /// Matches any CLI prompt at the end of the output.
    pub prompt_pattern: Regex,

    /// Matches only the privileged (administrative) prompt.
    pub privileged_pattern: Regex,

    /// Matches the secret prompt shown during elevation.
    pub password_prompt: Regex,

    /// Command that starts privilege elevation.
    pub elevate_command: String,

    /// Command that disables output paging.
    pub paging_command: String,

    /// Command sent before every close.
    pub exit_command: String,

    /// Line prefix the device uses to reject a command.
    pub error_marker: String,

    /// Commands producing the fact reports.
    pub report_commands: ReportCommands,

    /// Field extraction tables for the fact reports.
    pub layout: ReportLayout,

    /// Terminal width for PTY.
    pub terminal_width: u32,

    /// Terminal height for PTY.
    pub terminal_height: u32,
}

impl PlatformDefinition {
    /// Create a new platform definition from its prompt patterns.
    ///
    /// Lifecycle commands default to empty and the layout to
    /// [`ReportLayout::IOS_CLASSIC`]; use the `with_*` methods to fill in the rest.
    pub fn new(
        name: impl Into<String>,
        prompt: &str,
        privileged: &str,
        password: &str,
        report_commands: ReportCommands,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            prompt_pattern: Regex::new(prompt)?,
            privileged_pattern: Regex::new(privileged)?,
            password_prompt: Regex::new(password)?,
            elevate_command: String::new(),
            paging_command: String::new(),
            exit_command: String::new(),
            error_marker: "% ".to_string(),
            report_commands,
            layout: ReportLayout::IOS_CLASSIC,
            terminal_width: 511,
            terminal_height: 24,
        })
    }

    /// Set the elevation command.
    pub fn with_elevate(mut self, command: impl Into<String>) -> Self {
        self.elevate_command = command.into();
        self
    }

    /// Set the paging-off command.
    pub fn with_paging_command(mut self, command: impl Into<String>) -> Self {
        self.paging_command = command.into();
        self
    }

    /// Set the terminating command.
    pub fn with_exit_command(mut self, command: impl Into<String>) -> Self {
        self.exit_command = command.into();
        self
    }

    /// Set the error marker prefix.
    pub fn with_error_marker(mut self, marker: impl Into<String>) -> Self {
        self.error_marker = marker.into();
        self
    }

    /// Set the report layout.
    pub fn with_layout(mut self, layout: ReportLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set terminal dimensions.
    pub fn with_terminal_size(mut self, width: u32, height: u32) -> Self {
        self.terminal_width = width;
        self.terminal_height = height;
        self
    }

    /// Check whether `prompt` is the privileged prompt.
    pub fn is_privileged(&self, prompt: &str) -> bool {
        self.privileged_pattern.is_match(prompt.as_bytes())
    }
}
