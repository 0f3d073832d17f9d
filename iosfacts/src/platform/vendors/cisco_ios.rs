//! Cisco IOS platform definition.
//!
//! Two prompt levels are recognized:
//! - user EXEC with a `>` prompt
//! - privileged EXEC (and configuration sub-modes) with a `#` prompt
//!
//! # Prompt Examples
//!
//! ```text
//! router>                 # user EXEC
//! router#                 # privileged EXEC
//! router(config)#         # configuration mode (left with "end")
//! Password:               # enable secret prompt
//! ```

use crate::parse::ReportLayout;
use crate::platform::{PlatformDefinition, ReportCommands};

/// Create the Cisco IOS platform definition.
///
/// Prompts use `(?m)` so `^` matches at line starts within the buffer
/// tail, and `(?-u)` to keep the character classes ASCII.
pub fn platform() -> Result<PlatformDefinition, regex::Error> {
    let report_commands = ReportCommands {
        interfaces: "show interfaces".to_string(),
        bgp_summary: "show ip bgp summary".to_string(),
        route_distinguishers: "show ip bgp vpnv4 all | include Route Distinguisher".to_string(),
        version: "show version".to_string(),
        vrf: "show ip vrf".to_string(),
        hostname: "show running-config | include hostname".to_string(),
    };

    Ok(PlatformDefinition::new(
        "cisco_ios",
        r"(?m-u)^[\w.\-@()/: ]{1,63}[>#]\s?$",
        r"(?m-u)^[\w.\-@()/: ]{1,63}#\s?$",
        r"(?mi-u)^password:\s?$",
        report_commands,
    )?
    .with_elevate("enable")
    .with_paging_command("terminal length 0")
    .with_exit_command("end")
    .with_error_marker("% ")
    .with_layout(ReportLayout::IOS_CLASSIC)
    .with_terminal_size(511, 24))
}
