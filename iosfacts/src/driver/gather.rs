//! Fact gathering from the device's show reports.

use log::debug;

use super::executor::CommandExecutor;
use crate::error::Result;
use crate::facts::Facts;
use crate::parse::{self, bgp, hostname, interfaces, version, vrf};
use crate::platform::PlatformDefinition;
use crate::transport::Transport;

/// Issues the report commands of a platform and parses the results.
pub struct FactAggregator<'a, T> {
    executor: CommandExecutor<'a, T>,
    platform: &'a PlatformDefinition,
}

impl<'a, T: Transport> FactAggregator<'a, T> {
    /// Create an aggregator over an open, privileged transport.
    pub fn new(transport: &'a mut T, platform: &'a PlatformDefinition) -> Self {
        Self {
            executor: CommandExecutor::new(transport, &platform.error_marker),
            platform,
        }
    }

    /// Fetch every report and assemble the facts.
    ///
    /// Reports are requested in a fixed order: interfaces, BGP summary,
    /// route distinguishers, version, VRFs, hostname. The first rejected
    /// command or malformed report aborts the gather.
    pub async fn gather(&mut self) -> Result<Facts> {
        let platform = self.platform;
        let commands = &platform.report_commands;
        let layout = &platform.layout;

        let report = self.report(&commands.interfaces).await?;
        let interfaces = interfaces::parse(&report, &layout.interfaces)?;

        let report = self.report(&commands.bgp_summary).await?;
        let mut summary = bgp::parse_summary(&report, &layout.bgp_summary)?;

        let report = self.report(&commands.route_distinguishers).await?;
        summary.route_distinguishers =
            bgp::parse_route_distinguishers(&report, &layout.route_distinguishers)?;

        let report = self.report(&commands.version).await?;
        let version = version::parse(&report, &layout.version)?;

        let report = self.report(&commands.vrf).await?;
        let vrf = vrf::parse(&report, &layout.vrf)?;

        let report = self.report(&commands.hostname).await?;
        let hostname = hostname::parse(&report, &layout.hostname)?;

        debug!(
            "gathered {} interfaces, {} BGP neighbors, {} VRFs",
            interfaces.len(),
            summary.neighbors.len(),
            vrf.len()
        );

        Ok(Facts {
            version,
            hostname,
            interfaces,
            bgp: summary,
            vrf,
        })
    }

    async fn report(&mut self, command: &str) -> Result<String> {
        debug!("fetching report '{}'", command);
        let response = self.executor.query(command).await?;
        Ok(parse::strip_echo(command, &response).to_string())
    }
}
