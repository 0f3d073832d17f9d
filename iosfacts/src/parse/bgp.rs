//! BGP report parsers.
//!
//! - [`parse_summary`] reads `show ip bgp summary`: router identifier and
//!   local AS from the first line, then one neighbor per row after the
//!   `Neighbor` table header.
//! - [`parse_route_distinguishers`] reads the pre-filtered output of
//!   `show ip bgp vpnv4 all | include Route Distinguisher`.

use indexmap::IndexMap;

use super::rules::{BgpSummaryLayout, RouteDistinguisherLayout};
use super::{Line, ReportKind, report_lines};
use crate::error::ParseError;
use crate::facts::{BgpNeighbor, BgpSummary};

/// Parse a BGP summary report.
///
/// The returned summary has no route distinguishers; those come from a
/// separate report.
pub fn parse_summary(report: &str, layout: &BgpSummaryLayout) -> Result<BgpSummary, ParseError> {
    const REPORT: ReportKind = ReportKind::BgpSummary;

    let lines = report_lines(report);
    let mut rows = lines.iter().filter(|l| !l.is_blank());

    let identity = rows
        .next()
        .filter(|l| l.text.starts_with(layout.identifier_marker))
        .ok_or(ParseError::MissingHeader {
            report: REPORT,
            expected: layout.identifier_marker,
        })?;

    let router_id = identity.field(REPORT, "router identifier", &layout.router_id)?;
    let local_as = identity.field(REPORT, "local AS", &layout.local_as)?;

    // Everything up to and including the table header is discarded
    if !rows.any(|l| l.text.starts_with(layout.neighbor_header)) {
        return Err(ParseError::MissingHeader {
            report: REPORT,
            expected: layout.neighbor_header,
        });
    }

    let mut neighbors = IndexMap::new();
    for row in rows {
        let neighbor = parse_neighbor(row, layout)?;
        neighbors.insert(neighbor.address.clone(), neighbor);
    }

    Ok(BgpSummary {
        router_id: router_id.to_string(),
        local_as: local_as.to_string(),
        neighbors,
        route_distinguishers: Vec::new(),
    })
}

fn parse_neighbor(row: &Line<'_>, layout: &BgpSummaryLayout) -> Result<BgpNeighbor, ParseError> {
    const REPORT: ReportKind = ReportKind::BgpSummary;

    Ok(BgpNeighbor {
        address: row.field(REPORT, "neighbor", &layout.address)?.to_string(),
        version: row.field(REPORT, "version", &layout.version)?.to_string(),
        remote_as: row.field(REPORT, "remote AS", &layout.remote_as)?.to_string(),
    })
}

/// Parse route distinguisher announcement lines, keeping report order.
pub fn parse_route_distinguishers(
    report: &str,
    layout: &RouteDistinguisherLayout,
) -> Result<Vec<String>, ParseError> {
    const REPORT: ReportKind = ReportKind::RouteDistinguishers;

    report_lines(report)
        .iter()
        .filter(|l| !l.is_blank())
        .map(|line| {
            if !line.text.contains(layout.marker) {
                return Err(ParseError::MalformedBlock {
                    report: REPORT,
                    line: line.number,
                    reason: format!("expected a '{}' line", layout.marker),
                });
            }
            line.field(REPORT, "route distinguisher", &layout.rd)
                .map(str::to_string)
        })
        .collect()
}
