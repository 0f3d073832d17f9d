//! `show ip vrf` parser.
//!
//! ```text
//!   Name                             Default RD          Interfaces
//!   BLUE                             65010:101           Lo101
//!                                                        Gi0/0.101
//! ```
//!
//! After the header, a VRF block starts on a line that is non-blank at the
//! layout's block column; following lines that are blank there list more
//! interfaces of the same VRF.

use indexmap::IndexMap;

use super::rules::VrfLayout;
use super::{Block, BlockSegmenter, Line, LineKind, ReportKind, report_lines};
use crate::error::ParseError;
use crate::facts::VrfDefinition;

const REPORT: ReportKind = ReportKind::Vrf;

/// Parse a VRF report into definitions keyed by VRF name.
///
/// A report with only the header (or no output at all) yields an empty map.
pub fn parse(report: &str, layout: &VrfLayout) -> Result<IndexMap<String, VrfDefinition>, ParseError> {
    let mut content = report_lines(report).into_iter().filter(|l| !l.is_blank());

    let Some(header) = content.next() else {
        return Ok(IndexMap::new());
    };
    if !header.text.contains(layout.header_marker) {
        return Err(ParseError::MissingHeader {
            report: REPORT,
            expected: layout.header_marker,
        });
    }

    let body = content.skip(layout.header_lines.saturating_sub(1));
    let column = layout.block_column;
    let blocks = BlockSegmenter::new(REPORT, move |line: &Line<'_>| classify(line, column))
        .segment(body)?;

    let mut vrfs = IndexMap::with_capacity(blocks.len());
    for block in &blocks {
        let vrf = parse_block(block, layout)?;
        vrfs.insert(vrf.name.clone(), vrf);
    }
    Ok(vrfs)
}

fn classify(line: &Line<'_>, column: usize) -> LineKind {
    match line.text.as_bytes().get(column) {
        _ if line.is_blank() => LineKind::Skip,
        Some(b) if !b.is_ascii_whitespace() => LineKind::Start,
        _ => LineKind::Continuation,
    }
}

fn parse_block(block: &Block<'_>, layout: &VrfLayout) -> Result<VrfDefinition, ParseError> {
    let first = block.first();
    let name = first.field(REPORT, "name", &layout.name)?;
    if name.is_empty() {
        return Err(ParseError::MalformedBlock {
            report: REPORT,
            line: first.number,
            reason: "VRF block without a name".to_string(),
        });
    }
    let rd = first.field(REPORT, "route distinguisher", &layout.rd)?;

    // A VRF with no interfaces has a first line that ends before the column
    let interfaces = block
        .lines()
        .iter()
        .filter_map(|line| layout.interface.extract(line.text))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    Ok(VrfDefinition {
        name: name.to_string(),
        route_distinguisher: rd.to_string(),
        interfaces,
    })
}
