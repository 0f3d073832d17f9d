//! Report parsers.
//!
//! One parser per report shape. Every parser is a pure function of the
//! report text and its layout table from [`rules`]; nothing is cached
//! between calls, so parsing the same text twice yields the same value.

pub mod bgp;
mod blocks;
pub mod hostname;
pub mod interfaces;
pub mod rules;
pub mod version;
pub mod vrf;

use std::fmt;

use serde::Serialize;

pub use blocks::{Block, BlockSegmenter, LineKind};
pub use rules::ReportLayout;

use crate::error::ParseError;
use rules::FieldRule;

/// Identifies which report a parse error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReportKind {
    Interfaces,
    BgpSummary,
    RouteDistinguishers,
    Vrf,
    Version,
    Hostname,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportKind::Interfaces => "interfaces report",
            ReportKind::BgpSummary => "BGP summary report",
            ReportKind::RouteDistinguishers => "route distinguisher report",
            ReportKind::Vrf => "VRF report",
            ReportKind::Version => "version report",
            ReportKind::Hostname => "hostname report",
        };
        f.write_str(name)
    }
}

/// A report line with its 1-based position in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl<'a> Line<'a> {
    /// Whether the line has no visible content.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Apply `rule`, turning a miss into a [`ParseError::MissingField`].
    pub(crate) fn field(
        &self,
        report: ReportKind,
        field: &'static str,
        rule: &FieldRule,
    ) -> Result<&'a str, ParseError> {
        rule.extract(self.text).ok_or_else(|| ParseError::MissingField {
            report,
            line: self.number,
            field,
            text: self.text.to_string(),
        })
    }
}

/// Split report text into numbered lines with trailing `\r` removed.
pub fn report_lines(text: &str) -> Vec<Line<'_>> {
    text.lines()
        .enumerate()
        .map(|(i, text)| Line {
            number: i + 1,
            text: text.trim_end_matches('\r'),
        })
        .collect()
}

/// Remove the echoed command line from a raw response, if the device echoed it.
///
/// The echo is the first line when it ends with the command text
/// (typically preceded by the prompt, e.g. `router#show version`).
pub fn strip_echo<'a>(command: &str, response: &'a str) -> &'a str {
    let command = command.trim();
    let (first, rest) = match response.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (response, ""),
    };

    if !command.is_empty() && first.trim_end().ends_with(command) {
        rest
    } else {
        response
    }
}
