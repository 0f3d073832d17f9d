//! `show running-config | include hostname` parser.

use super::rules::HostnameLayout;
use super::{ReportKind, report_lines};
use crate::error::ParseError;

const REPORT: ReportKind = ReportKind::Hostname;

/// Extract the configured hostname.
///
/// The filter may let other lines through (`ip domain lookup hostname`,
/// banners), so the first line starting with the declaration prefix wins.
pub fn parse(report: &str, layout: &HostnameLayout) -> Result<String, ParseError> {
    let lines = report_lines(report);
    let line = lines
        .iter()
        .find(|l| l.text.starts_with(layout.marker))
        .ok_or(ParseError::MissingHeader {
            report: REPORT,
            expected: layout.marker,
        })?;

    let hostname = line.field(REPORT, "hostname", &layout.hostname)?;
    if hostname.is_empty() {
        return Err(ParseError::InvalidValue {
            report: REPORT,
            line: line.number,
            field: "hostname",
            value: line.text.to_string(),
        });
    }
    Ok(hostname.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::ReportLayout;

    const LAYOUT: &HostnameLayout = &ReportLayout::IOS_CLASSIC.hostname;

    #[test]
    fn test_hostname() {
        assert_eq!(parse("hostname CISCOROUTER\r\n", LAYOUT).unwrap(), "CISCOROUTER");
    }

    #[test]
    fn test_hostname_skips_other_matches() {
        let report = " ip dns view default\n  domain lookup hostname\nhostname edge-1\n";
        assert_eq!(parse(report, LAYOUT).unwrap(), "edge-1");
    }

    #[test]
    fn test_missing_hostname() {
        let err = parse("", LAYOUT).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingHeader {
                report: ReportKind::Hostname,
                expected: "hostname ",
            }
        );
    }

    #[test]
    fn test_parse_is_repeatable() {
        let report = "version 12.4\r\nhostname CISCOROUTER\r\n";
        assert_eq!(parse(report, LAYOUT), parse(report, LAYOUT));
    }
}
