//! `show version` parser.

use super::rules::VersionLayout;
use super::{ReportKind, report_lines};
use crate::error::ParseError;
use crate::facts::VersionInfo;

const REPORT: ReportKind = ReportKind::Version;

/// Extract the running image filename from a version report.
///
/// The storage device prefix is dropped, so
/// `System image file is "flash:c7301-adventerprisek9-mz.124-15.T13.bin"`
/// yields `c7301-adventerprisek9-mz.124-15.T13.bin`.
pub fn parse(report: &str, layout: &VersionLayout) -> Result<VersionInfo, ParseError> {
    let lines = report_lines(report);
    let line = lines
        .iter()
        .find(|l| l.text.contains(layout.marker))
        .ok_or(ParseError::MissingHeader {
            report: REPORT,
            expected: layout.marker,
        })?;

    let path = line.field(REPORT, "image", &layout.image)?;
    let image = match layout.device_separator.and_then(|sep| path.split_once(sep)) {
        Some((_device, file)) => file.trim_start_matches('/'),
        None => path,
    };

    if image.is_empty() {
        return Err(ParseError::InvalidValue {
            report: REPORT,
            line: line.number,
            field: "image",
            value: path.to_string(),
        });
    }

    Ok(VersionInfo {
        image: image.to_string(),
    })
}
