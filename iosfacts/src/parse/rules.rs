//! Declarative field extraction rules.
//!
//! Every report shape is described by a layout table of [`FieldRule`]s
//! instead of inline string slicing. Column offsets differ between
//! software trains, so supporting another firmware means adding another
//! [`ReportLayout`] constant, not another parser.
//!
//! # Example
//!
//! ```rust
//! use iosfacts::parse::rules::{Anchor, Extent, FieldRule};
//!
//! let mtu = FieldRule::new(Anchor::After("MTU "), Extent::Until(&[' ']));
//! assert_eq!(mtu.extract("  MTU 1500 bytes, BW 100000 Kbit/sec"), Some("1500"));
//! ```

/// Where a field starts within a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Fixed byte column from the start of the line.
    Column(usize),

    /// Byte offset counted from the first occurrence of a character.
    ColumnAfter(char, usize),

    /// Immediately after the first occurrence of a substring.
    After(&'static str),
}

/// How far a field extends from its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    /// Up to the first of the given characters, or end of line.
    Until(&'static [char]),

    /// Exactly this many bytes.
    Fixed(usize),

    /// The remainder of the line.
    Rest,
}

/// A single field extraction rule: anchor plus extent.
///
/// Extracted values are trimmed of surrounding whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub anchor: Anchor,
    pub extent: Extent,
}

impl FieldRule {
    /// Create a new rule.
    pub const fn new(anchor: Anchor, extent: Extent) -> Self {
        Self { anchor, extent }
    }

    /// Apply the rule to a line.
    ///
    /// Returns `None` when the anchor cannot be located or lies outside
    /// the line, or when a fixed-width field would run past its end.
    pub fn extract<'a>(&self, line: &'a str) -> Option<&'a str> {
        let start = match self.anchor {
            Anchor::Column(col) => col,
            Anchor::ColumnAfter(ch, offset) => line.find(ch)? + offset,
            Anchor::After(marker) => line.find(marker)? + marker.len(),
        };
        let tail = line.get(start..)?;

        let field = match self.extent {
            Extent::Until(terminators) => match tail.find(terminators) {
                Some(end) => &tail[..end],
                None => tail,
            },
            Extent::Fixed(width) => tail.get(..width)?,
            Extent::Rest => tail,
        };

        Some(field.trim())
    }
}

/// A rule that only applies to lines carrying `marker`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkedRule {
    pub marker: &'static str,
    /// Match only when the marker opens the line (after indentation).
    pub leading: bool,
    pub rule: FieldRule,
}

impl MarkedRule {
    /// A rule for lines containing `marker` anywhere.
    pub const fn new(marker: &'static str, rule: FieldRule) -> Self {
        Self {
            marker,
            leading: false,
            rule,
        }
    }

    /// A rule for lines whose first non-blank text is `marker`.
    pub const fn leading(marker: &'static str, rule: FieldRule) -> Self {
        Self {
            marker,
            leading: true,
            rule,
        }
    }

    /// Whether this rule is responsible for `line`.
    pub fn applies_to(&self, line: &str) -> bool {
        if self.leading {
            line.trim_start().starts_with(self.marker)
        } else {
            line.contains(self.marker)
        }
    }
}

const SPACE: &[char] = &[' '];
const SPACE_OR_COMMA: &[char] = &[' ', ','];
const COMMA: &[char] = &[','];
const PERIOD: &[char] = &['.'];
const QUOTE: &[char] = &['"'];

/// `show interfaces` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceLayout {
    /// Marker of the header line carrying name and status.
    pub header_marker: &'static str,
    pub name: FieldRule,
    pub line_state: FieldRule,
    pub protocol_state: FieldRule,
    pub hardware: MarkedRule,
    pub address: MarkedRule,
    pub mtu: MarkedRule,
    pub mac: MarkedRule,
    pub encapsulation: MarkedRule,
    pub vlan: MarkedRule,
}

/// `show ip bgp summary` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BgpSummaryLayout {
    /// Prefix of the first content line.
    pub identifier_marker: &'static str,
    pub router_id: FieldRule,
    pub local_as: FieldRule,
    /// Prefix of the neighbor table header.
    pub neighbor_header: &'static str,
    pub address: FieldRule,
    pub version: FieldRule,
    pub remote_as: FieldRule,
}

/// `show ip bgp vpnv4 all | include Route Distinguisher` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDistinguisherLayout {
    pub marker: &'static str,
    pub rd: FieldRule,
}

/// `show ip vrf` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VrfLayout {
    /// Marker that must appear in the first header line.
    pub header_marker: &'static str,
    /// Number of header lines before the first block.
    pub header_lines: usize,
    /// Column that is non-blank on the first line of each block.
    pub block_column: usize,
    pub name: FieldRule,
    pub rd: FieldRule,
    pub interface: FieldRule,
}

/// `show version` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionLayout {
    pub marker: &'static str,
    pub image: FieldRule,
    /// Separator after the storage device name (`flash:`), stripped when present.
    pub device_separator: Option<char>,
}

/// `show running-config | include hostname` layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostnameLayout {
    pub marker: &'static str,
    pub hostname: FieldRule,
}

/// The complete set of layouts for one software train.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLayout {
    pub interfaces: InterfaceLayout,
    pub bgp_summary: BgpSummaryLayout,
    pub route_distinguishers: RouteDistinguisherLayout,
    pub vrf: VrfLayout,
    pub version: VersionLayout,
    pub hostname: HostnameLayout,
}

impl ReportLayout {
    /// Classic IOS 12.x report columns.
    pub const IOS_CLASSIC: ReportLayout = ReportLayout {
        interfaces: InterfaceLayout {
            header_marker: "line protocol is",
            name: FieldRule::new(Anchor::Column(0), Extent::Until(SPACE)),
            line_state: FieldRule::new(Anchor::After(" is "), Extent::Until(COMMA)),
            protocol_state: FieldRule::new(Anchor::After("line protocol is "), Extent::Rest),
            hardware: MarkedRule::new(
                "Hardware is ",
                FieldRule::new(Anchor::After("Hardware is "), Extent::Until(SPACE_OR_COMMA)),
            ),
            address: MarkedRule::new(
                "Internet address is",
                FieldRule::new(Anchor::After("Internet address is "), Extent::Until(SPACE)),
            ),
            // "Tunnel transport MTU" lines must not override the interface MTU
            mtu: MarkedRule::leading(
                "MTU ",
                FieldRule::new(Anchor::After("MTU "), Extent::Until(SPACE)),
            ),
            mac: MarkedRule::new(
                "Internal MAC",
                FieldRule::new(Anchor::After("address is "), Extent::Fixed(14)),
            ),
            encapsulation: MarkedRule::new(
                "Encapsulation",
                FieldRule::new(Anchor::After("Encapsulation "), Extent::Until(COMMA)),
            ),
            vlan: MarkedRule::new(
                "Vlan ID ",
                FieldRule::new(Anchor::After("Vlan ID"), Extent::Until(PERIOD)),
            ),
        },
        bgp_summary: BgpSummaryLayout {
            identifier_marker: "BGP router identifier",
            router_id: FieldRule::new(Anchor::Column(22), Extent::Until(COMMA)),
            local_as: FieldRule::new(Anchor::ColumnAfter(',', 18), Extent::Until(SPACE)),
            neighbor_header: "Neighbor",
            address: FieldRule::new(Anchor::Column(0), Extent::Until(SPACE)),
            version: FieldRule::new(Anchor::Column(16), Extent::Until(SPACE)),
            remote_as: FieldRule::new(Anchor::Column(18), Extent::Until(SPACE)),
        },
        route_distinguishers: RouteDistinguisherLayout {
            marker: "Route Distinguisher",
            rd: FieldRule::new(Anchor::Column(21), Extent::Until(SPACE)),
        },
        vrf: VrfLayout {
            header_marker: "Name",
            header_lines: 1,
            block_column: 3,
            name: FieldRule::new(Anchor::Column(2), Extent::Until(SPACE)),
            rd: FieldRule::new(Anchor::Column(35), Extent::Until(SPACE)),
            interface: FieldRule::new(Anchor::Column(55), Extent::Rest),
        },
        version: VersionLayout {
            marker: "System image",
            image: FieldRule::new(Anchor::After("System image file is \""), Extent::Until(QUOTE)),
            device_separator: Some(':'),
        },
        hostname: HostnameLayout {
            marker: "hostname ",
            hostname: FieldRule::new(Anchor::Column(9), Extent::Until(SPACE)),
        },
    };
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self::IOS_CLASSIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_until() {
        let rule = FieldRule::new(Anchor::Column(16), Extent::Until(SPACE));
        assert_eq!(rule.extract("10.1.1.1        4 65010    0"), Some("4"));
    }

    #[test]
    fn test_column_out_of_range() {
        let rule = FieldRule::new(Anchor::Column(35), Extent::Until(SPACE));
        assert_eq!(rule.extract("  RED"), None);
    }

    #[test]
    fn test_column_after_char() {
        let rule = ReportLayout::IOS_CLASSIC.bgp_summary.local_as;
        assert_eq!(
            rule.extract("BGP router identifier 172.16.16.183, local AS number 65010"),
            Some("65010")
        );
    }

    #[test]
    fn test_after_marker_missing() {
        let rule = FieldRule::new(Anchor::After("MTU "), Extent::Rest);
        assert_eq!(rule.extract("  Hardware is Loopback"), None);
    }

    #[test]
    fn test_fixed_width_too_short() {
        let rule = FieldRule::new(Anchor::After("address is "), Extent::Fixed(14));
        assert_eq!(rule.extract("Internal MAC, address is 0016.9c98"), None);
        assert_eq!(
            rule.extract("Internal MAC, address is 0016.9c98.3c1b (bia 0016.9c98.3c1b)"),
            Some("0016.9c98.3c1b")
        );
    }

    #[test]
    fn test_until_runs_to_end_of_line() {
        let rule = ReportLayout::IOS_CLASSIC.interfaces.hardware.rule;
        assert_eq!(rule.extract("  Hardware is Loopback"), Some("Loopback"));
        assert_eq!(rule.extract("  Hardware is BCM1250, address is x"), Some("BCM1250"));
    }

    #[test]
    fn test_vlan_rule_skips_padding() {
        let rule = ReportLayout::IOS_CLASSIC.interfaces.vlan.rule;
        assert_eq!(
            rule.extract("  Encapsulation 802.1Q Virtual LAN, Vlan ID  103., loopback not set"),
            Some("103")
        );
    }

    #[test]
    fn test_mtu_rule_is_leading() {
        let mtu = ReportLayout::IOS_CLASSIC.interfaces.mtu;
        assert!(mtu.applies_to("  MTU 17916 bytes, BW 100 Kbit/sec, DLY 50000 usec,"));
        assert!(mtu.applies_to("MTU 1500 bytes"));
        assert!(!mtu.applies_to("  Tunnel transport MTU 1476 bytes"));
    }
}
