//! `show interfaces` parser.
//!
//! Each interface is a block: a header line starting in column 0
//! (`GigabitEthernet0/1 is up, line protocol is up`) followed by indented
//! detail lines. Details are recognized by marker substrings anywhere in
//! the block, so their order does not matter.

use indexmap::IndexMap;
use ipnet::Ipv4Net;
use log::trace;

use super::rules::InterfaceLayout;
use super::{BlockSegmenter, Line, LineKind, ReportKind, report_lines};
use crate::error::ParseError;
use crate::facts::Interface;

const REPORT: ReportKind = ReportKind::Interfaces;

/// Parse a full `show interfaces` report into interfaces keyed by name.
pub fn parse(
    report: &str,
    layout: &InterfaceLayout,
) -> Result<IndexMap<String, Interface>, ParseError> {
    let blocks = BlockSegmenter::new(REPORT, classify).segment(report_lines(report))?;

    let mut interfaces = IndexMap::with_capacity(blocks.len());
    for block in &blocks {
        let interface = parse_block(block.lines(), layout)?;
        trace!("parsed interface {} ({})", interface.name, interface.status);
        interfaces.insert(interface.name.clone(), interface);
    }
    Ok(interfaces)
}

fn classify(line: &Line<'_>) -> LineKind {
    if line.is_blank() {
        LineKind::Skip
    } else if line.text.starts_with(char::is_whitespace) {
        LineKind::Continuation
    } else {
        LineKind::Start
    }
}

/// Project one interface block into an [`Interface`].
///
/// Fields whose marker never appears stay `None`.
pub fn parse_block(lines: &[Line<'_>], layout: &InterfaceLayout) -> Result<Interface, ParseError> {
    let mut interface = Interface::default();
    let mut has_header = false;

    for line in lines {
        if line.text.contains(layout.header_marker) {
            let name = line.field(REPORT, "name", &layout.name)?;
            let line_state = line.field(REPORT, "line state", &layout.line_state)?;
            let protocol_state = line.field(REPORT, "protocol state", &layout.protocol_state)?;
            interface.name = name.to_string();
            interface.status = format!("{line_state}/{protocol_state}");
            has_header = true;
        }
        if layout.hardware.applies_to(line.text) {
            interface.hardware =
                Some(line.field(REPORT, "hardware", &layout.hardware.rule)?.to_string());
        }
        if layout.address.applies_to(line.text) {
            let cidr = line.field(REPORT, "address", &layout.address.rule)?;
            // "Internet address is negotiated" and similar carry no prefix
            if cidr.contains('/') {
                let net: Ipv4Net = cidr.parse().map_err(|_| ParseError::InvalidValue {
                    report: REPORT,
                    line: line.number,
                    field: "address",
                    value: cidr.to_string(),
                })?;
                interface.ip = Some(net.addr().to_string());
                interface.mask = Some(net.netmask().to_string());
            }
        }
        if layout.mtu.applies_to(line.text) {
            interface.mtu = Some(line.field(REPORT, "mtu", &layout.mtu.rule)?.to_string());
        }
        if layout.mac.applies_to(line.text) {
            interface.mac = Some(line.field(REPORT, "mac", &layout.mac.rule)?.to_string());
        }
        if layout.encapsulation.applies_to(line.text) {
            interface.encapsulation =
                Some(line.field(REPORT, "encapsulation", &layout.encapsulation.rule)?.to_string());
        }
        if layout.vlan.applies_to(line.text) {
            interface.vlan_id = Some(line.field(REPORT, "vlan", &layout.vlan.rule)?.to_string());
        }
    }

    if !has_header {
        let line = lines.first().map_or(0, |l| l.number);
        return Err(ParseError::MalformedBlock {
            report: REPORT,
            line,
            reason: format!("no '{}' header line", layout.header_marker),
        });
    }

    Ok(interface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::ReportLayout;

    const LAYOUT: &InterfaceLayout = &ReportLayout::IOS_CLASSIC.interfaces;

    const REPORT_TEXT: &str = "\
GigabitEthernet0/0 is up, line protocol is up \r
  Hardware is BCM1250 Internal MAC, address is 0016.9c98.3c1b (bia 0016.9c98.3c1b)\r
  Internet address is 172.16.16.183/24\r
  MTU 1500 bytes, BW 1000000 Kbit/sec, DLY 10 usec, \r
     reliability 255/255, txload 1/255, rxload 1/255\r
  Encapsulation 802.1Q Virtual LAN, Vlan ID  1., loopback not set\r
  Keepalive set (10 sec)\r
GigabitEthernet0/1 is administratively down, line protocol is down \r
  Hardware is BCM1250 Internal MAC, address is 0016.9c98.3c1a (bia 0016.9c98.3c1a)\r
  MTU 1500 bytes, BW 1000000 Kbit/sec, DLY 10 usec, \r
  Encapsulation ARPA, loopback not set\r
Loopback0 is up, line protocol is up \r
  Hardware is Loopback\r
  Internet address is 10.0.0.1/32\r
  MTU 1514 bytes, BW 8000000 Kbit/sec, DLY 5000 usec, \r
  Encapsulation LOOPBACK, loopback not set\r
";

    #[test]
    fn test_literal_block() {
        let lines = report_lines(
            "GigabitEthernet0/1 is up, line protocol is up\n\
             Hardware is BCM1250\n\
             Internet address is 172.16.1.103/24\n\
             MTU 1500 bytes",
        );
        let interface = parse_block(&lines, LAYOUT).unwrap();

        assert_eq!(
            interface,
            Interface {
                name: "GigabitEthernet0/1".to_string(),
                status: "up/up".to_string(),
                hardware: Some("BCM1250".to_string()),
                ip: Some("172.16.1.103".to_string()),
                mask: Some("255.255.255.0".to_string()),
                mtu: Some("1500".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_full_report() {
        let interfaces = parse(REPORT_TEXT, LAYOUT).unwrap();
        let names: Vec<&str> = interfaces.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["GigabitEthernet0/0", "GigabitEthernet0/1", "Loopback0"]);

        let gi0 = &interfaces["GigabitEthernet0/0"];
        assert_eq!(gi0.status, "up/up");
        assert_eq!(gi0.mac.as_deref(), Some("0016.9c98.3c1b"));
        assert_eq!(gi0.encapsulation.as_deref(), Some("802.1Q Virtual LAN"));
        assert_eq!(gi0.vlan_id.as_deref(), Some("1"));
        assert_eq!(gi0.ip.as_deref(), Some("172.16.16.183"));

        let gi1 = &interfaces["GigabitEthernet0/1"];
        assert_eq!(gi1.status, "administratively down/down");
        assert_eq!(gi1.ip, None);
        assert_eq!(gi1.vlan_id, None);

        let lo0 = &interfaces["Loopback0"];
        assert_eq!(lo0.hardware.as_deref(), Some("Loopback"));
        assert_eq!(lo0.mask.as_deref(), Some("255.255.255.255"));
        assert_eq!(lo0.mac, None);
        assert_eq!(lo0.mtu.as_deref(), Some("1514"));
    }

    #[test]
    fn test_parse_is_repeatable() {
        assert_eq!(parse(REPORT_TEXT, LAYOUT).unwrap(), parse(REPORT_TEXT, LAYOUT).unwrap());
    }

    #[test]
    fn test_block_without_header() {
        let err = parse("Foo0 is up\n  MTU 1500 bytes\n", LAYOUT).unwrap_err();
        assert!(matches!(err, ParseError::MalformedBlock { line: 1, .. }));
    }

    #[test]
    fn test_invalid_address() {
        let err = parse(
            "Foo0 is up, line protocol is up\n  Internet address is 10.0.0.300/24\n",
            LAYOUT,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue { line: 2, field: "address", .. }));
    }

    #[test]
    fn test_truncated_mac() {
        let err = parse(
            "Foo0 is up, line protocol is up\n  Hardware is X Internal MAC, address is 0016\n",
            LAYOUT,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::MissingField { field: "mac", .. }));
    }

    #[test]
    fn test_negotiated_address_left_unset() {
        let interfaces = parse(
            "Dialer1 is up, line protocol is up (spoofing)\n  Internet address is negotiated\n",
            LAYOUT,
        )
        .unwrap();
        assert_eq!(interfaces["Dialer1"].status, "up/up (spoofing)");
        assert_eq!(interfaces["Dialer1"].ip, None);
    }

    #[test]
    fn test_tunnel_keeps_interface_mtu() {
        let report = "\
Tunnel0 is up, line protocol is up \r
  Hardware is Tunnel\r
  Internet address is 10.254.0.1/30\r
  MTU 17916 bytes, BW 100 Kbit/sec, DLY 50000 usec, \r
  Encapsulation TUNNEL, loopback not set\r
  Tunnel source 172.16.16.183, destination 172.16.17.1\r
  Tunnel protocol/transport GRE/IP\r
  Tunnel transport MTU 1476 bytes\r
";
        let interfaces = parse(report, LAYOUT).unwrap();
        assert_eq!(interfaces["Tunnel0"].mtu.as_deref(), Some("17916"));
        assert_eq!(interfaces["Tunnel0"].encapsulation.as_deref(), Some("TUNNEL"));
    }
}
