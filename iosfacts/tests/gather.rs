//! End-to-end session tests against captured IOS reports.

use std::path::Path;

use iosfacts::driver::Credentials;
use iosfacts::platform::vendors::cisco_ios;
use iosfacts::transport::replay::Failure;
use iosfacts::transport::{ReplayTransport, TransportEvent};
use iosfacts::{Error, PlatformDefinition, Session};

const PROMPT: &str = "lab-r1#";

fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("{name}.txt"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

fn lab_router(platform: &PlatformDefinition) -> ReplayTransport {
    let commands = &platform.report_commands;
    ReplayTransport::new()
        .with_echo(PROMPT)
        .respond(&commands.interfaces, fixture("interfaces"))
        .respond(&commands.bgp_summary, fixture("bgp_summary"))
        .respond(&commands.route_distinguishers, fixture("route_distinguishers"))
        .respond(&commands.version, fixture("version"))
        .respond(&commands.vrf, fixture("vrf"))
        .respond(&commands.hostname, fixture("hostname"))
}

fn session(transport: &mut ReplayTransport, platform: PlatformDefinition) -> Session<&mut ReplayTransport> {
    Session::new(
        transport,
        platform,
        Credentials::new("admin", "cisco").with_enable_secret("class"),
    )
}

#[tokio::test]
async fn test_gather_lab_router() {
    let platform = cisco_ios::platform().unwrap();
    let mut transport = lab_router(&platform);

    let facts = session(&mut transport, platform).gather_facts().await.unwrap();

    assert_eq!(facts.hostname, "lab-r1");
    assert_eq!(facts.version.image, "c7200-adventerprisek9-mz.124-24.T5.bin");

    let names: Vec<&str> = facts.interfaces.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec![
            "GigabitEthernet0/0",
            "GigabitEthernet0/1",
            "GigabitEthernet0/1.100",
            "GigabitEthernet0/1.101",
            "GigabitEthernet0/2",
            "Loopback100",
            "Loopback101",
        ]
    );

    let uplink = facts.interface("GigabitEthernet0/0").unwrap();
    assert_eq!(uplink.status, "up/up");
    assert_eq!(uplink.hardware.as_deref(), Some("BCM1250"));
    assert_eq!(uplink.ip.as_deref(), Some("172.16.16.183"));
    assert_eq!(uplink.mask.as_deref(), Some("255.255.255.0"));
    assert_eq!(uplink.mac.as_deref(), Some("0016.9c98.3c1b"));
    assert_eq!(uplink.mtu.as_deref(), Some("1500"));
    assert_eq!(uplink.encapsulation.as_deref(), Some("ARPA"));
    assert_eq!(uplink.vlan_id, None);

    let sub = facts.interface("GigabitEthernet0/1.101").unwrap();
    assert_eq!(sub.vlan_id.as_deref(), Some("101"));
    assert_eq!(sub.mask.as_deref(), Some("255.255.255.252"));

    let down = facts.interface("GigabitEthernet0/2").unwrap();
    assert_eq!(down.status, "administratively down/down");
    assert_eq!(down.ip, None);

    assert_eq!(facts.bgp.router_id, "172.16.16.183");
    assert_eq!(facts.bgp.local_as, "65010");
    let neighbors: Vec<&str> = facts.bgp.neighbors.keys().map(String::as_str).collect();
    assert_eq!(neighbors, vec!["10.1.1.1", "10.1.1.2", "192.168.200.254"]);
    assert_eq!(facts.bgp.neighbors["192.168.200.254"].remote_as, "65200");
    assert_eq!(facts.bgp.route_distinguishers, vec!["65010:100", "65010:101"]);

    assert_eq!(facts.vrf["BLUE"].route_distinguisher, "65010:101");
    assert_eq!(facts.vrf["BLUE"].interfaces, vec!["Lo101", "Gi0/1.101"]);
    assert_eq!(facts.vrf["RED"].interfaces, vec!["Lo100", "Gi0/1.100"]);
}

#[tokio::test]
async fn test_facts_document_shape() {
    let platform = cisco_ios::platform().unwrap();
    let mut transport = lab_router(&platform);

    let facts = session(&mut transport, platform).gather_facts().await.unwrap();
    let document = serde_json::to_value(&facts).unwrap();

    assert_eq!(document["hostname"], "lab-r1");
    assert_eq!(document["version"]["image"], "c7200-adventerprisek9-mz.124-24.T5.bin");
    assert_eq!(document["interfaces"]["Loopback100"]["IP"], "192.168.100.1");
    assert_eq!(document["interfaces"]["GigabitEthernet0/1.100"]["vlanid"], "100");
    assert!(document["interfaces"]["GigabitEthernet0/2"].get("IP").is_none());
    assert_eq!(document["bgp"]["identifier"], "172.16.16.183");
    assert_eq!(document["bgp"]["AS"], "65010");
    assert_eq!(document["bgp"]["neighbor"]["10.1.1.2"]["AS"], "65011");
    assert_eq!(document["bgp"]["rd"][1], "65010:101");
    assert_eq!(document["vrf"]["RED"]["rd"], "65010:100");
}

#[tokio::test]
async fn test_gather_lifecycle() {
    let platform = cisco_ios::platform().unwrap();
    let commands = platform.report_commands.clone();
    let mut transport = lab_router(&platform);

    session(&mut transport, platform).gather_facts().await.unwrap();

    let expected = vec![
        TransportEvent::Open,
        TransportEvent::Authenticate {
            username: "admin".into(),
        },
        TransportEvent::Elevate,
        TransportEvent::Send("terminal length 0".into()),
        TransportEvent::Send(commands.interfaces),
        TransportEvent::Send(commands.bgp_summary),
        TransportEvent::Send(commands.route_distinguishers),
        TransportEvent::Send(commands.version),
        TransportEvent::Send(commands.vrf),
        TransportEvent::Send(commands.hostname),
        TransportEvent::Send("end".into()),
        TransportEvent::Close,
    ];
    assert_eq!(transport.events(), expected.as_slice());
}

#[tokio::test]
async fn test_gather_bgp_not_active() {
    let platform = cisco_ios::platform().unwrap();
    let bgp = platform.report_commands.bgp_summary.clone();
    let mut transport = lab_router(&platform).respond(&bgp, "% BGP not active");

    let err = session(&mut transport, platform).gather_facts().await.unwrap_err();

    assert!(matches!(err, Error::CommandRejected { ref command, .. } if *command == bgp));
    assert_eq!(transport.sent_commands().last(), Some(&"end"));
    assert!(!transport.is_open());
}

#[tokio::test]
async fn test_gather_malformed_report_closes_session() {
    let platform = cisco_ios::platform().unwrap();
    let vrf = platform.report_commands.vrf.clone();
    let mut transport = lab_router(&platform).respond(&vrf, "BLUE   65010:101   Lo101\r\n");

    let err = session(&mut transport, platform).gather_facts().await.unwrap_err();

    assert!(matches!(err, Error::Parse(_)));
    assert_eq!(transport.events().last(), Some(&TransportEvent::Close));
}

#[tokio::test]
async fn test_apply_commands_fail_fast() {
    let platform = cisco_ios::platform().unwrap();
    let mut transport = ReplayTransport::new()
        .with_echo("lab-r1(config)#")
        .respond(
            "ip route 10.0.0.0 255.0.0.0 Null0 tag",
            "                                         ^\r\n\
             % Invalid input detected at '^' marker.\r\n\
             % Incomplete command.\r\n",
        );

    let commands = [
        "configure terminal",
        "ip route 10.0.0.0 255.0.0.0 Null0 tag",
        "ip route 10.1.0.0 255.255.0.0 Null0",
    ];
    let err = session(&mut transport, platform)
        .apply_commands(&commands)
        .await
        .unwrap_err();

    match err {
        Error::CommandRejected { command, message } => {
            assert_eq!(command, "ip route 10.0.0.0 255.0.0.0 Null0 tag");
            assert_eq!(message, "                                         ^");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        transport.sent_commands(),
        vec![
            "terminal length 0",
            "configure terminal",
            "ip route 10.0.0.0 255.0.0.0 Null0 tag",
            "end",
        ]
    );
}

#[tokio::test]
async fn test_apply_commands_all_accepted() {
    let platform = cisco_ios::platform().unwrap();
    let mut transport = ReplayTransport::new().with_echo("lab-r1(config)#");

    let commands = vec![
        "configure terminal".to_string(),
        "interface Loopback200".to_string(),
        " description test".to_string(),
    ];
    session(&mut transport, platform)
        .apply_commands(&commands)
        .await
        .unwrap();

    assert_eq!(
        &transport.sent_commands()[1..4],
        &["configure terminal", "interface Loopback200", " description test"]
    );
    assert!(!transport.is_open());
}

#[tokio::test]
async fn test_authentication_failure_still_closes() {
    let platform = cisco_ios::platform().unwrap();
    let mut transport = ReplayTransport::new().fail_on(Failure::Authenticate);

    let err = session(&mut transport, platform)
        .apply_commands(&["configure terminal"])
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert!(transport.sent_commands().iter().all(|c| *c == "end"));
    assert_eq!(transport.events().last(), Some(&TransportEvent::Close));
}
