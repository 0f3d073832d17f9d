//! Gather facts from a Cisco IOS device and print them as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example gather_facts -- --host 192.0.2.10 --user admin --password secret
//! ```
//!
//! Pass `--replay <DIR>` instead of a host to parse captured reports from
//! `DIR/<report>.txt` without connecting to a device.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use iosfacts::driver::Credentials;
use iosfacts::platform::vendors::cisco_ios;
use iosfacts::transport::ReplayTransport;
use iosfacts::{Facts, Session, SessionBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let facts = match &args.replay {
        Some(dir) => gather_replay(dir).await?,
        None => {
            let mut builder = SessionBuilder::new(&args.host)
                .port(args.port)
                .username(&args.user)
                .connect_timeout(Duration::from_secs(args.timeout));
            if let Some(password) = &args.password {
                builder = builder.password(password);
            }
            if let Some(enable) = &args.enable {
                builder = builder.enable_secret(enable);
            }

            eprintln!("Connecting to {}:{}...", args.host, args.port);
            builder.build()?.gather_facts().await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&facts)?);
    Ok(())
}

/// Answer each report command from a capture file in `dir`.
async fn gather_replay(dir: &Path) -> Result<Facts, Box<dyn std::error::Error>> {
    let platform = cisco_ios::platform()?;
    let commands = &platform.report_commands;

    let mut transport = ReplayTransport::new();
    for (file, command) in [
        ("interfaces", &commands.interfaces),
        ("bgp_summary", &commands.bgp_summary),
        ("route_distinguishers", &commands.route_distinguishers),
        ("version", &commands.version),
        ("vrf", &commands.vrf),
        ("hostname", &commands.hostname),
    ] {
        let capture = std::fs::read_to_string(dir.join(format!("{file}.txt")))?;
        transport = transport.respond(command, capture);
    }

    let session = Session::new(transport, platform, Credentials::new("replay", "replay"));
    Ok(session.gather_facts().await?)
}

/// Simple argument parser (avoiding external dependencies)
struct Args {
    host: String,
    port: u16,
    user: String,
    password: Option<String>,
    enable: Option<String>,
    replay: Option<PathBuf>,
    timeout: u64,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut parsed = Self {
            host: "localhost".to_string(),
            port: 22,
            user: env::var("USER").unwrap_or_else(|_| "admin".to_string()),
            password: None,
            enable: None,
            replay: None,
            timeout: 30,
        };

        let mut i = 1;
        while i < args.len() {
            let value = args.get(i + 1).cloned();
            match args[i].as_str() {
                "--host" | "-h" => parsed.host = value.unwrap_or(parsed.host),
                "--port" | "-p" => parsed.port = value.and_then(|v| v.parse().ok()).unwrap_or(22),
                "--user" | "-u" => parsed.user = value.unwrap_or(parsed.user),
                "--password" | "-P" => parsed.password = value,
                "--enable" | "-e" => parsed.enable = value,
                "--replay" | "-r" => parsed.replay = value.map(PathBuf::from),
                "--timeout" | "-t" => {
                    parsed.timeout = value.and_then(|v| v.parse().ok()).unwrap_or(30)
                }
                "--help" => {
                    Self::print_help();
                    std::process::exit(0);
                }
                other => {
                    eprintln!("Unknown argument: {}", other);
                    i += 1;
                    continue;
                }
            }
            i += 2;
        }

        parsed
    }

    fn print_help() {
        println!(
            r#"iosfacts gather_facts example

USAGE:
    cargo run --example gather_facts -- [OPTIONS]

OPTIONS:
    -h, --host <HOST>        Target host [default: localhost]
    -p, --port <PORT>        SSH port [default: 22]
    -u, --user <USER>        Username [default: $USER]
    -P, --password <PASS>    Login password
    -e, --enable <SECRET>    Enable secret [default: the login password]
    -r, --replay <DIR>       Parse captured reports from DIR instead of connecting
    -t, --timeout <SECS>     Connection timeout [default: 30]
    --help                   Print this help message

EXAMPLES:
    # Gather from the bundled test captures
    cargo run --example gather_facts -- --replay iosfacts/tests/fixtures
"#
        );
    }
}
