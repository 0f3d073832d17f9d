//! Apply a command file to a Cisco IOS device.
//!
//! Commands are sent one per line, in file order. The run stops at the
//! first command the device rejects and reports the device's diagnostic.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example exec_commands -- --host 192.0.2.10 --user admin \
//!     --password secret --enable class --commands changes.txt
//! ```

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use iosfacts::{Error, SessionBuilder, read_command_file};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let Some(path) = &args.commands else {
        eprintln!("Error: --commands is required");
        std::process::exit(1);
    };
    let commands = read_command_file(path)?;
    println!("Loaded {} commands from {}", commands.len(), path.display());

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
    let session = builder.build()?;

    println!("Connecting to {}:{}...", args.host, args.port);
    match session.apply_commands(&commands).await {
        Ok(()) => println!("Applied {} commands", commands.len()),
        Err(Error::CommandRejected { command, message }) => {
            eprintln!("Command rejected: {command}");
            eprintln!("  {message}");
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Simple argument parser (avoiding external dependencies)
struct Args {
    host: String,
    port: u16,
    user: String,
    password: Option<String>,
    enable: Option<String>,
    commands: Option<PathBuf>,
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
            commands: None,
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
                "--commands" | "-c" => parsed.commands = value.map(PathBuf::from),
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
            r#"iosfacts exec_commands example

USAGE:
    cargo run --example exec_commands -- [OPTIONS]

OPTIONS:
    -h, --host <HOST>        Target host [default: localhost]
    -p, --port <PORT>        SSH port [default: 22]
    -u, --user <USER>        Username [default: $USER]
    -P, --password <PASS>    Login password
    -e, --enable <SECRET>    Enable secret [default: the login password]
    -c, --commands <PATH>    Command file, one command per line
    -t, --timeout <SECS>     Connection timeout [default: 30]
    --help                   Print this help message
"#
        );
    }
}
