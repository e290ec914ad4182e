//! f1tel - live console readout for the F1 25 UDP telemetry feed
//!
//! Listens for packet format 2025 datagrams, keeps the latest Car Telemetry
//! and Car Status values for the player's car, and prints one summary line
//! per interval until Ctrl-C.

#![deny(static_mut_refs)]

mod completion;
mod config;
mod error;
mod feed;
mod output;
mod presenter;

use std::net::IpAddr;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{
    DEFAULT_BIND, DEFAULT_PACKET_FORMAT, DEFAULT_PORT, DEFAULT_PRINT_INTERVAL_MS,
    DEFAULT_RECV_TIMEOUT_MS, FeedConfig, OutputFormat,
};
use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "f1tel")]
#[command(about = "Live readout of the player's car from the F1 25 UDP telemetry feed")]
#[command(version)]
#[command(long_about = "
f1tel listens for the EA F1 25 UDP telemetry broadcast (packet format 2025)
and prints speed, gear, RPM, pedal inputs, DRS, ERS, fuel and tyre surface
temperatures for the player's car once per interval.

In game: Settings > Telemetry > UDP Telemetry ON, UDP Format 2025, Port 20777.
Use --json for one machine-readable object per interval.
")]
struct Cli {
    /// Address to bind the UDP socket to
    #[arg(long, env = "F1TEL_BIND", default_value_t = DEFAULT_BIND)]
    bind: IpAddr,

    /// UDP port the game sends to
    #[arg(short, long, env = "F1TEL_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Milliseconds between printed lines
    #[arg(long, env = "F1TEL_PRINT_INTERVAL_MS", default_value_t = DEFAULT_PRINT_INTERVAL_MS)]
    print_interval_ms: u64,

    /// Milliseconds without a datagram before the feed counts the link as idle
    #[arg(long, env = "F1TEL_RECV_TIMEOUT_MS", default_value_t = DEFAULT_RECV_TIMEOUT_MS)]
    recv_timeout_ms: u64,

    /// Packet format the game is set to send ("UDP Format" in game)
    #[arg(long, env = "F1TEL_PACKET_FORMAT", default_value_t = DEFAULT_PACKET_FORMAT)]
    packet_format: u16,

    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Do not print the startup banner
    #[arg(long)]
    no_banner: bool,

    /// Verbose logging (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Cli {
    fn feed_config(&self) -> Result<FeedConfig, CliError> {
        let output = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        };
        Ok(FeedConfig::new(
            self.bind,
            self.port,
            self.print_interval_ms,
            self.recv_timeout_ms,
        )?
        .with_packet_format(self.packet_format)?
        .with_output(output)
        .with_banner(!self.no_banner && !self.json))
    }
}

fn init_tracing(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Logs go to stderr; stdout carries the telemetry lines.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("f1tel={log_level},f1_telemetry_core={log_level}").into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}

async fn execute(cli: &Cli) -> Result<()> {
    if let Some(Commands::Completion { shell }) = &cli.command {
        completion::generate_completion(*shell, &mut std::io::stdout())?;
        return Ok(());
    }

    let config = cli.feed_config()?;
    if config.banner {
        output::print_banner(&config);
    }

    let mut stdout = std::io::stdout();
    let report = feed::run(&config, &mut stdout).await?;
    if config.output == OutputFormat::Human {
        output::print_stopped(&report.stats);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::time::Duration;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn parse_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["f1tel"])?;
        assert!(!cli.json);
        assert!(!cli.no_banner);
        assert_eq!(cli.verbose, 0);
        assert!(cli.command.is_none());
        let config = cli.feed_config()?;
        assert_eq!(config, FeedConfig::default());
        Ok(())
    }

    #[test]
    fn parse_overrides() -> TestResult {
        let cli = Cli::try_parse_from([
            "f1tel",
            "--bind",
            "127.0.0.1",
            "--port",
            "20778",
            "--print-interval-ms",
            "250",
            "--recv-timeout-ms",
            "500",
            "-vv",
        ])?;
        assert_eq!(cli.bind, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(cli.verbose, 2);
        let config = cli.feed_config()?;
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:20778");
        assert_eq!(config.print_interval, Duration::from_millis(250));
        assert_eq!(config.recv_timeout, Duration::from_millis(500));
        Ok(())
    }

    #[test]
    fn json_mode_suppresses_banner() -> TestResult {
        let cli = Cli::try_parse_from(["f1tel", "--json"])?;
        let config = cli.feed_config()?;
        assert_eq!(config.output, OutputFormat::Json);
        assert!(!config.banner);
        Ok(())
    }

    #[test]
    fn zero_interval_is_invalid_configuration() -> TestResult {
        let cli = Cli::try_parse_from(["f1tel", "--print-interval-ms", "0"])?;
        let result = cli.feed_config();
        assert!(matches!(result, Err(CliError::InvalidConfiguration(_))));
        Ok(())
    }

    #[test]
    fn unsupported_packet_format_is_invalid_configuration() -> TestResult {
        let cli = Cli::try_parse_from(["f1tel", "--packet-format", "2023"])?;
        assert_eq!(cli.packet_format, 2023);
        let result = cli.feed_config();
        assert!(matches!(result, Err(CliError::InvalidConfiguration(_))));
        Ok(())
    }

    #[test]
    fn invalid_bind_address_rejected_by_parser() {
        assert!(Cli::try_parse_from(["f1tel", "--bind", "not-an-ip"]).is_err());
    }

    #[test]
    fn parse_completion_subcommand() -> TestResult {
        let cli = Cli::try_parse_from(["f1tel", "completion", "bash"])?;
        assert!(matches!(
            cli.command,
            Some(Commands::Completion {
                shell: clap_complete::Shell::Bash
            })
        ));
        Ok(())
    }
}
