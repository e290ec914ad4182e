//! Integration tests for the f1tel binary
//!
//! Only paths that terminate on their own are exercised here; the live
//! feed loop is covered by the loopback tests inside the crate.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::net::{Ipv4Addr, UdpSocket};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn f1tel() -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("f1tel")?;
    // Keep the host environment from leaking into flag defaults.
    for var in [
        "F1TEL_BIND",
        "F1TEL_PORT",
        "F1TEL_PRINT_INTERVAL_MS",
        "F1TEL_RECV_TIMEOUT_MS",
        "F1TEL_PACKET_FORMAT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    Ok(cmd)
}

#[test]
fn test_cli_help() -> TestResult {
    f1tel()?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("F1TEL_PORT"))
        .stdout(predicate::str::contains("20777"));
    Ok(())
}

#[test]
fn test_cli_version() -> TestResult {
    f1tel()?
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("f1tel"));
    Ok(())
}

#[test]
fn test_completion_generation() -> TestResult {
    f1tel()?
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("f1tel"));
    Ok(())
}

#[test]
fn test_zero_print_interval_is_configuration_error() -> TestResult {
    f1tel()?
        .args(["--print-interval-ms", "0", "--no-banner"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--print-interval-ms must be > 0"));
    Ok(())
}

#[test]
fn test_zero_recv_timeout_from_env_is_configuration_error() -> TestResult {
    f1tel()?
        .env("F1TEL_RECV_TIMEOUT_MS", "0")
        .arg("--no-banner")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--recv-timeout-ms must be > 0"));
    Ok(())
}

#[test]
fn test_invalid_port_rejected() -> TestResult {
    f1tel()?.args(["--port", "70000"]).assert().failure();
    Ok(())
}

#[test]
fn test_configuration_error_as_json() -> TestResult {
    let output = f1tel()?
        .args(["--json", "--print-interval-ms", "0"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["success"], false);
    assert!(
        value["error"]["message"]
            .as_str()
            .is_some_and(|m| m.contains("print-interval-ms"))
    );
    Ok(())
}

#[test]
fn test_port_in_use_exits_with_bind_error() -> TestResult {
    let holder = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0))?;
    let port = holder.local_addr()?.port().to_string();

    f1tel()?
        .args(["--bind", "127.0.0.1", "--port", &port, "--no-banner"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("failed to bind UDP socket"));
    drop(holder);
    Ok(())
}

#[test]
fn test_unsupported_packet_format_is_configuration_error() -> TestResult {
    f1tel()?
        .args(["--packet-format", "2024", "--no-banner"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported --packet-format 2024"));
    Ok(())
}
