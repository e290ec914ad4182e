//! Error types for the f1tel CLI

use std::net::SocketAddr;

use f1_telemetry_core::LayoutError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("failed to bind UDP socket at {addr} (is another process using this port?)")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("decoder table for packet format {format} is inconsistent")]
    Layout {
        format: u16,
        #[source]
        source: LayoutError,
    },
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidConfiguration(_) => 2,
            CliError::Bind { .. } => 3,
            CliError::Layout { .. } => 1,
        }
    }
}
