//! Validated runtime configuration for the feed loop.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use f1_telemetry_core::{PACKET_FORMAT_2025, WireLayout, for_format};

use crate::error::CliError;

/// Default F1 25 telemetry port; the standard Codemasters/EA port since F1 2019.
pub const DEFAULT_PORT: u16 = 20777;
pub const DEFAULT_BIND: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PRINT_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_RECV_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_PACKET_FORMAT: u16 = PACKET_FORMAT_2025;

/// Output style of the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub bind_addr: SocketAddr,
    /// Decoder table for the in-game "UDP Format" setting.
    pub layout: &'static WireLayout,
    pub print_interval: Duration,
    pub recv_timeout: Duration,
    pub output: OutputFormat,
    pub banner: bool,
}

impl FeedConfig {
    /// Build a config from raw CLI values.
    ///
    /// # Errors
    ///
    /// [`CliError::InvalidConfiguration`] when either interval is zero.
    pub fn new(
        bind: IpAddr,
        port: u16,
        print_interval_ms: u64,
        recv_timeout_ms: u64,
    ) -> Result<Self, CliError> {
        if print_interval_ms == 0 {
            return Err(CliError::InvalidConfiguration(
                "--print-interval-ms must be > 0".to_string(),
            ));
        }
        if recv_timeout_ms == 0 {
            return Err(CliError::InvalidConfiguration(
                "--recv-timeout-ms must be > 0".to_string(),
            ));
        }
        Ok(Self {
            bind_addr: SocketAddr::new(bind, port),
            layout: &WireLayout::F1_25,
            print_interval: Duration::from_millis(print_interval_ms),
            recv_timeout: Duration::from_millis(recv_timeout_ms),
            output: OutputFormat::Human,
            banner: true,
        })
    }

    /// Select the decoder table for `packet_format`.
    ///
    /// # Errors
    ///
    /// [`CliError::InvalidConfiguration`] when no table exists for the format.
    pub fn with_packet_format(mut self, packet_format: u16) -> Result<Self, CliError> {
        self.layout = for_format(packet_format).ok_or_else(|| {
            CliError::InvalidConfiguration(format!(
                "unsupported --packet-format {packet_format} (supported: {PACKET_FORMAT_2025})"
            ))
        })?;
        Ok(self)
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    pub fn with_banner(mut self, banner: bool) -> Self {
        self.banner = banner;
        self
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::new(DEFAULT_BIND, DEFAULT_PORT),
            layout: &WireLayout::F1_25,
            print_interval: Duration::from_millis(DEFAULT_PRINT_INTERVAL_MS),
            recv_timeout: Duration::from_millis(DEFAULT_RECV_TIMEOUT_MS),
            output: OutputFormat::Human,
            banner: true,
        }
    }
}
