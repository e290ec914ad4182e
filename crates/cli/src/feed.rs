//! UDP feed loop: receive, decode, merge, and drive the presenter.

use std::collections::BTreeSet;
use std::future::Future;
use std::io::Write;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use f1_telemetry_core::{DecodeError, DecodedPacket, TelemetryState, WireLayout, decode_packet};
use serde::Serialize;
use tokio::net::UdpSocket;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use crate::config::FeedConfig;
use crate::error::CliError;
use crate::presenter::Presenter;

/// Receive buffer size; the largest F1 25 packet is well under this.
const MAX_PACKET_BYTES: usize = 4096;

/// Counters for one run of the feed loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeedStats {
    pub datagrams: u64,
    pub telemetry: u64,
    pub status: u64,
    pub ignored: u64,
    pub rejected: u64,
    pub timeouts: u64,
    pub recv_errors: u64,
}

/// Decoder state owned by the feed loop.
#[derive(Debug)]
pub struct Feed {
    layout: &'static WireLayout,
    state: TelemetryState,
    stats: FeedStats,
    seen_formats: BTreeSet<u16>,
}

impl Feed {
    pub fn new(layout: &'static WireLayout) -> Self {
        Self {
            layout,
            state: TelemetryState::new(),
            stats: FeedStats::default(),
            seen_formats: BTreeSet::new(),
        }
    }

    pub fn state(&self) -> &TelemetryState {
        &self.state
    }

    pub fn stats(&self) -> FeedStats {
        self.stats
    }

    /// Decode one datagram and merge it into the state.
    ///
    /// Rejected datagrams leave the state untouched.
    pub fn handle_datagram(&mut self, raw: &[u8]) -> Result<DecodedPacket, DecodeError> {
        self.stats.datagrams = self.stats.datagrams.saturating_add(1);
        let datagram = match decode_packet(raw, self.layout) {
            Ok(datagram) => datagram,
            Err(err) => {
                self.stats.rejected = self.stats.rejected.saturating_add(1);
                debug!(error = %err, len = raw.len(), "dropping datagram");
                return Err(err);
            }
        };

        let format = datagram.header.packet_format;
        if format != self.layout.packet_format && self.seen_formats.insert(format) {
            warn!(
                packet_format = format,
                expected = self.layout.packet_format,
                "packet format differs from --packet-format; check the in-game UDP Format setting"
            );
        }

        let counter = match datagram.packet {
            DecodedPacket::Telemetry(_) => &mut self.stats.telemetry,
            DecodedPacket::Status(_) => &mut self.stats.status,
            DecodedPacket::Ignored { .. } => &mut self.stats.ignored,
        };
        *counter = counter.saturating_add(1);

        self.state.apply(&datagram.packet);
        Ok(datagram.packet)
    }

    fn note_timeout(&mut self) {
        self.stats.timeouts = self.stats.timeouts.saturating_add(1);
    }

    fn note_recv_error(&mut self) {
        self.stats.recv_errors = self.stats.recv_errors.saturating_add(1);
    }
}

/// Pause after the first failed receive; doubles per consecutive failure.
const RECV_ERROR_PAUSE: Duration = Duration::from_millis(10);
const RECV_ERROR_PAUSE_MAX: Duration = Duration::from_millis(500);
/// Consecutive failures between repeated warnings.
const RECV_ERROR_WARN_EVERY: u64 = 100;

/// Backoff for a socket that keeps failing `recv_from` (for example an
/// ICMP port-unreachable storm reported as connection reset).
#[derive(Debug, Default)]
struct RecvBackoff {
    streak: u64,
}

impl RecvBackoff {
    /// Record one failure. Returns whether to warn and how long to pause.
    fn on_error(&mut self) -> (bool, Duration) {
        self.streak = self.streak.saturating_add(1);
        let report = self.streak == 1 || self.streak.is_multiple_of(RECV_ERROR_WARN_EVERY);
        let doublings = u32::try_from(self.streak.saturating_sub(1))
            .unwrap_or(u32::MAX)
            .min(16);
        let pause = RECV_ERROR_PAUSE
            .saturating_mul(2u32.saturating_pow(doublings))
            .min(RECV_ERROR_PAUSE_MAX);
        (report, pause)
    }

    fn reset(&mut self) {
        self.streak = 0;
    }

    fn streak(&self) -> u64 {
        self.streak
    }
}

/// Bind the feed socket.
///
/// # Errors
///
/// [`CliError::Bind`] if the address is unavailable.
pub async fn bind_socket(addr: SocketAddr) -> Result<UdpSocket, CliError> {
    UdpSocket::bind(addr)
        .await
        .map_err(|source| CliError::Bind { addr, source })
}

/// Final state of a feed run.
#[derive(Debug, Clone, Copy)]
pub struct FeedReport {
    pub stats: FeedStats,
    pub state: TelemetryState,
}

/// Run the feed loop on `socket` until `shutdown` resolves.
///
/// Each iteration waits for whichever comes first: shutdown, a print tick,
/// a datagram, or the idle deadline. The idle deadline lives across
/// iterations and is pushed back by `recv_timeout` whenever a datagram
/// arrives or the deadline itself fires, so print ticks never postpone it.
/// The socket is dropped before returning.
pub async fn run_until<W, F>(
    socket: UdpSocket,
    config: &FeedConfig,
    presenter: Presenter,
    out: &mut W,
    shutdown: F,
) -> FeedReport
where
    W: Write,
    F: Future,
{
    let mut feed = Feed::new(config.layout);
    let mut buf = vec![0u8; MAX_PACKET_BYTES];
    let mut ticker =
        tokio::time::interval_at(Instant::now() + config.print_interval, config.print_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let idle = tokio::time::sleep(config.recv_timeout);
    let mut backoff = RecvBackoff::default();
    tokio::pin!(shutdown);
    tokio::pin!(idle);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                debug!("shutdown requested");
                break;
            }
            _ = ticker.tick() => {
                if let Err(err) = presenter.emit(out, feed.state()) {
                    warn!(error = %err, "failed to write telemetry line");
                }
            }
            () = &mut idle => {
                trace!("UDP receive timeout");
                feed.note_timeout();
                idle.as_mut().reset(Instant::now() + config.recv_timeout);
            }
            recv = socket.recv_from(&mut buf) => {
                match recv {
                    Ok((len, source)) => {
                        backoff.reset();
                        idle.as_mut().reset(Instant::now() + config.recv_timeout);
                        trace!(len, %source, "datagram received");
                        let raw = buf.get(..len).unwrap_or_default();
                        // Rejections are counted and logged inside the feed.
                        if let Err(err) = feed.handle_datagram(raw) {
                            trace!(error = %err, "datagram skipped");
                        }
                    }
                    Err(err) => {
                        feed.note_recv_error();
                        let (report, pause) = backoff.on_error();
                        if report {
                            warn!(
                                error = %err,
                                consecutive = backoff.streak(),
                                "UDP receive error"
                            );
                        } else {
                            debug!(
                                error = %err,
                                consecutive = backoff.streak(),
                                "UDP receive error"
                            );
                        }
                        tokio::time::sleep(pause).await;
                    }
                }
            }
        }
    }

    drop(socket);
    let stats = feed.stats();
    info!(
        datagrams = stats.datagrams,
        telemetry = stats.telemetry,
        status = stats.status,
        ignored = stats.ignored,
        rejected = stats.rejected,
        timeouts = stats.timeouts,
        recv_errors = stats.recv_errors,
        "F1 25 feed stopped"
    );
    FeedReport {
        stats,
        state: *feed.state(),
    }
}

/// Check the decoder table, bind `config.bind_addr` and run until Ctrl-C.
///
/// # Errors
///
/// An inconsistent decoder table or a bind failure. Decode and receive
/// errors are logged and skipped.
pub async fn run<W: Write>(config: &FeedConfig, out: &mut W) -> Result<FeedReport> {
    config
        .layout
        .validate()
        .map_err(|source| CliError::Layout {
            format: config.layout.packet_format,
            source,
        })?;
    let socket = bind_socket(config.bind_addr)
        .await
        .context("failed to start the F1 25 UDP feed")?;
    info!(
        addr = %config.bind_addr,
        packet_format = config.layout.packet_format,
        "F1 25 UDP feed bound"
    );

    let presenter = Presenter::new(config.output);
    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };
    Ok(run_until(socket, config, presenter, out, shutdown).await)
}
