//! Decoder and state model for the EA F1 25 UDP telemetry feed.
//!
//! F1 25 broadcasts little-endian binary UDP packets (packet format `2025`)
//! on port **20777** by default. Every packet starts with a 29-byte header
//! followed by one fixed-size block per car slot (22 slots). This crate
//! extracts the player's car from two packet types:
//!
//! | Packet ID | Name          | Fields extracted                                   |
//! |-----------|---------------|----------------------------------------------------|
//! | 6         | Car Telemetry | speed, throttle, steer, brake, gear, RPM, DRS,     |
//! |           |               | tyre surface temperatures                          |
//! | 7         | Car Status    | fuel remaining (laps), DRS allowed, ERS energy (J) |
//!
//! Other packet IDs are routed to [`DecodedPacket::Ignored`].
//!
//! All offsets live in a [`WireLayout`] table; the decoders take the table as
//! an argument and never hard-code positions.
//!
//! # Usage
//!
//! ```rust
//! use f1_telemetry_core::{TelemetryState, WireLayout, decode_packet};
//! use f1_telemetry_core::fixtures::{TelemetryFixture, build_car_telemetry_packet};
//!
//! # fn main() -> Result<(), f1_telemetry_core::DecodeError> {
//! let fixture = TelemetryFixture { speed_kmh: 250, ..Default::default() };
//! let raw = build_car_telemetry_packet(0, &fixture);
//! let mut state = TelemetryState::new();
//! let datagram = decode_packet(&raw, &WireLayout::F1_25)?;
//! state.apply(&datagram.packet);
//! assert_eq!(state.speed_kmh, Some(250));
//! # Ok(())
//! # }
//! ```

#![deny(static_mut_refs)]

pub mod car_status;
pub mod car_telemetry;
pub mod error;
pub mod fixtures;
pub mod header;
pub mod layout;
pub mod packet;
pub mod reader;
pub mod state;

pub use car_status::{CarStatus, decode_status};
pub use car_telemetry::{CarTelemetry, decode_telemetry};
pub use error::{DecodeError, LayoutError};
pub use header::{CarIndex, PacketHeader, decode_header, decode_header_2025};
pub use layout::{Encoding, FieldSpec, PACKET_FORMAT_2025, WireLayout, for_format};
pub use packet::{Datagram, DecodedPacket, decode_packet};
pub use state::TelemetryState;
