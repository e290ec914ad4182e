//! Routing of a raw datagram to the matching block decoder.

use tracing::trace;

use crate::car_status::{CarStatus, decode_status};
use crate::car_telemetry::{CarTelemetry, decode_telemetry};
use crate::error::DecodeError;
use crate::header::{PacketHeader, decode_header};
use crate::layout::WireLayout;

/// Result of routing one datagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecodedPacket {
    Telemetry(CarTelemetry),
    Status(CarStatus),
    /// A valid header for a packet type this crate does not decode.
    Ignored { packet_id: u8 },
}

/// A routed datagram together with its header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datagram {
    pub header: PacketHeader,
    pub packet: DecodedPacket,
}

/// Decode the header, then the player's block if the packet type is known.
///
/// Unknown packet ids are not an error, they come back as
/// [`DecodedPacket::Ignored`].
///
/// # Errors
///
/// Any [`DecodeError`] from the header or block decoders.
pub fn decode_packet(buffer: &[u8], layout: &WireLayout) -> Result<Datagram, DecodeError> {
    let header = decode_header(buffer, layout)?;
    let packet = match header.packet_id {
        id if id == layout.telemetry.packet_id => DecodedPacket::Telemetry(decode_telemetry(
            buffer,
            header.player_car_index,
            layout,
        )?),
        id if id == layout.status.packet_id => {
            DecodedPacket::Status(decode_status(buffer, header.player_car_index, layout)?)
        }
        packet_id => {
            trace!(packet_id, "ignoring unrecognised packet id");
            DecodedPacket::Ignored { packet_id }
        }
    };
    Ok(Datagram { header, packet })
}
