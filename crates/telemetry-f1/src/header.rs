//! Packet header decoding.

use crate::error::DecodeError;
use crate::layout::WireLayout;
use crate::reader::BlockReader;

/// Car slot index that has been checked against the layout's grid size.
///
/// Only [`CarIndex::new`] builds one, so block offset arithmetic never sees
/// an index at or above `max_cars`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CarIndex(u8);

impl CarIndex {
    /// # Errors
    ///
    /// [`DecodeError::CarIndexOutOfRange`] when `index >= layout.max_cars`.
    pub fn new(index: u8, layout: &WireLayout) -> Result<Self, DecodeError> {
        if usize::from(index) >= layout.max_cars {
            return Err(DecodeError::CarIndexOutOfRange {
                index,
                max_cars: layout.max_cars,
            });
        }
        Ok(Self(index))
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    pub fn as_usize(self) -> usize {
        usize::from(self.0)
    }
}

impl std::fmt::Display for CarIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Envelope fields of one datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    /// Reported packet format (for F1 25, `2025`). Not enforced.
    pub packet_format: u16,
    pub packet_id: u8,
    pub player_car_index: CarIndex,
}

/// Decode the packet header of `buffer` using `layout`.
///
/// # Errors
///
/// - [`DecodeError::InsufficientData`] if `buffer` is shorter than the header.
/// - [`DecodeError::CarIndexOutOfRange`] if the player index is not a valid
///   car slot, whatever the buffer length.
pub fn decode_header(buffer: &[u8], layout: &WireLayout) -> Result<PacketHeader, DecodeError> {
    let header = &layout.header;
    let data = buffer
        .get(..header.length)
        .ok_or(DecodeError::InsufficientData {
            needed: header.length,
            actual: buffer.len(),
        })?;
    let r = BlockReader::new(data);
    let packet_format = r.u16_le(header.packet_format)?;
    let packet_id = r.u8(header.packet_id)?;
    let player_car_index = CarIndex::new(r.u8(header.player_car_index)?, layout)?;
    Ok(PacketHeader {
        packet_format,
        packet_id,
        player_car_index,
    })
}

/// [`decode_header`] with the F1 25 table.
///
/// # Errors
///
/// See [`decode_header`].
pub fn decode_header_2025(buffer: &[u8]) -> Result<PacketHeader, DecodeError> {
    decode_header(buffer, &WireLayout::F1_25)
}
