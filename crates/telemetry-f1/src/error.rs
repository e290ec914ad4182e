//! Error types for header and car-block decoding.

/// Reasons a datagram cannot be decoded.
///
/// Every variant is recoverable: the feed loop drops the datagram and waits
/// for the next one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The buffer is shorter than the packet header.
    #[error("packet too short for header: {actual} bytes (need {needed})")]
    InsufficientData {
        /// Header length required by the layout.
        needed: usize,
        /// Bytes actually received.
        actual: usize,
    },

    /// The header names a car slot outside the grid.
    #[error("player car index {index} out of range (max cars {max_cars})")]
    CarIndexOutOfRange {
        /// Index read from the header.
        index: u8,
        /// Number of car slots in one packet.
        max_cars: usize,
    },

    /// The buffer ends before the player's car block does.
    #[error("packet id {packet_id} too short for car block: {actual} bytes (need {needed})")]
    BufferTooShort {
        /// Packet id whose block was being located.
        packet_id: u8,
        /// End offset of the player's block.
        needed: usize,
        /// Bytes actually received.
        actual: usize,
    },

    /// Block offset arithmetic overflowed `usize`.
    #[error("car block offset overflow (block size {block_size}, car index {index})")]
    OffsetOverflow {
        /// Block size from the layout.
        block_size: usize,
        /// Car index being addressed.
        index: u8,
    },

    /// A layout field reaches past the bytes it is read from.
    #[error("field at offset {offset} (width {width}) exceeds {available} available bytes")]
    FieldOutOfBounds {
        /// Field offset within the block.
        offset: usize,
        /// Field width in bytes.
        width: usize,
        /// Bytes available in the block.
        available: usize,
    },

    /// A layout field is declared with a different encoding than the read.
    #[error("field at offset {offset} is declared {declared:?}, read as {requested:?}")]
    EncodingMismatch {
        /// Field offset within the block.
        offset: usize,
        /// Encoding declared by the layout.
        declared: crate::layout::Encoding,
        /// Encoding the decoder asked for.
        requested: crate::layout::Encoding,
    },
}

/// Inconsistencies found by [`crate::layout::WireLayout::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// A field does not fit in its enclosing region.
    #[error("{region}.{field} at offset {offset} (width {width}) does not fit in {size} bytes")]
    FieldOverrun {
        /// `header`, `telemetry` or `status`.
        region: &'static str,
        /// Field name.
        field: &'static str,
        /// Field offset.
        offset: usize,
        /// Field width.
        width: usize,
        /// Region size.
        size: usize,
    },

    /// Telemetry and status share a packet id.
    #[error("telemetry and status packets share packet id {0}")]
    DuplicatePacketId(u8),

    /// The grid size is zero or does not fit in the header's car-index byte.
    #[error("max car count {0} is not addressable by a u8 car index")]
    InvalidMaxCars(usize),
}
