//! Car Telemetry (packet id 6) decoding for the player's car.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::header::CarIndex;
use crate::layout::WireLayout;
use crate::reader::BlockReader;

/// Fields taken from one CarTelemetryData entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarTelemetry {
    /// Speed in km/h.
    pub speed_kmh: u16,
    /// Throttle position 0.0–1.0.
    pub throttle: f32,
    /// Steering input −1.0 (full left) to 1.0 (full right).
    pub steer: f32,
    /// Brake position 0.0–1.0.
    pub brake: f32,
    /// −1 = reverse, 0 = neutral, 1–8 = forward.
    pub gear: i8,
    pub engine_rpm: u16,
    pub drs_active: bool,
    /// Tyre surface temperatures in °C, wire order [RL, RR, FL, FR].
    pub tyres_surface_temperature: [u8; 4],
}

/// Decode the player's entry from a Car Telemetry packet.
///
/// # Errors
///
/// [`DecodeError::BufferTooShort`] when `buffer` does not hold the full
/// 60-byte block for `car_index`. Layout errors surface as
/// [`DecodeError::FieldOutOfBounds`] or [`DecodeError::EncodingMismatch`].
pub fn decode_telemetry(
    buffer: &[u8],
    car_index: CarIndex,
    layout: &WireLayout,
) -> Result<CarTelemetry, DecodeError> {
    let table = &layout.telemetry;
    let r = BlockReader::locate(
        buffer,
        layout.header.length,
        table.block_size,
        car_index,
        table.packet_id,
    )?;

    Ok(CarTelemetry {
        speed_kmh: r.u16_le(table.speed)?,
        throttle: r.f32_le(table.throttle)?,
        steer: r.f32_le(table.steer)?,
        brake: r.f32_le(table.brake)?,
        gear: r.i8(table.gear)?,
        engine_rpm: r.u16_le(table.engine_rpm)?,
        drs_active: r.flag(table.drs)?,
        tyres_surface_temperature: r.u8_array::<4>(table.tyres_surface_temperature)?,
    })
}
