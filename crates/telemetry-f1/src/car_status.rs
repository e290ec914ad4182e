//! Car Status (packet id 7) decoding for the player's car.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::header::CarIndex;
use crate::layout::WireLayout;
use crate::reader::BlockReader;

/// Fields taken from one CarStatusData entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarStatus {
    /// Game's estimate of laps left on the current fuel load.
    pub fuel_remaining_laps: f32,
    pub drs_allowed: bool,
    /// ERS store energy in Joules.
    pub ers_store_energy_j: f32,
}

/// Decode the player's entry from a Car Status packet.
///
/// # Errors
///
/// [`DecodeError::BufferTooShort`] when `buffer` does not hold the full
/// status block for `car_index`.
pub fn decode_status(
    buffer: &[u8],
    car_index: CarIndex,
    layout: &WireLayout,
) -> Result<CarStatus, DecodeError> {
    let table = &layout.status;
    let r = BlockReader::locate(
        buffer,
        layout.header.length,
        table.block_size,
        car_index,
        table.packet_id,
    )?;

    Ok(CarStatus {
        fuel_remaining_laps: r.f32_le(table.fuel_remaining_laps)?,
        drs_allowed: r.flag(table.drs_allowed)?,
        ers_store_energy_j: r.f32_le(table.ers_store_energy)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{StatusFixture, build_car_status_packet};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn round_trip_fuel_drs_ers() -> TestResult {
        let fixture = StatusFixture {
            fuel_remaining_laps: 12.3,
            drs_allowed: 1,
            ers_store_energy_j: 2_800_000.0,
        };
        let raw = build_car_status_packet(3, &fixture);
        let index = CarIndex::new(3, &WireLayout::F1_25)?;
        let s = decode_status(&raw, index, &WireLayout::F1_25)?;
        assert!((s.fuel_remaining_laps - 12.3).abs() < 1e-5);
        assert!(s.drs_allowed);
        assert!((s.ers_store_energy_j - 2_800_000.0).abs() < 1.0);
        Ok(())
    }

    #[test]
    fn drs_not_allowed_reads_false() -> TestResult {
        let raw = build_car_status_packet(0, &StatusFixture::default());
        let index = CarIndex::new(0, &WireLayout::F1_25)?;
        assert!(!decode_status(&raw, index, &WireLayout::F1_25)?.drs_allowed);
        Ok(())
    }

    #[test]
    fn last_car_needs_full_grid() -> TestResult {
        let raw = build_car_status_packet(21, &StatusFixture::default());
        assert_eq!(raw.len(), 29 + 22 * 55);
        let index = CarIndex::new(21, &WireLayout::F1_25)?;
        decode_status(&raw, index, &WireLayout::F1_25)?;

        let short = raw.get(..raw.len() - 1).unwrap_or_default();
        assert!(matches!(
            decode_status(short, index, &WireLayout::F1_25),
            Err(DecodeError::BufferTooShort { packet_id: 7, .. })
        ));
        Ok(())
    }
}
