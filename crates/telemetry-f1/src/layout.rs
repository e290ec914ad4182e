//! Wire layout tables for the F1 UDP telemetry format.
//!
//! Every offset, width and encoding the decoders use comes from a
//! [`WireLayout`] value. A new packet-format revision is a new table, the
//! decoder functions stay untouched.
//!
//! ## Packet format 2025
//!
//! | Region         | Size (bytes) | Fields used                                       |
//! |----------------|--------------|---------------------------------------------------|
//! | Header         | 29           | format @0 (u16), packet id @6, player index @27   |
//! | Car Telemetry  | 60 per car   | speed, throttle, steer, brake, gear, rpm, DRS, tyres |
//! | Car Status     | 55 per car   | fuel laps @13, DRS allowed @23, ERS energy @41    |
//!
//! Car blocks start immediately after the header and repeat once per car
//! slot (22 slots).

use crate::error::LayoutError;

/// On-the-wire encoding of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Unsigned 8-bit.
    U8,
    /// Signed 8-bit.
    I8,
    /// Unsigned 16-bit little-endian.
    U16Le,
    /// IEEE-754 32-bit float, little-endian.
    F32Le,
    /// Fixed-length run of unsigned 8-bit values.
    U8Array(usize),
}

impl Encoding {
    /// Number of bytes the encoding occupies.
    pub const fn width(self) -> usize {
        match self {
            Encoding::U8 | Encoding::I8 => 1,
            Encoding::U16Le => 2,
            Encoding::F32Le => 4,
            Encoding::U8Array(len) => len,
        }
    }
}

/// Location and encoding of one field, relative to the start of its region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub offset: usize,
    pub encoding: Encoding,
}

impl FieldSpec {
    pub const fn new(offset: usize, encoding: Encoding) -> Self {
        Self { offset, encoding }
    }

    pub const fn width(&self) -> usize {
        self.encoding.width()
    }

    /// One past the last byte of the field, `None` on overflow.
    pub const fn end(&self) -> Option<usize> {
        self.offset.checked_add(self.width())
    }
}

/// Packet header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLayout {
    pub length: usize,
    pub packet_format: FieldSpec,
    pub packet_id: FieldSpec,
    pub player_car_index: FieldSpec,
}

impl HeaderLayout {
    pub const fn fields(&self) -> [(&'static str, FieldSpec); 3] {
        [
            ("packet_format", self.packet_format),
            ("packet_id", self.packet_id),
            ("player_car_index", self.player_car_index),
        ]
    }
}

/// One car's entry in the Car Telemetry packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarTelemetryLayout {
    pub packet_id: u8,
    pub block_size: usize,
    pub speed: FieldSpec,
    pub throttle: FieldSpec,
    pub steer: FieldSpec,
    pub brake: FieldSpec,
    pub gear: FieldSpec,
    pub engine_rpm: FieldSpec,
    pub drs: FieldSpec,
    /// Wire order RL, RR, FL, FR.
    pub tyres_surface_temperature: FieldSpec,
}

impl CarTelemetryLayout {
    pub const fn fields(&self) -> [(&'static str, FieldSpec); 8] {
        [
            ("speed", self.speed),
            ("throttle", self.throttle),
            ("steer", self.steer),
            ("brake", self.brake),
            ("gear", self.gear),
            ("engine_rpm", self.engine_rpm),
            ("drs", self.drs),
            ("tyres_surface_temperature", self.tyres_surface_temperature),
        ]
    }
}

/// One car's entry in the Car Status packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarStatusLayout {
    pub packet_id: u8,
    pub block_size: usize,
    pub fuel_remaining_laps: FieldSpec,
    pub drs_allowed: FieldSpec,
    pub ers_store_energy: FieldSpec,
}

impl CarStatusLayout {
    pub const fn fields(&self) -> [(&'static str, FieldSpec); 3] {
        [
            ("fuel_remaining_laps", self.fuel_remaining_laps),
            ("drs_allowed", self.drs_allowed),
            ("ers_store_energy", self.ers_store_energy),
        ]
    }
}

/// Complete description of one packet-format revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireLayout {
    /// Value of the header's packet-format field for this revision.
    pub packet_format: u16,
    /// Car slots per packet.
    pub max_cars: usize,
    pub header: HeaderLayout,
    pub telemetry: CarTelemetryLayout,
    pub status: CarStatusLayout,
}

/// Packet format identifier written by F1 25.
pub const PACKET_FORMAT_2025: u16 = 2025;

impl WireLayout {
    /// EA F1 25, packet format 2025.
    pub const F1_25: WireLayout = WireLayout {
        packet_format: PACKET_FORMAT_2025,
        max_cars: 22,
        header: HeaderLayout {
            length: 29,
            packet_format: FieldSpec::new(0, Encoding::U16Le),
            packet_id: FieldSpec::new(6, Encoding::U8),
            player_car_index: FieldSpec::new(27, Encoding::U8),
        },
        telemetry: CarTelemetryLayout {
            packet_id: 6,
            block_size: 60,
            speed: FieldSpec::new(0, Encoding::U16Le),
            throttle: FieldSpec::new(2, Encoding::F32Le),
            steer: FieldSpec::new(6, Encoding::F32Le),
            brake: FieldSpec::new(10, Encoding::F32Le),
            gear: FieldSpec::new(15, Encoding::I8),
            engine_rpm: FieldSpec::new(16, Encoding::U16Le),
            drs: FieldSpec::new(18, Encoding::U8),
            tyres_surface_temperature: FieldSpec::new(30, Encoding::U8Array(4)),
        },
        status: CarStatusLayout {
            packet_id: 7,
            block_size: 55,
            fuel_remaining_laps: FieldSpec::new(13, Encoding::F32Le),
            drs_allowed: FieldSpec::new(23, Encoding::U8),
            ers_store_energy: FieldSpec::new(41, Encoding::F32Le),
        },
    };

    /// Check that every field fits its region and the packet ids are distinct.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.max_cars == 0 || self.max_cars > usize::from(u8::MAX) + 1 {
            return Err(LayoutError::InvalidMaxCars(self.max_cars));
        }
        if self.telemetry.packet_id == self.status.packet_id {
            return Err(LayoutError::DuplicatePacketId(self.telemetry.packet_id));
        }
        check_region("header", self.header.length, &self.header.fields())?;
        check_region(
            "telemetry",
            self.telemetry.block_size,
            &self.telemetry.fields(),
        )?;
        check_region("status", self.status.block_size, &self.status.fields())?;
        Ok(())
    }
}

fn check_region(
    region: &'static str,
    size: usize,
    fields: &[(&'static str, FieldSpec)],
) -> Result<(), LayoutError> {
    for &(field, spec) in fields {
        let fits = spec.end().is_some_and(|end| end <= size);
        if !fits {
            return Err(LayoutError::FieldOverrun {
                region,
                field,
                offset: spec.offset,
                width: spec.width(),
                size,
            });
        }
    }
    Ok(())
}

/// Look up the layout table for a header's packet-format value.
pub fn for_format(packet_format: u16) -> Option<&'static WireLayout> {
    match packet_format {
        PACKET_FORMAT_2025 => Some(&WireLayout::F1_25),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn f1_25_table_is_consistent() -> TestResult {
        WireLayout::F1_25.validate()?;
        Ok(())
    }

    #[test]
    fn f1_25_sizes_match_wire_format() {
        let layout = WireLayout::F1_25;
        assert_eq!(layout.header.length, 29);
        assert_eq!(layout.telemetry.block_size, 60);
        assert_eq!(layout.status.block_size, 55);
        assert_eq!(layout.max_cars, 22);
    }

    #[test]
    fn status_fields_end_inside_block() {
        let furthest = WireLayout::F1_25
            .status
            .fields()
            .iter()
            .filter_map(|(_, spec)| spec.end())
            .max();
        assert_eq!(furthest, Some(45));
    }

    #[test]
    fn tyre_array_is_four_bytes() {
        assert_eq!(WireLayout::F1_25.telemetry.tyres_surface_temperature.width(), 4);
    }

    #[test]
    fn validate_reports_field_past_block_end() {
        let mut layout = WireLayout::F1_25;
        layout.status.block_size = 44;
        let result = layout.validate();
        assert_eq!(
            result,
            Err(LayoutError::FieldOverrun {
                region: "status",
                field: "ers_store_energy",
                offset: 41,
                width: 4,
                size: 44,
            })
        );
    }

    #[test]
    fn validate_rejects_shared_packet_id() {
        let mut layout = WireLayout::F1_25;
        layout.status.packet_id = layout.telemetry.packet_id;
        assert_eq!(layout.validate(), Err(LayoutError::DuplicatePacketId(6)));
    }

    #[test]
    fn validate_rejects_unaddressable_grid() {
        let mut layout = WireLayout::F1_25;
        layout.max_cars = 0;
        assert_eq!(layout.validate(), Err(LayoutError::InvalidMaxCars(0)));
    }

    #[test]
    fn for_format_knows_only_2025() {
        assert_eq!(for_format(2025), Some(&WireLayout::F1_25));
        assert_eq!(for_format(2024), None);
    }
}
