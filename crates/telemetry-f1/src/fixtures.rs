//! Synthetic packet builders (pub for integration tests and the CLI's
//! loopback tests).
//!
//! Offsets come from [`WireLayout::F1_25`] so the builders and the decoders
//! agree by construction; the tests in this crate pin the numbers
//! separately.

use crate::layout::{FieldSpec, WireLayout};

/// Player-car values written into a Car Telemetry packet.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TelemetryFixture {
    pub speed_kmh: u16,
    pub throttle: f32,
    pub steer: f32,
    pub brake: f32,
    pub gear: i8,
    pub engine_rpm: u16,
    pub drs: u8,
    /// Wire order [RL, RR, FL, FR].
    pub tyres_surface_temperature: [u8; 4],
}

/// Player-car values written into a Car Status packet.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatusFixture {
    pub fuel_remaining_laps: f32,
    pub drs_allowed: u8,
    pub ers_store_energy_j: f32,
}

/// Build a 29-byte F1 25 packet header.
pub fn build_header_bytes(packet_format: u16, packet_id: u8, player_index: u8) -> Vec<u8> {
    let mut buf = Vec::with_capacity(29);
    buf.extend_from_slice(&packet_format.to_le_bytes()); // 0-1
    buf.push(25); // gameYear  (2)
    buf.push(1); // gameMajorVersion  (3)
    buf.push(0); // gameMinorVersion  (4)
    buf.push(1); // packetVersion  (5)
    buf.push(packet_id); // 6
    buf.extend_from_slice(&0u64.to_le_bytes()); // sessionUID  (7-14)
    buf.extend_from_slice(&0.0f32.to_le_bytes()); // sessionTime  (15-18)
    buf.extend_from_slice(&0u32.to_le_bytes()); // frameIdentifier  (19-22)
    buf.extend_from_slice(&0u32.to_le_bytes()); // overallFrameIdentifier  (23-26)
    buf.push(player_index); // 27
    buf.push(255); // secondaryPlayerCarIndex  (28)
    buf
}

/// Build a full Car Telemetry packet (all 22 slots + 3-byte trailer) with
/// `fixture` written into `player_index`'s slot. Other slots are zero.
///
/// `player_index` must be below 22 for the values to land inside the packet.
pub fn build_car_telemetry_packet(player_index: u8, fixture: &TelemetryFixture) -> Vec<u8> {
    let layout = WireLayout::F1_25;
    let table = layout.telemetry;
    let mut buf = build_header_bytes(layout.packet_format, table.packet_id, player_index);
    buf.resize(layout.header.length + layout.max_cars * table.block_size, 0);
    // mfdPanelIndex, mfdPanelIndexSecondary, suggestedGear
    buf.extend_from_slice(&[255, 255, 0]);

    let base = layout.header.length + usize::from(player_index) * table.block_size;
    put(&mut buf, base, table.speed, &fixture.speed_kmh.to_le_bytes());
    put(&mut buf, base, table.throttle, &fixture.throttle.to_le_bytes());
    put(&mut buf, base, table.steer, &fixture.steer.to_le_bytes());
    put(&mut buf, base, table.brake, &fixture.brake.to_le_bytes());
    put(&mut buf, base, table.gear, &fixture.gear.to_le_bytes());
    put(&mut buf, base, table.engine_rpm, &fixture.engine_rpm.to_le_bytes());
    put(&mut buf, base, table.drs, &[fixture.drs]);
    put(
        &mut buf,
        base,
        table.tyres_surface_temperature,
        &fixture.tyres_surface_temperature,
    );
    buf
}

/// Build a full Car Status packet (all 22 slots) with `fixture` written into
/// `player_index`'s slot.
pub fn build_car_status_packet(player_index: u8, fixture: &StatusFixture) -> Vec<u8> {
    let layout = WireLayout::F1_25;
    let table = layout.status;
    let mut buf = build_header_bytes(layout.packet_format, table.packet_id, player_index);
    buf.resize(layout.header.length + layout.max_cars * table.block_size, 0);

    let base = layout.header.length + usize::from(player_index) * table.block_size;
    put(
        &mut buf,
        base,
        table.fuel_remaining_laps,
        &fixture.fuel_remaining_laps.to_le_bytes(),
    );
    put(&mut buf, base, table.drs_allowed, &[fixture.drs_allowed]);
    put(
        &mut buf,
        base,
        table.ers_store_energy,
        &fixture.ers_store_energy_j.to_le_bytes(),
    );
    buf
}

/// Write `bytes` at `base + spec.offset`. Writes that would fall outside
/// `buf` are dropped.
pub fn put(buf: &mut [u8], base: usize, spec: FieldSpec, bytes: &[u8]) {
    let Some(start) = base.checked_add(spec.offset) else {
        return;
    };
    let Some(end) = start.checked_add(bytes.len()) else {
        return;
    };
    if let Some(dst) = buf.get_mut(start..end) {
        dst.copy_from_slice(bytes);
    }
}
