//! Latest-known telemetry for the player's car.

use serde::Serialize;

use crate::car_status::CarStatus;
use crate::car_telemetry::CarTelemetry;
use crate::packet::DecodedPacket;

/// Aggregate of the most recent value of every tracked field.
///
/// `None` means the field has never been received, which is distinct from a
/// received zero. Telemetry and status packets arrive at different rates and
/// in any order; each apply overwrites only the fields its packet carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TelemetryState {
    // Car Telemetry
    pub speed_kmh: Option<u16>,
    pub throttle: Option<f32>,
    pub steer: Option<f32>,
    pub brake: Option<f32>,
    pub gear: Option<i8>,
    pub engine_rpm: Option<u16>,
    pub drs_active: Option<bool>,
    /// Wire order [RL, RR, FL, FR].
    pub tyres_surface_temperature: Option<[u8; 4]>,

    // Car Status
    pub fuel_remaining_laps: Option<f32>,
    pub drs_allowed: Option<bool>,
    pub ers_store_energy_j: Option<f32>,
}

impl TelemetryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_telemetry(&mut self, t: &CarTelemetry) {
        self.speed_kmh = Some(t.speed_kmh);
        self.throttle = Some(t.throttle);
        self.steer = Some(t.steer);
        self.brake = Some(t.brake);
        self.gear = Some(t.gear);
        self.engine_rpm = Some(t.engine_rpm);
        self.drs_active = Some(t.drs_active);
        self.tyres_surface_temperature = Some(t.tyres_surface_temperature);
    }

    pub fn apply_status(&mut self, s: &CarStatus) {
        self.fuel_remaining_laps = Some(s.fuel_remaining_laps);
        self.drs_allowed = Some(s.drs_allowed);
        self.ers_store_energy_j = Some(s.ers_store_energy_j);
    }

    /// Merge a routed packet. [`DecodedPacket::Ignored`] is a no-op.
    pub fn apply(&mut self, packet: &DecodedPacket) {
        match packet {
            DecodedPacket::Telemetry(t) => self.apply_telemetry(t),
            DecodedPacket::Status(s) => self.apply_status(s),
            DecodedPacket::Ignored { .. } => {}
        }
    }

    /// True once any Car Telemetry packet has been merged.
    pub fn has_telemetry(&self) -> bool {
        self.speed_kmh.is_some()
    }

    /// True once any Car Status packet has been merged.
    pub fn has_status(&self) -> bool {
        self.fuel_remaining_laps.is_some()
    }
}
