//! Periodic readout of the telemetry state.
//!
//! Human lines look like:
//!
//! ```text
//! [14:03:27] SPD=287 km/h  GEAR= 7  RPM=11800  THR=1.0  BRK=0.0  STR=-0.1  DRS=ON  ALW=Y  ERS=2800000.0 J  Fuel≈12.5 laps  Tyres FL/FR/RL/RR=92°C/93°C/90°C/91°C
//! ```
//!
//! Fields never received render as `—`.

use std::io::Write;

use anyhow::Result;
use f1_telemetry_core::TelemetryState;
use serde::Serialize;

use crate::config::OutputFormat;

const UNKNOWN: &str = "—";

/// Reorder wire-order tyre values [RL, RR, FL, FR] to display order
/// [FL, FR, RL, RR].
pub fn tyres_display_order(wire: [u8; 4]) -> [u8; 4] {
    let [rl, rr, fl, fr] = wire;
    [fl, fr, rl, rr]
}

fn int_or_unknown<T: std::fmt::Display>(value: Option<T>, width: usize) -> String {
    match value {
        Some(v) => format!("{v:>width$}"),
        None => format!("{UNKNOWN:>width$}"),
    }
}

fn float_or_unknown(value: Option<f32>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{v:.1}{suffix}"),
        None => UNKNOWN.to_string(),
    }
}

fn flag_or_unknown(value: Option<bool>, on: &str, off: &str) -> String {
    match value {
        Some(true) => on.to_string(),
        Some(false) => off.to_string(),
        None => UNKNOWN.to_string(),
    }
}

fn tyres(value: Option<[u8; 4]>) -> String {
    match value {
        Some(wire) => {
            let [fl, fr, rl, rr] = tyres_display_order(wire);
            format!("{fl}°C/{fr}°C/{rl}°C/{rr}°C")
        }
        None => format!("{UNKNOWN}/{UNKNOWN}/{UNKNOWN}/{UNKNOWN}"),
    }
}

/// One human-readable status line.
pub fn render_line(state: &TelemetryState, timestamp: &str) -> String {
    format!(
        "[{timestamp}] SPD={} km/h  GEAR={}  RPM={}  THR={}  BRK={}  STR={}  DRS={}  ALW={}  ERS={}  Fuel≈{}  Tyres FL/FR/RL/RR={}",
        int_or_unknown(state.speed_kmh, 3),
        int_or_unknown(state.gear, 2),
        int_or_unknown(state.engine_rpm, 5),
        float_or_unknown(state.throttle, ""),
        float_or_unknown(state.brake, ""),
        float_or_unknown(state.steer, ""),
        flag_or_unknown(state.drs_active, "ON", "OFF"),
        flag_or_unknown(state.drs_allowed, "Y", "N"),
        float_or_unknown(state.ers_store_energy_j, " J"),
        float_or_unknown(state.fuel_remaining_laps, " laps"),
        tyres(state.tyres_surface_temperature),
    )
}

#[derive(Debug, Serialize)]
struct JsonLine<'a> {
    timestamp: &'a str,
    /// [FL, FR, RL, RR]
    tyres_display_order: Option<[u8; 4]>,
    state: &'a TelemetryState,
}

/// One compact JSON object.
///
/// # Errors
///
/// Fails only if serialisation fails.
pub fn render_json(state: &TelemetryState, timestamp: &str) -> Result<String> {
    let line = JsonLine {
        timestamp,
        tyres_display_order: state.tyres_surface_temperature.map(tyres_display_order),
        state,
    };
    Ok(serde_json::to_string(&line)?)
}

#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    format: OutputFormat,
}

impl Presenter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn render(&self, state: &TelemetryState, timestamp: &str) -> Result<String> {
        match self.format {
            OutputFormat::Human => Ok(render_line(state, timestamp)),
            OutputFormat::Json => render_json(state, timestamp),
        }
    }

    /// Render with the current local time and write one line to `out`.
    pub fn emit<W: Write>(&self, out: &mut W, state: &TelemetryState) -> Result<()> {
        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        let line = self.render(state, &timestamp)?;
        writeln!(out, "{line}")?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn racing_state() -> TelemetryState {
        TelemetryState {
            speed_kmh: Some(250),
            throttle: Some(1.0),
            steer: Some(-0.3),
            brake: Some(0.0),
            gear: Some(-1),
            engine_rpm: Some(11_800),
            drs_active: Some(true),
            tyres_surface_temperature: Some([90, 91, 92, 93]),
            fuel_remaining_laps: Some(12.5),
            drs_allowed: Some(true),
            ers_store_energy_j: Some(2_800_000.0),
        }
    }

    #[test]
    fn tyre_display_order_is_front_then_rear() {
        // Wire order RL, RR, FL, FR
        assert_eq!(tyres_display_order([90, 91, 92, 93]), [92, 93, 90, 91]);
    }

    #[test]
    fn line_before_any_packet_uses_placeholders() {
        let line = render_line(&TelemetryState::new(), "12:34:56");
        insta::assert_snapshot!(line, @"[12:34:56] SPD=  — km/h  GEAR= —  RPM=    —  THR=—  BRK=—  STR=—  DRS=—  ALW=—  ERS=—  Fuel≈—  Tyres FL/FR/RL/RR=—/—/—/—");
    }

    #[test]
    fn line_with_full_state() {
        let line = render_line(&racing_state(), "12:34:56");
        insta::assert_snapshot!(line, @"[12:34:56] SPD=250 km/h  GEAR=-1  RPM=11800  THR=1.0  BRK=0.0  STR=-0.3  DRS=ON  ALW=Y  ERS=2800000.0 J  Fuel≈12.5 laps  Tyres FL/FR/RL/RR=92°C/93°C/90°C/91°C");
    }

    #[test]
    fn status_only_state_shows_status_fields() {
        let state = TelemetryState {
            fuel_remaining_laps: Some(3.0),
            drs_allowed: Some(false),
            ers_store_energy_j: Some(0.0),
            ..TelemetryState::default()
        };
        let line = render_line(&state, "00:00:00");
        assert!(line.contains("SPD=  — km/h"));
        assert!(line.contains("ALW=N"));
        assert!(line.contains("ERS=0.0 J"));
        assert!(line.contains("Fuel≈3.0 laps"));
    }

    #[test]
    fn json_line_carries_state_and_display_order() -> TestResult {
        let raw = render_json(&racing_state(), "12:34:56")?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        assert_eq!(value["timestamp"], "12:34:56");
        assert_eq!(value["state"]["speed_kmh"], 250);
        assert_eq!(value["state"]["gear"], -1);
        assert_eq!(value["tyres_display_order"], serde_json::json!([92, 93, 90, 91]));
        Ok(())
    }

    #[test]
    fn json_line_reports_unknown_as_null() -> TestResult {
        let raw = render_json(&TelemetryState::new(), "12:34:56")?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        assert!(value["state"]["speed_kmh"].is_null());
        assert!(value["tyres_display_order"].is_null());
        Ok(())
    }

    #[test]
    fn emit_writes_one_line() -> TestResult {
        let presenter = Presenter::new(OutputFormat::Human);
        let mut out = Vec::new();
        presenter.emit(&mut out, &racing_state())?;
        let text = String::from_utf8(out)?;
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("SPD=250 km/h"));
        Ok(())
    }
}
