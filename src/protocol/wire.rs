//! Outbound / inbound JSON record shapes.
//!
//! Field names follow the original dashboard protocol (camelCase), so an
//! existing supervisor can parse this firmware's output unchanged.

use serde::{Deserialize, Serialize};

use crate::app::events::{CommandAck, TelemetryData};
use crate::engine::OperatingMode;

// ───────────────────────────────────────────────────────────────
// Inbound
// ───────────────────────────────────────────────────────────────

/// Structured command record: `{"command":"ssr_on"}` etc.
/// Unknown extra fields are ignored.
#[derive(Debug, Deserialize)]
pub struct CommandRecord {
    pub command: String,
}

// ───────────────────────────────────────────────────────────────
// Outbound — telemetry
// ───────────────────────────────────────────────────────────────

/// Periodic telemetry record.
#[derive(Debug, Serialize)]
pub struct TelemetryRecord {
    pub percentage: u8,
    /// Pack voltage, rounded to 2 decimal places.
    pub voltage: f32,
    /// Battery temperature, rounded to 1 decimal place.
    pub temperature: f32,
    #[serde(rename = "isCharging")]
    pub is_charging: bool,
    #[serde(rename = "ssrStatus")]
    pub ssr_status: bool,
    #[serde(rename = "autoCharge")]
    pub auto_charge: bool,
}

impl From<&TelemetryData> for TelemetryRecord {
    fn from(t: &TelemetryData) -> Self {
        Self {
            percentage: t.percentage,
            voltage: (t.voltage_v * 100.0).round() / 100.0,
            temperature: (t.temperature_c * 10.0).round() / 10.0,
            is_charging: t.is_charging,
            ssr_status: t.ssr_enabled,
            auto_charge: t.auto_charge,
        }
    }
}

/// Serialize a telemetry snapshot to one wire line (no trailing newline).
pub fn telemetry_line(t: &TelemetryData) -> String {
    serde_json::to_string(&TelemetryRecord::from(t)).unwrap_or_default()
}

// ───────────────────────────────────────────────────────────────
// Outbound — acknowledgements
// ───────────────────────────────────────────────────────────────

/// Command acknowledgement echoed back on the line channel.
#[derive(Debug, Serialize)]
pub struct AckRecord {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssr: Option<&'static str>,
    #[serde(rename = "ssrRequest", skip_serializing_if = "Option::is_none")]
    pub ssr_request: Option<&'static str>,
    #[serde(rename = "autoCharge", skip_serializing_if = "Option::is_none")]
    pub auto_charge: Option<bool>,
}

impl AckRecord {
    fn empty(status: &'static str) -> Self {
        Self {
            status,
            mode: None,
            ssr: None,
            ssr_request: None,
            auto_charge: None,
        }
    }

    /// Startup banner.
    pub fn ready() -> Self {
        Self::empty("ready")
    }
}

impl From<&CommandAck> for AckRecord {
    fn from(ack: &CommandAck) -> Self {
        match ack {
            CommandAck::Mode(m) => Self {
                mode: Some(mode_str(*m)),
                ..Self::empty("success")
            },
            CommandAck::AutoCharge(enabled) => Self {
                auto_charge: Some(*enabled),
                ..Self::empty("success")
            },
            CommandAck::Ssr(on) => Self {
                ssr: Some(on_str(*on)),
                ..Self::empty("success")
            },
            CommandAck::SsrAdvisory(on) => Self {
                ssr_request: Some(on_str(*on)),
                ..Self::empty("accepted")
            },
            CommandAck::Ignored => Self::empty("ignored"),
        }
    }
}

/// Serialize a command acknowledgement to one wire line.
pub fn ack_line(ack: &CommandAck) -> String {
    serde_json::to_string(&AckRecord::from(ack)).unwrap_or_default()
}

/// Serialize the startup banner.
pub fn ready_line() -> String {
    serde_json::to_string(&AckRecord::ready()).unwrap_or_default()
}

fn mode_str(mode: OperatingMode) -> &'static str {
    match mode {
        OperatingMode::Auto => "auto",
        OperatingMode::Manual => "manual",
    }
}

fn on_str(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn telemetry_uses_dashboard_field_names() {
        let t = TelemetryData {
            percentage: 72,
            voltage_v: 3.87654,
            temperature_c: 31.27,
            is_charging: true,
            ssr_enabled: true,
            auto_charge: true,
        };
        let line = telemetry_line(&t);
        assert!(line.contains(r#""percentage":72"#), "{line}");
        assert!(line.contains(r#""voltage":3.88"#), "{line}");
        assert!(line.contains(r#""temperature":31.3"#), "{line}");
        assert!(line.contains(r#""isCharging":true"#), "{line}");
        assert!(line.contains(r#""ssrStatus":true"#), "{line}");
        assert!(line.contains(r#""autoCharge":true"#), "{line}");
    }

    #[test]
    fn ssr_ack_matches_original_shape() {
        let line = ack_line(&CommandAck::Ssr(true));
        assert_eq!(line, r#"{"status":"success","ssr":"on"}"#);
    }

    #[test]
    fn toggle_ack_carries_auto_charge() {
        let line = ack_line(&CommandAck::AutoCharge(false));
        assert_eq!(line, r#"{"status":"success","autoCharge":false}"#);
    }

    #[test]
    fn rejection_is_explicit() {
        let line = ack_line(&CommandAck::Ignored);
        assert_eq!(line, r#"{"status":"ignored"}"#);
    }

    #[test]
    fn ready_banner() {
        assert_eq!(ready_line(), r#"{"status":"ready"}"#);
    }
}
