//! System configuration parameters
//!
//! All tunable parameters for the charger controller.
//! Values can be overridden at runtime over the command channel in a
//! future revision; today they are fixed at boot.

use serde::{Deserialize, Serialize};

/// How AUTO mode treats plain `ON` / `OFF` commands.
///
/// The two deployed controller generations disagreed here: one let an
/// AUTO-mode `ON`/`OFF` write the SSR state directly, the other derived
/// the SSR purely from charge thresholds and treated the command as a
/// supervisor heartbeat.  Both behaviours are kept selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SsrCommandPolicy {
    /// AUTO-mode `ON`/`OFF` refreshes the fail-safe timer only; the SSR
    /// state keeps following the charge thresholds.
    #[default]
    Advisory,
    /// AUTO-mode `ON`/`OFF` writes the SSR state directly; thresholds
    /// may override it on a later cycle.
    Direct,
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargerConfig {
    // --- Battery ---
    /// Voltage mapped to 0 % state of charge
    pub battery_min_voltage: f32,
    /// Voltage mapped to 100 % state of charge
    pub battery_max_voltage: f32,
    /// Resistive divider ratio between battery and ADC input
    pub voltage_divider_ratio: f32,

    // --- Charge thresholds ---
    /// State of charge (%) at or below which AUTO mode energises the SSR
    pub charge_start_percent: u8,
    /// State of charge (%) at or above which AUTO mode de-energises the SSR
    pub charge_stop_percent: u8,

    // --- Safety ---
    /// Maximum allowed battery temperature (Celsius) before the SSR is forced off
    pub max_temperature_c: f32,
    /// Fail-safe window: AUTO mode forces the SSR off after this much
    /// command silence (milliseconds)
    pub command_timeout_ms: u32,

    // --- Smoothing ---
    /// Exponential smoothing factor for the voltage channel
    pub voltage_alpha: f32,
    /// Exponential smoothing factor for the temperature channel
    pub temperature_alpha: f32,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Telemetry report interval (milliseconds)
    pub telemetry_interval_ms: u32,

    // --- Command handling ---
    /// AUTO-mode treatment of plain `ON` / `OFF` commands
    pub ssr_command_policy: SsrCommandPolicy,
}

impl Default for ChargerConfig {
    fn default() -> Self {
        Self {
            // Battery (single Li-ion cell behind a 47k/22k divider)
            battery_min_voltage: 3.0,
            battery_max_voltage: 4.2,
            voltage_divider_ratio: 3.037,

            // Charge thresholds
            charge_start_percent: 20,
            charge_stop_percent: 95,

            // Safety
            max_temperature_c: 45.0,
            command_timeout_ms: 5_000,

            // Smoothing
            voltage_alpha: 0.2,
            temperature_alpha: 0.3,

            // Timing
            control_loop_interval_ms: 100,  // 10 Hz
            telemetry_interval_ms: 2_000,   // 0.5 Hz

            ssr_command_policy: SsrCommandPolicy::Advisory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = ChargerConfig::default();
        assert!(c.battery_max_voltage > c.battery_min_voltage);
        assert!(c.charge_start_percent < c.charge_stop_percent);
        assert!(c.charge_stop_percent <= 100);
        assert!(c.max_temperature_c > 0.0);
        assert!(c.command_timeout_ms > 0);
        assert!(c.control_loop_interval_ms > 0);
        assert!(c.voltage_alpha > 0.0 && c.voltage_alpha <= 1.0);
        assert!(c.temperature_alpha > 0.0 && c.temperature_alpha <= 1.0);
    }

    #[test]
    fn serde_roundtrip() {
        let c = ChargerConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: ChargerConfig = serde_json::from_str(&json).unwrap();
        assert!((c.battery_max_voltage - c2.battery_max_voltage).abs() < 0.001);
        assert_eq!(c.charge_start_percent, c2.charge_start_percent);
        assert_eq!(c.ssr_command_policy, c2.ssr_command_policy);
    }

    #[test]
    fn start_below_stop_invariant() {
        let c = ChargerConfig::default();
        assert!(
            c.charge_start_percent < c.charge_stop_percent,
            "start threshold must be below stop to prevent oscillation"
        );
    }

    #[test]
    fn timing_ratios_make_sense() {
        let c = ChargerConfig::default();
        assert!(
            c.control_loop_interval_ms < c.telemetry_interval_ms,
            "control loop should be faster than telemetry"
        );
        assert!(
            c.control_loop_interval_ms < c.command_timeout_ms,
            "fail-safe window must span several control cycles"
        );
    }
}
