//! State-of-charge estimation.
//!
//! Maps a (smoothed) pack voltage to a charge percentage by linear
//! interpolation between the configured minimum and maximum cell
//! voltages, clamped to [0, 100]. Deliberately crude — an OCV table or
//! coulomb counting is out of scope for an ON/OFF threshold controller.

use crate::config::ChargerConfig;

/// Voltage → percentage estimator.
#[derive(Debug, Clone, Copy)]
pub struct SocEstimator {
    min_v: f32,
    max_v: f32,
}

impl SocEstimator {
    pub fn new(config: &ChargerConfig) -> Self {
        Self {
            min_v: config.battery_min_voltage,
            max_v: config.battery_max_voltage,
        }
    }

    /// Charge percentage in [0, 100] for the given pack voltage.
    ///
    /// A degenerate configuration (max <= min) yields 0 rather than
    /// dividing by zero.
    pub fn percentage(&self, voltage: f32) -> u8 {
        let span = self.max_v - self.min_v;
        if span <= 0.0 {
            return 0;
        }
        let fraction = (voltage - self.min_v) / span;
        (fraction * 100.0).clamp(0.0, 100.0) as u8
    }
}
