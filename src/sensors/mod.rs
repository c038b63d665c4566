//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces a [`SensorSnapshot`] each
//! tick that gets written into `EngineContext.sensors`.

pub mod charge_detect;
pub mod smoothing;
pub mod temperature;
pub mod voltage;

use crate::engine::context::SensorSnapshot;
use charge_detect::ChargeDetect;
use temperature::TemperatureSensor;
use voltage::VoltageSensor;

/// Aggregates all sensor drivers and produces a unified snapshot.
pub struct SensorHub {
    pub voltage: VoltageSensor,
    pub temperature: TemperatureSensor,
    pub charge_detect: ChargeDetect,
}

impl SensorHub {
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where peripheral ownership is established).
    pub fn new(
        voltage: VoltageSensor,
        temperature: TemperatureSensor,
        charge_detect: ChargeDetect,
    ) -> Self {
        Self {
            voltage,
            temperature,
            charge_detect,
        }
    }

    /// Read every sensor and return a unified snapshot.
    ///
    /// There is no error path here: raw out-of-range values pass through
    /// the smoothing filters and are clamped by the charge estimator.
    pub fn read_all(&mut self) -> SensorSnapshot {
        let v = self.voltage.read();
        let t = self.temperature.read();
        let charging = self.charge_detect.asserted();

        SensorSnapshot {
            voltage_v: v.volts,
            voltage_raw: v.raw,
            temperature_c: t.celsius,
            temperature_raw: t.raw,
            charge_detect: charging,
        }
    }
}
