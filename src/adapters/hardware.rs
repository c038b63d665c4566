//! Hardware adapter — binds the sensor hub and actuator drivers to the
//! [`SensorPort`] / [`ActuatorPort`] traits consumed by the service.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::ssr::SsrDriver;
use crate::drivers::status_led::StatusLed;
use crate::engine::context::SensorSnapshot;
use crate::sensors::SensorHub;

/// Concrete hardware behind the port boundary.
pub struct HardwareAdapter {
    sensors: SensorHub,
    ssr: SsrDriver,
    led: StatusLed,
}

impl HardwareAdapter {
    pub fn new(sensors: SensorHub, ssr: SsrDriver, led: StatusLed) -> Self {
        Self { sensors, ssr, led }
    }

    /// Direct LED access for the startup blink sequence.
    pub fn led_mut(&mut self) -> &mut StatusLed {
        &mut self.led
    }
}

impl SensorPort for HardwareAdapter {
    fn read_all(&mut self) -> SensorSnapshot {
        self.sensors.read_all()
    }
}

impl ActuatorPort for HardwareAdapter {
    fn set_ssr(&mut self, on: bool) {
        self.ssr.set(on);
    }

    fn set_indicator(&mut self, on: bool) {
        self.led.set(on);
    }
}
