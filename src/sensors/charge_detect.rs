//! Charge-detect input.
//!
//! The external charger module sinks this pin (active LOW) while current
//! is actually flowing into the battery, letting telemetry distinguish
//! "SSR closed" from "battery actually charging".
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the real GPIO level via hw_init helpers.
//! On host/test: defaults to not-charging (pin high).

use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

static SIM_CHARGE_PIN_LOW: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_charging(charging: bool) {
    SIM_CHARGE_PIN_LOW.store(charging, Ordering::Relaxed);
}

pub struct ChargeDetect {
    _gpio: i32,
}

impl ChargeDetect {
    pub fn new(gpio: i32) -> Self {
        Self { _gpio: gpio }
    }

    /// True while the charger module reports current flow.
    pub fn asserted(&self) -> bool {
        // Active LOW: pin pulled to ground while charging.
        !self.read_gpio()
    }

    #[cfg(target_os = "espidf")]
    fn read_gpio(&self) -> bool {
        hw_init::gpio_read(pins::CHARGE_DETECT_GPIO)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_gpio(&self) -> bool {
        !SIM_CHARGE_PIN_LOW.load(Ordering::Relaxed)
    }
}
