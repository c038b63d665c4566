//! Solid-state relay driver.
//!
//! Single digital output gating the charge current. The control pin
//! idles LOW (relay open) after reset, which is the fail-safe default —
//! a power-cycle always stops charging.
//!
//! ## Safety contract
//!
//! The relay must never stay closed through an over-temperature
//! condition. Enforced by the control engine; this driver is a dumb
//! actuator.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct SsrDriver {
    enabled: bool,
}

impl SsrDriver {
    pub fn new() -> Self {
        Self { enabled: false }
    }

    /// Drive the relay. Idempotent — called every control cycle with the
    /// resolved state so an externally flipped pin self-corrects.
    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(pins::SSR_GPIO, on);
        self.enabled = on;
    }

    pub fn is_on(&self) -> bool {
        self.enabled
    }
}
