//! LM35 battery temperature sensor (10 mV/°C, linear).
//!
//! The sensor output is read via the ESP32-S3 ADC and converted with the
//! LM35's fixed scale: `celsius = volts * 100`. The channel is
//! exponentially smoothed to keep single noisy samples from tripping the
//! thermal interlock.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH8 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static AtomicU16 for injection.

use core::sync::atomic::AtomicU16;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

use super::smoothing::ExpSmoother;

static SIM_TEMP_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_temp_adc(raw: u16) {
    SIM_TEMP_ADC.store(raw, Ordering::Relaxed);
}

const ADC_MAX: f32 = 4095.0;
const V_REF: f32 = 3.3;
/// LM35: 10 mV per degree Celsius.
const DEGREES_PER_VOLT: f32 = 100.0;

#[derive(Debug, Clone, Copy)]
pub struct TemperatureReading {
    pub raw: u16,
    /// Smoothed temperature in °C.
    pub celsius: f32,
}

pub struct TemperatureSensor {
    smoother: ExpSmoother,
    _adc_gpio: i32,
}

impl TemperatureSensor {
    pub fn new(adc_gpio: i32, alpha: f32) -> Self {
        Self {
            smoother: ExpSmoother::new(alpha),
            _adc_gpio: adc_gpio,
        }
    }

    pub fn read(&mut self) -> TemperatureReading {
        let raw = self.read_adc();
        let volts = (raw as f32 / ADC_MAX) * V_REF;
        let celsius = self.smoother.apply(volts * DEGREES_PER_VOLT);
        TemperatureReading { raw, celsius }
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(hw_init::ADC1_CH_TEMP)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_TEMP_ADC.load(Ordering::Relaxed)
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    /// Raw ADC count that produces the given temperature.
    fn raw_for_celsius(c: f32) -> u16 {
        ((c / DEGREES_PER_VOLT) / V_REF * ADC_MAX) as u16
    }

    #[test]
    fn converts_lm35_scale() {
        let mut s = TemperatureSensor::new(0, 1.0);
        sim_set_temp_adc(raw_for_celsius(25.0));
        let r = s.read();
        assert!((r.celsius - 25.0).abs() < 0.1, "got {}", r.celsius);
    }

    #[test]
    fn first_read_seeds_smoother() {
        let mut s = TemperatureSensor::new(0, 0.3);
        sim_set_temp_adc(raw_for_celsius(40.0));
        let r = s.read();
        assert!((r.celsius - 40.0).abs() < 0.1, "seed read must not be attenuated");
    }
}
