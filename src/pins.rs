//! GPIO / peripheral pin assignments for the charger main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// SSR (solid-state relay gating charge current)
// ---------------------------------------------------------------------------

/// Digital output to the SSR control terminal (active HIGH).
/// Must idle LOW so the relay is open after reset.
pub const SSR_GPIO: i32 = 1;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// Battery voltage via resistive divider (47 kΩ / 22 kΩ).
/// ADC1 channel 4 (GPIO 5 on ESP32-S3).
pub const VOLTAGE_ADC_GPIO: i32 = 5;

/// LM35 temperature sensor output (10 mV/°C).
/// ADC1 channel 8 (GPIO 9 on ESP32-S3).
pub const TEMP_ADC_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// Sensors — Digital
// ---------------------------------------------------------------------------

/// Charge-detect input from the charger module. Active LOW (pull-up
/// enabled, the external charger sinks the pin while current flows).
pub const CHARGE_DETECT_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// Status LED
// ---------------------------------------------------------------------------

/// Single status LED (active HIGH). Mirrors the SSR state and blinks at
/// startup.
pub const STATUS_LED_GPIO: i32 = 11;

// ---------------------------------------------------------------------------
// UART console (command / telemetry line channel)
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;
