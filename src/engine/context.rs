//! Shared mutable context threaded through the control cycle.
//!
//! `EngineContext` is the single struct the control engine reads from and
//! the service writes to.  It contains the latest sensor snapshot, the
//! derived charge percentage, configuration, and accumulated safety
//! faults.  Think of it as the "blackboard" in a blackboard architecture.

use crate::config::ChargerConfig;

// ---------------------------------------------------------------------------
// Sensor snapshot (read-only to the engine; written by the sensor hub)
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of every sensor in the system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SensorSnapshot {
    /// Smoothed pack voltage (V).
    pub voltage_v: f32,
    /// Raw ADC value from the voltage divider (0 – 4095).
    pub voltage_raw: u16,

    /// Smoothed battery temperature (°C).
    pub temperature_c: f32,
    /// Raw ADC value from the LM35 (0 – 4095).
    pub temperature_raw: u16,

    /// Charge-detect input: true while the charger reports current flow.
    pub charge_detect: bool,
}

// ---------------------------------------------------------------------------
// EngineContext
// ---------------------------------------------------------------------------

/// The shared context the engine resolves against each cycle.
pub struct EngineContext {
    // -- Timing --
    /// Monotonic total tick count.
    pub total_ticks: u64,

    // -- Sensor data --
    /// Latest sensor readings.  Updated before each engine resolution.
    pub sensors: SensorSnapshot,
    /// Charge percentage derived from `sensors.voltage_v`.  Recomputed
    /// every cycle, never persisted.
    pub percentage: u8,

    // -- Configuration --
    /// System configuration (tunable parameters).
    pub config: ChargerConfig,

    // -- Safety --
    /// Accumulated safety fault bitmask (see `SafetyFault::mask()`).
    /// Set by the safety supervisor, read by the engine.
    pub fault_flags: u8,
}

impl EngineContext {
    /// Create a new context with the given configuration.
    pub fn new(config: ChargerConfig) -> Self {
        Self {
            total_ticks: 0,
            sensors: SensorSnapshot::default(),
            percentage: 0,
            config,
            fault_flags: 0,
        }
    }

    /// Returns `true` if **any** safety fault is active.
    pub fn has_faults(&self) -> bool {
        self.fault_flags != 0
    }

    /// Check whether a specific fault flag is set.
    pub fn has_fault(&self, fault: crate::error::SafetyFault) -> bool {
        self.fault_flags & fault.mask() != 0
    }
}
