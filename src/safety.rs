//! Safety supervisor.
//!
//! The supervisor runs **every tick before the engine resolves** and
//! accumulates a fault bitmask in `EngineContext.fault_flags`.  The
//! engine checks this mask when arbitrating the SSR state.
//!
//! ## Fault lifecycle
//!
//! 1. A condition triggers a fault (e.g. temperature over limit).
//! 2. The supervisor sets the corresponding bit in `fault_flags`.
//! 3. The engine forces (and holds) the SSR off for as long as the bit
//!    is relevant to the current mode.
//! 4. Each tick the supervisor re-evaluates.  If the condition clears,
//!    it unsets the bit and normal arbitration resumes.
//!
//! Faults are conditions, not latches: the mask tracks the live sensor
//! and link state, and multiple simultaneous faults are tracked and
//! cleared individually.

use crate::config::ChargerConfig;
use crate::engine::OperatingMode;
use crate::engine::context::SensorSnapshot;
use crate::error::SafetyFault;
use log::{error, info};

/// Safety supervisor.
pub struct SafetySupervisor {
    max_temp_c: f32,
    command_timeout_ms: u64,
    /// Current fault bitmask.
    faults: u8,
}

impl SafetySupervisor {
    pub fn new(config: &ChargerConfig) -> Self {
        Self {
            max_temp_c: config.max_temperature_c,
            command_timeout_ms: u64::from(config.command_timeout_ms),
            faults: 0,
        }
    }

    /// Evaluate all safety conditions against the latest sensor snapshot.
    /// Returns the updated fault bitmask.
    ///
    /// `command_age_ms` is how long the command channel has been silent;
    /// the silence fault only applies in AUTO mode, where the charger is
    /// expected to be supervised.
    pub fn evaluate(
        &mut self,
        snap: &SensorSnapshot,
        mode: OperatingMode,
        command_age_ms: u64,
    ) -> u8 {
        // ── Temperature ───────────────────────────────────────────
        self.eval_fault(
            SafetyFault::OverTemperature,
            snap.temperature_c > self.max_temp_c,
        );

        // ── Command silence (AUTO only) ───────────────────────────
        self.eval_fault(
            SafetyFault::CommandSilence,
            mode == OperatingMode::Auto && command_age_ms > self.command_timeout_ms,
        );

        self.faults
    }

    /// Current fault bitmask.
    pub fn faults(&self) -> u8 {
        self.faults
    }

    /// True if **any** fault is active.
    pub fn has_faults(&self) -> bool {
        self.faults != 0
    }

    /// Check if a specific fault is active.
    pub fn has_fault(&self, fault: SafetyFault) -> bool {
        self.faults & fault.mask() != 0
    }

    // ── Internal ──────────────────────────────────────────────────

    /// Set or clear a fault bit based on a boolean condition.
    fn eval_fault(&mut self, fault: SafetyFault, condition: bool) {
        if condition {
            if self.faults & fault.mask() == 0 {
                error!("SAFETY FAULT SET: {fault}");
            }
            self.faults |= fault.mask();
        } else {
            if self.faults & fault.mask() != 0 {
                info!("SAFETY FAULT CLEARED: {fault}");
            }
            self.faults &= !fault.mask();
        }
    }
}
