//! Telemetry pacing.
//!
//! [`TelemetryReporter`] decouples the report period (2 s) from the
//! control-cycle cadence (100 ms): it counts control ticks and emits one
//! [`AppEvent::Telemetry`] snapshot each time the interval elapses.
//! Emission is fire-and-forget — the sink never blocks, and a backed-up
//! channel simply drops the record.

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::app::service::ChargerService;
use crate::config::ChargerConfig;

/// Paces telemetry emission off the control tick.
pub struct TelemetryReporter {
    interval_ticks: u32,
    counter: u32,
}

impl TelemetryReporter {
    pub fn new(config: &ChargerConfig) -> Self {
        let interval_ticks =
            (config.telemetry_interval_ms / config.control_loop_interval_ms).max(1);
        Self {
            interval_ticks,
            counter: 0,
        }
    }

    /// Count one control tick; emit a snapshot if the interval elapsed.
    /// Returns whether a report was emitted.
    pub fn tick(&mut self, service: &ChargerService, sink: &mut impl EventSink) -> bool {
        self.counter += 1;
        if self.counter < self.interval_ticks {
            return false;
        }
        self.counter = 0;
        sink.emit(&AppEvent::Telemetry(service.build_telemetry()));
        true
    }
}
