//! Application service — the hexagonal core.
//!
//! [`ChargerService`] owns the control engine, safety supervisor, charge
//! estimator, and shared context.  It exposes a clean, hardware-agnostic
//! API.  All I/O flows through port traits injected at call sites, making
//! the entire service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────────┐ ──▶ EventSink
//!                 │       ChargerService       │
//! ActuatorPort ◀──│  Engine · Safety · SoC     │
//!                 └────────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::ChargerConfig;
use crate::engine::context::EngineContext;
use crate::engine::{ControlEngine, OperatingMode, SsrRequest};
use crate::protocol::parser;
use crate::safety::SafetySupervisor;
use crate::soc::SocEstimator;

use super::commands::Command;
use super::events::{AppEvent, CommandAck, TelemetryData};
use super::ports::{ActuatorPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// ChargerService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct ChargerService {
    engine: ControlEngine,
    safety: SafetySupervisor,
    soc: SocEstimator,
    ctx: EngineContext,
    tick_count: u64,
}

impl ChargerService {
    /// Construct the service from configuration.
    ///
    /// `now_ms` seeds the fail-safe timer so the silence window starts
    /// counting from boot, not from the epoch.
    pub fn new(config: ChargerConfig, now_ms: u64) -> Self {
        let engine = ControlEngine::new(&config, now_ms);
        let safety = SafetySupervisor::new(&config);
        let soc = SocEstimator::new(&config);
        let ctx = EngineContext::new(config);

        Self {
            engine,
            safety,
            soc,
            ctx,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce startup: fail-safe defaults are already in force
    /// (SSR open, AUTO mode).
    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started(self.engine.mode()));
        info!("ChargerService started in {:?}", self.engine.mode());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: read sensors → estimate charge →
    /// safety → engine resolution → actuators.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
        now_ms: u64,
    ) {
        self.tick_count += 1;
        self.ctx.total_ticks = self.tick_count;

        // 1. Read sensors via SensorPort
        let snapshot = hw.read_all();
        self.ctx.sensors = snapshot;
        self.ctx.percentage = self.soc.percentage(snapshot.voltage_v);

        // 2. Safety evaluation
        let prev_faults = self.ctx.fault_flags;
        let faults = self.safety.evaluate(
            &snapshot,
            self.engine.mode(),
            self.engine.command_age_ms(now_ms),
        );
        self.ctx.fault_flags = faults;
        if faults != prev_faults {
            if faults != 0 {
                warn!("Safety fault! flags=0b{:08b}", faults);
                sink.emit(&AppEvent::FaultRaised(faults));
            } else {
                sink.emit(&AppEvent::FaultCleared);
            }
        }

        // 3. Engine resolution (pure state logic)
        if let Some(change) = self.engine.resolve(&self.ctx) {
            sink.emit(&AppEvent::SsrChanged {
                on: change.on,
                cause: change.cause,
            });
        }

        // 4. Apply actuator state via ActuatorPort — every cycle, even
        //    when unchanged, so an externally glitched pin self-corrects.
        self.apply_actuators(hw);
    }

    // ── Command handling ──────────────────────────────────────

    /// Process one raw line from the command channel.
    ///
    /// Any received line — valid or not — counts as supervisor traffic
    /// for the fail-safe window.
    pub fn handle_line(&mut self, line: &str, sink: &mut impl EventSink, now_ms: u64) {
        self.engine.note_traffic(now_ms);
        let cmd = parser::parse(line);
        self.handle_command(cmd, sink, now_ms);
    }

    /// Apply one decoded command to the engine and acknowledge it.
    pub fn handle_command(&mut self, cmd: Command, sink: &mut impl EventSink, now_ms: u64) {
        let ack = match cmd {
            Command::SetMode(mode) => {
                self.engine.set_mode(mode, now_ms);
                CommandAck::Mode(mode)
            }
            Command::ToggleAuto => {
                let mode = self.engine.toggle_mode(now_ms);
                CommandAck::AutoCharge(mode == OperatingMode::Auto)
            }
            Command::SetSsr(on) => match self.engine.request_ssr(on, now_ms) {
                SsrRequest::Applied { on, .. } => CommandAck::Ssr(on),
                SsrRequest::Advisory { on } => CommandAck::SsrAdvisory(on),
            },
            Command::ForceSsr(on) => {
                self.engine.force_ssr(on, now_ms);
                CommandAck::Ssr(on)
            }
            Command::Unknown => CommandAck::Ignored,
        };
        sink.emit(&AppEvent::CommandApplied(ack));
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current context.
    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            percentage: self.ctx.percentage,
            voltage_v: self.ctx.sensors.voltage_v,
            temperature_c: self.ctx.sensors.temperature_c,
            is_charging: self.engine.ssr_enabled() && self.ctx.sensors.charge_detect,
            ssr_enabled: self.engine.ssr_enabled(),
            auto_charge: self.engine.mode() == OperatingMode::Auto,
        }
    }

    /// Current operating mode.
    pub fn mode(&self) -> OperatingMode {
        self.engine.mode()
    }

    /// Resolved SSR state.
    pub fn ssr_enabled(&self) -> bool {
        self.engine.ssr_enabled()
    }

    /// Current active fault bitmask (0 = no faults).
    pub fn fault_flags(&self) -> u8 {
        self.ctx.fault_flags
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // ── Internal ──────────────────────────────────────────────

    /// Translate the resolved engine state into port calls.
    fn apply_actuators(&self, hw: &mut impl ActuatorPort) {
        let on = self.engine.ssr_enabled();
        hw.set_ssr(on);
        hw.set_indicator(on);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullSink;
    impl EventSink for NullSink {
        fn emit(&mut self, _event: &AppEvent) {}
    }

    #[test]
    fn telemetry_is_charging_needs_both_ssr_and_detect() {
        let mut app = ChargerService::new(ChargerConfig::default(), 0);
        let mut sink = NullSink;
        app.start(&mut sink);

        app.handle_line("MODE:MANUAL", &mut sink, 10);
        app.handle_line("ON", &mut sink, 20);
        assert!(app.ssr_enabled());

        // SSR closed but no charge-detect: not charging.
        let t = app.build_telemetry();
        assert!(!t.is_charging);
        assert!(t.ssr_enabled);
        assert!(!t.auto_charge);
    }
}
