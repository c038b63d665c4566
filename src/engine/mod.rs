//! Charge-control decision engine.
//!
//! [`ControlEngine`] owns the operating mode, the SSR state, and the
//! fail-safe command timestamp.  Each control cycle the service applies
//! any pending commands to it, then calls [`ControlEngine::resolve`],
//! which arbitrates the competing inputs in a fixed precedence order:
//!
//! ```text
//! 1. commands (already applied, arrival order)
//! 2. AUTO threshold hysteresis   (start% → ON, stop% → OFF)
//! 3. fail-safe command silence   (AUTO only → OFF)
//! 4. thermal interlock           (any mode → OFF, always wins)
//! ```
//!
//! The engine is the **single writer** of mode and SSR state.  Command
//! handling requests changes through its methods; nothing else mutates
//! the state directly.

pub mod context;

use context::EngineContext;
use log::{info, warn};

use crate::config::{ChargerConfig, SsrCommandPolicy};
use crate::error::SafetyFault;

// ---------------------------------------------------------------------------
// Operating mode
// ---------------------------------------------------------------------------

/// Who decides the SSR state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperatingMode {
    /// The engine decides from charge thresholds and interlocks.
    #[default]
    Auto,
    /// The operator decides, subject only to the thermal interlock.
    Manual,
}

impl OperatingMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Auto => Self::Manual,
            Self::Manual => Self::Auto,
        }
    }
}

// ---------------------------------------------------------------------------
// SSR state changes
// ---------------------------------------------------------------------------

/// Why the engine moved the SSR on its own. Command-driven writes are
/// acknowledged separately and do not produce a change record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SsrChangeCause {
    /// AUTO-mode charge threshold crossing.
    Threshold,
    /// Thermal interlock tripped.
    OverTemperature,
    /// Fail-safe command-silence window expired.
    CommandTimeout,
}

/// A resolved SSR transition, reported for event emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SsrChange {
    pub on: bool,
    pub cause: SsrChangeCause,
}

/// Outcome of a plain `ON`/`OFF` request (mode-arbitrated).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SsrRequest {
    /// The request was written to the SSR state.
    Applied { on: bool, changed: bool },
    /// AUTO mode under the advisory policy: the request only refreshed
    /// the fail-safe timer; thresholds keep deciding.
    Advisory { on: bool },
}

// ---------------------------------------------------------------------------
// ControlEngine
// ---------------------------------------------------------------------------

/// The per-cycle decision state machine.
pub struct ControlEngine {
    mode: OperatingMode,
    ssr_enabled: bool,
    /// Monotonic timestamp of the last line received on the command
    /// channel.  Any traffic counts — the fail-safe guards link
    /// liveness, not command validity.
    last_command_ms: u64,
    policy: SsrCommandPolicy,
}

impl ControlEngine {
    /// Fail-safe initial state: SSR open, AUTO mode, timer seeded at boot.
    pub fn new(config: &ChargerConfig, now_ms: u64) -> Self {
        Self {
            mode: OperatingMode::Auto,
            ssr_enabled: false,
            last_command_ms: now_ms,
            policy: config.ssr_command_policy,
        }
    }

    // ── Command application ───────────────────────────────────

    /// Record command-channel traffic without changing any state.
    /// Called for every received line, including unparseable ones.
    pub fn note_traffic(&mut self, now_ms: u64) {
        self.last_command_ms = now_ms;
    }

    /// Set the operating mode unconditionally.  Returns the previous mode.
    pub fn set_mode(&mut self, mode: OperatingMode, now_ms: u64) -> OperatingMode {
        self.last_command_ms = now_ms;
        let prev = self.mode;
        if prev != mode {
            info!("mode: {:?} -> {:?}", prev, mode);
        }
        self.mode = mode;
        prev
    }

    /// Flip AUTO/MANUAL.  Returns the new mode.
    pub fn toggle_mode(&mut self, now_ms: u64) -> OperatingMode {
        let next = self.mode.toggled();
        self.set_mode(next, now_ms);
        next
    }

    /// Plain `ON`/`OFF` request, arbitrated by mode and policy.
    pub fn request_ssr(&mut self, on: bool, now_ms: u64) -> SsrRequest {
        self.last_command_ms = now_ms;
        match (self.mode, self.policy) {
            (OperatingMode::Manual, _) | (OperatingMode::Auto, SsrCommandPolicy::Direct) => {
                let changed = self.ssr_enabled != on;
                self.ssr_enabled = on;
                if changed {
                    info!("SSR commanded {} ({:?})", if on { "ON" } else { "OFF" }, self.mode);
                }
                SsrRequest::Applied { on, changed }
            }
            (OperatingMode::Auto, SsrCommandPolicy::Advisory) => SsrRequest::Advisory { on },
        }
    }

    /// Structured `ssr_on`/`ssr_off` record: applied in any mode.
    /// Returns whether the state actually changed.
    pub fn force_ssr(&mut self, on: bool, now_ms: u64) -> bool {
        self.last_command_ms = now_ms;
        let changed = self.ssr_enabled != on;
        self.ssr_enabled = on;
        if changed {
            info!("SSR forced {}", if on { "ON" } else { "OFF" });
        }
        changed
    }

    // ── Per-cycle resolution ──────────────────────────────────

    /// Arbitrate threshold control and interlocks for this cycle.
    ///
    /// Commands were already applied in arrival order.  The thermal
    /// interlock is evaluated last so it overrides every other input,
    /// including commands from the same cycle, and re-engages on every
    /// cycle for as long as the fault persists.
    pub fn resolve(&mut self, ctx: &EngineContext) -> Option<SsrChange> {
        let was = self.ssr_enabled;
        let mut change: Option<SsrChange> = None;

        // AUTO threshold hysteresis: distinct start/stop thresholds keep
        // the relay from oscillating near a single boundary.
        if self.mode == OperatingMode::Auto && !ctx.has_fault(SafetyFault::OverTemperature) {
            if ctx.percentage <= ctx.config.charge_start_percent && !self.ssr_enabled {
                self.ssr_enabled = true;
                change = Some(SsrChange {
                    on: true,
                    cause: SsrChangeCause::Threshold,
                });
            } else if ctx.percentage >= ctx.config.charge_stop_percent && self.ssr_enabled {
                self.ssr_enabled = false;
                change = Some(SsrChange {
                    on: false,
                    cause: SsrChangeCause::Threshold,
                });
            }
        }

        // Fail-safe: a silent supervisor must not leave charging
        // unattended. AUTO mode only.
        if self.mode == OperatingMode::Auto
            && ctx.has_fault(SafetyFault::CommandSilence)
            && self.ssr_enabled
        {
            self.ssr_enabled = false;
            change = Some(SsrChange {
                on: false,
                cause: SsrChangeCause::CommandTimeout,
            });
        }

        // Thermal interlock, both modes. Last word.
        if ctx.has_fault(SafetyFault::OverTemperature) && self.ssr_enabled {
            self.ssr_enabled = false;
            change = Some(SsrChange {
                on: false,
                cause: SsrChangeCause::OverTemperature,
            });
        }

        if self.ssr_enabled == was {
            return None;
        }
        if let Some(c) = change {
            match c.cause {
                SsrChangeCause::OverTemperature | SsrChangeCause::CommandTimeout => {
                    warn!("SSR {} ({:?})", if c.on { "ON" } else { "OFF" }, c.cause);
                }
                _ => info!("SSR {} ({:?})", if c.on { "ON" } else { "OFF" }, c.cause),
            }
        }
        change
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    pub fn ssr_enabled(&self) -> bool {
        self.ssr_enabled
    }

    /// Milliseconds since the last command-channel traffic.
    pub fn command_age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_command_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChargerConfig;

    fn make_engine() -> ControlEngine {
        ControlEngine::new(&ChargerConfig::default(), 0)
    }

    fn make_ctx() -> EngineContext {
        let mut ctx = EngineContext::new(ChargerConfig::default());
        ctx.percentage = 50;
        ctx
    }

    #[test]
    fn starts_auto_with_ssr_off() {
        let e = make_engine();
        assert_eq!(e.mode(), OperatingMode::Auto);
        assert!(!e.ssr_enabled());
    }

    #[test]
    fn manual_on_command_sets_ssr() {
        let mut e = make_engine();
        e.set_mode(OperatingMode::Manual, 10);
        let out = e.request_ssr(true, 20);
        assert_eq!(out, SsrRequest::Applied { on: true, changed: true });
        assert!(e.ssr_enabled());
    }

    #[test]
    fn auto_on_command_is_advisory_by_default() {
        let mut e = make_engine();
        let out = e.request_ssr(true, 20);
        assert_eq!(out, SsrRequest::Advisory { on: true });
        assert!(!e.ssr_enabled(), "advisory request must not set the SSR");
        assert_eq!(e.command_age_ms(25), 5, "advisory request must refresh the timer");
    }

    #[test]
    fn auto_on_command_applies_under_direct_policy() {
        let cfg = ChargerConfig {
            ssr_command_policy: crate::config::SsrCommandPolicy::Direct,
            ..Default::default()
        };
        let mut e = ControlEngine::new(&cfg, 0);
        let out = e.request_ssr(true, 20);
        assert_eq!(out, SsrRequest::Applied { on: true, changed: true });
        assert!(e.ssr_enabled());
    }

    #[test]
    fn force_ssr_applies_in_auto_mode() {
        let mut e = make_engine();
        assert!(e.force_ssr(true, 5));
        assert!(e.ssr_enabled());
        assert!(!e.force_ssr(true, 6), "second force is a no-op");
    }

    #[test]
    fn toggle_mode_is_an_involution() {
        let mut e = make_engine();
        let start = e.mode();
        assert_eq!(e.toggle_mode(1), OperatingMode::Manual);
        assert_eq!(e.toggle_mode(2), start);
    }

    #[test]
    fn repeated_set_mode_is_idempotent() {
        let mut e = make_engine();
        e.set_mode(OperatingMode::Manual, 1);
        let before = (e.mode(), e.ssr_enabled());
        e.set_mode(OperatingMode::Manual, 2);
        assert_eq!((e.mode(), e.ssr_enabled()), before);
    }

    #[test]
    fn threshold_starts_charge_at_low_percentage() {
        let mut e = make_engine();
        let mut ctx = make_ctx();
        ctx.percentage = 15;
        let change = e.resolve(&ctx);
        assert_eq!(
            change,
            Some(SsrChange { on: true, cause: SsrChangeCause::Threshold })
        );
        assert!(e.ssr_enabled());
    }

    #[test]
    fn threshold_stops_charge_at_high_percentage() {
        let mut e = make_engine();
        let mut ctx = make_ctx();
        ctx.percentage = 15;
        e.resolve(&ctx);

        ctx.percentage = 95;
        let change = e.resolve(&ctx);
        assert_eq!(
            change,
            Some(SsrChange { on: false, cause: SsrChangeCause::Threshold })
        );
    }

    #[test]
    fn no_oscillation_between_thresholds() {
        let mut e = make_engine();
        let mut ctx = make_ctx();
        ctx.percentage = 15;
        e.resolve(&ctx);
        assert!(e.ssr_enabled());

        // Anywhere strictly inside (start, stop) the state must hold.
        for pct in [21, 40, 60, 80, 94] {
            ctx.percentage = pct;
            assert_eq!(e.resolve(&ctx), None, "unexpected transition at {pct}%");
            assert!(e.ssr_enabled());
        }

        ctx.percentage = 95;
        e.resolve(&ctx);
        assert!(!e.ssr_enabled());

        for pct in [94, 60, 21] {
            ctx.percentage = pct;
            assert_eq!(e.resolve(&ctx), None, "unexpected transition at {pct}%");
            assert!(!e.ssr_enabled());
        }
    }

    #[test]
    fn thresholds_do_not_apply_in_manual_mode() {
        let mut e = make_engine();
        e.set_mode(OperatingMode::Manual, 1);
        let mut ctx = make_ctx();
        ctx.percentage = 5;
        assert_eq!(e.resolve(&ctx), None);
        assert!(!e.ssr_enabled());
    }

    #[test]
    fn over_temperature_forces_off_in_manual_mode() {
        let mut e = make_engine();
        e.set_mode(OperatingMode::Manual, 1);
        e.request_ssr(true, 2);

        let mut ctx = make_ctx();
        ctx.fault_flags = SafetyFault::OverTemperature.mask();
        let change = e.resolve(&ctx);
        assert_eq!(
            change,
            Some(SsrChange { on: false, cause: SsrChangeCause::OverTemperature })
        );
    }

    #[test]
    fn over_temperature_wins_over_same_cycle_force_command() {
        let mut e = make_engine();
        e.force_ssr(true, 1);

        let mut ctx = make_ctx();
        ctx.fault_flags = SafetyFault::OverTemperature.mask();
        e.resolve(&ctx);
        assert!(!e.ssr_enabled(), "interlock must not be reversible by command");
    }

    #[test]
    fn over_temperature_blocks_threshold_start() {
        let mut e = make_engine();
        let mut ctx = make_ctx();
        ctx.percentage = 10;
        ctx.fault_flags = SafetyFault::OverTemperature.mask();
        assert_eq!(e.resolve(&ctx), None);
        assert!(!e.ssr_enabled());
    }

    #[test]
    fn command_silence_forces_off_in_auto() {
        let mut e = make_engine();
        let mut ctx = make_ctx();
        ctx.percentage = 15;
        e.resolve(&ctx);
        assert!(e.ssr_enabled());

        ctx.percentage = 50;
        ctx.fault_flags = SafetyFault::CommandSilence.mask();
        let change = e.resolve(&ctx);
        assert_eq!(
            change,
            Some(SsrChange { on: false, cause: SsrChangeCause::CommandTimeout })
        );
    }

    #[test]
    fn command_silence_ignored_in_manual() {
        let mut e = make_engine();
        e.set_mode(OperatingMode::Manual, 1);
        e.request_ssr(true, 2);

        let mut ctx = make_ctx();
        ctx.fault_flags = SafetyFault::CommandSilence.mask();
        assert_eq!(e.resolve(&ctx), None);
        assert!(e.ssr_enabled());
    }

    #[test]
    fn silence_while_already_off_is_a_noop() {
        let mut e = make_engine();
        let mut ctx = make_ctx();
        ctx.percentage = 96;
        ctx.fault_flags = SafetyFault::CommandSilence.mask();
        assert_eq!(e.resolve(&ctx), None);
        assert!(!e.ssr_enabled());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::config::ChargerConfig;
    use proptest::prelude::*;

    fn arb_cycle() -> impl Strategy<Value = (u8, u8)> {
        (
            0u8..=100,  // percentage
            0u8..4,     // fault_flags (both bits)
        )
    }

    proptest! {
        /// The SSR is never left energised on a cycle where the thermal
        /// interlock is active, whatever happened before.
        #[test]
        fn over_temperature_always_ends_cycle_off(
            cycles in proptest::collection::vec(arb_cycle(), 1..100),
        ) {
            let mut e = ControlEngine::new(&ChargerConfig::default(), 0);
            let mut ctx = EngineContext::new(ChargerConfig::default());

            for (pct, faults) in cycles {
                ctx.percentage = pct;
                ctx.fault_flags = faults;
                e.resolve(&ctx);

                if ctx.has_fault(crate::error::SafetyFault::OverTemperature) {
                    prop_assert!(!e.ssr_enabled(),
                        "SSR on despite thermal fault at {pct}%");
                }
            }
        }

        /// Once ON via the start threshold, the SSR holds anywhere inside
        /// the hysteresis band when no fault is active.
        #[test]
        fn hysteresis_band_holds_state(
            walk in proptest::collection::vec(21u8..95, 1..50),
        ) {
            let mut e = ControlEngine::new(&ChargerConfig::default(), 0);
            let mut ctx = EngineContext::new(ChargerConfig::default());

            ctx.percentage = 10;
            e.resolve(&ctx);
            prop_assert!(e.ssr_enabled());

            for pct in walk {
                ctx.percentage = pct;
                prop_assert_eq!(e.resolve(&ctx), None);
                prop_assert!(e.ssr_enabled());
            }
        }
    }
}
