//! Outbound application events.
//!
//! The [`ChargerService`](super::service::ChargerService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on
//! the other side decide what to do with them — log to the console,
//! write wire records back down the serial channel, etc.

use crate::engine::{OperatingMode, SsrChangeCause};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy)]
pub enum AppEvent {
    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// A command was processed; carries the effect to acknowledge.
    CommandApplied(CommandAck),

    /// The engine changed the SSR state on its own (threshold crossing,
    /// interlock, fail-safe). Command-driven changes are covered by
    /// `CommandApplied`.
    SsrChanged { on: bool, cause: SsrChangeCause },

    /// One or more safety faults are active (bitmask).
    FaultRaised(u8),

    /// All safety faults have been cleared.
    FaultCleared,

    /// The application service has started (carries initial mode).
    Started(OperatingMode),
}

/// The acknowledged effect of one inbound command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAck {
    /// Operating mode is now the carried value.
    Mode(OperatingMode),
    /// AUTO charge control toggled; carries whether it is now enabled.
    AutoCharge(bool),
    /// SSR state was written.
    Ssr(bool),
    /// SSR request accepted as advisory only (AUTO mode, advisory policy).
    SsrAdvisory(bool),
    /// Input not recognized; nothing changed.
    Ignored,
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Copy)]
pub struct TelemetryData {
    pub percentage: u8,
    pub voltage_v: f32,
    pub temperature_c: f32,
    /// SSR closed **and** the charge-detect input asserted.
    pub is_charging: bool,
    pub ssr_enabled: bool,
    /// True while the operating mode is AUTO.
    pub auto_charge: bool,
}
