//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ChargerService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, event sinks) implement these
//! traits.  The [`ChargerService`](super::service::ChargerService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::engine::context::SensorSnapshot;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Read every sensor and return a unified snapshot.
    fn read_all(&mut self) -> SensorSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
///
/// `set_ssr` is called with the resolved state on **every** cycle, even
/// when unchanged — an output pin flipped by an external glitch must
/// self-correct within one cycle.
pub trait ActuatorPort {
    /// Drive the SSR control pin.
    fn set_ssr(&mut self, on: bool);

    /// Drive the status LED (mirrors the SSR state in operation).
    fn set_indicator(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (console log,
/// serial wire records, etc.).  Emission is fire-and-forget: sinks must
/// not block, and a backed-up channel drops records silently.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
