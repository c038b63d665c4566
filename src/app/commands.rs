//! Inbound commands to the application service.
//!
//! These are the decoded forms of lines received on the command channel.
//! The parser produces exactly one `Command` per line; the
//! [`ChargerService`](super::service::ChargerService) interprets it
//! against the control engine.

use crate::engine::OperatingMode;

/// Commands the outside world can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `MODE:AUTO` / `MODE:MANUAL` — set the operating mode.
    SetMode(OperatingMode),

    /// Plain `ON` / `OFF` — SSR request, arbitrated by mode and policy.
    SetSsr(bool),

    /// Structured `{"command":"ssr_on"|"ssr_off"}` — unconditional SSR
    /// override (still subject to the thermal interlock at resolution).
    ForceSsr(bool),

    /// Structured `{"command":"toggle_auto"}` — flip AUTO/MANUAL.
    ToggleAuto,

    /// Anything unrecognized or malformed. Acknowledged and ignored; a
    /// noisy serial line must never crash or hang the controller.
    Unknown,
}
