//! Line protocol for the duplex command/telemetry channel.
//!
//! Inbound: one command per line, either a bare keyword (`MODE:AUTO`,
//! `MODE:MANUAL`, `ON`, `OFF`) or a JSON record carrying a `command`
//! field.  Outbound: JSON acknowledgement and telemetry records, one per
//! line.
//!
//! The decoder is total — any byte sequence maps to *some* `Command`
//! (worst case `Unknown`) and parsing never panics or errors out to the
//! caller.

pub mod parser;
pub mod wire;
