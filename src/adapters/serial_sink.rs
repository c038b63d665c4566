//! Serial wire-record event sink adapter.
//!
//! Implements [`EventSink`] by translating application events into the
//! JSON line protocol and writing them out the command channel: command
//! acknowledgements, periodic telemetry, and the startup banner.
//! Engine-internal events (fault transitions, threshold crossings) stay
//! on the log side — the wire carries only the dashboard protocol.

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::protocol::wire;

use super::serial::SerialWriter;

/// Adapter that writes protocol records down the serial channel.
pub struct SerialEventSink {
    writer: SerialWriter,
}

impl SerialEventSink {
    pub fn new(writer: SerialWriter) -> Self {
        Self { writer }
    }
}

impl EventSink for SerialEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => self.writer.write_line(&wire::telemetry_line(t)),
            AppEvent::CommandApplied(ack) => self.writer.write_line(&wire::ack_line(ack)),
            AppEvent::Started(_) => self.writer.write_line(&wire::ready_line()),
            // Not part of the wire protocol.
            AppEvent::SsrChanged { .. } | AppEvent::FaultRaised(_) | AppEvent::FaultCleared => {}
        }
    }
}
