//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::{AppEvent, CommandAck};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | {}% | {:.2}V | {:.1}\u{00b0}C | ssr={} charging={} | auto={}",
                    t.percentage,
                    t.voltage_v,
                    t.temperature_c,
                    if t.ssr_enabled { "ON" } else { "OFF" },
                    t.is_charging,
                    t.auto_charge,
                );
            }
            AppEvent::CommandApplied(ack) => match ack {
                CommandAck::Ignored => info!("CMD   | ignored / invalid"),
                other => info!("CMD   | {:?}", other),
            },
            AppEvent::SsrChanged { on, cause } => {
                info!("SSR   | {} ({:?})", if *on { "ON" } else { "OFF" }, cause);
            }
            AppEvent::FaultRaised(flags) => {
                warn!("FAULT | active, flags=0b{:08b}", flags);
            }
            AppEvent::FaultCleared => {
                info!("FAULT | all cleared");
            }
            AppEvent::Started(mode) => {
                info!("START | mode={:?}", mode);
            }
        }
    }
}
