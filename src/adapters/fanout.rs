//! Event sink combinator.
//!
//! Fans every event out to two sinks — in production the console log and
//! the serial wire protocol.

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

pub struct FanoutSink<A, B> {
    a: A,
    b: B,
}

impl<A: EventSink, B: EventSink> FanoutSink<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<A: EventSink, B: EventSink> EventSink for FanoutSink<A, B> {
    fn emit(&mut self, event: &AppEvent) {
        self.a.emit(event);
        self.b.emit(event);
    }
}
