//! Serial line channel.
//!
//! [`SerialConsole`] accumulates received bytes into complete lines
//! without ever blocking: each `poll()` drains only the bytes already
//! buffered by the UART driver. [`SerialWriter`] is the stateless TX
//! side used by the outbound event sink.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: UART0 via hw_init helpers.
//! On host/test: a static injection queue feeds the RX side and the TX
//! side prints to stdout.

use heapless::{Deque, String};
use log::warn;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Longest accepted command line; anything longer is discarded whole.
pub const LINE_CAP: usize = 160;
/// Complete lines buffered between polls.
const PENDING_CAP: usize = 4;

#[cfg(not(target_os = "espidf"))]
static SIM_RX: std::sync::Mutex<std::collections::VecDeque<u8>> =
    std::sync::Mutex::new(std::collections::VecDeque::new());

/// Queue bytes for the host-side RX simulation.
#[cfg(not(target_os = "espidf"))]
pub fn sim_inject_bytes(bytes: &[u8]) {
    if let Ok(mut q) = SIM_RX.lock() {
        q.extend(bytes.iter().copied());
    }
}

// ───────────────────────────────────────────────────────────────
// RX — line accumulation
// ───────────────────────────────────────────────────────────────

pub struct SerialConsole {
    line: String<LINE_CAP>,
    pending: Deque<String<LINE_CAP>, PENDING_CAP>,
    /// Discarding an oversized line until its terminator.
    overflow: bool,
}

impl SerialConsole {
    pub fn new() -> Self {
        Self {
            line: String::new(),
            pending: Deque::new(),
            overflow: false,
        }
    }

    /// Drain currently-buffered RX bytes into complete lines.
    /// Never blocks; returns the number of newly completed lines.
    pub fn poll(&mut self) -> usize {
        let mut buf = [0u8; 64];
        let mut completed = 0;
        loop {
            let n = self.read_buffered(&mut buf);
            if n == 0 {
                break;
            }
            for &b in &buf[..n] {
                completed += usize::from(self.feed_byte(b));
            }
        }
        completed
    }

    /// Pop the oldest complete line, if any.
    pub fn take_line(&mut self) -> Option<String<LINE_CAP>> {
        self.pending.pop_front()
    }

    fn feed_byte(&mut self, b: u8) -> bool {
        if b == b'\n' || b == b'\r' {
            let mut completed = false;
            if !self.overflow && !self.line.is_empty() {
                match self.pending.push_back(self.line.clone()) {
                    Ok(()) => completed = true,
                    Err(_) => warn!("serial: pending line queue full, command dropped"),
                }
            }
            self.line.clear();
            self.overflow = false;
            return completed;
        }
        if self.overflow {
            return false;
        }
        if self.line.push(b as char).is_err() {
            warn!("serial: oversized line discarded");
            self.line.clear();
            self.overflow = true;
        }
        false
    }

    #[cfg(target_os = "espidf")]
    fn read_buffered(&mut self, buf: &mut [u8]) -> usize {
        hw_init::uart_read(buf)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_buffered(&mut self, buf: &mut [u8]) -> usize {
        let Ok(mut q) = SIM_RX.lock() else { return 0 };
        let mut n = 0;
        while n < buf.len() {
            match q.pop_front() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        n
    }
}

// ───────────────────────────────────────────────────────────────
// TX — stateless line writer
// ───────────────────────────────────────────────────────────────

/// Write side of the channel. Fire-and-forget: a full TX ring drops the
/// record rather than blocking the control loop.
#[derive(Clone, Copy)]
pub struct SerialWriter;

impl SerialWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_line(&self, line: &str) {
        #[cfg(target_os = "espidf")]
        {
            hw_init::uart_write(line.as_bytes());
            hw_init::uart_write(b"\r\n");
        }
        #[cfg(not(target_os = "espidf"))]
        println!("{line}");
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    // The RX simulation queue is process-global; serialise these tests.
    static TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    fn exclusive() -> std::sync::MutexGuard<'static, ()> {
        let guard = TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        SIM_RX.lock().unwrap().clear();
        guard
    }

    #[test]
    fn accumulates_bytes_into_lines() {
        let _g = exclusive();
        let mut console = SerialConsole::new();
        sim_inject_bytes(b"MODE:AUTO\nON\r\n");
        let n = console.poll();
        assert_eq!(n, 2);
        assert_eq!(console.take_line().unwrap().as_str(), "MODE:AUTO");
        assert_eq!(console.take_line().unwrap().as_str(), "ON");
        assert!(console.take_line().is_none());
    }

    #[test]
    fn partial_line_waits_for_terminator() {
        let _g = exclusive();
        let mut console = SerialConsole::new();
        sim_inject_bytes(b"MODE:MAN");
        assert_eq!(console.poll(), 0);
        sim_inject_bytes(b"UAL\n");
        assert_eq!(console.poll(), 1);
        assert_eq!(console.take_line().unwrap().as_str(), "MODE:MANUAL");
    }

    #[test]
    fn oversized_line_is_discarded_whole() {
        let _g = exclusive();
        let mut console = SerialConsole::new();
        let long = vec![b'x'; LINE_CAP + 40];
        sim_inject_bytes(&long);
        sim_inject_bytes(b"\nON\n");
        let n = console.poll();
        assert_eq!(n, 1, "only the sane line survives");
        assert_eq!(console.take_line().unwrap().as_str(), "ON");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let _g = exclusive();
        let mut console = SerialConsole::new();
        sim_inject_bytes(b"\r\n\r\n\nOFF\n");
        assert_eq!(console.poll(), 1);
        assert_eq!(console.take_line().unwrap().as_str(), "OFF");
    }
}
