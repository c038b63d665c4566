//! Property and fuzz-style tests for robustness of the command decoder
//! and the control engine's safety contract.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32
//! targets. On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use proptest::prelude::*;
use smartcharger::app::commands::Command;
use smartcharger::app::events::AppEvent;
use smartcharger::app::ports::{ActuatorPort, EventSink, SensorPort};
use smartcharger::app::service::ChargerService;
use smartcharger::config::ChargerConfig;
use smartcharger::engine::OperatingMode;
use smartcharger::engine::context::SensorSnapshot;
use smartcharger::protocol::parser;

// ── Decoder totality ──────────────────────────────────────────

proptest! {
    /// Any byte salad decodes to *some* command without panicking; the
    /// worst case is `Unknown`.
    #[test]
    fn parser_is_total(line in ".*") {
        let _ = parser::parse(&line);
    }

    /// Keyword matching ignores ASCII case and surrounding whitespace.
    #[test]
    fn keyword_parsing_survives_case_mangling(
        upper in proptest::collection::vec(any::<bool>(), 9),
        pad_left in " {0,4}",
        pad_right in "[ \t]{0,4}",
    ) {
        let keyword = "MODE:AUTO";
        let mangled: String = keyword
            .chars()
            .zip(upper.iter().cycle())
            .map(|(c, up)| if *up { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
            .collect();
        let line = format!("{pad_left}{mangled}{pad_right}");
        prop_assert_eq!(parser::parse(&line), Command::SetMode(OperatingMode::Auto));
    }

    /// JSON noise never escapes as anything but a decoded command.
    #[test]
    fn json_prefix_never_panics(body in ".*") {
        let line = format!("{{{body}");
        let _ = parser::parse(&line);
    }
}

// ── Engine safety contract, driven end-to-end ─────────────────

struct ScriptedHw {
    snapshot: SensorSnapshot,
}

impl SensorPort for ScriptedHw {
    fn read_all(&mut self) -> SensorSnapshot {
        self.snapshot
    }
}

impl ActuatorPort for ScriptedHw {
    fn set_ssr(&mut self, _on: bool) {}
    fn set_indicator(&mut self, _on: bool) {}
}

struct NullSink;
impl EventSink for NullSink {
    fn emit(&mut self, _e: &AppEvent) {}
}

fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("MODE:AUTO".to_string()),
        Just("MODE:MANUAL".to_string()),
        Just("ON".to_string()),
        Just("OFF".to_string()),
        Just(r#"{"command":"ssr_on"}"#.to_string()),
        Just(r#"{"command":"ssr_off"}"#.to_string()),
        Just(r#"{"command":"toggle_auto"}"#.to_string()),
        ".{0,24}",
    ]
}

proptest! {
    /// Whatever command and sensor history precedes it, a cycle that
    /// observes an over-limit temperature always ends with the SSR open.
    #[test]
    fn over_temperature_always_wins(
        steps in proptest::collection::vec(
            (arb_line(), 2.5f32..5.0, 0.0f32..90.0),
            1..60,
        ),
    ) {
        let config = ChargerConfig::default();
        let max_temp = config.max_temperature_c;
        let mut app = ChargerService::new(config, 0);
        let mut hw = ScriptedHw { snapshot: SensorSnapshot::default() };
        let mut sink = NullSink;
        app.start(&mut sink);

        let mut now = 0u64;
        for (line, volts, temp) in steps {
            now += 100;
            app.handle_line(&line, &mut sink, now);
            hw.snapshot.voltage_v = volts;
            hw.snapshot.temperature_c = temp;
            app.tick(&mut hw, &mut sink, now);

            if temp > max_temp {
                prop_assert!(!app.ssr_enabled(),
                    "SSR closed at {temp}°C after line {line:?}");
            }
        }
    }

    /// Long command silence in AUTO mode always ends with the SSR open,
    /// no matter what the thresholds want.
    #[test]
    fn auto_silence_always_opens_the_relay(
        volts in 2.5f32..5.0,
        silence_ms in 5_001u64..600_000,
    ) {
        let mut app = ChargerService::new(ChargerConfig::default(), 0);
        let mut hw = ScriptedHw { snapshot: SensorSnapshot::default() };
        let mut sink = NullSink;
        app.start(&mut sink);

        hw.snapshot.voltage_v = volts;
        hw.snapshot.temperature_c = 25.0;
        app.tick(&mut hw, &mut sink, 100);
        app.tick(&mut hw, &mut sink, 100 + silence_ms);

        prop_assert!(!app.ssr_enabled());
    }
}
