//! Charger Firmware — Main Entry Point
//!
//! Hexagonal architecture with a cooperative, event-driven control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter     SerialConsole      MonotonicClock         │
//! │  (Sensor+Actuator)   (line channel)     (timestamps)           │
//! │  LogEventSink        SerialEventSink                           │
//! │  (EventSink)         (wire records)                            │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            ChargerService (pure logic)                 │    │
//! │  │  Engine · Safety · SoC                                 │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  TelemetryReporter (tick-paced) · Watchdog (loop liveness)     │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use smartcharger::adapters::fanout::FanoutSink;
use smartcharger::adapters::hardware::HardwareAdapter;
use smartcharger::adapters::log_sink::LogEventSink;
use smartcharger::adapters::serial::{SerialConsole, SerialWriter};
use smartcharger::adapters::serial_sink::SerialEventSink;
use smartcharger::adapters::time::MonotonicClock;
use smartcharger::app::service::ChargerService;
use smartcharger::config::ChargerConfig;
use smartcharger::drivers::ssr::SsrDriver;
use smartcharger::drivers::status_led::StatusLed;
use smartcharger::drivers::watchdog::Watchdog;
use smartcharger::drivers::{hw_init, hw_timer};
use smartcharger::events::{self, Event, push_event};
use smartcharger::pins;
use smartcharger::sensors::charge_detect::ChargeDetect;
use smartcharger::sensors::temperature::TemperatureSensor;
use smartcharger::sensors::voltage::VoltageSensor;
use smartcharger::sensors::SensorHub;
use smartcharger::telemetry::TelemetryReporter;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }

    info!("SmartCharger v{}", env!("CARGO_PKG_VERSION"));
    info!("Commands: MODE:AUTO | MODE:MANUAL | ON | OFF | {{\"command\":...}}");

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let config = ChargerConfig::default();
    hw_timer::start_timers(config.control_loop_interval_ms);
    let watchdog = Watchdog::new();
    let clock = MonotonicClock::new();

    // ── 3. Construct adapters ─────────────────────────────────
    let sensor_hub = SensorHub::new(
        VoltageSensor::new(
            pins::VOLTAGE_ADC_GPIO,
            config.voltage_divider_ratio,
            config.voltage_alpha,
        ),
        TemperatureSensor::new(pins::TEMP_ADC_GPIO, config.temperature_alpha),
        ChargeDetect::new(pins::CHARGE_DETECT_GPIO),
    );
    let mut hw = HardwareAdapter::new(sensor_hub, SsrDriver::new(), StatusLed::new());

    // Startup indicator: three blinks before the loop takes the LED over.
    for _ in 0..3 {
        hw.led_mut().set(true);
        std::thread::sleep(std::time::Duration::from_millis(200));
        hw.led_mut().set(false);
        std::thread::sleep(std::time::Duration::from_millis(200));
    }

    let mut console = SerialConsole::new();
    let mut sink = FanoutSink::new(
        LogEventSink::new(),
        SerialEventSink::new(SerialWriter::new()),
    );

    // ── 4. Construct app service ──────────────────────────────
    let mut app = ChargerService::new(config.clone(), clock.now_ms());
    let mut reporter = TelemetryReporter::new(&config);
    app.start(&mut sink);

    info!("System ready. Entering event loop.");

    // ── 5. Event loop ─────────────────────────────────────────
    loop {
        // Simulate timer interrupts via sleep on non-espidf targets.
        // On real hardware the esp_timer task pushes ControlTick; the
        // short sleep just yields to the idle task between drains.
        #[cfg(not(target_os = "espidf"))]
        std::thread::sleep(std::time::Duration::from_millis(
            config.control_loop_interval_ms as u64,
        ));
        #[cfg(target_os = "espidf")]
        std::thread::sleep(std::time::Duration::from_millis(10));

        // Drain buffered serial bytes first: commands received within a
        // cycle are applied before that cycle's threshold decisions.
        let lines = console.poll();
        for _ in 0..lines {
            push_event(Event::CommandReceived);
        }

        #[cfg(not(target_os = "espidf"))]
        push_event(Event::ControlTick);

        // Process all pending events.
        events::drain_events(|event| match event {
            Event::CommandReceived => {
                if let Some(line) = console.take_line() {
                    app.handle_line(&line, &mut sink, clock.now_ms());
                }
            }

            Event::ControlTick => {
                app.tick(&mut hw, &mut sink, clock.now_ms());
                reporter.tick(&app, &mut sink);
            }
        });

        // Feed watchdog on every iteration.
        watchdog.feed();
    }
}
