//! Book Nook - LED Strip Controller Firmware
//!
//! Main firmware binary for RP2040-based book nook controllers. Drives
//! eight LED strips through a 74HC595 shift register, switched by a PIR
//! motion sensor with an auto-off countdown and by a capacitive touch pad.
//!
//! Hardware activity is turned into events by the motion and scan tasks;
//! a single dispatcher task applies them to the controller.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Config as AdcConfig};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use booknook_core::config::TOUCH_RAW_MAX;
use booknook_core::touch::calibrate;
use booknook_core::{Controller, ControllerConfig};
use booknook_drivers::sensor::ChargeTransferSensor;
use booknook_drivers::shift_register::BitBangShiftRegister;
use booknook_hal_rp2040::{AdcInput, FlexChargeLine, MotionInput, OutputLine};

use crate::board::{
    Board, CONTROLLER_CONFIG, MOTION_ACTIVE_LOW, SHIFT_EDGE_DELAY_NS, TOUCH_SETTLE_US,
};
use crate::channels::CONTROLLER;

mod board;
mod channels;
mod tasks;

/// Strip output as wired on the board
pub type StripDriver = BitBangShiftRegister<OutputLine<'static>, Delay>;

/// Touch pad as wired on the board
pub type TouchPad = ChargeTransferSensor<FlexChargeLine<'static>, AdcInput<'static>, Delay>;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Book Nook firmware starting...");

    let p = embassy_rp::init(Default::default());
    let board = Board::split(p);
    info!("Peripherals initialized");

    let config = load_config();

    // Strip output: bit-banged 74HC595, all lines idle low
    let strips: StripDriver = BitBangShiftRegister::new(
        OutputLine::new(board.shift_data),
        OutputLine::new(board.shift_clock),
        OutputLine::new(board.shift_latch),
        Delay,
    )
    .with_edge_delay_ns(SHIFT_EDGE_DELAY_NS);

    // Initial all-off write, before the pad is measured
    let mut controller = Controller::new(strips, &config);
    match controller.start() {
        Ok(()) => info!("Strips initialized (all off)"),
        Err(e) => warn!("Initial strip write failed: {:?}", e),
    }

    // Touch pad: charge line plus blocking ADC channel
    let adc = Adc::new_blocking(board.adc, AdcConfig::default());
    let mut pad: TouchPad = ChargeTransferSensor::new(
        FlexChargeLine::new(board.touch_charge),
        AdcInput::new(adc, board.touch_sense),
        Delay,
    )
    .with_settle_us(TOUCH_SETTLE_US);

    controller.seed_baseline(calibrate_pad(&mut pad, &config));

    info!(
        "Motion: {}s timeout, eligible strips {=u8:#x}",
        config.motion.timeout_s,
        controller.strips().motion_enabled().bits()
    );
    CONTROLLER.replace(Some(controller));

    let motion = MotionInput::new(board.motion, MOTION_ACTIVE_LOW);
    let status_led = OutputLine::new(board.status_led);

    // Spawn tasks
    spawner.spawn(tasks::dispatcher_task()).unwrap();
    spawner.spawn(tasks::motion_task(motion, status_led)).unwrap();
    spawner
        .spawn(tasks::scan_task(
            pad,
            config.touch.samples_log2,
            config.touch.scan_interval_ms,
        ))
        .unwrap();

    info!("All tasks spawned, firmware running");

    // All work happens in the spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Controller tunables from the board configuration
///
/// The build script already checks `booknook.toml`; this guards against a
/// board configuration that passes those checks but not the controller's.
fn load_config() -> ControllerConfig {
    match CONTROLLER_CONFIG.validate() {
        Ok(()) => {
            info!("Board configuration loaded");
            CONTROLLER_CONFIG
        }
        Err(e) => {
            error!("Invalid board configuration: {:?}", e);
            error!("Using default configuration");
            ControllerConfig::default()
        }
    }
}

/// Calibration attempts before the touch pad is given up on
const CALIBRATION_ATTEMPTS: u8 = 3;

/// Measure the untouched pad
///
/// If every attempt fails the baseline starts at the top of the range and
/// only comes down as released scans pull it toward the real pad level.
/// Motion control is unaffected.
fn calibrate_pad(pad: &mut TouchPad, config: &ControllerConfig) -> u16 {
    for attempt in 1..=CALIBRATION_ATTEMPTS {
        match calibrate(pad, &config.touch) {
            Ok(baseline) => {
                info!(
                    "Touch calibrated: baseline {} ({} readings)",
                    baseline, config.touch.calibration_readings
                );
                return baseline;
            }
            Err(e) => warn!("Touch calibration attempt {} failed: {:?}", attempt, e),
        }
    }

    error!("Touch calibration failed, starting uncalibrated");
    TOUCH_RAW_MAX
}
