//! Board wiring
//!
//! Pin assignments and tunables come from `booknook.toml`. The build
//! script checks the file and compiles it in as `board_config.rs`.

use embassy_rp::adc::Channel;
use embassy_rp::gpio::{AnyPin, Pull};
use embassy_rp::peripherals::ADC;
use embassy_rp::{Peri, Peripherals};

use booknook_core::{ControllerConfig, MotionConfig, StripMask, TouchConfig};

/// Peripherals used by the firmware
pub struct Board {
    /// 74HC595 DS
    pub shift_data: Peri<'static, AnyPin>,
    /// 74HC595 SH_CP
    pub shift_clock: Peri<'static, AnyPin>,
    /// 74HC595 ST_CP
    pub shift_latch: Peri<'static, AnyPin>,
    /// PIR sensor output
    pub motion: Peri<'static, AnyPin>,
    /// Touch pad charge line
    pub touch_charge: Peri<'static, AnyPin>,
    /// Touch pad sense input (ADC channel)
    pub touch_sense: Channel<'static>,
    pub status_led: Peri<'static, AnyPin>,
    pub adc: Peri<'static, ADC>,
}

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));
