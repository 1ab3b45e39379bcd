//! Charge-transfer capacitive touch sensor
//!
//! One reading: drive the sense line to its charge level, hold it for the
//! settle time, float the line and convert. A finger adds capacitance, so
//! the pad holds its charge longer and a touch reads *higher* than the
//! untouched pad.

use booknook_core::config::TOUCH_RAW_MAX;
use booknook_core::traits::{SensorError, TouchSensor};
use booknook_hal::{AnalogInput, ChargeLine};
use embedded_hal::delay::DelayNs;

/// Default time the sense line is held at its charge level (µs)
pub const DEFAULT_SETTLE_US: u32 = 5;

/// Charge-transfer touch sensor
///
/// Readings are rescaled from the converter's range to `0..=1023`.
pub struct ChargeTransferSensor<L, A, D> {
    line: L,
    adc: A,
    delay: D,
    settle_us: u32,
}

impl<L: ChargeLine, A: AnalogInput, D: DelayNs> ChargeTransferSensor<L, A, D> {
    /// Create a new sensor
    ///
    /// The sense line starts out floating.
    pub fn new(mut line: L, adc: A, delay: D) -> Self {
        line.release();
        Self {
            line,
            adc,
            delay,
            settle_us: DEFAULT_SETTLE_US,
        }
    }

    /// Set the charge hold time
    pub fn with_settle_us(mut self, settle_us: u32) -> Self {
        self.settle_us = settle_us;
        self
    }

    /// Rescale a converter reading to the 10-bit touch range
    fn normalize(raw: u16) -> u16 {
        let raw = raw.min(A::MAX);
        if A::MAX == TOUCH_RAW_MAX || A::MAX == 0 {
            return raw;
        }
        (u32::from(raw) * u32::from(TOUCH_RAW_MAX) / u32::from(A::MAX)) as u16
    }
}

impl<L: ChargeLine, A: AnalogInput, D: DelayNs> TouchSensor for ChargeTransferSensor<L, A, D> {
    fn sample_raw(&mut self) -> Result<u16, SensorError> {
        self.line.charge();
        self.delay.delay_us(self.settle_us);
        self.line.release();

        let raw = self
            .adc
            .read()
            .map_err(|_| SensorError::ConversionError)?;

        Ok(Self::normalize(raw))
    }
}
