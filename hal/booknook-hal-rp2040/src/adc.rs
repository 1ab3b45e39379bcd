//! ADC channel for touch readings
//!
//! RP2040 has a single 12-bit ADC with 4 external channels:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29

use embassy_rp::adc::{Adc, Blocking, Channel};

use booknook_hal::{AnalogInput, SampleError};

/// Blocking single-channel ADC input
pub struct AdcInput<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
}

impl<'d> AdcInput<'d> {
    /// Create a new input reading `channel`
    pub fn new(adc: Adc<'d, Blocking>, channel: Channel<'d>) -> Self {
        Self { adc, channel }
    }
}

impl AnalogInput for AdcInput<'_> {
    const MAX: u16 = 4095;

    fn read(&mut self) -> Result<u16, SampleError> {
        self.adc
            .blocking_read(&mut self.channel)
            .map_err(|_| SampleError::Conversion)
    }
}
