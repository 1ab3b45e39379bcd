//! GPIO wrappers implementing the `booknook-hal` pin traits

use embassy_rp::gpio::{AnyPin, Flex, Input, Level, Output, Pull};
use embassy_rp::Peri;

use booknook_hal::{ChargeLine, OutputPin};

/// Push-pull output pin
pub struct OutputLine<'d> {
    pin: Output<'d>,
}

impl<'d> OutputLine<'d> {
    /// Create a new output, initially low
    pub fn new(pin: Peri<'d, AnyPin>) -> Self {
        Self {
            pin: Output::new(pin, Level::Low),
        }
    }
}

impl OutputPin for OutputLine<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn toggle(&mut self) {
        self.pin.toggle();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Motion sensor input
///
/// PIR modules with an open-collector output pull the line low while
/// motion is present; `active_low` selects that polarity.
pub struct MotionInput<'d> {
    pin: Input<'d>,
    active_low: bool,
}

impl<'d> MotionInput<'d> {
    /// Create a new motion input
    ///
    /// The idle level is held by a pull resistor opposite to the active
    /// level.
    pub fn new(pin: Peri<'d, AnyPin>, active_low: bool) -> Self {
        let pull = if active_low { Pull::Up } else { Pull::Down };
        Self {
            pin: Input::new(pin, pull),
            active_low,
        }
    }

    /// Check if motion is currently signalled
    pub fn is_asserted(&self) -> bool {
        self.pin.is_high() != self.active_low
    }

    /// Wait for the next transition into the asserted level
    pub async fn wait_for_assert(&mut self) {
        if self.active_low {
            self.pin.wait_for_falling_edge().await;
        } else {
            self.pin.wait_for_rising_edge().await;
        }
    }
}

/// Touch pad charge line
///
/// Switches a GPIO between push-pull high (charging) and input without
/// pulls (floating).
pub struct FlexChargeLine<'d> {
    pin: Flex<'d>,
}

impl<'d> FlexChargeLine<'d> {
    /// Create a new charge line, initially floating
    pub fn new(pin: Peri<'d, AnyPin>) -> Self {
        let mut pin = Flex::new(pin);
        pin.set_pull(Pull::None);
        pin.set_as_input();
        Self { pin }
    }
}

impl ChargeLine for FlexChargeLine<'_> {
    fn charge(&mut self) {
        self.pin.set_high();
        self.pin.set_as_output();
    }

    fn release(&mut self) {
        self.pin.set_as_input();
    }
}
