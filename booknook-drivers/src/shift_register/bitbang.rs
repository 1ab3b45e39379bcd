//! Bit-banged shift register
//!
//! Drives DS (data), SH_CP (shift clock) and ST_CP (latch) from three
//! GPIO pins. There is no completion to wait for, so writes never fail.

use booknook_core::traits::{BusError, StripOutput};
use booknook_hal::OutputPin;
use embedded_hal::delay::DelayNs;

/// Default time each clock/latch level is held (ns)
pub const DEFAULT_EDGE_DELAY_NS: u32 = 500;

/// Bit-banged 74HC595 output
pub struct BitBangShiftRegister<P, D> {
    data: P,
    clock: P,
    latch: P,
    delay: D,
    /// Time each clock/latch level is held (ns)
    edge_delay_ns: u32,
}

impl<P: OutputPin, D: DelayNs> BitBangShiftRegister<P, D> {
    /// Create a new bit-banged output
    ///
    /// All three lines are driven low, which is also their idle level
    /// between writes.
    pub fn new(data: P, clock: P, latch: P, delay: D) -> Self {
        let mut register = Self {
            data,
            clock,
            latch,
            delay,
            edge_delay_ns: DEFAULT_EDGE_DELAY_NS,
        };
        register.idle();
        register
    }

    /// Set the time each clock/latch level is held
    pub fn with_edge_delay_ns(mut self, edge_delay_ns: u32) -> Self {
        self.edge_delay_ns = edge_delay_ns;
        self
    }

    /// Release the pins
    pub fn release(self) -> (P, P, P, D) {
        (self.data, self.clock, self.latch, self.delay)
    }

    fn idle(&mut self) {
        self.data.set_low();
        self.clock.set_low();
        self.latch.set_low();
    }

    fn pulse(pin: &mut P, delay: &mut D, hold_ns: u32) {
        pin.set_high();
        delay.delay_ns(hold_ns);
        pin.set_low();
        delay.delay_ns(hold_ns);
    }
}

impl<P: OutputPin, D: DelayNs> StripOutput for BitBangShiftRegister<P, D> {
    fn write(&mut self, state: u8) -> Result<(), BusError> {
        // Latch must be low before the first bit goes in
        self.latch.set_low();

        for bit in (0..8).rev() {
            self.data.set_state(state & (1 << bit) != 0);
            self.delay.delay_ns(self.edge_delay_ns);
            Self::pulse(&mut self.clock, &mut self.delay, self.edge_delay_ns);
        }

        Self::pulse(&mut self.latch, &mut self.delay, self.edge_delay_ns);

        // Leave every line low so nothing sources current while idle
        self.idle();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;

    /// Simulated 74HC595 fed by the mock pins
    #[derive(Default)]
    struct Sim595 {
        data: bool,
        clock: bool,
        latch: bool,
        shift: u8,
        outputs: u8,
        clocks: u32,
        latches: u32,
        /// Set if the clock rose while the latch was high
        clocked_while_latched: bool,
    }

    #[derive(Clone, Copy)]
    enum Line {
        Data,
        Clock,
        Latch,
    }

    struct MockPin<'a> {
        line: Line,
        chip: &'a RefCell<Sim595>,
    }

    impl OutputPin for MockPin<'_> {
        fn set_high(&mut self) {
            let mut chip = self.chip.borrow_mut();
            match self.line {
                Line::Data => chip.data = true,
                Line::Clock => {
                    if !chip.clock {
                        chip.shift = (chip.shift << 1) | u8::from(chip.data);
                        chip.clocks += 1;
                        if chip.latch {
                            chip.clocked_while_latched = true;
                        }
                    }
                    chip.clock = true;
                }
                Line::Latch => {
                    if !chip.latch {
                        chip.outputs = chip.shift;
                        chip.latches += 1;
                    }
                    chip.latch = true;
                }
            }
        }

        fn set_low(&mut self) {
            let mut chip = self.chip.borrow_mut();
            match self.line {
                Line::Data => chip.data = false,
                Line::Clock => chip.clock = false,
                Line::Latch => chip.latch = false,
            }
        }

        fn toggle(&mut self) {
            if self.is_set_high() {
                self.set_low();
            } else {
                self.set_high();
            }
        }

        fn is_set_high(&self) -> bool {
            let chip = self.chip.borrow();
            match self.line {
                Line::Data => chip.data,
                Line::Clock => chip.clock,
                Line::Latch => chip.latch,
            }
        }
    }

    /// Delay that only accumulates the requested time
    #[derive(Default)]
    struct MockDelay {
        total_ns: u64,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    fn register(chip: &RefCell<Sim595>) -> BitBangShiftRegister<MockPin<'_>, MockDelay> {
        BitBangShiftRegister::new(
            MockPin { line: Line::Data, chip },
            MockPin { line: Line::Clock, chip },
            MockPin { line: Line::Latch, chip },
            MockDelay::default(),
        )
    }

    #[test]
    fn test_byte_reaches_outputs_msb_first() {
        let chip = RefCell::new(Sim595::default());
        let mut register = register(&chip);

        for state in [0x00, 0xFF, 0xA5, 0x01, 0x80, 0x3C] {
            register.write(state).unwrap();
            assert_eq!(chip.borrow().outputs, state);
        }
    }

    #[test]
    fn test_one_latch_per_write() {
        let chip = RefCell::new(Sim595::default());
        let mut register = register(&chip);

        register.write(0x12).unwrap();
        register.write(0x12).unwrap();

        let chip = chip.borrow();
        assert_eq!(chip.clocks, 16);
        assert_eq!(chip.latches, 2);
        assert!(!chip.clocked_while_latched);
    }

    #[test]
    fn test_lines_idle_low() {
        let chip = RefCell::new(Sim595::default());
        let mut register = register(&chip);

        register.write(0xFF).unwrap();

        let chip = chip.borrow();
        assert!(!chip.data);
        assert!(!chip.clock);
        assert!(!chip.latch);
    }

    #[test]
    fn test_edge_delay_applied() {
        let chip = RefCell::new(Sim595::default());
        let mut register = register(&chip).with_edge_delay_ns(100);

        register.write(0x00).unwrap();

        // Per bit: data setup + clock high + clock low; then latch high + low
        let (_, _, _, delay) = register.release();
        assert_eq!(delay.total_ns, (8 * 3 + 2) * 100);
    }
}
