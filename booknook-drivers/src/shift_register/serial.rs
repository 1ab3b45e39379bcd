//! Shift register on a serial peripheral
//!
//! The byte is shifted by the hardware serial unit; only the latch is a
//! plain GPIO. The completion wait is a bounded spin: if the peripheral
//! never reports idle, the bus is powered down, the latch is left alone
//! so the previous byte stays on the outputs, and the write fails with
//! [`BusError::Timeout`].

use booknook_core::traits::{BusError, StripOutput};
use booknook_hal::{OutputPin, SerialBus};

/// Default number of busy polls before a transfer is abandoned
///
/// A byte takes 16 CPU cycles at the fastest serial clock; this is
/// several orders of magnitude above any real transfer.
pub const DEFAULT_SPIN_LIMIT: u32 = 10_000;

/// 74HC595 output on a serial peripheral plus a latch pin
pub struct SerialShiftRegister<B, L> {
    bus: B,
    latch: L,
    spin_limit: u32,
}

impl<B: SerialBus, L: OutputPin> SerialShiftRegister<B, L> {
    /// Create a new serial output
    ///
    /// The latch is driven low and the bus powered down.
    pub fn new(mut bus: B, mut latch: L) -> Self {
        latch.set_low();
        bus.power_down();
        Self {
            bus,
            latch,
            spin_limit: DEFAULT_SPIN_LIMIT,
        }
    }

    /// Set the number of busy polls before a transfer is abandoned
    pub fn with_spin_limit(mut self, spin_limit: u32) -> Self {
        self.spin_limit = spin_limit;
        self
    }

    /// Release the bus and latch pin
    pub fn release(self) -> (B, L) {
        (self.bus, self.latch)
    }

    /// Wait for the current transfer, at most `spin_limit` polls
    fn wait_idle(&self) -> Result<(), BusError> {
        let mut spins: u32 = 0;
        while self.bus.is_busy() {
            if spins >= self.spin_limit {
                return Err(BusError::Timeout);
            }
            spins += 1;
            core::hint::spin_loop();
        }
        Ok(())
    }
}

impl<B: SerialBus, L: OutputPin> StripOutput for SerialShiftRegister<B, L> {
    fn write(&mut self, state: u8) -> Result<(), BusError> {
        self.latch.set_low();

        self.bus.power_up();
        self.bus.start(state);
        let transfer = self.wait_idle();
        self.bus.power_down();
        transfer?;

        self.latch.set_high();
        self.latch.set_low();
        Ok(())
    }
}
