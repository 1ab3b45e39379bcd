//! Digital pin abstractions
//!
//! Chip HALs implement these for the pins the drivers bit-bang: the shift
//! register lines, the status LED and the touch pad's charge line.

/// Push-pull output
pub trait OutputPin {
    /// Drive the pin high
    fn set_high(&mut self);

    /// Drive the pin low
    fn set_low(&mut self);

    /// Invert the driven level
    fn toggle(&mut self);

    /// Drive the pin to `high`
    ///
    /// Used when shifting data bits out one at a time.
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Level currently driven
    fn is_set_high(&self) -> bool;
}

/// Charge line of a charge-transfer touch pad
///
/// Alternates between driving the pad to its charge level and floating so
/// that the charge the pad retains can be converted.
pub trait ChargeLine {
    /// Drive the line to the charge level
    fn charge(&mut self);

    /// Float the line (high impedance, no pulls)
    fn release(&mut self);
}
