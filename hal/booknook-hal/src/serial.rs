//! Serial bus abstractions
//!
//! Models a byte-wide synchronous serial peripheral of the kind found on
//! small microcontrollers: a transfer is started by loading the data
//! register and completes asynchronously, signalled by a busy flag.

/// Poll-style serial bus master
///
/// The peripheral may be powered down between transfers. Callers are
/// expected to call [`SerialBus::power_up`] before starting a transfer and
/// [`SerialBus::power_down`] once it completes.
pub trait SerialBus {
    /// Enable the peripheral clock, configured for MSB-first 8-bit frames
    fn power_up(&mut self);

    /// Disable the peripheral so it draws no current while idle
    fn power_down(&mut self);

    /// Load one byte into the data register and start shifting it out
    fn start(&mut self, byte: u8);

    /// Check whether the current transfer is still in progress
    fn is_busy(&self) -> bool;
}
