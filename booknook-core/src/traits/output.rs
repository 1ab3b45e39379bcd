//! Strip output trait

/// Errors that can occur while pushing a state byte to the strips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// The bus transfer did not complete within its spin limit
    Timeout,
}

/// Trait for the physical strip output
///
/// Implementations serialize one state byte to the LED bank. Bit `n` of
/// the byte drives strip `n + 1`. The new byte must become visible on all
/// outputs at once, after the whole byte has been transferred.
pub trait StripOutput {
    /// Write the state byte to the strips
    fn write(&mut self, state: u8) -> Result<(), BusError>;
}

impl<T: StripOutput + ?Sized> StripOutput for &mut T {
    fn write(&mut self, state: u8) -> Result<(), BusError> {
        (**self).write(state)
    }
}
