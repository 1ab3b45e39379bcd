//! Analog input abstractions

/// Errors that can occur while sampling an analog input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleError {
    /// The converter did not produce a result
    Conversion,
}

/// Single-shot analog input
pub trait AnalogInput {
    /// Full-scale value of a reading returned by [`AnalogInput::read`]
    ///
    /// Readings are in `0..=MAX`.
    const MAX: u16;

    /// Take one blocking conversion
    fn read(&mut self) -> Result<u16, SampleError>;
}
