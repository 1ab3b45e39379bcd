//! Touch sensor trait

/// Errors that can occur with touch sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// ADC conversion error
    ConversionError,
}

/// Trait for capacitive touch sensors
///
/// One call performs a single charge-and-measure cycle. Readings are in
/// the 10-bit range `0..=1023`; a touch *increases* the reading.
pub trait TouchSensor {
    /// Take one raw reading
    ///
    /// Takes `&mut self` because sampling drives the sense line.
    fn sample_raw(&mut self) -> Result<u16, SensorError>;
}

impl<T: TouchSensor + ?Sized> TouchSensor for &mut T {
    fn sample_raw(&mut self) -> Result<u16, SensorError> {
        (**self).sample_raw()
    }
}
