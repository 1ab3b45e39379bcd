//! Touch sample acquisition

use crate::config::{TouchConfig, MAX_SAMPLES_LOG2};
use crate::traits::{SensorError, TouchSensor};

/// Take one filtered reading
///
/// Averages `2^samples_log2` raw readings, with `samples_log2` clamped to
/// [`MAX_SAMPLES_LOG2`]. The first failed raw reading aborts the scan.
pub fn acquire<S: TouchSensor>(sensor: &mut S, samples_log2: u8) -> Result<u16, SensorError> {
    let samples_log2 = samples_log2.min(MAX_SAMPLES_LOG2);
    let mut sum: u32 = 0;
    for _ in 0..(1u32 << samples_log2) {
        sum += u32::from(sensor.sample_raw()?);
    }

    // Mean of u16 readings always fits
    Ok((sum >> samples_log2) as u16)
}

/// Seed value for the touch baseline
///
/// Averages `calibration_readings` filtered readings taken while the pad
/// is expected to be untouched. Must run before periodic scanning starts.
pub fn calibrate<S: TouchSensor>(sensor: &mut S, config: &TouchConfig) -> Result<u16, SensorError> {
    let readings = u32::from(config.calibration_readings.max(1));

    let mut sum: u32 = 0;
    for _ in 0..readings {
        sum += u32::from(acquire(sensor, config.samples_log2)?);
    }

    Ok((sum / readings) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock sensor cycling through a fixed pattern of readings
    struct MockSensor {
        pattern: &'static [u16],
        index: usize,
        reads: u32,
        fail_at: Option<u32>,
    }

    impl MockSensor {
        fn new(pattern: &'static [u16]) -> Self {
            Self {
                pattern,
                index: 0,
                reads: 0,
                fail_at: None,
            }
        }
    }

    impl TouchSensor for MockSensor {
        fn sample_raw(&mut self) -> Result<u16, SensorError> {
            if self.fail_at == Some(self.reads) {
                return Err(SensorError::ConversionError);
            }
            self.reads += 1;
            let value = self.pattern[self.index];
            self.index = (self.index + 1) % self.pattern.len();
            Ok(value)
        }
    }

    #[test]
    fn test_acquire_averages_power_of_two() {
        let mut sensor = MockSensor::new(&[500, 510]);
        assert_eq!(acquire(&mut sensor, 6), Ok(505));
        assert_eq!(sensor.reads, 64);
    }

    #[test]
    fn test_acquire_truncates() {
        let mut sensor = MockSensor::new(&[1, 2]);
        // (1 + 2) / 2 = 1.5
        assert_eq!(acquire(&mut sensor, 1), Ok(1));
    }

    #[test]
    fn test_acquire_full_scale() {
        let mut sensor = MockSensor::new(&[1023]);
        assert_eq!(acquire(&mut sensor, 8), Ok(1023));
    }

    #[test]
    fn test_acquire_single_sample() {
        let mut sensor = MockSensor::new(&[321]);
        assert_eq!(acquire(&mut sensor, 0), Ok(321));
        assert_eq!(sensor.reads, 1);
    }

    #[test]
    fn test_acquire_clamps_sample_count() {
        let mut sensor = MockSensor::new(&[1023]);
        assert_eq!(acquire(&mut sensor, 40), Ok(1023));
        assert_eq!(sensor.reads, 256);
    }

    #[test]
    fn test_acquire_propagates_fault() {
        let mut sensor = MockSensor::new(&[500]);
        sensor.fail_at = Some(10);
        assert_eq!(acquire(&mut sensor, 6), Err(SensorError::ConversionError));
        assert_eq!(sensor.reads, 10);
    }

    #[test]
    fn test_calibrate_reads_configured_amount() {
        let config = TouchConfig::default();
        let mut sensor = MockSensor::new(&[480, 520]);
        assert_eq!(calibrate(&mut sensor, &config), Ok(500));
        assert_eq!(sensor.reads, 16 * 64);
    }
}
