//! Configuration types
//!
//! Every tunable of the control logic, with defaults matching the
//! reference hardware (5 s auto-off, 40 Hz touch scan).

use crate::strips::StripMask;

/// Largest supported `samples_log2` (256 raw readings per scan)
pub const MAX_SAMPLES_LOG2: u8 = 8;

/// Largest supported `baseline_shift`
pub const MAX_BASELINE_SHIFT: u8 = 15;

/// Full-scale raw touch reading (10-bit)
pub const TOUCH_RAW_MAX: u16 = 1023;

/// Motion auto-off configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionConfig {
    /// Seconds without motion before eligible strips turn off
    pub timeout_s: u8,
    /// Strips that take part in motion on/off at boot
    pub eligible: StripMask,
}

impl MotionConfig {
    pub const fn new() -> Self {
        Self {
            timeout_s: 5,
            eligible: StripMask::ALL,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Capacitive touch configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchConfig {
    /// Minimum rise above baseline that counts as a touch
    pub threshold: u16,
    /// Consecutive disagreeing scans needed to commit a state change
    pub debounce_scans: u8,
    /// Baseline moves by `error >> baseline_shift` per released scan
    pub baseline_shift: u8,
    /// log2 of the raw readings averaged per scan
    pub samples_log2: u8,
    /// Filtered readings averaged to seed the baseline at startup
    pub calibration_readings: u8,
    /// Scan period in milliseconds
    pub scan_interval_ms: u16,
}

impl TouchConfig {
    pub const fn new() -> Self {
        Self {
            threshold: 20,
            debounce_scans: 5,
            baseline_shift: 7,
            samples_log2: 6,
            calibration_readings: 16,
            scan_interval_ms: 25,
        }
    }

    /// Raw readings averaged per scan
    ///
    /// Counts above `2^MAX_SAMPLES_LOG2` are capped, as in scanning.
    pub const fn samples_per_scan(&self) -> u16 {
        let log2 = if self.samples_log2 > MAX_SAMPLES_LOG2 {
            MAX_SAMPLES_LOG2
        } else {
            self.samples_log2
        };
        1 << log2
    }
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    pub motion: MotionConfig,
    pub touch: TouchConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Motion timeout must be at least one second
    ZeroTimeout,
    /// Touch threshold must be within `1..=1023`
    ThresholdOutOfRange,
    /// At least one scan is needed to commit a change
    ZeroDebounce,
    /// Baseline shift must be within `1..=15`
    BaselineShiftOutOfRange,
    /// At most 2^8 readings per scan
    TooManySamples,
    /// At least one calibration reading is needed
    ZeroCalibration,
    /// Scan interval must be non-zero
    ZeroScanInterval,
}

impl ControllerConfig {
    pub const fn new() -> Self {
        Self {
            motion: MotionConfig::new(),
            touch: TouchConfig::new(),
        }
    }

    /// Check every field against its supported range
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let touch = &self.touch;

        if self.motion.timeout_s == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if touch.threshold == 0 || touch.threshold > TOUCH_RAW_MAX {
            return Err(ConfigError::ThresholdOutOfRange);
        }
        if touch.debounce_scans == 0 {
            return Err(ConfigError::ZeroDebounce);
        }
        if touch.baseline_shift == 0 || touch.baseline_shift > MAX_BASELINE_SHIFT {
            return Err(ConfigError::BaselineShiftOutOfRange);
        }
        if touch.samples_log2 > MAX_SAMPLES_LOG2 {
            return Err(ConfigError::TooManySamples);
        }
        if touch.calibration_readings == 0 {
            return Err(ConfigError::ZeroCalibration);
        }
        if touch.scan_interval_ms == 0 {
            return Err(ConfigError::ZeroScanInterval);
        }

        Ok(())
    }
}
