//! Touch classification, debouncing and baseline tracking
//!
//! A scan is a *tentative* touch when the filtered reading sits at least
//! `threshold` above the baseline. The confirmed state only follows after
//! `debounce_scans` consecutive tentative readings disagree with it; a
//! single agreeing scan resets the count. The baseline only tracks the
//! reading while released, so a held finger is never absorbed into it.

use crate::config::{TouchConfig, MAX_BASELINE_SHIFT};

/// Debounced touch state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchState {
    #[default]
    Released,
    Touched,
}

/// Adaptive-baseline touch detector
#[derive(Debug, Clone)]
pub struct TouchDetector {
    threshold: u16,
    debounce_scans: u8,
    baseline_shift: u8,
    /// Estimated untouched reading
    baseline: u16,
    /// Consecutive scans disagreeing with `state`
    debounce_count: u8,
    state: TouchState,
}

impl TouchDetector {
    /// Create a released detector with a zero baseline
    ///
    /// Seed the baseline with [`TouchDetector::seed_baseline`] before the
    /// first scan. Out-of-range `debounce_scans` and `baseline_shift` are
    /// clamped to the nearest supported value.
    pub fn new(config: &TouchConfig) -> Self {
        Self {
            threshold: config.threshold,
            debounce_scans: config.debounce_scans.max(1),
            baseline_shift: config.baseline_shift.min(MAX_BASELINE_SHIFT),
            baseline: 0,
            debounce_count: 0,
            state: TouchState::Released,
        }
    }

    /// Set the baseline from startup calibration
    pub fn seed_baseline(&mut self, baseline: u16) {
        self.baseline = baseline;
    }

    pub fn baseline(&self) -> u16 {
        self.baseline
    }

    pub fn debounce_count(&self) -> u8 {
        self.debounce_count
    }

    /// Confirmed (debounced) state
    pub fn state(&self) -> TouchState {
        self.state
    }

    /// Classify one filtered reading without debouncing
    pub fn classify(&self, filtered: u16) -> TouchState {
        if filtered > self.baseline && filtered - self.baseline >= self.threshold {
            TouchState::Touched
        } else {
            TouchState::Released
        }
    }

    /// Process one scan
    ///
    /// Returns the new confirmed state if this scan committed a change.
    pub fn scan(&mut self, filtered: u16) -> Option<TouchState> {
        let tentative = self.classify(filtered);
        let mut committed = None;

        if tentative != self.state {
            self.debounce_count = self.debounce_count.saturating_add(1);
            if self.debounce_count >= self.debounce_scans {
                self.state = tentative;
                self.debounce_count = 0;
                committed = Some(tentative);
            }
        } else {
            self.debounce_count = 0;
        }

        if self.state == TouchState::Released {
            self.track_baseline(filtered);
        }

        committed
    }

    /// Move the baseline a fraction of the way toward `filtered`
    fn track_baseline(&mut self, filtered: u16) {
        if filtered > self.baseline {
            self.baseline += (filtered - self.baseline) >> self.baseline_shift;
        } else {
            self.baseline -= (self.baseline - filtered) >> self.baseline_shift;
        }
    }
}
