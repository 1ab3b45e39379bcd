//! Motion auto-off countdown
//!
//! `remaining` counts whole seconds in `0..=timeout`; zero means idle.
//! A motion edge or a tick that still sees motion re-arms the countdown.
//! Otherwise each tick takes one second off, and the tick that reaches
//! zero is the only one reporting [`TickOutcome::Expired`].

/// Result of a 1 Hz tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Motion still present, countdown reset to the full timeout
    Rearmed,
    /// Countdown running, this many seconds left
    Counting(u8),
    /// Countdown just reached zero
    Expired,
    /// Countdown already at zero
    Idle,
}

/// Motion auto-off countdown
#[derive(Debug, Clone)]
pub struct MotionTimer {
    timeout_s: u8,
    remaining: u8,
}

impl MotionTimer {
    /// Create an idle countdown with the given timeout in seconds
    pub fn new(timeout_s: u8) -> Self {
        Self {
            timeout_s,
            remaining: 0,
        }
    }

    /// Seconds left before auto-off, zero when idle
    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    /// Full timeout in seconds
    pub fn timeout(&self) -> u8 {
        self.timeout_s
    }

    /// Check if the countdown is running
    pub fn is_armed(&self) -> bool {
        self.remaining > 0
    }

    /// Motion edge: restart the countdown
    pub fn trigger(&mut self) {
        self.remaining = self.timeout_s;
    }

    /// 1 Hz tick
    ///
    /// # Arguments
    /// - `motion_active`: live level of the motion input at tick time
    pub fn tick(&mut self, motion_active: bool) -> TickOutcome {
        if motion_active {
            self.remaining = self.timeout_s;
            return TickOutcome::Rearmed;
        }

        match self.remaining {
            0 => TickOutcome::Idle,
            1 => {
                self.remaining = 0;
                TickOutcome::Expired
            }
            n => {
                self.remaining = n - 1;
                TickOutcome::Counting(self.remaining)
            }
        }
    }
}
