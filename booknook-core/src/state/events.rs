//! Hardware events and what handling them did

/// Events delivered to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Motion sensor asserted (edge, fires once per transition)
    MotionDetected,
    /// Periodic 1 Hz tick
    SecondTick {
        /// Live level of the motion input when the tick fired
        motion_active: bool,
    },
    /// Periodic touch scan with its filtered reading
    TouchScan {
        /// Average of one scan's raw readings
        filtered: u16,
    },
}

impl Event {
    /// Check if this event is handled by the motion countdown
    pub fn is_motion_event(&self) -> bool {
        matches!(self, Event::MotionDetected | Event::SecondTick { .. })
    }

    /// Check if this event is handled by the touch detector
    pub fn is_touch_event(&self) -> bool {
        matches!(self, Event::TouchScan { .. })
    }
}

/// Result of dispatching one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Motion edge lit the motion-eligible strips and armed the countdown
    MotionLit,
    /// Motion still present at the tick, countdown reset
    TimerRearmed,
    /// Countdown running, this many seconds left
    TimerCounting(u8),
    /// Countdown reached zero, motion-eligible strips turned off
    TimerExpired,
    /// Touch confirmed, all strips turned on
    Touched,
    /// Release confirmed, all strips turned off
    Released,
    /// Nothing changed
    Unchanged,
}

impl Outcome {
    /// Check if handling the event wrote to the strips
    pub fn wrote_output(&self) -> bool {
        matches!(
            self,
            Outcome::MotionLit | Outcome::TimerExpired | Outcome::Touched | Outcome::Released
        )
    }
}
