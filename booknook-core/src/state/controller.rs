//! Controller coordinating strips, motion countdown and touch detection
//!
//! The controller is the single owner of all control state. Each call to
//! [`Controller::dispatch`] handles one event to completion; callers that
//! share the controller with event handlers wrap it in
//! [`Shared`](crate::shared::Shared) so that no read-modify-write of the
//! masks can be interrupted.

use crate::config::ControllerConfig;
use crate::motion::{MotionTimer, TickOutcome};
use crate::strips::{StripBank, StripMask};
use crate::touch::{TouchDetector, TouchState};
use crate::traits::{BusError, StripOutput};

use super::events::{Event, Outcome};

/// Controller state for coordinating subsystems
pub struct Controller<O> {
    /// LED on/off and motion eligibility
    strips: StripBank<O>,
    /// Motion auto-off countdown
    timer: MotionTimer,
    /// Touch pad state
    touch: TouchDetector,
}

impl<O: StripOutput> Controller<O> {
    /// Create a new controller
    ///
    /// Strips outside `config.motion.eligible` start out ineligible for
    /// motion. Nothing is written until [`Controller::start`].
    pub fn new(output: O, config: &ControllerConfig) -> Self {
        let mut strips = StripBank::new(output);
        strips.disable_motion(!config.motion.eligible);

        Self {
            strips,
            timer: MotionTimer::new(config.motion.timeout_s),
            touch: TouchDetector::new(&config.touch),
        }
    }

    /// Write the initial all-off state
    ///
    /// The shift register powers up with undefined outputs; call this
    /// before touch calibration so no strip is lit while the pad is
    /// measured.
    pub fn start(&mut self) -> Result<(), BusError> {
        self.strips.set(StripMask::NONE)
    }

    /// Seed the touch baseline from calibration
    pub fn seed_baseline(&mut self, baseline: u16) {
        self.touch.seed_baseline(baseline);
    }

    /// Strip bank, for reading state
    pub fn strips(&self) -> &StripBank<O> {
        &self.strips
    }

    /// Strip bank, for manual control
    ///
    /// Manual changes share state with motion and touch handling: a strip
    /// switched on here is turned off by the countdown like any other
    /// motion-eligible strip.
    pub fn strips_mut(&mut self) -> &mut StripBank<O> {
        &mut self.strips
    }

    /// Motion countdown
    pub fn timer(&self) -> &MotionTimer {
        &self.timer
    }

    /// Touch detector
    pub fn touch(&self) -> &TouchDetector {
        &self.touch
    }

    /// Handle one event
    ///
    /// Control state is always updated, even when the strip write fails.
    pub fn dispatch(&mut self, event: Event) -> Result<Outcome, BusError> {
        match event {
            Event::MotionDetected => self.handle_motion(),
            Event::SecondTick { motion_active } => self.handle_second(motion_active),
            Event::TouchScan { filtered } => self.handle_scan(filtered),
        }
    }

    /// Motion edge: light eligible strips, restart the countdown
    fn handle_motion(&mut self) -> Result<Outcome, BusError> {
        self.timer.trigger();
        let eligible = self.strips.motion_enabled();
        self.strips.on(eligible)?;
        Ok(Outcome::MotionLit)
    }

    /// 1 Hz tick: advance the countdown
    fn handle_second(&mut self, motion_active: bool) -> Result<Outcome, BusError> {
        match self.timer.tick(motion_active) {
            TickOutcome::Rearmed => Ok(Outcome::TimerRearmed),
            TickOutcome::Counting(remaining) => Ok(Outcome::TimerCounting(remaining)),
            TickOutcome::Expired => {
                let eligible = self.strips.motion_enabled();
                self.strips.off(eligible)?;
                Ok(Outcome::TimerExpired)
            }
            TickOutcome::Idle => Ok(Outcome::Unchanged),
        }
    }

    /// Touch scan: debounce and switch the whole bank on commit
    ///
    /// Release turns off every strip, motion-lit ones included.
    fn handle_scan(&mut self, filtered: u16) -> Result<Outcome, BusError> {
        match self.touch.scan(filtered) {
            Some(TouchState::Touched) => {
                self.strips.set(StripMask::ALL)?;
                Ok(Outcome::Touched)
            }
            Some(TouchState::Released) => {
                self.strips.off(StripMask::ALL)?;
                Ok(Outcome::Released)
            }
            None => Ok(Outcome::Unchanged),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock output counting writes
    struct MockOutput {
        last: Option<u8>,
        writes: u32,
        fail: bool,
    }

    impl MockOutput {
        fn new() -> Self {
            Self {
                last: None,
                writes: 0,
                fail: false,
            }
        }
    }

    impl StripOutput for MockOutput {
        fn write(&mut self, state: u8) -> Result<(), BusError> {
            self.writes += 1;
            if self.fail {
                return Err(BusError::Timeout);
            }
            self.last = Some(state);
            Ok(())
        }
    }

    fn started() -> Controller<MockOutput> {
        let mut controller = Controller::new(MockOutput::new(), &ControllerConfig::default());
        controller.start().unwrap();
        controller.seed_baseline(500);
        controller
    }

    fn writes(controller: &Controller<MockOutput>) -> u32 {
        controller.strips().output().writes
    }

    #[test]
    fn test_start_writes_all_off() {
        let controller = started();
        assert_eq!(controller.strips().output().last, Some(0x00));
        assert_eq!(writes(&controller), 1);
        assert_eq!(controller.touch().baseline(), 500);
        assert_eq!(controller.timer().remaining(), 0);
    }

    #[test]
    fn test_motion_lights_eligible_strips() {
        let mut controller = started();
        controller.strips_mut().disable_motion(StripMask::from_bits(0xF0));
        controller.strips_mut().on(StripMask::from_bits(0x80)).unwrap();

        let outcome = controller.dispatch(Event::MotionDetected).unwrap();
        assert_eq!(outcome, Outcome::MotionLit);
        assert_eq!(controller.strips().state().bits(), 0x8F);
        assert_eq!(controller.timer().remaining(), 5);
    }

    #[test]
    fn test_motion_held_rearms_without_writing() {
        let mut controller = started();
        controller.dispatch(Event::MotionDetected).unwrap();
        let before = writes(&controller);

        for _ in 0..10 {
            let outcome = controller
                .dispatch(Event::SecondTick { motion_active: true })
                .unwrap();
            assert_eq!(outcome, Outcome::TimerRearmed);
            assert_eq!(controller.timer().remaining(), 5);
        }
        assert_eq!(writes(&controller), before);
    }

    #[test]
    fn test_countdown_turns_off_once() {
        let mut controller = started();
        controller.dispatch(Event::MotionDetected).unwrap();
        assert_eq!(controller.strips().state(), StripMask::ALL);
        let before = writes(&controller);

        let idle_tick = Event::SecondTick { motion_active: false };
        for remaining in (1..5).rev() {
            assert_eq!(
                controller.dispatch(idle_tick).unwrap(),
                Outcome::TimerCounting(remaining)
            );
            assert_eq!(controller.strips().state(), StripMask::ALL);
        }
        assert_eq!(writes(&controller), before);

        assert_eq!(controller.dispatch(idle_tick).unwrap(), Outcome::TimerExpired);
        assert_eq!(controller.strips().state(), StripMask::NONE);
        assert_eq!(writes(&controller), before + 1);

        for _ in 0..10 {
            assert_eq!(controller.dispatch(idle_tick).unwrap(), Outcome::Unchanged);
        }
        assert_eq!(writes(&controller), before + 1);
    }

    #[test]
    fn test_expiry_spares_ineligible_strips() {
        let mut controller = started();
        controller.strips_mut().set(StripMask::from_bits(0x03)).unwrap();
        controller.strips_mut().disable_motion(StripMask::from_bits(0x01));

        controller.dispatch(Event::MotionDetected).unwrap();
        for _ in 0..5 {
            controller
                .dispatch(Event::SecondTick { motion_active: false })
                .unwrap();
        }
        assert_eq!(controller.strips().state().bits(), 0x01);
    }

    #[test]
    fn test_ineligible_config_mask() {
        let mut config = ControllerConfig::default();
        config.motion.eligible = StripMask::from_bits(0x0F);
        let mut controller = Controller::new(MockOutput::new(), &config);
        controller.start().unwrap();
        controller.seed_baseline(500);

        assert_eq!(controller.strips().motion_enabled().bits(), 0x0F);
        controller.dispatch(Event::MotionDetected).unwrap();
        assert_eq!(controller.strips().state().bits(), 0x0F);
    }

    #[test]
    fn test_touch_end_to_end() {
        let mut controller = started();

        for _ in 0..4 {
            assert_eq!(
                controller.dispatch(Event::TouchScan { filtered: 530 }).unwrap(),
                Outcome::Unchanged
            );
        }
        assert_eq!(
            controller.dispatch(Event::TouchScan { filtered: 530 }).unwrap(),
            Outcome::Touched
        );
        assert_eq!(controller.strips().state(), StripMask::ALL);

        for _ in 0..4 {
            assert_eq!(
                controller.dispatch(Event::TouchScan { filtered: 500 }).unwrap(),
                Outcome::Unchanged
            );
        }
        assert_eq!(
            controller.dispatch(Event::TouchScan { filtered: 500 }).unwrap(),
            Outcome::Released
        );
        assert_eq!(controller.strips().state(), StripMask::NONE);
    }

    #[test]
    fn test_touch_release_clears_motion_lit_strips() {
        let mut controller = started();
        controller.strips_mut().disable_motion(StripMask::from_bits(0xF0));
        controller.dispatch(Event::MotionDetected).unwrap();
        assert_eq!(controller.strips().state().bits(), 0x0F);

        for _ in 0..5 {
            controller.dispatch(Event::TouchScan { filtered: 600 }).unwrap();
        }
        for _ in 0..5 {
            controller.dispatch(Event::TouchScan { filtered: 500 }).unwrap();
        }

        // Release clears everything, not just the touch-lit strips
        assert_eq!(controller.strips().state(), StripMask::NONE);
        // The countdown keeps running and expires without further effect
        assert!(controller.timer().is_armed());
    }

    #[test]
    fn test_bus_fault_still_arms_timer() {
        let mut faulty = Controller::new(
            MockOutput {
                fail: true,
                ..MockOutput::new()
            },
            &ControllerConfig::default(),
        );

        assert_eq!(faulty.dispatch(Event::MotionDetected), Err(BusError::Timeout));
        assert_eq!(faulty.timer().remaining(), 5);
        assert_eq!(faulty.strips().state(), StripMask::ALL);
    }

    #[test]
    fn test_start_precedes_baseline_seed() {
        let mut controller = Controller::new(MockOutput::new(), &ControllerConfig::default());
        controller.start().unwrap();

        // Outputs are dark before calibration, baseline not yet seeded
        assert_eq!(controller.strips().output().last, Some(0x00));
        assert_eq!(controller.touch().baseline(), 0);

        controller.seed_baseline(512);
        assert_eq!(controller.touch().baseline(), 512);
        // Seeding never writes
        assert_eq!(writes(&controller), 1);
    }
}
