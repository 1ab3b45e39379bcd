//! Event dispatcher task
//!
//! Handles events one at a time, each to completion, with the controller
//! locked for the duration. Strip write failures are logged and counted;
//! the controller state has already moved on, and the next write carries
//! the full state again.

use defmt::*;

use booknook_core::{Event, Outcome};

use crate::channels::{record_fault, BUS_FAULTS, CONTROLLER, EVENT_CHANNEL};

/// Dispatcher task - feeds events to the controller
#[embassy_executor::task]
pub async fn dispatcher_task() {
    info!("Dispatcher task started");

    loop {
        let event = EVENT_CHANNEL.receive().await;

        let result = CONTROLLER.with(|controller| {
            let outcome = controller.dispatch(event);
            (outcome, controller.strips().state().bits())
        });

        match result {
            Some((Ok(outcome), state)) => log_outcome(event, outcome, state),
            Some((Err(e), state)) => {
                let total = record_fault(&BUS_FAULTS);
                warn!(
                    "Strip write failed on {:?}: {:?} (state {=u8:#x}, {} total)",
                    event, e, state, total
                );
            }
            None => warn!("Event {:?} before controller start, dropped", event),
        }
    }
}

fn log_outcome(event: Event, outcome: Outcome, state: u8) {
    if outcome.wrote_output() {
        debug!("Strips now {=u8:#x}", state);
    }

    match outcome {
        Outcome::MotionLit => info!("Motion: eligible strips on"),
        Outcome::TimerExpired => info!("No motion, eligible strips off"),
        Outcome::Touched => info!("Touch: all strips on"),
        Outcome::Released => info!("Release: all strips off"),
        Outcome::TimerCounting(remaining) => debug!("Motion timeout in {}s", remaining),
        Outcome::TimerRearmed => trace!("Motion held"),
        // Most scans change nothing
        Outcome::Unchanged if event.is_touch_event() => {}
        Outcome::Unchanged => trace!("Timer idle"),
    }
}
