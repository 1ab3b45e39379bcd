//! Motion sensor and 1 Hz tick task
//!
//! Owns the motion input so the edge and the level read at each tick come
//! from the same pin. Also blinks the status LED and emits the heartbeat
//! trace once per second.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker};

use booknook_core::Event;
use booknook_hal_rp2040::{MotionInput, OutputLine, OutputPin};

use crate::channels::{faults, BUS_FAULTS, EVENT_CHANNEL, SAMPLE_FAULTS};

/// Countdown tick interval
const SECOND_TICK: Duration = Duration::from_secs(1);

/// Motion task - forwards motion edges and the 1 Hz tick
#[embassy_executor::task]
pub async fn motion_task(mut motion: MotionInput<'static>, mut status_led: OutputLine<'static>) {
    info!("Motion task started");

    let mut ticker = Ticker::every(SECOND_TICK);

    loop {
        let woke = select(motion.wait_for_assert(), ticker.next()).await;

        match woke {
            Either::First(()) => {
                debug!("Motion edge");
                EVENT_CHANNEL.send(Event::MotionDetected).await;
            }
            Either::Second(()) => {
                status_led.toggle();

                let motion_active = motion.is_asserted();
                EVENT_CHANNEL
                    .send(Event::SecondTick { motion_active })
                    .await;

                trace!(
                    "Heartbeat: motion={}, bus faults={}, sample faults={}",
                    motion_active,
                    faults(&BUS_FAULTS),
                    faults(&SAMPLE_FAULTS)
                );
            }
        }
    }
}
