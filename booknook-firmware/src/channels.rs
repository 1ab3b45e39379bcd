//! Inter-task communication and shared controller state
//!
//! Producer tasks turn hardware activity into [`Event`]s on
//! [`EVENT_CHANNEL`]; the dispatcher task is its only consumer.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use portable_atomic::{AtomicU32, Ordering};

use booknook_core::shared::Shared;
use booknook_core::{Controller, Event};

use crate::StripDriver;

/// Channel capacity for controller events
///
/// Producers wait on a full channel, so a stalled dispatcher slows the
/// scan and motion tasks down instead of dropping events.
const EVENT_CHANNEL_SIZE: usize = 16;

/// Events for the dispatcher
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, Event, EVENT_CHANNEL_SIZE> =
    Channel::new();

/// The controller, installed by `main` once calibration is done
pub static CONTROLLER: Shared<Option<Controller<StripDriver>>> = Shared::new(None);

/// Strip writes that failed since boot
pub static BUS_FAULTS: AtomicU32 = AtomicU32::new(0);

/// Touch scans abandoned because of a failed reading
pub static SAMPLE_FAULTS: AtomicU32 = AtomicU32::new(0);

/// Count one fault, returning the new total
pub fn record_fault(counter: &AtomicU32) -> u32 {
    counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
}

/// Current value of a fault counter
pub fn faults(counter: &AtomicU32) -> u32 {
    counter.load(Ordering::Relaxed)
}
