//! Motion auto-off
//!
//! Countdown driven by the 1 Hz tick and the live level of the motion
//! sensor. The strips themselves are switched by the controller.

pub mod timer;

pub use timer::{MotionTimer, TickOutcome};
