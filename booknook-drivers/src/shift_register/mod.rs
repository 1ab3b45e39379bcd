//! 74HC595 shift-register strip outputs
//!
//! Both drivers shift the state byte MSB-first with the latch held low,
//! then pulse the latch high-then-low so the byte appears on all outputs
//! at once.

pub mod bitbang;
pub mod serial;

pub use bitbang::BitBangShiftRegister;
pub use serial::{SerialShiftRegister, DEFAULT_SPIN_LIMIT};
