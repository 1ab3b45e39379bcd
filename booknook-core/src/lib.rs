//! Board-agnostic control logic for the Book Nook LED controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (strip output, touch sensor)
//! - Strip bank state (on/off mask and motion eligibility)
//! - Motion auto-off countdown
//! - Capacitive touch detection with adaptive baseline
//! - Controller dispatching hardware events to the above
//! - Critical-section guard for state shared with event handlers
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod motion;
pub mod shared;
pub mod state;
pub mod strips;
pub mod touch;
pub mod traits;

pub use config::{ControllerConfig, MotionConfig, TouchConfig};
pub use state::{Controller, Event, Outcome};
pub use strips::{StripBank, StripMask};
