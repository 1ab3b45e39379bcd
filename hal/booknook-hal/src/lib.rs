//! Book Nook Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. The control logic and drivers only ever talk to
//! the hardware through these traits, so they build and test on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (booknook-firmware)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  booknook-drivers / booknook-core       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  booknook-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ booknook-hal- │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Push-pull output
//! - [`gpio::ChargeLine`] - Touch pad line that can be driven or floated
//! - [`analog::AnalogInput`] - Single-shot analog sampling
//! - [`serial::SerialBus`] - Poll-style byte-wide serial peripheral

#![no_std]
#![deny(unsafe_code)]

pub mod analog;
pub mod gpio;
pub mod serial;

// Re-export key traits at crate root for convenience
pub use analog::{AnalogInput, SampleError};
pub use gpio::{ChargeLine, OutputPin};
pub use serial::SerialBus;
