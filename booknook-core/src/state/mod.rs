//! Event dispatch
//!
//! The controller owns every piece of mutable control state and reacts
//! to one hardware event at a time.

pub mod controller;
pub mod events;

pub use controller::Controller;
pub use events::{Event, Outcome};
