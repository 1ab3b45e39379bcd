//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod output;
pub mod sensor;

pub use output::{BusError, StripOutput};
pub use sensor::{SensorError, TouchSensor};
