//! Capacitive touch detection
//!
//! [`sampler`] turns raw charge-and-measure readings into one filtered
//! value per scan; [`detector`] classifies, debounces and tracks the
//! untouched baseline.

pub mod detector;
pub mod sampler;

pub use detector::{TouchDetector, TouchState};
pub use sampler::{acquire, calibrate};
