//! Touch sensor implementations

pub mod charge;

pub use charge::{ChargeTransferSensor, DEFAULT_SETTLE_US};
