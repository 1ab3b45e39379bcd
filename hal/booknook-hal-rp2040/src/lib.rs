//! RP2040-specific HAL for the Book Nook firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `booknook-hal` traits on top of `embassy-rp`:
//!
//! - Push-pull outputs for the shift register and status LED
//! - Motion sensor input with edge waiting
//! - Touch pad charge line (output / high impedance)
//! - Blocking ADC channel for touch readings

#![no_std]

pub mod adc;
pub mod gpio;

pub use adc::AdcInput;
pub use gpio::{FlexChargeLine, MotionInput, OutputLine};

// Re-export shared traits from booknook-hal for convenience
pub use booknook_hal::{AnalogInput, ChargeLine, OutputPin};
