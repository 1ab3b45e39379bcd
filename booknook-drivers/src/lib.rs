//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in booknook-core, built on the booknook-hal pin and bus traits:
//!
//! - Shift-register strip output (bit-banged, serial peripheral)
//! - Charge-transfer capacitive touch sensor

#![no_std]
#![deny(unsafe_code)]

pub mod sensor;
pub mod shift_register;
