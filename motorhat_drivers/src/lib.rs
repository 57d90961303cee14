//! Register-bus drivers for a 16-channel PWM motor HAT: the PCA9685 channel
//! driver, the digital-pin emulation layered on top of it, and the
//! controller owning the board's DC motor and stepper wiring.
//!
//! The stepping engine itself lives in `motorhat_algo`; this crate dispatches
//! the drive frames it computes onto the bus and paces them.

#![no_std]

pub mod errors;
pub mod hat;
pub mod pinout;
pub mod pwm;

pub use errors::Error;
pub use hat::{DcCommand, DcMotor, MotorHat, Stepper};
pub use motorhat_algo::stepping::Direction;
pub use pwm::{Pca9685, DEFAULT_ADDR, DEFAULT_FREQ_HZ};
