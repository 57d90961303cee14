//! Stepping engine for 16-channel PWM motor HAT boards.

#![no_std]

pub mod stepping;

pub use stepping::{CoilDrive, Direction, StepSequencer, CYCLE_STEPS, MICROSTEPS};
