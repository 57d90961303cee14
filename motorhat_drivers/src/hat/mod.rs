// Implements the board controller: owns the single PWM chip instance, the
// pacing delay and the per-stepper sequencer state, and hands out validated
// motor handles over the fixed wiring tables.

// Licensed under the Apache License, Version 2.0

pub mod dc_motor;
pub mod stepper;

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use motorhat_algo::stepping::{timing, StepSequencer};

use crate::errors::Error;
use crate::pinout;
use crate::pwm::{Pca9685, DEFAULT_ADDR, DEFAULT_FREQ_HZ, PERIOD_TICKS};

pub use dc_motor::{DcCommand, DcMotor};
pub use stepper::Stepper;

/// Stepping state kept on the controller, so stepper handles are plain
/// borrows and phase survives across them.
pub(crate) struct StepperState {
    seq: StepSequencer,
    steps_per_rev: u16,
    interval: Duration,
}

impl StepperState {
    const fn new() -> Self {
        StepperState {
            seq: StepSequencer::new(),
            steps_per_rev: timing::DEFAULT_STEPS_PER_REV,
            interval: timing::DEFAULT_STEP_INTERVAL,
        }
    }
}

/// The motor HAT controller. Owns the board's one PWM chip and delay
/// provider; motor handles borrow it mutably, so two motors can never talk
/// over each other on the bus.
pub struct MotorHat<I2C, D> {
    pwm: Pca9685<I2C>,
    delay: D,
    steppers: [StepperState; 2],
}

impl<I2C: I2c, D: DelayNs> MotorHat<I2C, D> {
    /// Brings up the board at the default address and output frequency.
    pub fn new(i2c: I2C, delay: D) -> Result<Self, Error<I2C::Error>> {
        Self::with_config(i2c, delay, DEFAULT_ADDR, DEFAULT_FREQ_HZ)
    }

    /// Brings up the board: wakes the PWM chip and programs the output
    /// frequency. Configuration is fixed from here on.
    pub fn with_config(
        i2c: I2C,
        mut delay: D,
        addr: u8,
        freq_hz: u16,
    ) -> Result<Self, Error<I2C::Error>> {
        let mut pwm = Pca9685::new(i2c, addr);
        pwm.init(&mut delay)?;
        pwm.set_frequency(freq_hz, &mut delay)?;
        Ok(MotorHat {
            pwm,
            delay,
            steppers: [StepperState::new(), StepperState::new()],
        })
    }

    /// Drives a channel as a digital output by degenerating its PWM window:
    /// value 1 is on from tick 0 and never off, value 0 never turns on.
    pub fn set_pin(&mut self, pin: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        match value {
            0 => self.pwm.set_channel(pin, 0, PERIOD_TICKS),
            1 => self.pwm.set_channel(pin, PERIOD_TICKS, 0),
            _ => Err(Error::InvalidPinValue(value)),
        }
    }

    /// Stepper accessor, `num` in {1, 2}.
    pub fn stepper(&mut self, num: u8) -> Result<Stepper<'_, I2C, D>, Error<I2C::Error>> {
        match num {
            1 | 2 => Ok(Stepper::new(self, num as usize - 1)),
            _ => Err(Error::InvalidStepper(num)),
        }
    }

    /// DC motor accessor, `num` in {1, 2, 3, 4}.
    pub fn dc_motor(&mut self, num: u8) -> Result<DcMotor<'_, I2C, D>, Error<I2C::Error>> {
        match num {
            1..=4 => Ok(DcMotor::new(self, pinout::MOTORS[num as usize - 1])),
            _ => Err(Error::InvalidMotor(num)),
        }
    }

    /// Raw access to the PWM chip, for channels not wired to a motor port.
    pub fn pwm(&mut self) -> &mut Pca9685<I2C> {
        &mut self.pwm
    }

    /// Tears the controller down and returns the bus and delay providers.
    pub fn release(self) -> (I2C, D) {
        (self.pwm.release(), self.delay)
    }
}
