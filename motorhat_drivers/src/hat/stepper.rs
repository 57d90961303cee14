// Blocking stepper front-end: runs the sequencer one physical step at a
// time, dispatches each drive frame onto the PWM chip and paces the motion.

// Licensed under the Apache License, Version 2.0

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use motorhat_algo::stepping::{timing, CoilDrive, Direction, MICROSTEPS};

use crate::errors::Error;
use crate::pinout::{self, StepperPins};

use super::MotorHat;

/// Handle on one of the two stepper ports. Holds the controller mutably for
/// its whole lifetime; every stepping call blocks until the motion is done.
///
/// Step counts are unsigned, so a zero count is zero physical steps; motion
/// direction is chosen by [`Direction`], not by a negative count.
pub struct Stepper<'a, I2C, D> {
    hat: &'a mut MotorHat<I2C, D>,
    index: usize,
    pins: StepperPins,
}

impl<'a, I2C: I2c, D: DelayNs> Stepper<'a, I2C, D> {
    pub(crate) fn new(hat: &'a mut MotorHat<I2C, D>, index: usize) -> Self {
        let pins = pinout::STEPPERS[index];
        Stepper { hat, index, pins }
    }

    /// Current phase position within the electrical cycle, for diagnostics.
    pub fn position(&self) -> u16 {
        self.hat.steppers[self.index].seq.position()
    }

    /// Sets the target speed. The step delay is derived from the configured
    /// steps per revolution; the phase position is untouched.
    pub fn set_speed(&mut self, rpm: f32) -> Result<(), Error<I2C::Error>> {
        let state = &mut self.hat.steppers[self.index];
        state.interval =
            timing::step_interval(state.steps_per_rev, rpm).ok_or(Error::InvalidSpeed)?;
        Ok(())
    }

    /// Reconfigures the motor's steps per revolution. Takes effect on the
    /// next [`Self::set_speed`] call.
    pub fn set_steps_per_rev(&mut self, steps: u16) {
        self.hat.steppers[self.index].steps_per_rev = steps;
    }

    /// Single whole-stepping, `count` steps. Returns the final phase.
    pub fn step(&mut self, count: u32, direction: Direction) -> Result<u16, Error<I2C::Error>> {
        let pace = self.hat.steppers[self.index].interval;
        for _ in 0..count {
            let drive = self.hat.steppers[self.index].seq.single_step(direction);
            self.dispatch(drive, pace)?;
        }
        Ok(self.position())
    }

    /// Double stepping, two coils always energized. Returns the final phase.
    pub fn double_step(
        &mut self,
        count: u32,
        direction: Direction,
    ) -> Result<u16, Error<I2C::Error>> {
        let pace = self.hat.steppers[self.index].interval;
        for _ in 0..count {
            let drive = self.hat.steppers[self.index].seq.double_step(direction);
            self.dispatch(drive, pace)?;
        }
        Ok(self.position())
    }

    /// Interleaved stepping at twice the whole-step resolution and half the
    /// dwell. Returns the final phase.
    pub fn interleaved_step(
        &mut self,
        count: u32,
        direction: Direction,
    ) -> Result<u16, Error<I2C::Error>> {
        let pace = timing::interleave_interval(self.hat.steppers[self.index].interval);
        for _ in 0..count {
            let drive = self.hat.steppers[self.index].seq.interleave_step(direction);
            self.dispatch(drive, pace)?;
        }
        Ok(self.position())
    }

    /// Microstepping: `count` whole steps executed as `count * MICROSTEPS`
    /// curve-interpolated moves. Returns the final phase.
    pub fn micro_step(
        &mut self,
        count: u32,
        direction: Direction,
    ) -> Result<u16, Error<I2C::Error>> {
        let pace = timing::micro_interval(self.hat.steppers[self.index].interval);
        for _ in 0..count.saturating_mul(MICROSTEPS as u32) {
            let drive = self.hat.steppers[self.index].seq.micro_step(direction);
            self.dispatch(drive, pace)?;
        }
        Ok(self.position())
    }

    /// Microsteps one move at a time until the phase sits on a whole-step
    /// reference boundary. Brings the mechanism to a known position before
    /// switching stepping modes; a no-op when already aligned.
    pub fn align_step(&mut self, direction: Direction) -> Result<u16, Error<I2C::Error>> {
        let pace = timing::micro_interval(self.hat.steppers[self.index].interval);
        while !self.hat.steppers[self.index].seq.is_aligned() {
            let drive = self.hat.steppers[self.index].seq.micro_step(direction);
            self.dispatch(drive, pace)?;
        }
        Ok(self.position())
    }

    /// Applies one drive frame: duty channels first (drive strength scaled
    /// from 0-255 to the 0-4095 tick range), then the four direction pins,
    /// then the pacing dwell.
    fn dispatch(&mut self, drive: CoilDrive, pace: Duration) -> Result<(), Error<I2C::Error>> {
        let pins = self.pins;
        self.hat
            .pwm
            .set_channel(pins.pwm_a, 0, drive.duty_a as u16 * 16)?;
        self.hat
            .pwm
            .set_channel(pins.pwm_b, 0, drive.duty_b as u16 * 16)?;

        self.hat.set_pin(pins.ain2, drive.coils[0])?;
        self.hat.set_pin(pins.bin1, drive.coils[1])?;
        self.hat.set_pin(pins.ain1, drive.coils[2])?;
        self.hat.set_pin(pins.bin2, drive.coils[3])?;

        self.hat.delay.delay_us(pace.as_micros() as u32);
        Ok(())
    }
}
