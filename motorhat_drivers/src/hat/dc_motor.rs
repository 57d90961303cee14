//! DC motor control: direction via the H-bridge input pins, speed via the
//! port's duty channel.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::errors::Error;
use crate::pinout::MotorPins;

use super::MotorHat;

/// Drive command for a DC motor port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DcCommand {
    Forward,
    Backward,
    /// Both bridge inputs low; the motor coasts.
    Release,
}

/// Handle on one of the four DC motor ports.
pub struct DcMotor<'a, I2C, D> {
    hat: &'a mut MotorHat<I2C, D>,
    pins: MotorPins,
}

impl<'a, I2C: I2c, D: DelayNs> DcMotor<'a, I2C, D> {
    pub(crate) fn new(hat: &'a mut MotorHat<I2C, D>, pins: MotorPins) -> Self {
        DcMotor { hat, pins }
    }

    /// Sets the direction pins. The pin being cleared is written before the
    /// one being set; both bridge inputs are never high at once.
    pub fn run(&mut self, command: DcCommand) -> Result<(), Error<I2C::Error>> {
        let pins = self.pins;
        match command {
            DcCommand::Forward => {
                self.hat.set_pin(pins.in2, 0)?;
                self.hat.set_pin(pins.in1, 1)
            }
            DcCommand::Backward => {
                self.hat.set_pin(pins.in1, 0)?;
                self.hat.set_pin(pins.in2, 1)
            }
            DcCommand::Release => {
                self.hat.set_pin(pins.in1, 0)?;
                self.hat.set_pin(pins.in2, 0)
            }
        }
    }

    /// Sets the duty scale of the port. The `u8` range is the full scale;
    /// 255 maps to a 4080-tick window.
    pub fn set_speed(&mut self, speed: u8) -> Result<(), Error<I2C::Error>> {
        self.hat
            .pwm
            .set_channel(self.pins.pwm, 0, speed as u16 * 16)
    }
}
