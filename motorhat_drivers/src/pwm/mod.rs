// Implements the PCA9685 16-channel PWM driver over the register bus:
// oscillator wake-up, output frequency configuration and per-channel
// duty-cycle windows.

// Licensed under the Apache License, Version 2.0

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::debug;

use crate::errors::Error;

/// Default bus address of the motor HAT flavor of the chip.
pub const DEFAULT_ADDR: u8 = 0x60;

/// Default output frequency, fast enough for clean H-bridge drive.
pub const DEFAULT_FREQ_HZ: u16 = 1600;

/// Ticks in one PWM period (12-bit counter). A duty window edge of exactly
/// this value sets the channel's full-on/full-off bit.
pub const PERIOD_TICKS: u16 = 4096;

/// Internal oscillator frequency the prescaler divides down from.
const OSC_HZ: u32 = 25_000_000;

/// Register addresses
mod reg {
    pub const MODE1: u8 = 0x00;
    pub const MODE2: u8 = 0x01;
    pub const PRESCALE: u8 = 0xFE;
    pub const LED0_ON_L: u8 = 0x06;
    pub const ALL_LED_ON_L: u8 = 0xFA;
    pub const ALL_LED_ON_H: u8 = 0xFB;
    pub const ALL_LED_OFF_L: u8 = 0xFC;
    pub const ALL_LED_OFF_H: u8 = 0xFD;
}

/// Mode register bits
mod bits {
    pub const RESTART: u8 = 0x80;
    pub const SLEEP: u8 = 0x10;
    pub const ALLCALL: u8 = 0x01;
    pub const OUTDRV: u8 = 0x04;
}

/// PCA9685 handle. Owns the bus; every write goes through [`Self::write_reg`]
/// and any bus failure propagates to the caller untouched.
pub struct Pca9685<I2C> {
    i2c: I2C,
    addr: u8,
}

impl<I2C: I2c> Pca9685<I2C> {
    /// Creates a driver for the chip at `addr`. No bus traffic until
    /// [`Self::init`].
    pub fn new(i2c: I2C, addr: u8) -> Self {
        Pca9685 { i2c, addr }
    }

    /// Sends the SWRST general call, resetting every driver chip on the bus.
    pub fn software_reset(i2c: &mut I2C) -> Result<(), Error<I2C::Error>> {
        i2c.write(0x00, &[0x06]).map_err(Error::I2c)
    }

    /// Brings the chip out of sleep: all channels off, totem-pole outputs,
    /// all-call addressing, then wakes the oscillator. The 5 ms pauses let
    /// the oscillator settle.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I2C::Error>> {
        self.set_all_channels(0, 0)?;
        self.write_reg(reg::MODE2, bits::OUTDRV)?;
        self.write_reg(reg::MODE1, bits::ALLCALL)?;
        delay.delay_ms(5);

        let mode1 = self.read_reg(reg::MODE1)?;
        self.write_reg(reg::MODE1, mode1 & !bits::SLEEP)?;
        delay.delay_ms(5);
        Ok(())
    }

    /// Sets the PWM output frequency for all 16 channels.
    ///
    /// The chip must sleep while the prescaler is written; the previous mode
    /// is restored afterwards and the outputs restarted.
    pub fn set_frequency<D: DelayNs>(
        &mut self,
        freq_hz: u16,
        delay: &mut D,
    ) -> Result<(), Error<I2C::Error>> {
        if freq_hz == 0 {
            return Err(Error::InvalidFrequency);
        }
        // prescale = round(OSC / (4096 * freq)) - 1, in integer arithmetic.
        // The ratio is always above -0.5, so the truncating division never
        // goes negative; the register itself is 8-bit.
        let denom = 2 * PERIOD_TICKS as i64 * freq_hz as i64;
        let prescale = ((2 * OSC_HZ as i64 - denom / 2) / denom).min(0xFF) as u8;
        debug!("pwm frequency {} Hz, prescale {}", freq_hz, prescale);

        let oldmode = self.read_reg(reg::MODE1)?;
        self.write_reg(reg::MODE1, (oldmode & 0x7F) | bits::SLEEP)?;
        self.write_reg(reg::PRESCALE, prescale)?;
        self.write_reg(reg::MODE1, oldmode)?;
        delay.delay_ms(5);
        self.write_reg(reg::MODE1, oldmode | bits::RESTART)
    }

    /// Programs one channel's duty-cycle window.
    ///
    /// # Arguments
    /// * `channel` - Channel number, 0 to 15 inclusive
    /// * `on` - Tick the signal turns on, 0 to 4096
    /// * `off` - Tick the signal turns off, 0 to 4096
    pub fn set_channel(&mut self, channel: u8, on: u16, off: u16) -> Result<(), Error<I2C::Error>> {
        if channel > 15 {
            return Err(Error::InvalidChannel(channel));
        }
        if on > PERIOD_TICKS {
            return Err(Error::InvalidTicks(on));
        }
        if off > PERIOD_TICKS {
            return Err(Error::InvalidTicks(off));
        }
        let base = reg::LED0_ON_L + 4 * channel;
        self.write_reg(base, (on & 0xFF) as u8)?;
        self.write_reg(base + 1, (on >> 8) as u8)?;
        self.write_reg(base + 2, (off & 0xFF) as u8)?;
        self.write_reg(base + 3, (off >> 8) as u8)
    }

    /// Programs every channel's duty-cycle window at once.
    pub fn set_all_channels(&mut self, on: u16, off: u16) -> Result<(), Error<I2C::Error>> {
        if on > PERIOD_TICKS {
            return Err(Error::InvalidTicks(on));
        }
        if off > PERIOD_TICKS {
            return Err(Error::InvalidTicks(off));
        }
        self.write_reg(reg::ALL_LED_ON_L, (on & 0xFF) as u8)?;
        self.write_reg(reg::ALL_LED_ON_H, (on >> 8) as u8)?;
        self.write_reg(reg::ALL_LED_OFF_L, (off & 0xFF) as u8)?;
        self.write_reg(reg::ALL_LED_OFF_H, (off >> 8) as u8)
    }

    /// Releases the bus handle.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_reg(&mut self, register: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.addr, &[register, value])
            .map_err(Error::I2c)
    }

    fn read_reg(&mut self, register: u8) -> Result<u8, Error<I2C::Error>> {
        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.addr, &[register], &mut buf)
            .map_err(Error::I2c)?;
        Ok(buf[0])
    }
}
