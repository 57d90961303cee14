use thiserror::Error;

/// Driver errors. `E` is the error type of the underlying bus.
///
/// Everything here is surfaced synchronously to the caller; bus failures
/// propagate as-is and are never retried or masked.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    #[error("Bus transfer failed")]
    I2c(E),
    #[error("MotorHAT stepper must be between 1 and 2 inclusive. Received: {0}")]
    InvalidStepper(u8),
    #[error("MotorHAT motor must be between 1 and 4 inclusive. Received: {0}")]
    InvalidMotor(u8),
    #[error("PWM channel must be between 0 and 15 inclusive. Received: {0}")]
    InvalidChannel(u8),
    #[error("Pin value must be 0 or 1. Received: {0}")]
    InvalidPinValue(u8),
    #[error("Duty-cycle ticks must be at most 4096. Received: {0}")]
    InvalidTicks(u16),
    #[error("Output frequency must be non-zero")]
    InvalidFrequency,
    #[error("Speed must be a positive rpm")]
    InvalidSpeed,
}
