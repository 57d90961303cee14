//! Channel wiring tables for the motor HAT: which of the 16 PWM channels
//! feed each H-bridge. Fixed by the board layout; the controller hands these
//! records to the motor handles at accessor time.

/// Channel assignment for one stepper's pair of H-bridges.
#[derive(Debug, Clone, Copy)]
pub struct StepperPins {
    /// Duty channel of coil A
    pub pwm_a: u8,
    pub ain2: u8,
    pub ain1: u8,
    /// Duty channel of coil B
    pub pwm_b: u8,
    pub bin2: u8,
    pub bin1: u8,
}

/// Channel assignment for one DC motor's H-bridge.
#[derive(Debug, Clone, Copy)]
pub struct MotorPins {
    pub pwm: u8,
    pub in1: u8,
    pub in2: u8,
}

/// Stepper port M1/M2
pub const STEPPER1: StepperPins = StepperPins {
    pwm_a: 8,
    ain2: 9,
    ain1: 10,
    pwm_b: 13,
    bin2: 12,
    bin1: 11,
};

/// Stepper port M3/M4
pub const STEPPER2: StepperPins = StepperPins {
    pwm_a: 2,
    ain2: 3,
    ain1: 4,
    pwm_b: 7,
    bin2: 6,
    bin1: 5,
};

/// DC motor port M1
pub const MOTOR1: MotorPins = MotorPins { pwm: 8, in1: 10, in2: 9 };

/// DC motor port M2
pub const MOTOR2: MotorPins = MotorPins { pwm: 13, in1: 11, in2: 12 };

/// DC motor port M3
pub const MOTOR3: MotorPins = MotorPins { pwm: 2, in1: 4, in2: 3 };

/// DC motor port M4
pub const MOTOR4: MotorPins = MotorPins { pwm: 7, in1: 5, in2: 6 };

/// Stepper wiring by zero-based index.
pub const STEPPERS: [StepperPins; 2] = [STEPPER1, STEPPER2];

/// DC motor wiring by zero-based index. Each DC motor shares its channels
/// with one coil of the overlapping stepper port.
pub const MOTORS: [MotorPins; 4] = [MOTOR1, MOTOR2, MOTOR3, MOTOR4];
