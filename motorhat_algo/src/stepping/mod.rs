// Implements the stepper phase sequencer, advancing the electrical phase
// position and computing a coil drive frame for every stepping cadence.

// Key Features:
// - Maintains the phase position within one electrical cycle at microstep
//   resolution, wrapping modulo 4 * MICROSTEPS
// - Provides the four stepping cadences: single, double, interleaved, micro
// - Computes which coils energize and at what drive strength per step
// - Performs no I/O; the drive frames it returns are applied by the bus layer

// Detailed Operation:
// The StepSequencer struct tracks the phase position and the two coil drive
// strengths. Each cadence method advances the phase by its own rule and then
// runs the coil-energize step, which selects the active coils either from the
// 8-entry whole-step table or from the per-quadrant pairing used while
// microstepping. The resulting CoilDrive carries everything the hardware
// layer needs to program the two PWM channels and the four direction pins.

// Licensed under the Apache License, Version 2.0

pub mod curve;
pub mod timing;

/// Microsteps per whole step. The curve table length is tied to this value.
pub const MICROSTEPS: u16 = 8;

/// Phase positions in one full electrical cycle (four whole steps).
pub const CYCLE_STEPS: u16 = MICROSTEPS * 4;

/// Half of a whole step, the grain of the single/double cadence parity test.
const HALF_STEP: u16 = MICROSTEPS / 2;

/// Full drive strength applied outside of microstepping.
const FULL_DRIVE: u8 = 255;

/// Coil-enable rows for whole-step boundaries, indexed by
/// `phase / (MICROSTEPS / 2)`. Columns are in pin order AIN2, BIN1, AIN1,
/// BIN2. Single-coil rows alternate with two-coil overlap rows; exactly two
/// adjacent coils are active at the four half positions.
const STEP_COILS: [[u8; 4]; 8] = [
    [1, 0, 0, 0],
    [1, 1, 0, 0],
    [0, 1, 0, 0],
    [0, 1, 1, 0],
    [0, 0, 1, 0],
    [0, 0, 1, 1],
    [0, 0, 0, 1],
    [1, 0, 0, 1],
];

/// Coil pairs active per 90-degree quadrant while microstepping, indexed by
/// `phase / MICROSTEPS`. Same column order as [`STEP_COILS`].
const MICRO_COILS: [[u8; 4]; 4] = [
    [1, 1, 0, 0],
    [0, 1, 1, 0],
    [0, 0, 1, 1],
    [1, 0, 0, 1],
];

/// Stepping direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Applies the direction sign to a phase delta.
    #[inline(always)]
    const fn signed(self, delta: i32) -> i32 {
        match self {
            Direction::Forward => delta,
            Direction::Backward => -delta,
        }
    }
}

/// One step's worth of output: the duty scale for both coil channels, the
/// four coil-enable signals (pin order AIN2, BIN1, AIN1, BIN2) and the phase
/// position the step landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoilDrive {
    pub duty_a: u8,
    pub duty_b: u8,
    pub coils: [u8; 4],
    pub step: u16,
}

/// Per-motor stepping state machine.
pub struct StepSequencer {
    /// Phase position, always within `[0, CYCLE_STEPS)`
    step: u16,
    /// Drive strength of coil channel A
    duty_a: u8,
    /// Drive strength of coil channel B
    duty_b: u8,
}

impl StepSequencer {
    /// Creates a sequencer at phase zero with full drive strength.
    pub const fn new() -> Self {
        StepSequencer {
            step: 0,
            duty_a: FULL_DRIVE,
            duty_b: FULL_DRIVE,
        }
    }

    /// Current phase position within the electrical cycle.
    #[inline(always)]
    pub fn position(&self) -> u16 {
        self.step
    }

    /// True when the phase sits on a whole-step reference boundary (0 or
    /// MICROSTEPS), the precondition the whole-step cadences assume.
    #[inline(always)]
    pub fn is_aligned(&self) -> bool {
        self.step == 0 || self.step == MICROSTEPS
    }

    /// Single whole-stepping. Odd half-step boundaries advance by a half
    /// step to restore parity, even boundaries jump a whole step. Keeps the
    /// classic 4-step full-drive cycle.
    pub fn single_step(&mut self, direction: Direction) -> CoilDrive {
        self.full_strength();
        let delta = if (self.step / HALF_STEP) % 2 == 1 {
            HALF_STEP
        } else {
            MICROSTEPS
        };
        self.advance(direction.signed(delta as i32));
        self.energize(false)
    }

    /// Double stepping, two coils always energized. Same cadence as
    /// [`Self::single_step`] with the parity test inverted, which lands on
    /// the overlap rows of the coil table (a 45-degree phase shift).
    pub fn double_step(&mut self, direction: Direction) -> CoilDrive {
        self.full_strength();
        let delta = if (self.step / HALF_STEP) % 2 == 0 {
            HALF_STEP
        } else {
            MICROSTEPS
        };
        self.advance(direction.signed(delta as i32));
        self.energize(false)
    }

    /// Interleaved stepping: a fixed half-step advance, alternating between
    /// single and double coil rows by phase parity alone. Twice the angular
    /// resolution of whole-stepping at full drive strength.
    pub fn interleave_step(&mut self, direction: Direction) -> CoilDrive {
        self.full_strength();
        self.advance(direction.signed(HALF_STEP as i32));
        self.energize(false)
    }

    /// One microstep: the phase moves by exactly one position and the coil
    /// drive strengths are interpolated from the quarter-wave curve, so
    /// torque hands over smoothly between the two coil channels.
    pub fn micro_step(&mut self, direction: Direction) -> CoilDrive {
        self.advance(direction.signed(1));
        let (duty_a, duty_b) = curve::interpolate(self.step);
        self.duty_a = duty_a;
        self.duty_b = duty_b;
        self.energize(true)
    }

    /// Advances the phase position, wrapping into `[0, CYCLE_STEPS)`.
    #[inline(always)]
    fn advance(&mut self, delta: i32) {
        self.step = (self.step as i32 + delta).rem_euclid(CYCLE_STEPS as i32) as u16;
    }

    #[inline(always)]
    fn full_strength(&mut self) {
        self.duty_a = FULL_DRIVE;
        self.duty_b = FULL_DRIVE;
    }

    /// Coil-energize step: selects the active coils for the current phase,
    /// either from the whole-step table or by quadrant pairing while
    /// microstepping, and snapshots the drive frame.
    fn energize(&self, microstep: bool) -> CoilDrive {
        let coils = if microstep {
            MICRO_COILS[(self.step / MICROSTEPS) as usize]
        } else {
            STEP_COILS[(self.step / HALF_STEP) as usize]
        };
        CoilDrive {
            duty_a: self.duty_a,
            duty_b: self.duty_b,
            coils,
            step: self.step,
        }
    }
}

impl Default for StepSequencer {
    fn default() -> Self {
        Self::new()
    }
}
