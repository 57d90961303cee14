//! Step pace bookkeeping: converts a requested motor speed into the blocking
//! delay between physical steps.

use core::time::Duration;

use super::MICROSTEPS;

/// Steps per revolution of the common 1.8-degree stepper.
pub const DEFAULT_STEPS_PER_REV: u16 = 200;

/// Pace applied before any speed has been requested.
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(100);

/// Computes the whole-step interval for a target speed.
///
/// # Arguments
/// * `steps_per_rev` - Motor steps corresponding to one full rotation
/// * `rpm` - Target speed in revolutions per minute
///
/// # Returns
/// `60 / (steps_per_rev * rpm)` seconds as a microsecond-resolution
/// duration, or `None` when the request has no positive pace (zero steps
/// per revolution, zero or negative rpm).
pub fn step_interval(steps_per_rev: u16, rpm: f32) -> Option<Duration> {
    if steps_per_rev == 0 || rpm <= 0.0 {
        return None;
    }
    let micros = 60_000_000.0 / (steps_per_rev as f32 * rpm);
    Some(Duration::from_micros(micros as u64))
}

/// Interleaved cadence dwell: half the whole-step interval, since the phase
/// moves at twice the resolution.
#[inline(always)]
pub fn interleave_interval(step: Duration) -> Duration {
    step / 2
}

/// Microstep dwell: the whole-step interval split across MICROSTEPS moves.
#[inline(always)]
pub fn micro_interval(step: Duration) -> Duration {
    step / MICROSTEPS as u32
}
