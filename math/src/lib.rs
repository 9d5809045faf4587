mod angle;
mod intercept;

use std::f32::consts::{PI, TAU};

pub use angle::*;
pub use intercept::*;

const DEG_TO_RAD: f32 = PI / 180.0;

/// One full turn in binary angle measure
const BAM_TURN: f64 = 4_294_967_296.0;

/// Convert a BAM (Binary Angle Measure) to radians
#[inline]
pub const fn bam_to_radian(value: u32) -> f32 {
    (value as f32 * 8.381_903e-8) * DEG_TO_RAD
}

/// Convert radians to a BAM. Any input wraps in to a single turn, non-finite
/// input gives 0.
#[inline]
pub fn radian_to_bam(radians: f32) -> u32 {
    let turns = (radians / TAU).rem_euclid(1.0) as f64;
    (turns * BAM_TURN) as u64 as u32
}
