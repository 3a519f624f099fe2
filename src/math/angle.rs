use std::f64::consts::{PI, TAU};

/// Reduces an angle into `[0, 2π)`.
///
/// `rem_euclid` can round up to exactly `2π` for tiny negative inputs, so that
/// case is folded back onto zero.
pub fn wrap_angle(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Reduces an angle into `(-π, π]`.
pub fn signed_angle(theta: f64) -> f64 {
    let wrapped = wrap_angle(theta);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Unsigned angle between two directions, in `[0, π]`.
pub fn angular_separation(a: f64, b: f64) -> f64 {
    signed_angle(a - b).abs()
}
