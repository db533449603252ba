//! Angle helpers shared by the pointing geometry.
//!
//! All internal geometry runs in radians. Configuration and diagnostics speak
//! degrees, so the conversions live here next to the wrap helpers that the
//! horizon mask and the cable wrap both rely on.

use std::f64::consts::TAU;

use qtty::{Degree, Degrees, Radian, Radians};

/// One full revolution in radians.
pub const FULL_TURN: Radians = Radians::new(TAU);

/// Builds a radian quantity from a value in degrees.
#[inline]
pub fn deg(value: f64) -> Radians {
    Degrees::new(value).to::<Radian>()
}

/// Returns the value of a radian quantity expressed in degrees.
#[inline]
pub fn to_deg(angle: Radians) -> f64 {
    angle.to::<Degree>().value()
}

/// Wraps an angle into `[0, 2π)`.
///
/// Values that round up to exactly `2π` after the Euclidean remainder are
/// folded back to zero so the result is always strictly below a full turn.
pub fn wrap_positive(angle: Radians) -> Radians {
    let wrapped = angle.value().rem_euclid(TAU);
    if wrapped >= TAU {
        Radians::new(0.0)
    } else {
        Radians::new(wrapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn deg_converts_to_radians() {
        assert!((deg(180.0).value() - PI).abs() < 1e-12);
        assert!((deg(-90.0).value() + PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn to_deg_inverts_deg() {
        assert!((to_deg(deg(123.25)) - 123.25).abs() < 1e-9);
    }

    #[test]
    fn wrap_positive_folds_negative_angles() {
        let wrapped = wrap_positive(deg(-10.0));
        assert!((to_deg(wrapped) - 350.0).abs() < 1e-9);
    }

    #[test]
    fn wrap_positive_folds_multiple_turns() {
        let wrapped = wrap_positive(deg(725.0));
        assert!((to_deg(wrapped) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn wrap_positive_stays_below_full_turn() {
        let wrapped = wrap_positive(Radians::new(-1e-18));
        assert!(wrapped.value() < TAU);
        assert!(wrapped.value() >= 0.0);
    }
}
