//! Station horizon masks.
//!
//! A horizon mask gives the minimum observable elevation as a function of
//! azimuth. Every mask shape answers the same question through
//! [`HorizonMask::visible`]; shapes differ only in how the minimum elevation
//! between breakpoints is obtained.

pub mod error;
mod line;
mod step;

pub use error::MaskError;
pub use line::LineMask;
pub use step::StepMask;

use std::f64::consts::TAU;
use std::fmt::Debug;

use qtty::Radians;

use crate::pointing::PointingVector;
use crate::units::{deg, wrap_positive};

/// Slack applied to the inclusive elevation comparison.
const ELEVATION_TOLERANCE: f64 = 1e-12;

/// Azimuth-dependent minimum elevation.
///
/// # Contract
///
/// Implementations must cover the full circle: `min_elevation` is defined for
/// every azimuth in `[0, 2π)`. Construction of the provided shapes rejects
/// breakpoint sets that do not, so a built mask never has holes.
pub trait HorizonMask: Send + Sync + Debug {
    /// Minimum observable elevation at an azimuth in `[0, 2π)`.
    fn min_elevation(&self, az: Radians) -> Radians;

    /// Short shape name used in diagnostics.
    fn kind(&self) -> &'static str;

    /// Returns true if the pointing is on or above the mask.
    ///
    /// The azimuth is reduced into `[0, 2π)` first, so unwrapped pointings can
    /// be passed directly.
    fn visible(&self, pointing: &PointingVector) -> bool {
        let az = wrap_positive(pointing.az());
        pointing.el().value() + ELEVATION_TOLERANCE >= self.min_elevation(az).value()
    }

    /// Samples the mask every degree from 0° to 360° inclusive.
    fn sample(&self) -> Vec<(Radians, Radians)> {
        (0..=360)
            .map(|d| {
                let az = deg(f64::from(d));
                (az, self.min_elevation(wrap_positive(az)))
            })
            .collect()
    }
}

/// Checks the breakpoint invariants shared by every mask shape.
///
/// `expected_values` is the number of elevation entries the shape needs for
/// the given azimuth count.
fn validate_breakpoints(
    azimuths: &[Radians],
    elevations: &[Radians],
    expected_values: usize,
) -> Result<(), MaskError> {
    if azimuths.len() < 2 {
        return Err(MaskError::TooFewPoints {
            required: 2,
            got: azimuths.len(),
        });
    }
    if elevations.len() != expected_values {
        return Err(MaskError::LengthMismatch {
            azimuths: azimuths.len(),
            elevations: elevations.len(),
            expected: expected_values,
        });
    }
    if let Some(index) = azimuths
        .iter()
        .chain(elevations.iter())
        .position(|v| !v.value().is_finite())
    {
        let index = if index < azimuths.len() {
            index
        } else {
            index - azimuths.len()
        };
        return Err(MaskError::NonFinite { index });
    }
    if let Some(i) = azimuths
        .windows(2)
        .position(|w| w[1].value() <= w[0].value())
    {
        return Err(MaskError::NotIncreasing { index: i + 1 });
    }

    let span = azimuths[azimuths.len() - 1].value() - azimuths[0].value();
    if span < TAU - 1e-9 {
        return Err(MaskError::IncompleteCoverage {
            span_deg: span.to_degrees(),
        });
    }
    Ok(())
}

/// Shifts an azimuth into `[first, first + 2π)` so it can be searched among
/// breakpoints that start at `first`.
fn into_breakpoint_range(az: Radians, first: Radians) -> f64 {
    first.value() + (az.value() - first.value()).rem_euclid(TAU)
}
