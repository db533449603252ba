//! Piecewise-linear horizon mask.

use qtty::Radians;

use super::{into_breakpoint_range, validate_breakpoints, HorizonMask, MaskError};

/// Horizon mask interpolated linearly between `(azimuth, elevation)` pairs.
///
/// # Invariants
///
/// - At least two breakpoints, azimuths strictly increasing
/// - The last azimuth is at least one full turn after the first, so every
///   direction is bracketed (catalogs usually repeat the 0° point at 360°)
#[derive(Debug, Clone, PartialEq)]
pub struct LineMask {
    azimuths: Vec<Radians>,
    elevations: Vec<Radians>,
}

impl LineMask {
    pub fn new(azimuths: Vec<Radians>, elevations: Vec<Radians>) -> Result<Self, MaskError> {
        let expected = azimuths.len();
        validate_breakpoints(&azimuths, &elevations, expected)?;
        Ok(Self {
            azimuths,
            elevations,
        })
    }

    pub fn azimuths(&self) -> &[Radians] {
        &self.azimuths
    }

    pub fn elevations(&self) -> &[Radians] {
        &self.elevations
    }
}

impl HorizonMask for LineMask {
    fn min_elevation(&self, az: Radians) -> Radians {
        let az = into_breakpoint_range(az, self.azimuths[0]);
        // First breakpoint at or beyond `az`; index 0 only when `az` equals it.
        let end = self
            .azimuths
            .partition_point(|a| a.value() < az)
            .clamp(1, self.azimuths.len() - 1);
        let begin = end - 1;

        let (az0, az1) = (self.azimuths[begin].value(), self.azimuths[end].value());
        let (el0, el1) = (self.elevations[begin].value(), self.elevations[end].value());
        Radians::new(el0 + (el1 - el0) / (az1 - az0) * (az - az0))
    }

    fn kind(&self) -> &'static str {
        "line"
    }
}
