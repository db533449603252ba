//! Step-function horizon mask.

use qtty::Radians;

use super::{into_breakpoint_range, validate_breakpoints, HorizonMask, MaskError};

/// Horizon mask with a constant minimum elevation per azimuth sector.
///
/// `elevations[i]` applies on `[azimuths[i], azimuths[i + 1])`, so there is
/// one elevation fewer than azimuth edges.
#[derive(Debug, Clone, PartialEq)]
pub struct StepMask {
    azimuths: Vec<Radians>,
    elevations: Vec<Radians>,
}

impl StepMask {
    pub fn new(azimuths: Vec<Radians>, elevations: Vec<Radians>) -> Result<Self, MaskError> {
        let expected = azimuths.len().saturating_sub(1);
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

impl HorizonMask for StepMask {
    fn min_elevation(&self, az: Radians) -> Radians {
        let az = into_breakpoint_range(az, self.azimuths[0]);
        let sector = self
            .azimuths
            .partition_point(|a| a.value() <= az)
            .saturating_sub(1)
            .min(self.elevations.len() - 1);
        self.elevations[sector]
    }

    fn kind(&self) -> &'static str {
        "step"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointing::PointingVector;
    use crate::units::{deg, to_deg};

    fn quadrant_mask() -> StepMask {
        StepMask::new(
            vec![deg(0.0), deg(90.0), deg(180.0), deg(270.0), deg(360.0)],
            vec![deg(5.0), deg(12.0), deg(3.0), deg(8.0)],
        )
        .unwrap()
    }

    #[test]
    fn sector_lookup() {
        let mask = quadrant_mask();
        assert_eq!(to_deg(mask.min_elevation(deg(10.0))).round(), 5.0);
        assert_eq!(to_deg(mask.min_elevation(deg(135.0))).round(), 12.0);
        assert_eq!(to_deg(mask.min_elevation(deg(359.9))).round(), 8.0);
    }

    #[test]
    fn sector_edges_belong_to_the_next_sector() {
        let mask = quadrant_mask();
        assert_eq!(to_deg(mask.min_elevation(deg(90.0))).round(), 12.0);
        assert_eq!(to_deg(mask.min_elevation(deg(0.0))).round(), 5.0);
    }

    #[test]
    fn visible_uses_sector_threshold() {
        let mask = quadrant_mask();
        assert!(mask.visible(&PointingVector::new(0, deg(100.0), deg(12.0))));
        assert!(!mask.visible(&PointingVector::new(0, deg(100.0), deg(11.9))));
        assert!(mask.visible(&PointingVector::new(0, deg(460.0), deg(12.0))));
    }

    #[test]
    fn rejects_equal_length_inputs() {
        let err = StepMask::new(
            vec![deg(0.0), deg(180.0), deg(360.0)],
            vec![deg(5.0), deg(5.0), deg(5.0)],
        )
        .unwrap_err();
        assert!(matches!(err, MaskError::LengthMismatch { expected: 2, .. }));
    }
}
