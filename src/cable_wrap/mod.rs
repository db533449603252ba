//! Mechanical axis limits and azimuth unwrapping.
//!
//! Azimuth axes of most VLBI antennas travel more than one full turn, so a
//! single sky direction can be reached at several axis positions that differ
//! by multiples of 2π. [`CableWrap::unwrap`] picks one of them: the candidate
//! inside the usable range that lies closest to a reference azimuth.
//!
//! # Reference selection
//!
//! - [`UnwrapReference::Current`]: the antenna's current azimuth (falls back to
//!   the neutral point when the antenna has not been pointed yet)
//! - [`UnwrapReference::NeutralPoint`]: midpoint of the mechanical range
//! - [`UnwrapReference::Explicit`]: a caller-supplied azimuth
//!
//! Ties go to the candidate with the smaller absolute azimuth.

pub mod error;
mod axis;

pub use axis::{AxisRange, AxisType};
pub use error::CableWrapError;

use std::f64::consts::TAU;

use log::trace;
use qtty::Radians;

use crate::pointing::PointingVector;
use crate::units::to_deg;

/// Distances closer than this are treated as equal when breaking ties.
const TIE_TOLERANCE: f64 = 1e-12;

/// Which azimuth the unwrap should stay close to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnwrapReference {
    Current,
    NeutralPoint,
    Explicit(Radians),
}

/// Axis limits of one station, including safety margins.
///
/// # Invariants
///
/// - Both mechanical ranges satisfy `lo <= hi`
/// - The ranges shrunk by the safety margins are non-empty
/// - Every pointing accepted by [`unwrap`](Self::unwrap) or
///   [`axes_inside`](Self::axes_inside) has its axis readings inside the
///   shrunk ranges
#[derive(Debug, Clone, PartialEq)]
pub struct CableWrap {
    axis_type: AxisType,
    axis1: AxisRange,
    axis2: AxisRange,
    axis1_usable: AxisRange,
    axis2_usable: AxisRange,
    /// `[axis1 low, axis1 up, axis2 low, axis2 up]`.
    margins: [Radians; 4],
}

impl CableWrap {
    /// Creates limits without safety margins.
    pub fn new(axis_type: AxisType, axis1: AxisRange, axis2: AxisRange) -> Self {
        Self {
            axis_type,
            axis1,
            axis2,
            axis1_usable: axis1,
            axis2_usable: axis2,
            margins: [Radians::new(0.0); 4],
        }
    }

    /// Applies safety margins to both axes.
    pub fn with_margins(
        mut self,
        axis1_low: Radians,
        axis1_up: Radians,
        axis2_low: Radians,
        axis2_up: Radians,
    ) -> Result<Self, CableWrapError> {
        self.set_margins(axis1_low, axis1_up, axis2_low, axis2_up)?;
        Ok(self)
    }

    /// Replaces the safety margins; the limits are left untouched on error.
    pub fn set_margins(
        &mut self,
        axis1_low: Radians,
        axis1_up: Radians,
        axis2_low: Radians,
        axis2_up: Radians,
    ) -> Result<(), CableWrapError> {
        let margins = [axis1_low, axis1_up, axis2_low, axis2_up];
        for (i, m) in margins.iter().enumerate() {
            if !m.value().is_finite() || m.value() < 0.0 {
                return Err(CableWrapError::InvalidMargin {
                    axis: if i < 2 { 1 } else { 2 },
                    margin_deg: to_deg(*m),
                });
            }
        }
        let axis1_usable = self
            .axis1
            .shrink(axis1_low, axis1_up)
            .ok_or(CableWrapError::MarginsExceedRange { axis: 1 })?;
        let axis2_usable = self
            .axis2
            .shrink(axis2_low, axis2_up)
            .ok_or(CableWrapError::MarginsExceedRange { axis: 2 })?;

        self.axis1_usable = axis1_usable;
        self.axis2_usable = axis2_usable;
        self.margins = margins;
        Ok(())
    }

    pub const fn axis_type(&self) -> AxisType {
        self.axis_type
    }

    /// Mechanical range of the first axis.
    pub const fn axis1(&self) -> AxisRange {
        self.axis1
    }

    /// Mechanical range of the second axis.
    pub const fn axis2(&self) -> AxisRange {
        self.axis2
    }

    /// First-axis range after safety margins.
    pub const fn axis1_usable(&self) -> AxisRange {
        self.axis1_usable
    }

    /// Second-axis range after safety margins.
    pub const fn axis2_usable(&self) -> AxisRange {
        self.axis2_usable
    }

    /// Safety margins as `[axis1 low, axis1 up, axis2 low, axis2 up]`.
    pub const fn margins(&self) -> [Radians; 4] {
        self.margins
    }

    /// Period of the first axis, if it is a rotating azimuth axis.
    pub fn wrap_period(&self) -> Option<Radians> {
        self.axis_type
            .wraps_first_axis()
            .then_some(crate::units::FULL_TURN)
    }

    /// Midpoint of the first axis' mechanical range.
    pub fn neutral_point(&self) -> Radians {
        self.axis1.neutral_point()
    }

    /// Returns true if both axis readings lie in the usable ranges.
    pub fn axes_inside(&self, pointing: &PointingVector) -> bool {
        self.axis1_usable.contains(pointing.axis1()) && self.axis2_usable.contains(pointing.axis2())
    }

    /// Resolves a reference policy to a concrete azimuth.
    pub fn reference_azimuth(
        &self,
        reference: UnwrapReference,
        current: Option<&PointingVector>,
    ) -> Radians {
        match reference {
            UnwrapReference::Current => current
                .map(PointingVector::az)
                .unwrap_or_else(|| self.neutral_point()),
            UnwrapReference::NeutralPoint => self.neutral_point(),
            UnwrapReference::Explicit(az) => az,
        }
    }

    /// Chooses the first-axis value for a raw reading.
    ///
    /// For rotating axes the candidates are `raw + k·2π` inside the usable
    /// range; the one closest to `reference` wins, ties going to the smaller
    /// absolute value. Non-rotating axes only check the range. Returns `None`
    /// when no candidate is usable.
    pub fn unwrap_axis1(&self, raw: Radians, reference: Radians) -> Option<Radians> {
        let usable = self.axis1_usable;
        if !self.axis_type.wraps_first_axis() {
            return usable.contains(raw).then_some(raw);
        }

        let raw = raw.value();
        let k_min = ((usable.lo().value() - raw) / TAU).ceil() as i64;
        let k_max = ((usable.hi().value() - raw) / TAU).floor() as i64;

        let mut best: Option<f64> = None;
        for k in k_min..=k_max {
            let candidate = raw + k as f64 * TAU;
            if !usable.contains(Radians::new(candidate)) {
                continue;
            }
            best = match best {
                None => Some(candidate),
                Some(b) => {
                    let d_new = (candidate - reference.value()).abs();
                    let d_best = (b - reference.value()).abs();
                    if d_new < d_best - TIE_TOLERANCE
                        || ((d_new - d_best).abs() <= TIE_TOLERANCE && candidate.abs() < b.abs())
                    {
                        Some(candidate)
                    } else {
                        Some(b)
                    }
                }
            };
        }
        best.map(Radians::new)
    }

    /// Unwraps a pointing and checks it against both usable ranges.
    ///
    /// Returns the pointing with its first axis (and azimuth, for azimuth
    /// mounts) replaced by the selected candidate, or `None` on an axis-limit
    /// violation.
    pub fn unwrap(
        &self,
        pointing: &PointingVector,
        reference: UnwrapReference,
        current: Option<&PointingVector>,
    ) -> Option<PointingVector> {
        let reference_az = self.reference_azimuth(reference, current);
        let unwrapped = if self.axis_type.wraps_first_axis() {
            let az = self.unwrap_axis1(pointing.az(), reference_az)?;
            pointing.with_unwrapped_az(az).with_axis1(az)
        } else {
            let axis1 = self.unwrap_axis1(pointing.axis1(), reference_az)?;
            pointing.with_axis1(axis1)
        };

        if !self.axis2_usable.contains(unwrapped.axis2()) {
            trace!(
                "axis 2 at {:.3} deg outside usable range {}",
                to_deg(unwrapped.axis2()),
                self.axis2_usable
            );
            return None;
        }
        trace!(
            "unwrapped axis 1 {:.3} -> {:.3} deg (reference {:.3} deg)",
            to_deg(pointing.axis1()),
            to_deg(unwrapped.axis1()),
            to_deg(reference_az)
        );
        Some(unwrapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::deg;
    use proptest::prelude::*;

    fn azel(lo1: f64, hi1: f64, lo2: f64, hi2: f64) -> CableWrap {
        CableWrap::new(
            AxisType::AzEl,
            AxisRange::new(1, deg(lo1), deg(hi1)).unwrap(),
            AxisRange::new(2, deg(lo2), deg(hi2)).unwrap(),
        )
    }

    fn pv(az: f64, el: f64) -> PointingVector {
        PointingVector::new(0, deg(az), deg(el))
    }

    fn unwrapped_deg(wrap: &CableWrap, raw: f64, reference: UnwrapReference, current: Option<f64>) -> Option<f64> {
        let current = current.map(|az| pv(az, 30.0));
        wrap.unwrap(&pv(raw, 30.0), reference, current.as_ref())
            .map(|p| to_deg(p.az()))
    }

    #[test]
    fn nearest_to_current_picks_negative_branch() {
        let wrap = azel(-90.0, 450.0, 5.0, 88.0);
        let az = unwrapped_deg(&wrap, 350.0, UnwrapReference::Current, Some(0.0)).unwrap();
        assert!((az + 10.0).abs() < 1e-9);
    }

    #[test]
    fn nearest_to_current_picks_upper_branch() {
        let wrap = azel(-90.0, 450.0, 5.0, 88.0);
        let az = unwrapped_deg(&wrap, 10.0, UnwrapReference::Current, Some(200.0)).unwrap();
        assert!((az - 370.0).abs() < 1e-9);
    }

    #[test]
    fn upper_branch_outside_limits_is_never_chosen() {
        // 370° would be closer to 300° but lies beyond the 270° limit.
        let wrap = azel(-270.0, 270.0, 5.0, 88.0);
        let az = unwrapped_deg(&wrap, 10.0, UnwrapReference::Current, Some(300.0)).unwrap();
        assert!((az - 10.0).abs() < 1e-9);
        let az = unwrapped_deg(&wrap, 10.0, UnwrapReference::Current, Some(185.0)).unwrap();
        assert!((az - 10.0).abs() < 1e-9);
    }

    #[test]
    fn equidistant_candidates_prefer_smaller_absolute_azimuth() {
        let wrap = azel(-270.0, 270.0, 5.0, 88.0);
        // Candidates -180° and 180° are both 180° away from 0°.
        let az = unwrapped_deg(&wrap, 180.0, UnwrapReference::Explicit(deg(0.0)), None).unwrap();
        assert!((az.abs() - 180.0).abs() < 1e-9);
        // Candidates 100° and -260° around reference -80°: both 180° away.
        let az = unwrapped_deg(&wrap, 100.0, UnwrapReference::Explicit(deg(-80.0)), None).unwrap();
        assert!((az - 100.0).abs() < 1e-9);
    }

    #[test]
    fn neutral_point_reference() {
        // Neutral point of [-90, 450] is 180°.
        let wrap = azel(-90.0, 450.0, 5.0, 88.0);
        let az = unwrapped_deg(&wrap, 300.0, UnwrapReference::NeutralPoint, Some(0.0)).unwrap();
        assert!((az - 300.0).abs() < 1e-9);
        let az = unwrapped_deg(&wrap, 300.0, UnwrapReference::Current, Some(0.0)).unwrap();
        assert!((az + 60.0).abs() < 1e-9);
    }

    #[test]
    fn current_without_pointing_falls_back_to_neutral_point() {
        let wrap = azel(-90.0, 450.0, 5.0, 88.0);
        let az = unwrapped_deg(&wrap, 300.0, UnwrapReference::Current, None).unwrap();
        assert!((az - 300.0).abs() < 1e-9);
    }

    #[test]
    fn gap_in_azimuth_range_is_infeasible() {
        let wrap = azel(0.0, 300.0, 5.0, 88.0);
        for reference in [
            UnwrapReference::Current,
            UnwrapReference::NeutralPoint,
            UnwrapReference::Explicit(deg(330.0)),
        ] {
            assert!(unwrapped_deg(&wrap, 330.0, reference, Some(290.0)).is_none());
        }
    }

    #[test]
    fn margins_shrink_usable_range_under_every_policy() {
        let wrap = azel(-270.0, 270.0, 5.0, 88.0)
            .with_margins(deg(5.0), deg(5.0), deg(1.0), deg(1.0))
            .unwrap();
        // 268° is beyond the 265° usable limit, leaving only -92°.
        assert!(unwrapped_deg(&wrap, 268.0, UnwrapReference::Explicit(deg(268.0)), None)
            .map(|az| (az + 92.0).abs() < 1e-9)
            .unwrap());

        let tight = azel(0.0, 200.0, 5.0, 88.0)
            .with_margins(deg(5.0), deg(5.0), deg(1.0), deg(1.0))
            .unwrap();
        for reference in [
            UnwrapReference::Current,
            UnwrapReference::NeutralPoint,
            UnwrapReference::Explicit(deg(198.0)),
        ] {
            assert!(unwrapped_deg(&tight, 198.0, reference, Some(190.0)).is_none());
            assert!(unwrapped_deg(&tight, 2.0, reference, Some(10.0)).is_none());
        }
    }

    #[test]
    fn elevation_outside_usable_range_is_infeasible() {
        let wrap = azel(-270.0, 270.0, 5.0, 88.0)
            .with_margins(deg(0.0), deg(0.0), deg(1.0), deg(1.0))
            .unwrap();
        assert!(wrap
            .unwrap(&pv(10.0, 5.5), UnwrapReference::NeutralPoint, None)
            .is_none());
        assert!(wrap
            .unwrap(&pv(10.0, 6.5), UnwrapReference::NeutralPoint, None)
            .is_some());
        assert!(wrap
            .unwrap(&pv(10.0, 87.5), UnwrapReference::NeutralPoint, None)
            .is_none());
    }

    #[test]
    fn non_rotating_axis_is_only_range_checked() {
        let wrap = CableWrap::new(
            AxisType::HaDc,
            AxisRange::new(1, deg(-90.0), deg(90.0)).unwrap(),
            AxisRange::new(2, deg(-40.0), deg(90.0)).unwrap(),
        );
        assert!(wrap.wrap_period().is_none());
        let inside = PointingVector::with_axes(0, deg(200.0), deg(30.0), deg(45.0), deg(10.0));
        let unwrapped = wrap
            .unwrap(&inside, UnwrapReference::Explicit(deg(-400.0)), None)
            .unwrap();
        assert_eq!(unwrapped, inside);

        let outside = PointingVector::with_axes(0, deg(200.0), deg(30.0), deg(100.0), deg(10.0));
        assert!(wrap
            .unwrap(&outside, UnwrapReference::NeutralPoint, None)
            .is_none());
    }

    #[test]
    fn margins_that_consume_range_are_rejected() {
        let err = azel(0.0, 10.0, 5.0, 88.0)
            .with_margins(deg(6.0), deg(6.0), deg(0.0), deg(0.0))
            .unwrap_err();
        assert_eq!(err, CableWrapError::MarginsExceedRange { axis: 1 });

        let err = azel(0.0, 360.0, 5.0, 88.0)
            .with_margins(deg(-1.0), deg(0.0), deg(0.0), deg(0.0))
            .unwrap_err();
        assert!(matches!(err, CableWrapError::InvalidMargin { axis: 1, .. }));
    }

    #[test]
    fn failed_margin_update_keeps_previous_limits() {
        let mut wrap = azel(-270.0, 270.0, 5.0, 88.0)
            .with_margins(deg(5.0), deg(5.0), deg(1.0), deg(1.0))
            .unwrap();
        let before = wrap.clone();
        assert!(wrap
            .set_margins(deg(5.0), deg(5.0), deg(50.0), deg(50.0))
            .is_err());
        assert_eq!(wrap, before);
    }

    proptest! {
        #[test]
        fn unwrap_is_idempotent(raw in 0.0f64..360.0, current in -260.0f64..260.0) {
            let wrap = azel(-270.0, 270.0, 5.0, 88.0)
                .with_margins(deg(5.0), deg(5.0), deg(1.0), deg(1.0))
                .unwrap();
            let cur = pv(current, 30.0);
            if let Some(first) = wrap.unwrap(&pv(raw, 30.0), UnwrapReference::Current, Some(&cur)) {
                let again = wrap
                    .unwrap(&first, UnwrapReference::Explicit(first.az()), None)
                    .unwrap();
                prop_assert!((again.az().value() - first.az().value()).abs() < 1e-12);
                prop_assert!(wrap.axes_inside(&again));
            }
        }

        #[test]
        fn accepted_pointings_respect_usable_range(raw in -720.0f64..720.0, reference in -720.0f64..720.0) {
            let wrap = azel(-90.0, 450.0, 5.0, 88.0)
                .with_margins(deg(5.0), deg(5.0), deg(1.0), deg(1.0))
                .unwrap();
            for policy in [
                UnwrapReference::Current,
                UnwrapReference::NeutralPoint,
                UnwrapReference::Explicit(deg(reference)),
            ] {
                let cur = pv(reference, 30.0);
                if let Some(p) = wrap.unwrap(&pv(raw, 30.0), policy, Some(&cur)) {
                    prop_assert!(wrap.axes_inside(&p));
                }
            }
        }
    }
}
