//! Antenna pointing state at a single instant.

use std::fmt::Display;

use qtty::Radians;

use crate::units::to_deg;

/// Directional and mechanical state of an antenna at one instant.
///
/// `time` counts seconds since session start. `az`/`el` are the topocentric
/// direction; after unwrapping, `az` may lie outside `[0, 2π)`. `axis1` and
/// `axis2` are the mount's own axis readings, which coincide with `az`/`el`
/// for azimuth-elevation mounts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointingVector {
    time: u32,
    az: Radians,
    el: Radians,
    axis1: Radians,
    axis2: Radians,
}

impl PointingVector {
    /// Creates a pointing for an azimuth-elevation mount, so the axis readings
    /// equal the direction.
    pub const fn new(time: u32, az: Radians, el: Radians) -> Self {
        Self {
            time,
            az,
            el,
            axis1: az,
            axis2: el,
        }
    }

    /// Creates a pointing whose mount axes differ from the direction.
    pub const fn with_axes(
        time: u32,
        az: Radians,
        el: Radians,
        axis1: Radians,
        axis2: Radians,
    ) -> Self {
        Self {
            time,
            az,
            el,
            axis1,
            axis2,
        }
    }

    pub const fn time(&self) -> u32 {
        self.time
    }

    pub const fn az(&self) -> Radians {
        self.az
    }

    pub const fn el(&self) -> Radians {
        self.el
    }

    pub const fn axis1(&self) -> Radians {
        self.axis1
    }

    pub const fn axis2(&self) -> Radians {
        self.axis2
    }

    /// Returns a copy with a different (unwrapped) azimuth.
    ///
    /// When the first axis tracks azimuth (`axis1 == az`) it follows the new
    /// value; otherwise the mount readings are left untouched.
    pub fn with_unwrapped_az(&self, az: Radians) -> Self {
        let axis1 = if self.axis1 == self.az { az } else { self.axis1 };
        Self {
            az,
            axis1,
            ..*self
        }
    }

    /// Returns a copy with only the first-axis reading replaced.
    pub fn with_axis1(&self, axis1: Radians) -> Self {
        Self { axis1, ..*self }
    }

    /// Returns a copy stamped with a different time.
    pub fn at_time(&self, time: u32) -> Self {
        Self { time, ..*self }
    }
}

impl Display for PointingVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "t={:>6}s az={:>9.4}° el={:>8.4}° axis1={:>9.4}° axis2={:>8.4}°",
            self.time,
            to_deg(self.az),
            to_deg(self.el),
            to_deg(self.axis1),
            to_deg(self.axis2)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::deg;

    #[test]
    fn new_copies_direction_into_axes() {
        let pv = PointingVector::new(10, deg(45.0), deg(30.0));
        assert_eq!(pv.axis1(), pv.az());
        assert_eq!(pv.axis2(), pv.el());
        assert_eq!(pv.time(), 10);
    }

    #[test]
    fn unwrapped_az_moves_tracking_axis() {
        let pv = PointingVector::new(0, deg(10.0), deg(30.0));
        let unwrapped = pv.with_unwrapped_az(deg(370.0));
        assert_eq!(unwrapped.az(), deg(370.0));
        assert_eq!(unwrapped.axis1(), deg(370.0));
        assert_eq!(unwrapped.el(), pv.el());
    }

    #[test]
    fn unwrapped_az_keeps_independent_axis() {
        let pv = PointingVector::with_axes(0, deg(10.0), deg(30.0), deg(-20.0), deg(5.0));
        let unwrapped = pv.with_unwrapped_az(deg(370.0));
        assert_eq!(unwrapped.axis1(), deg(-20.0));
    }

    #[test]
    fn display_reports_degrees() {
        let pv = PointingVector::new(42, deg(90.0), deg(45.0));
        let s = pv.to_string();
        assert!(s.contains("t=    42s"));
        assert!(s.contains("90.0000"));
        assert!(s.contains("45.0000"));
    }
}
