//! Mount kinds and single-axis ranges.

use std::fmt::Display;
use std::str::FromStr;

use qtty::Radians;

use super::CableWrapError;
use crate::coordinates::Topocentric;
use crate::units::to_deg;

/// Antenna mount kind, as named in station catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisType {
    /// Azimuth-elevation.
    AzEl,
    /// Hour angle-declination (equatorial).
    HaDc,
    /// X-Y mount with the fixed axis north-south.
    XyNs,
    /// X-Y mount with the fixed axis east-west.
    XyEw,
    /// Richmond: equatorial mount with a tilted polar axis.
    Rich,
    /// SEST: azimuth-elevation.
    Sest,
    /// Algonquin: azimuth-elevation.
    Algo,
    Undefined,
}

impl AxisType {
    /// Returns true if the first axis is a rotating azimuth axis that can
    /// reach the same direction at several multiples of 2π.
    pub const fn wraps_first_axis(self) -> bool {
        matches!(self, AxisType::AzEl | AxisType::Sest | AxisType::Algo)
    }

    /// Mount axis readings `(axis1, axis2)` for a topocentric direction.
    ///
    /// The first axis of azimuth mounts is the raw (principal-range) azimuth;
    /// unwrapping happens later against the cable wrap.
    pub fn axes(self, topo: &Topocentric) -> (Radians, Radians) {
        let (sin_az, cos_az) = topo.az.value().sin_cos();
        let (sin_el, cos_el) = topo.el.value().sin_cos();
        match self {
            AxisType::AzEl | AxisType::Sest | AxisType::Algo | AxisType::Undefined => {
                (topo.az, topo.el)
            }
            AxisType::HaDc | AxisType::Rich => (topo.ha, topo.dec),
            AxisType::XyNs => (
                Radians::new((cos_el * sin_az).atan2(sin_el)),
                Radians::new((cos_el * cos_az).clamp(-1.0, 1.0).asin()),
            ),
            AxisType::XyEw => (
                Radians::new((cos_el * cos_az).atan2(sin_el)),
                Radians::new((cos_el * sin_az).clamp(-1.0, 1.0).asin()),
            ),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            AxisType::AzEl => "AZEL",
            AxisType::HaDc => "HADC",
            AxisType::XyNs => "XYNS",
            AxisType::XyEw => "XYEW",
            AxisType::Rich => "RICH",
            AxisType::Sest => "SEST",
            AxisType::Algo => "ALGO",
            AxisType::Undefined => "undefined",
        }
    }
}

impl FromStr for AxisType {
    type Err = CableWrapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AZEL" => Ok(AxisType::AzEl),
            "HADC" => Ok(AxisType::HaDc),
            "XYNS" => Ok(AxisType::XyNs),
            "XYEW" => Ok(AxisType::XyEw),
            "RICH" => Ok(AxisType::Rich),
            "SEST" => Ok(AxisType::Sest),
            "ALGO" => Ok(AxisType::Algo),
            "UNDEFINED" => Ok(AxisType::Undefined),
            _ => Err(CableWrapError::UnknownAxisType(s.to_string())),
        }
    }
}

impl Display for AxisType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed mechanical range `[lo, hi]` of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    lo: Radians,
    hi: Radians,
}

impl AxisRange {
    /// Creates a range for the given axis number (1 or 2, used in errors).
    pub fn new(axis: u8, lo: Radians, hi: Radians) -> Result<Self, CableWrapError> {
        if !(lo.value().is_finite() && hi.value().is_finite()) || lo.value() > hi.value() {
            return Err(CableWrapError::InvertedRange {
                axis,
                lo_deg: to_deg(lo),
                hi_deg: to_deg(hi),
            });
        }
        Ok(Self { lo, hi })
    }

    pub const fn lo(&self) -> Radians {
        self.lo
    }

    pub const fn hi(&self) -> Radians {
        self.hi
    }

    /// Midpoint of the range.
    pub fn neutral_point(&self) -> Radians {
        Radians::new((self.lo.value() + self.hi.value()) * 0.5)
    }

    pub fn span(&self) -> Radians {
        self.hi - self.lo
    }

    /// Returns true if `value` ∈ `[lo, hi]`.
    pub fn contains(&self, value: Radians) -> bool {
        self.lo.value() <= value.value() && value.value() <= self.hi.value()
    }

    /// Range shrunk by a lower and an upper margin, if anything remains.
    pub fn shrink(&self, low_margin: Radians, up_margin: Radians) -> Option<Self> {
        let lo = self.lo + low_margin;
        let hi = self.hi - up_margin;
        (lo.value() <= hi.value()).then_some(Self { lo, hi })
    }
}

impl Display for AxisRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.3}, {:.3}]", to_deg(self.lo), to_deg(self.hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::deg;

    fn topo(az: f64, el: f64) -> Topocentric {
        Topocentric {
            az: deg(az),
            el: deg(el),
            ha: deg(-15.0),
            dec: deg(40.0),
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("azel".parse::<AxisType>().unwrap(), AxisType::AzEl);
        assert_eq!(" HADC ".parse::<AxisType>().unwrap(), AxisType::HaDc);
        assert_eq!("Undefined".parse::<AxisType>().unwrap(), AxisType::Undefined);
    }

    #[test]
    fn parse_rejects_unknown_tags() {
        let err = "ALTAZ".parse::<AxisType>().unwrap_err();
        assert_eq!(err, CableWrapError::UnknownAxisType("ALTAZ".to_string()));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for t in [AxisType::AzEl, AxisType::XyEw, AxisType::Rich] {
            assert_eq!(t.to_string().parse::<AxisType>().unwrap(), t);
        }
    }

    #[test]
    fn azimuth_mounts_wrap() {
        assert!(AxisType::AzEl.wraps_first_axis());
        assert!(AxisType::Algo.wraps_first_axis());
        assert!(!AxisType::HaDc.wraps_first_axis());
        assert!(!AxisType::XyNs.wraps_first_axis());
    }

    #[test]
    fn equatorial_axes_use_hour_angle_and_declination() {
        let (a1, a2) = AxisType::HaDc.axes(&topo(120.0, 30.0));
        assert_eq!(a1, deg(-15.0));
        assert_eq!(a2, deg(40.0));
    }

    #[test]
    fn xy_axes_at_zenith_are_zero() {
        for t in [AxisType::XyNs, AxisType::XyEw] {
            let (x, y) = t.axes(&topo(37.0, 90.0));
            assert!(x.value().abs() < 1e-9);
            assert!(y.value().abs() < 1e-9);
        }
    }

    #[test]
    fn xyew_tilts_towards_north_on_first_axis() {
        let (x, y) = AxisType::XyEw.axes(&topo(0.0, 45.0));
        assert!((to_deg(x) - 45.0).abs() < 1e-9);
        assert!(y.value().abs() < 1e-9);
    }

    #[test]
    fn range_rejects_inverted_limits() {
        let err = AxisRange::new(2, deg(90.0), deg(5.0)).unwrap_err();
        assert!(matches!(err, CableWrapError::InvertedRange { axis: 2, .. }));
    }

    #[test]
    fn range_neutral_point_and_shrink() {
        let r = AxisRange::new(1, deg(-90.0), deg(450.0)).unwrap();
        assert!((to_deg(r.neutral_point()) - 180.0).abs() < 1e-9);
        let s = r.shrink(deg(5.0), deg(5.0)).unwrap();
        assert!((to_deg(s.lo()) + 85.0).abs() < 1e-9);
        assert!((to_deg(s.hi()) - 445.0).abs() < 1e-9);
        assert!(r.shrink(deg(300.0), deg(300.0)).is_none());
    }
}
