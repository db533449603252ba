//! Topocentric direction of a source as seen from a station.

use std::f64::consts::TAU;
use std::fmt::Debug;

use qtty::Radians;

use super::Position;
use crate::source::SourceDirection;
use crate::units::wrap_positive;

/// Model used when computing azimuth and elevation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AzElModel {
    /// Plain rotation from equatorial to horizon frame, no nutation.
    #[default]
    Simple,
    /// Nutation/precession corrected, keyed to the session start date.
    Rigorous,
}

/// Direction of a source in the station's local frames.
///
/// `az` is in the principal range `[0, 2π)`, measured from north through east.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Topocentric {
    pub az: Radians,
    pub el: Radians,
    /// Local hour angle, wrapped into `(-π, π]`.
    pub ha: Radians,
    pub dec: Radians,
}

/// Maps (station, source, time) to a topocentric direction.
///
/// Implementations own the session epoch; `time` is seconds since session
/// start. Full precession/nutation belongs to an external ephemeris
/// component behind this trait.
pub trait CoordinateTransform: Send + Sync + Debug {
    fn topocentric(
        &self,
        position: &Position,
        source: &dyn SourceDirection,
        time: u32,
        model: AzElModel,
    ) -> Topocentric;
}

/// Spherical-astronomy transform using mean sidereal time only.
///
/// Both [`AzElModel`] variants are evaluated with the same rotation; callers
/// that need the rigorous model plug in their own [`CoordinateTransform`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalTransform {
    mjd_start: f64,
}

impl SphericalTransform {
    /// Creates a transform for a session starting at the given MJD (UTC).
    pub const fn new(mjd_start: f64) -> Self {
        Self { mjd_start }
    }

    pub const fn mjd_start(&self) -> f64 {
        self.mjd_start
    }

    /// Greenwich mean sidereal time in radians (IAU 1982 polynomial).
    pub fn gmst(&self, time: u32) -> Radians {
        let mjd = self.mjd_start + f64::from(time) / 86_400.0;
        let d = mjd - 51_544.5;
        let t = d / 36_525.0;
        let deg = 280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0;
        wrap_positive(Radians::new(deg.to_radians()))
    }
}

impl CoordinateTransform for SphericalTransform {
    fn topocentric(
        &self,
        position: &Position,
        source: &dyn SourceDirection,
        time: u32,
        _model: AzElModel,
    ) -> Topocentric {
        let lat = position.lat().value();
        let lst = self.gmst(time).value() + position.lon().value();
        let dec = source.dec().value();

        let mut ha = (lst - source.ra().value()).rem_euclid(TAU);
        if ha > std::f64::consts::PI {
            ha -= TAU;
        }

        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_dec, cos_dec) = dec.sin_cos();
        let (sin_ha, cos_ha) = ha.sin_cos();

        let el = (sin_lat * sin_dec + cos_lat * cos_dec * cos_ha)
            .clamp(-1.0, 1.0)
            .asin();
        let az = (-cos_dec * sin_ha).atan2(sin_dec * cos_lat - cos_dec * cos_ha * sin_lat);

        Topocentric {
            az: wrap_positive(Radians::new(az)),
            el: Radians::new(el),
            ha: Radians::new(ha),
            dec: source.dec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Source;
    use crate::units::{deg, to_deg};

    fn equator_station() -> Position {
        Position::from_f64(6_378_137.0, 0.0, 0.0)
    }

    #[test]
    fn gmst_at_j2000_epoch() {
        let tr = SphericalTransform::new(51_544.5);
        assert!((to_deg(tr.gmst(0)) - 280.460_618_37).abs() < 1e-6);
    }

    #[test]
    fn gmst_advances_one_sidereal_turn_per_sidereal_day() {
        let tr = SphericalTransform::new(51_544.5);
        // 86164 s is one sidereal day to within a fraction of a second.
        let diff = to_deg(tr.gmst(86_164)) - to_deg(tr.gmst(0));
        assert!(diff.abs() < 0.01 || (diff.abs() - 360.0).abs() < 0.01);
    }

    #[test]
    fn source_on_meridian_at_zenith() {
        let tr = SphericalTransform::new(51_544.5);
        // Source RA equal to local sidereal time, dec equal to latitude.
        let ra = tr.gmst(0);
        let src = Source::new("zenith", ra, deg(0.0));
        let topo = tr.topocentric(&equator_station(), &src, 0, AzElModel::Simple);
        assert!((to_deg(topo.el) - 90.0).abs() < 1e-6);
        assert!(topo.ha.value().abs() < 1e-9);
    }

    #[test]
    fn northern_source_on_meridian_points_north() {
        let tr = SphericalTransform::new(51_544.5);
        let src = Source::new("north", tr.gmst(0), deg(30.0));
        let topo = tr.topocentric(&equator_station(), &src, 0, AzElModel::Simple);
        assert!((to_deg(topo.el) - 60.0).abs() < 1e-6);
        assert!(to_deg(topo.az).abs() < 1e-6 || (to_deg(topo.az) - 360.0).abs() < 1e-6);
    }

    #[test]
    fn rising_source_is_in_the_east() {
        let tr = SphericalTransform::new(51_544.5);
        // Hour angle -6h: the source rises due east for an equatorial observer.
        let ra = Radians::new(tr.gmst(0).value() + deg(90.0).value());
        let src = Source::new("east", ra, deg(0.0));
        let topo = tr.topocentric(&equator_station(), &src, 0, AzElModel::Simple);
        assert!((to_deg(topo.az) - 90.0).abs() < 1e-6);
        assert!(to_deg(topo.el).abs() < 1e-6);
        assert!((to_deg(topo.ha) + 90.0).abs() < 1e-6);
    }

    #[test]
    fn azimuth_is_in_principal_range() {
        let tr = SphericalTransform::new(58_000.25);
        let src = Source::new("any", deg(300.0), deg(-45.0));
        for t in (0..86_400).step_by(3_600) {
            let topo = tr.topocentric(&equator_station(), &src, t, AzElModel::Rigorous);
            assert!(topo.az.value() >= 0.0 && topo.az.value() < TAU);
        }
    }
}
