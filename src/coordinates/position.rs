//! Earth-fixed station position.

use qtty::{Meters, Radians};

/// WGS84 semi-major axis in metres.
const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// Station position in Earth-centred Earth-fixed coordinates.
///
/// Geodetic latitude, longitude and ellipsoidal height are derived once at
/// construction since every az/el evaluation needs them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    x: Meters,
    y: Meters,
    z: Meters,
    lat: Radians,
    lon: Radians,
    height: Meters,
}

impl Position {
    pub fn new(x: Meters, y: Meters, z: Meters) -> Self {
        let (lat, lon, height) = geodetic(x.value(), y.value(), z.value());
        Self {
            x,
            y,
            z,
            lat: Radians::new(lat),
            lon: Radians::new(lon),
            height: Meters::new(height),
        }
    }

    pub fn from_f64(x: f64, y: f64, z: f64) -> Self {
        Self::new(Meters::new(x), Meters::new(y), Meters::new(z))
    }

    pub const fn x(&self) -> Meters {
        self.x
    }

    pub const fn y(&self) -> Meters {
        self.y
    }

    pub const fn z(&self) -> Meters {
        self.z
    }

    /// Geodetic latitude.
    pub const fn lat(&self) -> Radians {
        self.lat
    }

    /// East longitude.
    pub const fn lon(&self) -> Radians {
        self.lon
    }

    /// Height above the WGS84 ellipsoid.
    pub const fn height(&self) -> Meters {
        self.height
    }

    /// Straight-line (chord) distance to another position.
    pub fn distance(&self, other: &Position) -> Meters {
        let (dx, dy, dz) = self.delta(other);
        Meters::new((dx.value().powi(2) + dy.value().powi(2) + dz.value().powi(2)).sqrt())
    }

    /// Coordinate differences `other - self`.
    pub fn delta(&self, other: &Position) -> (Meters, Meters, Meters) {
        (other.x - self.x, other.y - self.y, other.z - self.z)
    }
}

/// Converts ECEF metres to geodetic `(lat, lon, height)` by fixed-point
/// iteration on the latitude.
fn geodetic(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let e2 = WGS84_F * (2.0 - WGS84_F);
    let lon = y.atan2(x);
    let p = x.hypot(y);

    if p < 1e-9 {
        let b = WGS84_A * (1.0 - WGS84_F);
        let lat = if z >= 0.0 {
            std::f64::consts::FRAC_PI_2
        } else {
            -std::f64::consts::FRAC_PI_2
        };
        return (lat, lon, z.abs() - b);
    }

    let mut lat = z.atan2(p * (1.0 - e2));
    let mut height = 0.0;
    for _ in 0..10 {
        let sin_lat = lat.sin();
        let n = WGS84_A / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        height = p / lat.cos() - n;
        lat = z.atan2(p * (1.0 - e2 * n / (n + height)));
    }
    (lat, lon, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::to_deg;

    // Wettzell 20 m (WETTZELL) from the IVS catalog.
    fn wettzell() -> Position {
        Position::from_f64(4_075_539.514, 931_735.635, 4_801_629.356)
    }

    #[test]
    fn geodetic_latitude_and_longitude() {
        let pos = wettzell();
        assert!((to_deg(pos.lat()) - 49.1450).abs() < 1e-3);
        assert!((to_deg(pos.lon()) - 12.8775).abs() < 1e-3);
        assert!((pos.height().value() - 669.1).abs() < 1.0);
    }

    #[test]
    fn equator_prime_meridian() {
        let pos = Position::from_f64(WGS84_A, 0.0, 0.0);
        assert!(pos.lat().value().abs() < 1e-12);
        assert!(pos.lon().value().abs() < 1e-12);
        assert!(pos.height().value().abs() < 1e-6);
    }

    #[test]
    fn pole_does_not_divide_by_zero() {
        let pos = Position::from_f64(0.0, 0.0, 6_356_752.314);
        assert!((to_deg(pos.lat()) - 90.0).abs() < 1e-9);
        assert!(pos.height().value().abs() < 1e-2);
    }

    #[test]
    fn distance_and_delta_are_consistent() {
        let a = Position::from_f64(0.0, 0.0, 0.0);
        let b = Position::from_f64(3.0, 4.0, 12.0);
        assert_eq!(a.distance(&b).value(), 13.0);
        let (dx, dy, dz) = a.delta(&b);
        assert_eq!((dx.value(), dy.value(), dz.value()), (3.0, 4.0, 12.0));
        let (rx, _, _) = b.delta(&a);
        assert_eq!(rx.value(), -3.0);
    }
}
