//! Antenna slew model.

use qtty::{Radians, Seconds};
use thiserror::Error;

use crate::pointing::PointingVector;
use crate::units::to_deg;

/// Errors raised while building an antenna description.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AntennaError {
    #[error("Axis {axis} slew rate must be positive, got {rate_deg_per_s} deg/s")]
    NonPositiveRate { axis: u8, rate_deg_per_s: f64 },

    #[error("Axis {axis} settling time must be non-negative, got {seconds} s")]
    NegativeSettling { axis: u8, seconds: f64 },
}

/// Rounding noise ignored before taking the ceiling.
const ROUNDING_SLACK: f64 = 1e-9;

/// Slew dynamics of a two-axis antenna.
///
/// Each axis moves at a constant rate and needs a fixed settling time once it
/// arrives. The axes move simultaneously, so the slower one decides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Antenna {
    /// Axis 1 rate in radians per second.
    rate1: f64,
    con1: Seconds,
    /// Axis 2 rate in radians per second.
    rate2: f64,
    con2: Seconds,
}

impl Antenna {
    /// Creates a slew model from rates in degrees per second and settling
    /// constants.
    pub fn new(
        rate1_deg_per_s: f64,
        con1: Seconds,
        rate2_deg_per_s: f64,
        con2: Seconds,
    ) -> Result<Self, AntennaError> {
        for (axis, rate) in [(1, rate1_deg_per_s), (2, rate2_deg_per_s)] {
            if !(rate.is_finite() && rate > 0.0) {
                return Err(AntennaError::NonPositiveRate {
                    axis,
                    rate_deg_per_s: rate,
                });
            }
        }
        for (axis, con) in [(1, con1), (2, con2)] {
            if !(con.value().is_finite() && con.value() >= 0.0) {
                return Err(AntennaError::NegativeSettling {
                    axis,
                    seconds: con.value(),
                });
            }
        }
        Ok(Self {
            rate1: rate1_deg_per_s.to_radians(),
            con1,
            rate2: rate2_deg_per_s.to_radians(),
            con2,
        })
    }

    /// Axis 1 rate in degrees per second.
    pub fn rate1_deg_per_s(&self) -> f64 {
        self.rate1.to_degrees()
    }

    /// Axis 2 rate in degrees per second.
    pub fn rate2_deg_per_s(&self) -> f64 {
        self.rate2.to_degrees()
    }

    pub const fn con1(&self) -> Seconds {
        self.con1
    }

    pub const fn con2(&self) -> Seconds {
        self.con2
    }

    /// Time for one axis to travel `delta` and settle.
    fn axis_time(delta: Radians, rate: f64, con: Seconds) -> f64 {
        delta.value().abs() / rate + con.value()
    }

    /// Whole seconds needed to move between two pointings, rounded up.
    pub fn slew_time(&self, from: &PointingVector, to: &PointingVector) -> Seconds {
        let t1 = Self::axis_time(to.axis1() - from.axis1(), self.rate1, self.con1);
        let t2 = Self::axis_time(to.axis2() - from.axis2(), self.rate2, self.con2);
        Seconds::new((t1.max(t2) - ROUNDING_SLACK).ceil().max(0.0))
    }
}

impl std::fmt::Display for Antenna {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "axis1 {:.2} deg/s + {:.1} s, axis2 {:.2} deg/s + {:.1} s",
            to_deg(Radians::new(self.rate1)),
            self.con1.value(),
            to_deg(Radians::new(self.rate2)),
            self.con2.value()
        )
    }
}
